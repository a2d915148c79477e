use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DbErr, Set};

/// Shares a timetable with a cluster other than (or in addition to) its owner.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "timetable_cluster")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub timetable_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub cluster_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::timetable::Entity",
        from = "Column::TimetableId",
        to = "super::timetable::Column::Id"
    )]
    Timetable,

    #[sea_orm(
        belongs_to = "super::cluster::Entity",
        from = "Column::ClusterId",
        to = "super::cluster::Column::Id"
    )]
    Cluster,
}

impl Related<super::timetable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timetable.def()
    }
}

impl Related<super::cluster::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cluster.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn share<C: ConnectionTrait>(db: &C, timetable_id: i64, cluster_id: i64) -> Result<(), DbErr> {
        Entity::insert(ActiveModel {
            timetable_id: Set(timetable_id),
            cluster_id: Set(cluster_id),
        })
        .on_conflict(
            OnConflict::columns([Column::TimetableId, Column::ClusterId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
        Ok(())
    }
}
