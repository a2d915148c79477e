use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DbErr, Set};
use serde::Serialize;

/// A recurring class slot, e.g. Monday 13:00 to 16:00, owned by one cluster.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "timetables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub cluster_id: i64,
    pub day_of_week: String,
    pub starts_at: String,
    pub ends_at: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cluster::Entity",
        from = "Column::ClusterId",
        to = "super::cluster::Column::Id",
        on_delete = "Cascade"
    )]
    Cluster,

    #[sea_orm(has_many = "super::timetable_cluster::Entity")]
    TimetableCluster,
}

impl Related<super::cluster::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cluster.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        cluster_id: i64,
        day_of_week: &str,
        starts_at: &str,
        ends_at: &str,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            cluster_id: Set(cluster_id),
            day_of_week: Set(day_of_week.to_owned()),
            starts_at: Set(starts_at.to_owned()),
            ends_at: Set(ends_at.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
