use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DbErr, Set};
use serde::Serialize;

/// A unit of competency. Only referenced here as a link target.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "units")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub national_code: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_unit::Entity")]
    CourseUnit,

    #[sea_orm(has_many = "super::cluster_unit::Entity")]
    ClusterUnit,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_unit::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_unit::Relation::Unit.def().rev())
    }
}

impl Related<super::cluster::Entity> for Entity {
    fn to() -> RelationDef {
        super::cluster_unit::Relation::Cluster.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::cluster_unit::Relation::Unit.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(db: &C, national_code: &str, title: &str) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            national_code: Set(national_code.to_owned()),
            title: Set(title.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
