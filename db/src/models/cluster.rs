use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DbErr, QueryOrder, Set};
use serde::Serialize;

/// A grouping of units taught together, offered as part of one or more courses.
///
/// Clusters carry no behaviour of their own beyond their relations:
/// - `courses`: many-to-many through `course_cluster` (timestamped)
/// - `units`: many-to-many through `cluster_unit` (timestamped)
/// - `timetables`: one-to-many, owned by this cluster
/// - `shared_timetables`: many-to-many through `timetable_cluster`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "clusters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub title: String,
    pub qualification: Option<String>,
    pub state_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::timetable::Entity")]
    Timetables,

    #[sea_orm(has_many = "super::course_cluster::Entity")]
    CourseCluster,

    #[sea_orm(has_many = "super::cluster_unit::Entity")]
    ClusterUnit,

    #[sea_orm(has_many = "super::timetable_cluster::Entity")]
    TimetableCluster,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_cluster::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_cluster::Relation::Cluster.def().rev())
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        super::cluster_unit::Relation::Unit.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::cluster_unit::Relation::Cluster.def().rev())
    }
}

impl Related<super::timetable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timetables.def()
    }
}

/// Timetables shared with a cluster through `timetable_cluster`.
///
/// A separate link because `Related<timetable::Entity>` already names the owned ones.
pub struct SharedTimetables;

impl Linked for SharedTimetables {
    type FromEntity = Entity;
    type ToEntity = super::timetable::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::timetable_cluster::Relation::Cluster.def().rev(),
            super::timetable_cluster::Relation::Timetable.def(),
        ]
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        code: &str,
        title: &str,
        qualification: Option<&str>,
        state_code: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            code: Set(code.to_owned()),
            title: Set(title.to_owned()),
            qualification: Set(qualification.map(str::to_owned)),
            state_code: Set(state_code.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn courses<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<super::course::Model>, DbErr> {
        self.find_related(super::course::Entity)
            .order_by_asc(super::course::Column::Id)
            .all(db)
            .await
    }

    pub async fn units<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<super::unit::Model>, DbErr> {
        self.find_related(super::unit::Entity)
            .order_by_asc(super::unit::Column::Id)
            .all(db)
            .await
    }

    pub async fn timetables<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<super::timetable::Model>, DbErr> {
        self.find_related(super::timetable::Entity)
            .order_by_asc(super::timetable::Column::Id)
            .all(db)
            .await
    }

    pub async fn shared_timetables<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<super::timetable::Model>, DbErr> {
        self.find_linked(SharedTimetables).all(db).await
    }
}
