use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DbErr, Set};
use std::collections::BTreeSet;

use crate::sync::{SyncDelta, reconcile};

/// Join row linking a course to a cluster. Timestamps record when the link was made.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_cluster")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub cluster_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::cluster::Entity",
        from = "Column::ClusterId",
        to = "super::cluster::Column::Id"
    )]
    Cluster,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::cluster::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cluster.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn cluster_ids<C: ConnectionTrait>(db: &C, course_id: i64) -> Result<BTreeSet<i64>, DbErr> {
        Ok(Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .all(db)
            .await?
            .into_iter()
            .map(|link| link.cluster_id)
            .collect())
    }

    /// Makes the course's cluster links equal `desired` and returns what changed.
    pub async fn sync<C: ConnectionTrait>(
        db: &C,
        course_id: i64,
        desired: &BTreeSet<i64>,
    ) -> Result<SyncDelta, DbErr> {
        let current = Self::cluster_ids(db, course_id).await?;
        let delta = reconcile(&current, desired);

        if !delta.detach.is_empty() {
            Entity::delete_many()
                .filter(Column::CourseId.eq(course_id))
                .filter(Column::ClusterId.is_in(delta.detach.clone()))
                .exec(db)
                .await?;
        }

        if !delta.attach.is_empty() {
            let now = Utc::now();
            let rows = delta.attach.iter().map(|&cluster_id| ActiveModel {
                course_id: Set(course_id),
                cluster_id: Set(cluster_id),
                created_at: Set(now),
                updated_at: Set(now),
            });
            Entity::insert_many(rows).exec_without_returning(db).await?;
        }

        Ok(delta)
    }

    pub async fn detach_all<C: ConnectionTrait>(db: &C, course_id: i64) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
