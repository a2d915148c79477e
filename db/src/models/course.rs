use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, Condition, DbErr, LoaderTrait, PaginatorTrait, QueryOrder, Set};
use serde::Serialize;

use crate::models::{cluster, course_cluster, course_unit, unit};
use crate::sync::{SyncDelta, desired_set};

/// A nationally recognised course (qualification) offered by the institute.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub national_code: String,
    /// Australian Qualifications Framework level, e.g. `IV`.
    pub aqf_level: String,
    pub title: String,
    /// Status on training.gov.au.
    pub tga_status: Option<String>,
    pub state_code: Option<String>,
    pub nominal_hours: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_cluster::Entity")]
    CourseCluster,

    #[sea_orm(has_many = "super::course_unit::Entity")]
    CourseUnit,
}

impl Related<super::cluster::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_cluster::Relation::Cluster.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_cluster::Relation::Course.def().rev())
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_unit::Relation::Unit.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_unit::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Columns matched by a search term. `nominal_hours` is compared as text.
const SEARCHABLE_COLUMNS: [&str; 6] = [
    "national_code",
    "aqf_level",
    "title",
    "tga_status",
    "state_code",
    "CAST(nominal_hours AS TEXT)",
];

/// Field values for a new course.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub national_code: String,
    pub aqf_level: String,
    pub title: String,
    pub tga_status: Option<String>,
    pub state_code: Option<String>,
    pub nominal_hours: Option<i32>,
}

/// Fields to overwrite on an existing course. `None` leaves the stored value alone;
/// `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseChanges {
    pub national_code: Option<String>,
    pub aqf_level: Option<String>,
    pub title: Option<String>,
    pub tga_status: Option<Option<String>>,
    pub state_code: Option<Option<String>>,
    pub nominal_hours: Option<Option<i32>>,
}

/// A course with its clusters and units loaded, each sorted by id.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetail {
    pub course: Model,
    pub clusters: Vec<cluster::Model>,
    pub units: Vec<unit::Model>,
}

impl Model {
    pub async fn create<C: ConnectionTrait>(db: &C, fields: &NewCourse) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            national_code: Set(fields.national_code.clone()),
            aqf_level: Set(fields.aqf_level.clone()),
            title: Set(fields.title.clone()),
            tga_status: Set(fields.tga_status.clone()),
            state_code: Set(fields.state_code.clone()),
            nominal_hours: Set(fields.nominal_hours),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Writes `changes` over this course and bumps `updated_at`.
    pub async fn update_fields<C: ConnectionTrait>(
        self,
        db: &C,
        changes: &CourseChanges,
    ) -> Result<Model, DbErr> {
        let mut active: ActiveModel = self.into();

        if let Some(national_code) = &changes.national_code {
            active.national_code = Set(national_code.clone());
        }
        if let Some(aqf_level) = &changes.aqf_level {
            active.aqf_level = Set(aqf_level.clone());
        }
        if let Some(title) = &changes.title {
            active.title = Set(title.clone());
        }
        if let Some(tga_status) = &changes.tga_status {
            active.tga_status = Set(tga_status.clone());
        }
        if let Some(state_code) = &changes.state_code {
            active.state_code = Set(state_code.clone());
        }
        if let Some(nominal_hours) = changes.nominal_hours {
            active.nominal_hours = Set(nominal_hours);
        }
        active.updated_at = Set(Utc::now());

        active.update(db).await
    }

    /// All courses, or those where any searchable column contains `term`.
    ///
    /// Matching is a case-sensitive substring test (`instr`), not SQLite's
    /// case-folding `LIKE`. Results are in id order.
    pub async fn search<C: ConnectionTrait>(db: &C, term: Option<&str>) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();

        if let Some(term) = term {
            let mut any = Condition::any();
            for column in SEARCHABLE_COLUMNS {
                any = any.add(Expr::cust_with_values(
                    format!("instr({column}, ?) > 0"),
                    [term.to_owned()],
                ));
            }
            query = query.filter(any);
        }

        query.order_by_asc(Column::Id).all(db).await
    }

    pub async fn total<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }

    pub async fn find_detail<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<CourseDetail>, DbErr> {
        let Some(course) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        Ok(Self::with_relations(db, vec![course]).await?.pop())
    }

    /// Eager-loads clusters and units for every course in two queries per relation.
    pub async fn with_relations<C: ConnectionTrait>(
        db: &C,
        courses: Vec<Model>,
    ) -> Result<Vec<CourseDetail>, DbErr> {
        if courses.is_empty() {
            return Ok(Vec::new());
        }

        let clusters = courses
            .load_many_to_many(cluster::Entity, course_cluster::Entity, db)
            .await?;
        let units = courses
            .load_many_to_many(unit::Entity, course_unit::Entity, db)
            .await?;

        Ok(courses
            .into_iter()
            .zip(clusters)
            .zip(units)
            .map(|((course, mut clusters), mut units)| {
                clusters.sort_by_key(|c| c.id);
                units.sort_by_key(|u| u.id);
                CourseDetail {
                    course,
                    clusters,
                    units,
                }
            })
            .collect())
    }

    /// Replaces the cluster links with exactly `cluster_ids`.
    pub async fn sync_clusters<C: ConnectionTrait>(&self, db: &C, cluster_ids: &[i64]) -> Result<SyncDelta, DbErr> {
        course_cluster::Model::sync(db, self.id, &desired_set(cluster_ids)).await
    }

    /// Replaces the unit links with exactly `unit_ids`.
    pub async fn sync_units<C: ConnectionTrait>(&self, db: &C, unit_ids: &[i64]) -> Result<SyncDelta, DbErr> {
        course_unit::Model::sync(db, self.id, &desired_set(unit_ids)).await
    }

    /// Removes every cluster and unit link, then the course row itself.
    ///
    /// Returns the removed course so callers can still describe it.
    pub async fn destroy<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        let clusters = course_cluster::Model::detach_all(db, self.id).await?;
        let units = course_unit::Model::detach_all(db, self.id).await?;
        tracing::debug!(course_id = self.id, clusters, units, "Detached course links");

        Entity::delete_by_id(self.id).exec(db).await?;
        Ok(self)
    }

    /// `"<aqf_level> <title>"`, as shown in deletion messages.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.aqf_level, self.title)
    }
}
