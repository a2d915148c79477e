use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202504220001_create_users::Migration),
            Box::new(migrations::m202504220002_create_permissions::Migration),
            Box::new(migrations::m202504220003_create_courses::Migration),
            Box::new(migrations::m202504220004_create_clusters::Migration),
            Box::new(migrations::m202504220005_create_units::Migration),
            Box::new(migrations::m202504220006_create_course_cluster::Migration),
            Box::new(migrations::m202504220007_create_course_unit::Migration),
            Box::new(migrations::m202504220008_create_cluster_unit::Migration),
            Box::new(migrations::m202504220009_create_timetables::Migration),
            Box::new(migrations::m202504220010_create_timetable_cluster::Migration),
        ]
    }
}
