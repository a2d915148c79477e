pub mod m202504220001_create_users;
pub mod m202504220002_create_permissions;
pub mod m202504220003_create_courses;
pub mod m202504220004_create_clusters;
pub mod m202504220005_create_units;
pub mod m202504220006_create_course_cluster;
pub mod m202504220007_create_course_unit;
pub mod m202504220008_create_cluster_unit;
pub mod m202504220009_create_timetables;
pub mod m202504220010_create_timetable_cluster;
