pub mod cluster;
pub mod cluster_unit;
pub mod course;
pub mod course_cluster;
pub mod course_unit;
pub mod permission;
pub mod timetable;
pub mod timetable_cluster;
pub mod unit;
pub mod user;
pub mod user_permission;
