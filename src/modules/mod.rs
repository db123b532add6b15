pub mod accounts;
pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod classes;
pub mod events;
pub mod exams;
pub mod home;
pub mod lessons;
pub mod listing;
pub mod parents;
pub mod results;
pub mod students;
pub mod subjects;
pub mod teachers;
