//! # Schoolboard Models
//!
//! Database rows, form DTOs and list filters for every school entity.
//!
//! Each entity module pairs a `FromRow` record with a `Deserialize + Validate`
//! form. Forms accept both HTML-form strings and typed JSON; coercion lives
//! in `schoolboard_core::serde` and constraint checks in the `validator`
//! attributes.
//!
//! # Modules
//!
//! - [`enums`]: `UserSex`, `Day`, `BloodType`
//! - [`admins`], [`teachers`], [`students`], [`parents`]: user-bearing entities
//! - [`grades`], [`classes`], [`subjects`], [`lessons`]: school structure
//! - [`exams`], [`assignments`], [`results`], [`attendance`]: coursework
//! - [`events`], [`announcements`]: class-scoped or school-wide notices

pub mod admins;
pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod classes;
pub mod enums;
pub mod events;
pub mod exams;
pub mod grades;
pub mod lessons;
pub mod parents;
pub mod results;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use admins::Admin;
pub use announcements::{Announcement, AnnouncementForm};
pub use assignments::{Assignment, AssignmentForm};
pub use attendance::{Attendance, AttendanceFilter, AttendanceForm};
pub use classes::{Class, ClassFilter, ClassForm, ClassWithStats};
pub use enums::{BloodType, Day, UserSex};
pub use events::{ClassScopeFilter, Event, EventForm};
pub use exams::{Exam, ExamForm, LessonWorkFilter};
pub use grades::Grade;
pub use lessons::{Lesson, LessonFilter, LessonForm};
pub use parents::{Parent, ParentDetail, ParentForm};
pub use results::{ExamResult, ResultFilter, ResultForm};
pub use students::{Student, StudentFilter, StudentForm};
pub use subjects::{Subject, SubjectDetail, SubjectFilter, SubjectForm};
pub use teachers::{Teacher, TeacherDetail, TeacherFilter, TeacherForm};
