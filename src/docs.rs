//! OpenAPI document served at `/swagger-ui` and `/scalar`.

use schoolboard_core::{FailureKind, FieldError, PaginationMeta, Role, SortOrder};
use schoolboard_identity::Account;
use schoolboard_models::{
    Announcement, AnnouncementForm, Assignment, AssignmentForm, Attendance, AttendanceForm,
    BloodType, Class, ClassForm, ClassWithStats, Day, Event, EventForm, Exam, ExamForm,
    ExamResult, Lesson, LessonForm, Parent, ParentDetail, ParentForm, ResultForm, Student,
    StudentForm, Subject, SubjectDetail, SubjectForm, Teacher, TeacherDetail, TeacherForm,
    UserSex,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::home::model::{
    HealthResponse, HomeResponse, ProfileResponse, SchoolCounts, SignInResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::list_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::parents::controller::create_parent,
        crate::modules::parents::controller::list_parents,
        crate::modules::parents::controller::get_parent,
        crate::modules::parents::controller::update_parent,
        crate::modules::parents::controller::delete_parent,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::list_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::list_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::list_lessons,
        crate::modules::lessons::controller::get_lesson,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::exams::controller::create_exam,
        crate::modules::exams::controller::list_exams,
        crate::modules::exams::controller::get_exam,
        crate::modules::exams::controller::update_exam,
        crate::modules::exams::controller::delete_exam,
        crate::modules::assignments::controller::create_assignment,
        crate::modules::assignments::controller::list_assignments,
        crate::modules::assignments::controller::get_assignment,
        crate::modules::assignments::controller::update_assignment,
        crate::modules::assignments::controller::delete_assignment,
        crate::modules::results::controller::create_result,
        crate::modules::results::controller::list_results,
        crate::modules::results::controller::get_result,
        crate::modules::results::controller::update_result,
        crate::modules::results::controller::delete_result,
        crate::modules::attendance::controller::create_attendance,
        crate::modules::attendance::controller::list_attendance,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::update_attendance,
        crate::modules::attendance::controller::delete_attendance,
        crate::modules::events::controller::create_event,
        crate::modules::events::controller::list_events,
        crate::modules::events::controller::get_event,
        crate::modules::events::controller::update_event,
        crate::modules::events::controller::delete_event,
        crate::modules::announcements::controller::create_announcement,
        crate::modules::announcements::controller::list_announcements,
        crate::modules::announcements::controller::get_announcement,
        crate::modules::announcements::controller::update_announcement,
        crate::modules::announcements::controller::delete_announcement,
        crate::modules::home::controller::role_home,
        crate::modules::home::controller::get_profile,
        crate::modules::home::controller::sign_in,
        crate::modules::home::controller::health,
    ),
    components(
        schemas(
            Role,
            UserSex,
            BloodType,
            Day,
            Teacher,
            TeacherDetail,
            TeacherForm,
            Student,
            StudentForm,
            Parent,
            ParentDetail,
            ParentForm,
            Subject,
            SubjectDetail,
            SubjectForm,
            Class,
            ClassWithStats,
            ClassForm,
            Lesson,
            LessonForm,
            Exam,
            ExamForm,
            Assignment,
            AssignmentForm,
            ExamResult,
            ResultForm,
            Attendance,
            AttendanceForm,
            Event,
            EventForm,
            Announcement,
            AnnouncementForm,
            FailureKind,
            FieldError,
            PaginationMeta,
            SortOrder,
            Account,
            HomeResponse,
            SchoolCounts,
            ProfileResponse,
            SignInResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Home", description = "Role homes, profile, sign-in and health"),
        (name = "Teachers", description = "Teacher records and their identity accounts"),
        (name = "Students", description = "Student records, enrolment and identity accounts"),
        (name = "Parents", description = "Parent records and their identity accounts"),
        (name = "Subjects", description = "Subjects and their teachers"),
        (name = "Classes", description = "Classes, capacity and supervisors"),
        (name = "Lessons", description = "Weekly timetable"),
        (name = "Exams", description = "Exams per lesson"),
        (name = "Assignments", description = "Assignments per lesson"),
        (name = "Results", description = "Exam and assignment scores"),
        (name = "Attendance", description = "Lesson attendance"),
        (name = "Events", description = "Class and school-wide events"),
        (name = "Announcements", description = "Class and school-wide announcements")
    ),
    info(
        title = "Schoolboard API",
        version = "0.1.0",
        description = "School management backend: role-based access, identity-provider backed accounts and CRUD over school entities.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
