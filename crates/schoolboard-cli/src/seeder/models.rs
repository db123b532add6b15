//! Seed rows and seeding configuration.

use chrono::{DateTime, Utc};
use schoolboard_models::{BloodType, Day, UserSex};

/// Error type shared by the seeding stages.
pub type SeedError = Box<dyn std::error::Error + Send + Sync>;

pub struct ClassSeed {
    pub name: String,
    pub capacity: i32,
    pub grade_id: i32,
}

/// Common columns of the three user-bearing tables.
pub struct PersonSeed {
    pub id: String,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

pub struct TeacherSeed {
    pub person: PersonSeed,
    pub blood_type: BloodType,
    pub sex: UserSex,
    pub birthday: DateTime<Utc>,
    pub subject_ids: Vec<i32>,
}

pub struct StudentSeed {
    pub person: PersonSeed,
    pub blood_type: BloodType,
    pub sex: UserSex,
    pub birthday: DateTime<Utc>,
    pub parent_id: String,
    pub class_id: i32,
    pub grade_id: i32,
}

pub struct LessonSeed {
    pub name: String,
    pub day: Day,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub subject_id: i32,
    pub class_id: i32,
    pub teacher_id: String,
}

/// Exams and assignments share a shape: a titled window tied to a lesson.
pub struct CourseworkSeed {
    pub title: String,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub lesson_id: i32,
}

pub struct ResultSeed {
    pub score: i32,
    pub exam_id: Option<i32>,
    pub assignment_id: Option<i32>,
    pub student_id: String,
}

pub struct AttendanceSeed {
    pub date: DateTime<Utc>,
    pub present: bool,
    pub student_id: String,
    pub lesson_id: i32,
}

pub struct NoticeSeed {
    pub title: String,
    pub description: String,
    pub starts: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub class_id: Option<i32>,
}

/// How many rows of each kind to generate.
///
/// Defaults reproduce the classic demo school: six grades with one class
/// each, ten subjects, fifteen teachers, thirty lessons, twenty-five
/// parents and fifty students.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub grades: usize,
    pub classes_per_grade: usize,
    pub teachers: usize,
    pub lessons: usize,
    pub parents: usize,
    pub students: usize,
    pub exams: usize,
    pub assignments: usize,
    pub results: usize,
    pub attendance: usize,
    pub events: usize,
    pub announcements: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            grades: 6,
            classes_per_grade: 1,
            teachers: 15,
            lessons: 30,
            parents: 25,
            students: 50,
            exams: 10,
            assignments: 10,
            results: 10,
            attendance: 10,
            events: 5,
            announcements: 5,
        }
    }
}

impl SeedConfig {
    /// Every entity that others point at needs at least one row, otherwise
    /// index cycling has nothing to cycle over.
    pub fn check(&self) -> Result<(), SeedError> {
        let referenced = [
            ("grades", self.grades),
            ("classes per grade", self.classes_per_grade),
            ("teachers", self.teachers),
            ("lessons", self.lessons),
            ("parents", self.parents),
            ("students", self.students),
        ];
        for (name, count) in referenced {
            if count == 0 {
                return Err(format!("{} must be at least 1", name).into());
            }
        }
        // Sections are lettered A..Z.
        if self.classes_per_grade > 26 {
            return Err("classes per grade must be at most 26".into());
        }
        Ok(())
    }

    pub fn total_classes(&self) -> usize {
        self.grades * self.classes_per_grade
    }
}

/// Row counts written by a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub admins: usize,
    pub grades: usize,
    pub classes: usize,
    pub subjects: usize,
    pub teachers: usize,
    pub lessons: usize,
    pub parents: usize,
    pub students: usize,
    pub exams: usize,
    pub assignments: usize,
    pub results: usize,
    pub attendance: usize,
    pub events: usize,
    pub announcements: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SeedConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(config.total_classes(), 6);
    }

    #[test]
    fn referenced_entities_cannot_be_empty() {
        let config = SeedConfig {
            parents: 0,
            ..Default::default()
        };
        let err = config.check().unwrap_err();
        assert!(err.to_string().contains("parents"));
    }
}
