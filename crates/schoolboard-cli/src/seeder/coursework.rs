//! Lessons, exams, assignments, results and attendance.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use rand::Rng;
use rayon::prelude::*;
use schoolboard_models::Day;
use sqlx::{Postgres, Transaction};
use std::time::Instant;

use super::models::{AttendanceSeed, CourseworkSeed, LessonSeed, ResultSeed, SeedError};
use super::{cycle, insert_returning_ids, insert_rows};

/// Monday 00:00 UTC of the week containing `now`.
fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let monday = now.date_naive() - Duration::days(now.weekday().num_days_from_monday() as i64);
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Lesson `i` uses subject, class and teacher `i mod n` of each list, on a
/// random weekday of the current week, starting between 08:00 and 13:00.
pub fn generate_lessons(
    count: usize,
    subject_ids: &[i32],
    class_ids: &[i32],
    teacher_ids: &[String],
    now: DateTime<Utc>,
) -> Vec<LessonSeed> {
    let monday = week_start(now);

    (0..count)
        .into_par_iter()
        .map(|i| {
            let day_index = rand::thread_rng().gen_range(0..Day::ALL.len());
            let start_time =
                monday + Duration::days(day_index as i64) + Duration::hours(8 + (i % 6) as i64);

            LessonSeed {
                name: format!("Lesson {}", i + 1),
                day: Day::ALL[day_index],
                start_time,
                end_time: start_time + Duration::hours(1),
                subject_id: *cycle(subject_ids, i),
                class_id: *cycle(class_ids, i),
                teacher_id: cycle(teacher_ids, i).clone(),
            }
        })
        .collect()
}

pub async fn seed_lessons(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
    subject_ids: &[i32],
    class_ids: &[i32],
    teacher_ids: &[String],
    now: DateTime<Utc>,
) -> Result<Vec<i32>, SeedError> {
    let start_time = Instant::now();
    println!("🗓️  Seeding {} lessons...", count);

    let lessons = generate_lessons(count, subject_ids, class_ids, teacher_ids, now);
    let ids = insert_returning_ids(
        tx,
        "INSERT INTO lessons (name, day, start_time, end_time, subject_id, class_id, teacher_id) ",
        &lessons,
        |row, lesson| {
            row.push_bind(lesson.name.clone())
                .push_bind(lesson.day)
                .push_bind(lesson.start_time)
                .push_bind(lesson.end_time)
                .push_bind(lesson.subject_id)
                .push_bind(lesson.class_id)
                .push_bind(lesson.teacher_id.clone());
        },
    )
    .await?;

    println!("   ✓ Inserted {} lessons in {:?}", ids.len(), start_time.elapsed());
    Ok(ids)
}

/// Exams run for an hour starting an hour from now; assignments open in an
/// hour and are due a day later.
pub fn generate_coursework(
    label: &str,
    count: usize,
    lesson_ids: &[i32],
    length: Duration,
    now: DateTime<Utc>,
) -> Vec<CourseworkSeed> {
    let starts = now + Duration::hours(1);
    (0..count)
        .map(|i| CourseworkSeed {
            title: format!("{} {}", label, i + 1),
            starts,
            ends: starts + length,
            lesson_id: *cycle(lesson_ids, i),
        })
        .collect()
}

async fn insert_coursework(
    tx: &mut Transaction<'_, Postgres>,
    head: &str,
    rows: &[CourseworkSeed],
) -> Result<Vec<i32>, SeedError> {
    insert_returning_ids(tx, head, rows, |row, work| {
        row.push_bind(work.title.clone())
            .push_bind(work.starts)
            .push_bind(work.ends)
            .push_bind(work.lesson_id);
    })
    .await
}

pub async fn seed_exams(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
    lesson_ids: &[i32],
    now: DateTime<Utc>,
) -> Result<Vec<i32>, SeedError> {
    let start_time = Instant::now();
    println!("📝 Seeding {} exams...", count);

    let exams = generate_coursework("Exam", count, lesson_ids, Duration::hours(1), now);
    let ids = insert_coursework(
        tx,
        "INSERT INTO exams (title, start_time, end_time, lesson_id) ",
        &exams,
    )
    .await?;

    println!("   ✓ Inserted {} exams in {:?}", ids.len(), start_time.elapsed());
    Ok(ids)
}

pub async fn seed_assignments(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
    lesson_ids: &[i32],
    now: DateTime<Utc>,
) -> Result<Vec<i32>, SeedError> {
    let start_time = Instant::now();
    println!("📎 Seeding {} assignments...", count);

    let assignments = generate_coursework("Assignment", count, lesson_ids, Duration::days(1), now);
    let ids = insert_coursework(
        tx,
        "INSERT INTO assignments (title, start_date, due_date, lesson_id) ",
        &assignments,
    )
    .await?;

    println!("   ✓ Inserted {} assignments in {:?}", ids.len(), start_time.elapsed());
    Ok(ids)
}

/// The first half of the results grade exams, the rest grade assignments.
/// Each result references exactly one of the two. With neither exams nor
/// assignments there is nothing to grade and no results are generated.
pub fn generate_results(
    count: usize,
    exam_ids: &[i32],
    assignment_ids: &[i32],
    student_ids: &[String],
) -> Vec<ResultSeed> {
    if exam_ids.is_empty() && assignment_ids.is_empty() {
        return Vec::new();
    }
    let exam_share = if assignment_ids.is_empty() {
        count
    } else if exam_ids.is_empty() {
        0
    } else {
        count.div_ceil(2)
    };

    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let (exam_id, assignment_id) = if i < exam_share {
                (Some(*cycle(exam_ids, i)), None)
            } else {
                (None, Some(*cycle(assignment_ids, i - exam_share)))
            };
            ResultSeed {
                score: rng.gen_range(40..=100),
                exam_id,
                assignment_id,
                student_id: cycle(student_ids, i).clone(),
            }
        })
        .collect()
}

pub async fn seed_results(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
    exam_ids: &[i32],
    assignment_ids: &[i32],
    student_ids: &[String],
) -> Result<usize, SeedError> {
    let start_time = Instant::now();
    println!("🏅 Seeding {} results...", count);

    let results = generate_results(count, exam_ids, assignment_ids, student_ids);
    let inserted = insert_rows(
        tx,
        "INSERT INTO results (score, exam_id, assignment_id, student_id) ",
        &results,
        |row, result| {
            row.push_bind(result.score)
                .push_bind(result.exam_id)
                .push_bind(result.assignment_id)
                .push_bind(result.student_id.clone());
        },
    )
    .await?;

    println!("   ✓ Inserted {} results in {:?}", inserted, start_time.elapsed());
    Ok(inserted as usize)
}

pub fn generate_attendance(
    count: usize,
    student_ids: &[String],
    lesson_ids: &[i32],
    now: DateTime<Utc>,
) -> Vec<AttendanceSeed> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| AttendanceSeed {
            date: now,
            present: rng.gen_bool(0.9),
            student_id: cycle(student_ids, i).clone(),
            lesson_id: *cycle(lesson_ids, i),
        })
        .collect()
}

pub async fn seed_attendance(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
    student_ids: &[String],
    lesson_ids: &[i32],
    now: DateTime<Utc>,
) -> Result<usize, SeedError> {
    let start_time = Instant::now();
    println!("✔️  Seeding {} attendance records...", count);

    let records = generate_attendance(count, student_ids, lesson_ids, now);
    let inserted = insert_rows(
        tx,
        "INSERT INTO attendances (date, present, student_id, lesson_id) ",
        &records,
        |row, record| {
            row.push_bind(record.date)
                .push_bind(record.present)
                .push_bind(record.student_id.clone())
                .push_bind(record.lesson_id);
        },
    )
    .await?;

    println!("   ✓ Inserted {} attendance records in {:?}", inserted, start_time.elapsed());
    Ok(inserted as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike, Weekday};

    fn teachers() -> Vec<String> {
        vec!["t1".into(), "t2".into()]
    }

    #[test]
    fn lessons_fall_on_their_weekday() {
        let now = Utc.with_ymd_and_hms(2024, 11, 20, 15, 0, 0).unwrap();
        let lessons = generate_lessons(12, &[1, 2, 3], &[7, 8], &teachers(), now);

        for (i, lesson) in lessons.iter().enumerate() {
            let weekday = lesson.start_time.weekday();
            assert_ne!(weekday, Weekday::Sat);
            assert_ne!(weekday, Weekday::Sun);
            assert_eq!(
                Day::ALL[weekday.num_days_from_monday() as usize],
                lesson.day
            );
            assert_eq!(lesson.start_time.hour() as usize, 8 + i % 6);
            assert_eq!(lesson.end_time - lesson.start_time, Duration::hours(1));
            assert_eq!(lesson.class_id, [7, 8][i % 2]);
        }
    }

    #[test]
    fn results_split_between_exams_and_assignments() {
        let students = vec!["s1".to_string()];
        let results = generate_results(5, &[1, 2], &[9], &students);

        let exams = results.iter().filter(|r| r.exam_id.is_some()).count();
        assert_eq!(exams, 3);
        assert!(
            results
                .iter()
                .all(|r| r.exam_id.is_some() != r.assignment_id.is_some())
        );
        assert!(results.iter().all(|r| (40..=100).contains(&r.score)));
    }

    #[test]
    fn results_fall_back_to_whichever_kind_exists() {
        let students = vec!["s1".to_string()];
        assert!(generate_results(4, &[], &[3], &students)
            .iter()
            .all(|r| r.assignment_id == Some(3)));
        assert!(generate_results(4, &[], &[], &students).is_empty());
    }

    #[test]
    fn assignments_are_due_a_day_after_opening() {
        let now = Utc::now();
        let work = generate_coursework("Assignment", 3, &[5], Duration::days(1), now);
        assert_eq!(work[2].title, "Assignment 3");
        assert_eq!(work[0].ends - work[0].starts, Duration::days(1));
        assert!(work.iter().all(|w| w.lesson_id == 5));
    }
}
