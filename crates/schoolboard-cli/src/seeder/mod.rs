//! Synthetic data for development databases.
//!
//! Entities are written in dependency order inside one transaction:
//! admin, grades, classes, subjects, teachers (with subject links),
//! class supervisors, lessons, parents, students, exams and assignments,
//! results, attendance, events and announcements. Foreign keys are spread
//! by cycling an index over the ids actually inserted, so every reference
//! points at an existing row. Seeded people get no identity-provider
//! accounts.

pub mod coursework;
pub mod models;
pub mod notices;
pub mod people;
pub mod school;

use sqlx::query_builder::Separated;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use std::time::Instant;

pub use models::{SeedConfig, SeedError, SeedReport};

/// Rows per multi-value INSERT.
const BATCH_SIZE: usize = 500;

/// Prefix of every seeded user id; `clear-seed` keeps admins without it.
pub const SEED_ID_PREFIX: &str = "seed_";

/// `items[index mod len]`.
///
/// # Panics
///
/// Panics when `items` is empty; [`SeedConfig::check`] rules that out for
/// every referenced entity.
pub fn cycle<T>(items: &[T], index: usize) -> &T {
    &items[index % items.len()]
}

/// Inserts `rows` in batches and returns the generated integer ids in input
/// order.
async fn insert_returning_ids<T, F>(
    tx: &mut Transaction<'_, Postgres>,
    head: &str,
    rows: &[T],
    mut push_row: F,
) -> Result<Vec<i32>, SeedError>
where
    F: FnMut(&mut Separated<'_, '_, Postgres, &'static str>, &T),
{
    let mut ids = Vec::with_capacity(rows.len());
    for chunk in rows.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(head);
        query.push_values(chunk, |mut row, item| push_row(&mut row, item));
        query.push(" RETURNING id");

        let chunk_ids: Vec<i32> = query.build_query_scalar().fetch_all(&mut **tx).await?;
        ids.extend(chunk_ids);
    }
    Ok(ids)
}

async fn insert_rows<T, F>(
    tx: &mut Transaction<'_, Postgres>,
    head: &str,
    rows: &[T],
    mut push_row: F,
) -> Result<u64, SeedError>
where
    F: FnMut(&mut Separated<'_, '_, Postgres, &'static str>, &T),
{
    let mut inserted = 0;
    for chunk in rows.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(head);
        query.push_values(chunk, |mut row, item| push_row(&mut row, item));
        inserted += query.build().execute(&mut **tx).await?.rows_affected();
    }
    Ok(inserted)
}

/// Seeds every entity. Fails without writing anything if any stage fails,
/// e.g. because the database already holds seeded grades.
pub async fn seed_all(db: &PgPool, config: &SeedConfig) -> Result<SeedReport, SeedError> {
    config.check()?;
    let start_time = Instant::now();
    let now = chrono::Utc::now();

    println!("🌱 Starting database seeding...\n");

    let mut tx = db.begin().await?;

    let admins = school::seed_admin(&mut tx).await?;
    let grade_ids = school::seed_grades(&mut tx, config.grades).await?;
    let classes = school::seed_classes(&mut tx, &grade_ids, config.classes_per_grade).await?;
    let subject_ids = school::seed_subjects(&mut tx).await?;
    let teacher_ids = people::seed_teachers(&mut tx, config.teachers, &subject_ids, now).await?;

    let class_ids: Vec<i32> = classes.iter().map(|(class_id, _)| *class_id).collect();
    school::assign_supervisors(&mut tx, &class_ids, &teacher_ids).await?;

    let lesson_ids = coursework::seed_lessons(
        &mut tx,
        config.lessons,
        &subject_ids,
        &class_ids,
        &teacher_ids,
        now,
    )
    .await?;

    let parent_ids = people::seed_parents(&mut tx, config.parents).await?;
    let student_ids =
        people::seed_students(&mut tx, config.students, &parent_ids, &classes, now).await?;

    let exam_ids = coursework::seed_exams(&mut tx, config.exams, &lesson_ids, now).await?;
    let assignment_ids =
        coursework::seed_assignments(&mut tx, config.assignments, &lesson_ids, now).await?;
    let results = coursework::seed_results(
        &mut tx,
        config.results,
        &exam_ids,
        &assignment_ids,
        &student_ids,
    )
    .await?;
    let attendance =
        coursework::seed_attendance(&mut tx, config.attendance, &student_ids, &lesson_ids, now)
            .await?;

    let events = notices::seed_events(&mut tx, config.events, &class_ids, now).await?;
    let announcements =
        notices::seed_announcements(&mut tx, config.announcements, &class_ids, now).await?;

    tx.commit().await?;

    let report = SeedReport {
        admins,
        grades: grade_ids.len(),
        classes: class_ids.len(),
        subjects: subject_ids.len(),
        teachers: teacher_ids.len(),
        lessons: lesson_ids.len(),
        parents: parent_ids.len(),
        students: student_ids.len(),
        exams: exam_ids.len(),
        assignments: assignment_ids.len(),
        results,
        attendance,
        events,
        announcements,
    };

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    println!("   {:?}", report);

    Ok(report)
}

/// Deletes seeded data in reverse dependency order.
///
/// Everything except admins is removed; admins are removed only when their
/// id carries [`SEED_ID_PREFIX`], so accounts made with `create-admin`
/// survive.
pub async fn clear_all(db: &PgPool) -> Result<u64, SeedError> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let mut tx = db.begin().await?;
    let mut total = 0;

    for table in [
        "announcements",
        "events",
        "attendances",
        "results",
        "assignments",
        "exams",
        "students",
        "parents",
        "lessons",
        "subject_teachers",
        "classes",
        "teachers",
        "subjects",
        "grades",
    ] {
        let deleted = sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&mut *tx)
            .await?
            .rows_affected();
        println!("   ✓ {}: {}", table, deleted);
        total += deleted;
    }

    let admins = sqlx::query("DELETE FROM admins WHERE starts_with(id, $1)")
        .bind(SEED_ID_PREFIX)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    println!("   ✓ admins: {}", admins);
    total += admins;

    tx.commit().await?;

    println!(
        "\n✅ Deleted {} rows in {:?}",
        total,
        start_time.elapsed()
    );

    Ok(total)
}
