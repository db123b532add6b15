//! Grades, classes, subjects and the admin account.

use rand::Rng;
use rayon::prelude::*;
use sqlx::{Postgres, Transaction};
use std::time::Instant;

use super::models::{ClassSeed, SeedError};
use super::{SEED_ID_PREFIX, cycle, insert_returning_ids};

pub const SUBJECT_NAMES: [&str; 10] = [
    "Mathematics",
    "Science",
    "English",
    "History",
    "Geography",
    "Physics",
    "Chemistry",
    "Biology",
    "Computer Science",
    "Art",
];

pub async fn seed_admin(tx: &mut Transaction<'_, Postgres>) -> Result<usize, SeedError> {
    let inserted = sqlx::query("INSERT INTO admins (id, username) VALUES ($1, $2)")
        .bind(format!("{}admin_1", SEED_ID_PREFIX))
        .bind("admin1")
        .execute(&mut **tx)
        .await?
        .rows_affected();
    println!("👤 Inserted seed admin `admin1`");
    Ok(inserted as usize)
}

pub async fn seed_grades(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
) -> Result<Vec<i32>, SeedError> {
    let start_time = Instant::now();
    println!("📊 Seeding {} grades...", count);

    let levels: Vec<i32> = (1..=count as i32).collect();
    let ids = insert_returning_ids(tx, "INSERT INTO grades (level) ", &levels, |row, level| {
        row.push_bind(*level);
    })
    .await?;

    println!("   ✓ Inserted {} grades in {:?}", ids.len(), start_time.elapsed());
    Ok(ids)
}

/// One class per section letter per grade: `1A`, `1B`, `2A`, ...
pub fn generate_classes(grade_ids: &[i32], per_grade: usize) -> Vec<ClassSeed> {
    grade_ids
        .par_iter()
        .enumerate()
        .flat_map(|(grade_idx, &grade_id)| {
            let mut rng = rand::thread_rng();
            (0..per_grade)
                .map(|section| ClassSeed {
                    name: format!("{}{}", grade_idx + 1, (b'A' + section as u8) as char),
                    capacity: rng.gen_range(15..=20),
                    grade_id,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Returns `(class_id, grade_id)` pairs.
pub async fn seed_classes(
    tx: &mut Transaction<'_, Postgres>,
    grade_ids: &[i32],
    per_grade: usize,
) -> Result<Vec<(i32, i32)>, SeedError> {
    let start_time = Instant::now();
    println!("🏫 Seeding {} classes ({} per grade)...", grade_ids.len() * per_grade, per_grade);

    let classes = generate_classes(grade_ids, per_grade);
    let ids = insert_returning_ids(
        tx,
        "INSERT INTO classes (name, capacity, grade_id) ",
        &classes,
        |row, class| {
            row.push_bind(class.name.clone())
                .push_bind(class.capacity)
                .push_bind(class.grade_id);
        },
    )
    .await?;

    println!("   ✓ Inserted {} classes in {:?}", ids.len(), start_time.elapsed());
    Ok(ids
        .into_iter()
        .zip(classes.iter().map(|class| class.grade_id))
        .collect())
}

pub async fn seed_subjects(tx: &mut Transaction<'_, Postgres>) -> Result<Vec<i32>, SeedError> {
    let start_time = Instant::now();
    println!("📚 Seeding {} subjects...", SUBJECT_NAMES.len());

    let ids = insert_returning_ids(tx, "INSERT INTO subjects (name) ", &SUBJECT_NAMES[..], |row, name| {
        row.push_bind(name.to_string());
    })
    .await?;

    println!("   ✓ Inserted {} subjects in {:?}", ids.len(), start_time.elapsed());
    Ok(ids)
}

/// Class `i` is supervised by teacher `i mod teachers`.
pub fn supervisor_pairs(class_ids: &[i32], teacher_ids: &[String]) -> (Vec<i32>, Vec<String>) {
    class_ids
        .iter()
        .enumerate()
        .map(|(i, &class_id)| (class_id, cycle(teacher_ids, i).clone()))
        .unzip()
}

pub async fn assign_supervisors(
    tx: &mut Transaction<'_, Postgres>,
    class_ids: &[i32],
    teacher_ids: &[String],
) -> Result<(), SeedError> {
    let (classes, supervisors) = supervisor_pairs(class_ids, teacher_ids);

    let updated = sqlx::query(
        "UPDATE classes c SET supervisor_id = s.teacher_id
         FROM UNNEST($1::int4[], $2::text[]) AS s(class_id, teacher_id)
         WHERE c.id = s.class_id",
    )
    .bind(&classes)
    .bind(&supervisors)
    .execute(&mut **tx)
    .await?
    .rows_affected();

    println!("   ✓ Assigned supervisors to {} classes", updated);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_lettered_per_grade() {
        let classes = generate_classes(&[7, 8], 2);
        let names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["1A", "1B", "2A", "2B"]);
        assert_eq!(classes[2].grade_id, 8);
        assert!(classes.iter().all(|c| (15..=20).contains(&c.capacity)));
    }

    #[test]
    fn supervisors_cycle_over_teachers() {
        let teachers = vec!["t1".to_string(), "t2".to_string()];
        let (classes, supervisors) = supervisor_pairs(&[1, 2, 3], &teachers);
        assert_eq!(classes, vec![1, 2, 3]);
        assert_eq!(supervisors, vec!["t1", "t2", "t1"]);
    }
}
