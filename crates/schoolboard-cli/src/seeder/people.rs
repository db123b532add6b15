//! Teachers, parents and students.

use chrono::{DateTime, Duration, Utc};
use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use rand::seq::SliceRandom;
use rayon::prelude::*;
use schoolboard_models::{BloodType, UserSex};
use sqlx::{Postgres, Transaction};
use std::time::Instant;

use super::models::{PersonSeed, SeedError, StudentSeed, TeacherSeed};
use super::{SEED_ID_PREFIX, cycle, insert_rows};

fn person(kind: &str, n: usize, phone_block: usize) -> PersonSeed {
    let street: String = StreetName().fake();
    let city: String = CityName().fake();

    PersonSeed {
        id: format!("{}{}_{}", SEED_ID_PREFIX, kind, n),
        username: format!("{}{}", kind, n),
        name: FirstName().fake(),
        surname: LastName().fake(),
        email: format!("{}{}@example.com", kind, n),
        phone: format!("555-{}{:06}", phone_block, n),
        address: format!("{} {}, {}", n, street, city),
    }
}

fn random_blood_type() -> BloodType {
    *BloodType::ALL
        .choose(&mut rand::thread_rng())
        .unwrap_or(&BloodType::OPositive)
}

fn alternating_sex(n: usize) -> UserSex {
    if n % 2 == 0 {
        UserSex::Male
    } else {
        UserSex::Female
    }
}

fn years_before(now: DateTime<Utc>, years: i64) -> DateTime<Utc> {
    now - Duration::days(years * 365)
}

/// Teacher `i` teaches subject `i mod subjects`; the first teacher also
/// takes the next subject so at least one teacher has several.
pub fn generate_teachers(count: usize, subject_ids: &[i32], now: DateTime<Utc>) -> Vec<TeacherSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let n = i + 1;
            let mut subjects = vec![*cycle(subject_ids, i)];
            if i == 0 {
                subjects.push(*cycle(subject_ids, 1));
                subjects.dedup();
            }

            TeacherSeed {
                person: person("teacher", n, 1),
                blood_type: random_blood_type(),
                sex: alternating_sex(n),
                birthday: years_before(now, 30),
                subject_ids: subjects,
            }
        })
        .collect()
}

pub async fn seed_teachers(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
    subject_ids: &[i32],
    now: DateTime<Utc>,
) -> Result<Vec<String>, SeedError> {
    let start_time = Instant::now();
    println!("🧑‍🏫 Seeding {} teachers...", count);

    let teachers = generate_teachers(count, subject_ids, now);
    insert_rows(
        tx,
        "INSERT INTO teachers (id, username, name, surname, email, phone, address, blood_type, sex, birthday) ",
        &teachers,
        |row, teacher| {
            let p = &teacher.person;
            row.push_bind(p.id.clone())
                .push_bind(p.username.clone())
                .push_bind(p.name.clone())
                .push_bind(p.surname.clone())
                .push_bind(p.email.clone())
                .push_bind(p.phone.clone())
                .push_bind(p.address.clone())
                .push_bind(teacher.blood_type)
                .push_bind(teacher.sex)
                .push_bind(teacher.birthday);
        },
    )
    .await?;

    let links: Vec<(i32, String)> = teachers
        .iter()
        .flat_map(|teacher| {
            teacher
                .subject_ids
                .iter()
                .map(|&subject_id| (subject_id, teacher.person.id.clone()))
        })
        .collect();
    let linked = insert_rows(
        tx,
        "INSERT INTO subject_teachers (subject_id, teacher_id) ",
        &links,
        |row, (subject_id, teacher_id)| {
            row.push_bind(*subject_id).push_bind(teacher_id.clone());
        },
    )
    .await?;

    println!(
        "   ✓ Inserted {} teachers and {} subject links in {:?}",
        teachers.len(),
        linked,
        start_time.elapsed()
    );
    Ok(teachers.into_iter().map(|t| t.person.id).collect())
}

pub fn generate_parents(count: usize) -> Vec<PersonSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| person("parent", i + 1, 2))
        .collect()
}

pub async fn seed_parents(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
) -> Result<Vec<String>, SeedError> {
    let start_time = Instant::now();
    println!("👪 Seeding {} parents...", count);

    let parents = generate_parents(count);
    insert_rows(
        tx,
        "INSERT INTO parents (id, username, name, surname, email, phone, address) ",
        &parents,
        |row, p| {
            row.push_bind(p.id.clone())
                .push_bind(p.username.clone())
                .push_bind(p.name.clone())
                .push_bind(p.surname.clone())
                .push_bind(p.email.clone())
                .push_bind(p.phone.clone())
                .push_bind(p.address.clone());
        },
    )
    .await?;

    println!("   ✓ Inserted {} parents in {:?}", parents.len(), start_time.elapsed());
    Ok(parents.into_iter().map(|p| p.id).collect())
}

/// Students come in sibling pairs: students `2k` and `2k + 1` share parent
/// `k mod parents`. Student `i` sits in class `i mod classes` and takes
/// that class's grade.
pub fn generate_students(
    count: usize,
    parent_ids: &[String],
    classes: &[(i32, i32)],
    now: DateTime<Utc>,
) -> Vec<StudentSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let n = i + 1;
            let (class_id, grade_id) = *cycle(classes, i);

            StudentSeed {
                person: person("student", n, 3),
                blood_type: random_blood_type(),
                sex: alternating_sex(n),
                birthday: years_before(now, 10),
                parent_id: cycle(parent_ids, i / 2).clone(),
                class_id,
                grade_id,
            }
        })
        .collect()
}

pub async fn seed_students(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
    parent_ids: &[String],
    classes: &[(i32, i32)],
    now: DateTime<Utc>,
) -> Result<Vec<String>, SeedError> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let students = generate_students(count, parent_ids, classes, now);
    insert_rows(
        tx,
        "INSERT INTO students (id, username, name, surname, email, phone, address, blood_type, sex, birthday, parent_id, class_id, grade_id) ",
        &students,
        |row, student| {
            let p = &student.person;
            row.push_bind(p.id.clone())
                .push_bind(p.username.clone())
                .push_bind(p.name.clone())
                .push_bind(p.surname.clone())
                .push_bind(p.email.clone())
                .push_bind(p.phone.clone())
                .push_bind(p.address.clone())
                .push_bind(student.blood_type)
                .push_bind(student.sex)
                .push_bind(student.birthday)
                .push_bind(student.parent_id.clone())
                .push_bind(student.class_id)
                .push_bind(student.grade_id);
        },
    )
    .await?;

    println!("   ✓ Inserted {} students in {:?}", students.len(), start_time.elapsed());
    Ok(students.into_iter().map(|s| s.person.id).collect())
}
