use schoolboard_cli::admin::{NewAdmin, create_admin};
use schoolboard_cli::seeder::{SeedConfig, clear_all, seed_all};
use schoolboard_core::FailureKind;
use schoolboard_identity::{IdentityProvider, InMemoryIdentityProvider};
use sqlx::PgPool;

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn seed_populates_every_table(pool: PgPool) {
    let report = seed_all(&pool, &SeedConfig::default()).await.unwrap();

    assert_eq!(report.classes, 6);
    assert_eq!(count(&pool, "grades").await, 6);
    assert_eq!(count(&pool, "classes").await, 6);
    assert_eq!(count(&pool, "subjects").await, 10);
    assert_eq!(count(&pool, "teachers").await, 15);
    assert_eq!(count(&pool, "subject_teachers").await, 16);
    assert_eq!(count(&pool, "lessons").await, 30);
    assert_eq!(count(&pool, "parents").await, 25);
    assert_eq!(count(&pool, "students").await, 50);
    assert_eq!(count(&pool, "results").await, 10);
    assert_eq!(count(&pool, "announcements").await, 5);

    let unsupervised: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM classes WHERE supervisor_id IS NULL")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(unsupervised, 0);

    let mismatched_grades: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM students s JOIN classes c ON c.id = s.class_id WHERE c.grade_id <> s.grade_id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(mismatched_grades, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn seeding_twice_writes_nothing_the_second_time(pool: PgPool) {
    seed_all(&pool, &SeedConfig::default()).await.unwrap();
    assert!(seed_all(&pool, &SeedConfig::default()).await.is_err());
    assert_eq!(count(&pool, "teachers").await, 15);
}

#[sqlx::test(migrations = "../../migrations")]
async fn clear_seed_keeps_provisioned_admins(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let admin = create_admin(
        &pool,
        &identity,
        NewAdmin {
            username: "principal".into(),
            password: "password123".into(),
            first_name: "Pat".into(),
            last_name: "Reyes".into(),
        },
    )
    .await
    .unwrap();

    seed_all(&pool, &SeedConfig::default()).await.unwrap();
    clear_all(&pool).await.unwrap();

    assert_eq!(count(&pool, "students").await, 0);
    assert_eq!(count(&pool, "grades").await, 0);
    let admins: Vec<String> = sqlx::query_scalar("SELECT id FROM admins")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(admins, vec![admin.id]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_admin_username_leaves_no_identity_account(pool: PgPool) {
    let identity = InMemoryIdentityProvider::new();
    let new_admin = || NewAdmin {
        username: "principal".into(),
        password: "password123".into(),
        first_name: "Pat".into(),
        last_name: "Reyes".into(),
    };

    let first = create_admin(&pool, &identity, new_admin()).await.unwrap();
    identity.forget(&first.id);

    // The provider no longer knows the username, so only the insert fails.
    let err = create_admin(&pool, &identity, new_admin()).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::DatabaseError);
    assert!(identity.is_empty());
    assert!(identity.get_account(&first.id).await.is_err());
}
