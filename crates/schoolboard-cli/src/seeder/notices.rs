//! Events and announcements.

use chrono::{DateTime, Duration, Utc};
use sqlx::{Postgres, Transaction};
use std::time::Instant;

use super::models::{NoticeSeed, SeedError};
use super::{cycle, insert_rows};

/// Notice `i` targets class `i mod classes`, starts in an hour and lasts
/// another hour.
pub fn generate_notices(label: &str, count: usize, class_ids: &[i32], now: DateTime<Utc>) -> Vec<NoticeSeed> {
    let starts = now + Duration::hours(1);
    (0..count)
        .map(|i| NoticeSeed {
            title: format!("{} {}", label, i + 1),
            description: format!("Description for {} {}", label, i + 1),
            starts,
            ends: starts + Duration::hours(1),
            class_id: Some(*cycle(class_ids, i)),
        })
        .collect()
}

pub async fn seed_events(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
    class_ids: &[i32],
    now: DateTime<Utc>,
) -> Result<usize, SeedError> {
    let start_time = Instant::now();
    println!("🎉 Seeding {} events...", count);

    let events = generate_notices("Event", count, class_ids, now);
    let inserted = insert_rows(
        tx,
        "INSERT INTO events (title, description, start_time, end_time, class_id) ",
        &events,
        |row, event| {
            row.push_bind(event.title.clone())
                .push_bind(event.description.clone())
                .push_bind(event.starts)
                .push_bind(event.ends)
                .push_bind(event.class_id);
        },
    )
    .await?;

    println!("   ✓ Inserted {} events in {:?}", inserted, start_time.elapsed());
    Ok(inserted as usize)
}

pub async fn seed_announcements(
    tx: &mut Transaction<'_, Postgres>,
    count: usize,
    class_ids: &[i32],
    now: DateTime<Utc>,
) -> Result<usize, SeedError> {
    let start_time = Instant::now();
    println!("📣 Seeding {} announcements...", count);

    let announcements = generate_notices("Announcement", count, class_ids, now);
    let inserted = insert_rows(
        tx,
        "INSERT INTO announcements (title, description, date, class_id) ",
        &announcements,
        |row, announcement| {
            row.push_bind(announcement.title.clone())
                .push_bind(announcement.description.clone())
                .push_bind(now)
                .push_bind(announcement.class_id);
        },
    )
    .await?;

    println!("   ✓ Inserted {} announcements in {:?}", inserted, start_time.elapsed());
    Ok(inserted as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_cycle_over_classes() {
        let notices = generate_notices("Event", 5, &[3, 4], Utc::now());
        let classes: Vec<Option<i32>> = notices.iter().map(|n| n.class_id).collect();
        assert_eq!(classes, vec![Some(3), Some(4), Some(3), Some(4), Some(3)]);
        assert_eq!(notices[4].description, "Description for Event 5");
    }
}
