// ReadingRepo tests: init, insert, mixed timestamp representations, ordering, limits

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;
use weather_dashboard::models::{NormalizedTimestamp, StoredTimestamp};
use weather_dashboard::reading_repo::HISTORY_LIMIT;

mod common;

#[tokio::test]
async fn reading_repo_init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let repo = common::reading_repo(&dir).await;
    // Second init is no-op (IF NOT EXISTS)
    repo.init().await.unwrap();
    assert!(repo.latest_reading().await.unwrap().is_none());
    assert!(repo.recent_readings(HISTORY_LIMIT).await.unwrap().is_empty());
}

#[tokio::test]
async fn timestamp_representations_round_trip() {
    let dir = TempDir::new().unwrap();
    let repo = common::reading_repo(&dir).await;
    let native = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();

    repo.insert_reading(&common::values(1.0), StoredTimestamp::Native(native))
        .await
        .unwrap();
    repo.insert_reading(
        &common::values(2.0),
        StoredTimestamp::Normalized(NormalizedTimestamp(1_600_000_000)),
    )
    .await
    .unwrap();
    repo.insert_reading(&common::values(3.0), StoredTimestamp::Missing)
        .await
        .unwrap();

    let all = repo.recent_readings(10).await.unwrap();
    assert_eq!(all.len(), 3);
    // Newest first; the missing timestamp sorts last.
    assert_eq!(all[0].timestamp, StoredTimestamp::Native(native));
    assert_eq!(all[0].values.temperature, 1.0);
    assert_eq!(
        all[1].timestamp,
        StoredTimestamp::Normalized(NormalizedTimestamp(1_600_000_000))
    );
    assert_eq!(all[2].timestamp, StoredTimestamp::Missing);
    assert_eq!(all[2].values, common::values(3.0));
}

#[tokio::test]
async fn history_is_capped_and_newest_first() {
    let dir = TempDir::new().unwrap();
    let repo = common::reading_repo(&dir).await;
    let base = 1_700_000_000;
    for i in 0..150 {
        repo.insert_reading(
            &common::values(i as f64),
            StoredTimestamp::Normalized(NormalizedTimestamp(base + i * 60)),
        )
        .await
        .unwrap();
    }

    let recent = repo.recent_readings(HISTORY_LIMIT).await.unwrap();
    assert_eq!(recent.len(), 100);
    assert_eq!(recent[0].values.temperature, 149.0);
    assert_eq!(recent[99].values.temperature, 50.0);
    let epochs: Vec<i64> = recent
        .iter()
        .map(|r| r.timestamp.instant().unwrap().timestamp())
        .collect();
    assert!(epochs.windows(2).all(|w| w[0] > w[1]));
}

#[tokio::test]
async fn latest_reading_orders_by_timestamp_not_insertion() {
    let dir = TempDir::new().unwrap();
    let repo = common::reading_repo(&dir).await;
    let now = Utc::now();
    repo.insert_reading(&common::values(5.0), StoredTimestamp::Native(now))
        .await
        .unwrap();
    repo.insert_reading(
        &common::values(6.0),
        StoredTimestamp::Native(now - Duration::hours(2)),
    )
    .await
    .unwrap();
    repo.insert_reading(&common::values(7.0), StoredTimestamp::Missing)
        .await
        .unwrap();

    let latest = repo.latest_reading().await.unwrap().unwrap();
    assert_eq!(latest.values.temperature, 5.0);
}

#[tokio::test]
async fn save_reading_is_stamped_by_store() {
    let dir = TempDir::new().unwrap();
    let repo = common::reading_repo(&dir).await;
    let before = Utc::now().timestamp();
    let id = repo.save_reading(&common::values(18.0)).await.unwrap();
    let after = Utc::now().timestamp();
    assert!(id > 0);

    let latest = repo.latest_reading().await.unwrap().unwrap();
    let StoredTimestamp::Native(at) = latest.timestamp else {
        panic!("expected a store-assigned instant, got {:?}", latest.timestamp);
    };
    assert!(at.timestamp() >= before - 1 && at.timestamp() <= after + 1);
}

#[tokio::test]
async fn readings_since_filters_and_ascends() {
    let dir = TempDir::new().unwrap();
    let repo = common::reading_repo(&dir).await;
    let now = Utc::now();
    for (temp, hours_ago) in [(1.0, 30), (2.0, 10), (3.0, 1)] {
        repo.insert_reading(
            &common::values(temp),
            StoredTimestamp::Native(now - Duration::hours(hours_ago)),
        )
        .await
        .unwrap();
    }
    repo.insert_reading(&common::values(4.0), StoredTimestamp::Missing)
        .await
        .unwrap();

    let since = repo
        .readings_since(now - Duration::hours(24))
        .await
        .unwrap();
    let temps: Vec<f64> = since.iter().map(|r| r.values.temperature).collect();
    assert_eq!(temps, vec![2.0, 3.0]);
}

#[tokio::test]
async fn close_releases_pool() {
    let dir = TempDir::new().unwrap();
    let repo = common::reading_repo(&dir).await;
    repo.close().await;
    assert!(repo.latest_reading().await.is_err());
}
