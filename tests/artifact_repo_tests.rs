// ArtifactRepo tests: prefix listing, signed URLs, verification, reads

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;
use weather_dashboard::artifact_repo::AccessError;

mod common;

const NAME: &str = "temperature_trends_20240101_120000.png";

#[tokio::test]
async fn list_names_filters_by_prefix_and_skips_dirs() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(NAME), b"png").unwrap();
    std::fs::write(dir.path().join("other.png"), b"png").unwrap();
    std::fs::create_dir(dir.path().join("temperature_trends_dir")).unwrap();

    let repo = common::artifact_repo(dir.path(), Some(common::TEST_SIGNING_KEY));
    let names = repo.list_names("temperature_trends").await.unwrap();
    assert_eq!(names, vec![NAME.to_string()]);
}

#[tokio::test]
async fn missing_root_is_empty_store() {
    let dir = TempDir::new().unwrap();
    let repo = common::artifact_repo(&dir.path().join("nope"), None);
    assert!(repo.list_names("").await.unwrap().is_empty());
}

#[test]
fn signed_url_is_deterministic_and_verifies() {
    let dir = TempDir::new().unwrap();
    let repo = common::artifact_repo(dir.path(), Some(common::TEST_SIGNING_KEY));
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

    let url = repo.signed_url(NAME, now).unwrap();
    assert_eq!(url, repo.signed_url(NAME, now).unwrap());
    let expires = now.timestamp() + 900;
    let prefix = format!("/artifacts/{NAME}?expires={expires}&signature=");
    assert!(url.starts_with(&prefix), "{url}");

    let signature = &url[prefix.len()..];
    assert_eq!(signature.len(), 64);
    assert_eq!(repo.verify(NAME, expires, signature, now), Ok(()));
    assert_eq!(
        repo.verify(NAME, expires, signature, now + Duration::seconds(900)),
        Ok(())
    );
}

#[test]
fn verification_rejects_tampering_and_expiry() {
    let dir = TempDir::new().unwrap();
    let repo = common::artifact_repo(dir.path(), Some(common::TEST_SIGNING_KEY));
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let url = repo.signed_url(NAME, now).unwrap();
    let signature = url.rsplit('=').next().unwrap().to_string();
    let expires = now.timestamp() + 900;

    assert_eq!(
        repo.verify(NAME, expires, &signature, now + Duration::seconds(901)),
        Err(AccessError::Expired)
    );
    assert_eq!(
        repo.verify(NAME, expires + 60, &signature, now),
        Err(AccessError::BadSignature)
    );
    assert_eq!(
        repo.verify("temperature_trends_20240101_120001.png", expires, &signature, now),
        Err(AccessError::BadSignature)
    );

    let other_key = common::artifact_repo(dir.path(), Some("another-key"));
    assert_eq!(
        other_key.verify(NAME, expires, &signature, now),
        Err(AccessError::BadSignature)
    );
}

#[test]
fn public_base_url_is_prepended() {
    let dir = TempDir::new().unwrap();
    let mut config = common::artifacts_config(dir.path(), Some(common::TEST_SIGNING_KEY));
    config.public_base_url = "https://dash.example.org/".into();
    let repo = weather_dashboard::artifact_repo::ArtifactRepo::new(&config);
    let url = repo.signed_url(NAME, Utc::now()).unwrap();
    assert!(url.starts_with("https://dash.example.org/artifacts/"), "{url}");
}

#[test]
fn signing_requires_key_and_safe_name() {
    let dir = TempDir::new().unwrap();
    let unsigned = common::artifact_repo(dir.path(), None);
    assert_eq!(unsigned.signed_url(NAME, Utc::now()), Err(AccessError::NoSigningKey));

    let repo = common::artifact_repo(dir.path(), Some(common::TEST_SIGNING_KEY));
    for bad in ["../secret.png", "a/b.png", ".hidden", ""] {
        assert_eq!(repo.signed_url(bad, Utc::now()), Err(AccessError::InvalidName), "{bad:?}");
    }
}

#[tokio::test]
async fn read_returns_bytes_or_none() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(NAME), b"\x89PNG").unwrap();
    let repo = common::artifact_repo(dir.path(), Some(common::TEST_SIGNING_KEY));

    let data = repo.read(NAME).await.unwrap().unwrap();
    assert_eq!(&data[..], b"\x89PNG");
    assert!(repo.read("temperature_trends_19990101_000000.png").await.unwrap().is_none());
    assert!(repo.read("../etc/passwd").await.is_err());
}
