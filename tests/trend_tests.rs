// Latest trend chart resolution from artifact names

use chrono::{TimeZone, Utc};
use weather_dashboard::trend::{TREND_STEM, TrendResolver};

fn resolver() -> TrendResolver {
    TrendResolver::new(TREND_STEM).unwrap()
}

#[test]
fn picks_newest_embedded_instant() {
    let names = [
        "temperature_trends_20240101_120000.png",
        "temperature_trends_20240102_090000.png",
        "notes.txt",
    ];
    let (name, at) = resolver().latest(names).unwrap();
    assert_eq!(name, "temperature_trends_20240102_090000.png");
    assert_eq!(at, Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap());
}

#[test]
fn listing_order_does_not_matter() {
    let names = [
        "temperature_trends_20240102_090000.png",
        "temperature_trends_20240101_120000.png",
    ];
    let (name, _) = resolver().latest(names).unwrap();
    assert_eq!(name, "temperature_trends_20240102_090000.png");
}

#[test]
fn no_participants_is_none() {
    assert!(resolver().latest(Vec::<&str>::new()).is_none());
    assert!(resolver().latest(["readme.md", "temperature_trends.png"]).is_none());
}

#[test]
fn non_matching_names_are_skipped() {
    let r = resolver();
    for name in [
        "temperature_trends_2024010_120000.png",
        "temperature_trends_20240101_120000.jpg",
        "temperature_trends_20240101_120000.png.bak",
        "xtemperature_trends_20240101_120000.png",
        "humidity_trends_20240101_120000.png",
        "temperature_trends_20240101-120000.png",
    ] {
        assert!(r.capture_instant(name).is_none(), "{name}");
    }
}

#[test]
fn impossible_dates_are_skipped() {
    let r = resolver();
    assert!(r.capture_instant("temperature_trends_20241340_120000.png").is_none());
    assert!(r.capture_instant("temperature_trends_20240230_120000.png").is_none());
    assert!(r.capture_instant("temperature_trends_20240101_250000.png").is_none());

    let (name, _) = r
        .latest([
            "temperature_trends_20991399_000000.png",
            "temperature_trends_20240101_000000.png",
        ])
        .unwrap();
    assert_eq!(name, "temperature_trends_20240101_000000.png");
}

#[test]
fn ties_resolve_to_smallest_name() {
    let r = TrendResolver::new("chart").unwrap();
    let names = ["chart_20240101_120000.png", "chart_20240101_120000.png"];
    assert_eq!(r.latest(names).unwrap().0, "chart_20240101_120000.png");

    // Same instant under two stems is impossible with one resolver, so compare
    // listing permutations instead.
    let r = resolver();
    let a = ["temperature_trends_20240101_120000.png", "temperature_trends_20231231_235959.png"];
    let b = ["temperature_trends_20231231_235959.png", "temperature_trends_20240101_120000.png"];
    assert_eq!(r.latest(a), r.latest(b));
}

#[test]
fn stem_is_matched_literally() {
    let r = TrendResolver::new("temp.trend").unwrap();
    assert!(r.capture_instant("temp.trend_20240101_000000.png").is_some());
    assert!(r.capture_instant("tempXtrend_20240101_000000.png").is_none());
}
