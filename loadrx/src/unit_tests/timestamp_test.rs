use crate::unit_tests::{test_clock, T0};
use crate::{Clock, ManualClock, SystemClock, Timestamp};
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_manual_clock_starts_at_given_time() {
    let clock = test_clock();
    assert_eq!(clock.now(), T0);
    assert_eq!(clock.now().as_millis(), 1_729_238_400_000);
}

#[test]
fn test_manual_clock_advance_is_shared_between_clones() {
    let clock = test_clock();
    let handle = clock.clone();

    let next = handle.advance(Duration::from_millis(1000));

    assert_eq!(next, Timestamp::from_millis(1_729_238_401_000));
    assert_eq!(clock.now(), next);
}

#[test]
fn test_manual_clock_set() {
    let clock = ManualClock::default();
    assert_eq!(clock.now(), Timestamp::from_millis(0));

    clock.set(T0);
    assert_eq!(clock.now(), T0);
}

#[test]
fn test_clock_through_arc_dyn() {
    let clock = test_clock();
    let shared: Arc<dyn Clock> = Arc::new(clock.clone());
    clock.advance(Duration::from_secs(5));
    assert_eq!(shared.now(), T0.saturating_add(Duration::from_secs(5)));
}

#[test]
fn test_system_clock_is_recent() {
    let now = SystemClock.now();
    let year_2024 = Timestamp::from_datetime(&Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert!(now > year_2024);
}

#[test]
fn test_timestamp_datetime_conversion() {
    let datetime = T0.to_datetime().unwrap();
    assert_eq!(datetime, Utc.with_ymd_and_hms(2024, 10, 18, 8, 0, 0).unwrap());
    assert_eq!(Timestamp::from(datetime), T0);
    assert_eq!(T0.to_string(), "2024-10-18T08:00:00.000Z");
}

#[test]
fn test_timestamp_saturating_add() {
    let max = Timestamp::from_millis(i64::MAX);
    assert_eq!(max.saturating_add(Duration::from_millis(1)), max);
}
