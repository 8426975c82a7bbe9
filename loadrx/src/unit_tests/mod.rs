use crate::{ManualClock, ResourceState, Timestamp};
use chrono::{TimeZone, Utc};

mod load_result_test;
mod timestamp_test;

/// 2024-10-18T08:00:00.000Z
pub const T0: Timestamp = Timestamp::from_millis(1_729_238_400_000);

pub fn test_clock() -> ManualClock {
    ManualClock::at(Utc.with_ymd_and_hms(2024, 10, 18, 8, 0, 0).unwrap())
}

pub fn loaded_at(data: u64, timestamp: Timestamp) -> ResourceState<u64> {
    ResourceState::loaded(data, timestamp)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExchangeRates {
    pub base_currency: String,
    pub aud: f64,
    pub nzd: f64,
}

impl ExchangeRates {
    pub fn usd(aud: f64, nzd: f64) -> Self {
        ExchangeRates {
            base_currency: "USD".to_string(),
            aud,
            nzd,
        }
    }
}
