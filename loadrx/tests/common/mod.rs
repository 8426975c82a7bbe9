#![allow(dead_code)]

use loadrx::{define_resources, HasResources, ManualClock, State};
use chrono::{TimeZone, Utc};

define_resources! {
    /// Everything the storefront fetches from the pricing backend.
    pub struct StoreResources {
        key: StoreResource,
        states: StoreResourceStates,
        resources: {
            Price => price: u64,
            FlashMessages => flash_messages: Vec<String>,
            /// Whether checkout is closed for maintenance.
            MaintenanceMode => maintenance_mode: bool,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct StorefrontState {
    pub resources: StoreResourceStates,
    pub cart_items: u32,
}

impl State for StorefrontState {}

impl HasResources<StoreResourceStates> for StorefrontState {
    fn resources(&self) -> &StoreResourceStates {
        &self.resources
    }

    fn resources_mut(&mut self) -> &mut StoreResourceStates {
        &mut self.resources
    }
}

pub fn clock_at_opening() -> ManualClock {
    ManualClock::at(Utc.with_ymd_and_hms(2024, 10, 31, 10, 0, 0).unwrap())
}
