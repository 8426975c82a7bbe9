use crate::{Timestamp, DEFAULT_ERROR_MESSAGE};

/// Load lifecycle of one remote value.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ResourceState<T> {
    /// No load attempted yet.
    Initial,

    /// First load in flight, nothing to show yet.
    Loading { timestamp: Timestamp },

    /// Data from the last successful load.
    ///
    /// `timestamp` moves with every request that starts or succeeds,
    /// `data_timestamp` only when `data` is replaced.
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Loaded {
        data: T,
        data_timestamp: Timestamp,
        timestamp: Timestamp,
        is_refreshing: bool,
        #[cfg_attr(
            feature = "serde",
            serde(default, skip_serializing_if = "Option::is_none")
        )]
        refresh_error: Option<String>,
    },

    /// The first load failed; no data was ever available.
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Error {
        timestamp: Timestamp,
        error_message: String,
    },
}

/// The variant of a [`ResourceState`] without its payload.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ResourceStatus {
    Initial,
    Loading,
    Loaded,
    Error,
}

impl<T> ResourceState<T> {
    pub fn loading(timestamp: Timestamp) -> Self {
        ResourceState::Loading { timestamp }
    }

    /// A freshly loaded value, stamped with `timestamp` for both the request and the data.
    pub fn loaded(data: T, timestamp: Timestamp) -> Self {
        ResourceState::Loaded {
            data,
            data_timestamp: timestamp,
            timestamp,
            is_refreshing: false,
            refresh_error: None,
        }
    }

    pub fn error(message: impl Into<String>, timestamp: Timestamp) -> Self {
        ResourceState::Error {
            timestamp,
            error_message: non_empty(message.into()),
        }
    }

    pub fn status(&self) -> ResourceStatus {
        match self {
            ResourceState::Initial => ResourceStatus::Initial,
            ResourceState::Loading { .. } => ResourceStatus::Loading,
            ResourceState::Loaded { .. } => ResourceStatus::Loaded,
            ResourceState::Error { .. } => ResourceStatus::Error,
        }
    }

    pub fn is_initial(&self) -> bool {
        matches!(self, ResourceState::Initial)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading { .. })
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ResourceState::Loaded { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResourceState::Error { .. })
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(
            self,
            ResourceState::Loaded {
                is_refreshing: true,
                ..
            }
        )
    }

    /// True while a first load or a refresh is in flight.
    pub fn is_in_flight(&self) -> bool {
        self.is_loading() || self.is_refreshing()
    }

    /// True once nothing is in flight and the state is either loaded or failed.
    pub fn is_settled(&self) -> bool {
        match self {
            ResourceState::Loaded { is_refreshing, .. } => !is_refreshing,
            ResourceState::Error { .. } => true,
            _ => false,
        }
    }

    /// True when a plain (non-refresh) load would proceed.
    pub fn should_load(&self) -> bool {
        matches!(self, ResourceState::Initial | ResourceState::Error { .. })
    }

    pub fn data_ref(&self) -> Option<&T> {
        match self {
            ResourceState::Loaded { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn data(self) -> Option<T> {
        match self {
            ResourceState::Loaded { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            ResourceState::Initial => None,
            ResourceState::Loading { timestamp }
            | ResourceState::Loaded { timestamp, .. }
            | ResourceState::Error { timestamp, .. } => Some(*timestamp),
        }
    }

    pub fn data_timestamp(&self) -> Option<Timestamp> {
        match self {
            ResourceState::Loaded { data_timestamp, .. } => Some(*data_timestamp),
            _ => None,
        }
    }

    pub fn refresh_error(&self) -> Option<&str> {
        match self {
            ResourceState::Loaded { refresh_error, .. } => refresh_error.as_deref(),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResourceState::Error { error_message, .. } => Some(error_message),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> ResourceState<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ResourceState::Initial => ResourceState::Initial,
            ResourceState::Loading { timestamp } => ResourceState::Loading { timestamp },
            ResourceState::Loaded {
                data,
                data_timestamp,
                timestamp,
                is_refreshing,
                refresh_error,
            } => ResourceState::Loaded {
                data: f(data),
                data_timestamp,
                timestamp,
                is_refreshing,
                refresh_error,
            },
            ResourceState::Error {
                timestamp,
                error_message,
            } => ResourceState::Error {
                timestamp,
                error_message,
            },
        }
    }

    /// The state to write before a load starts, or `None` when the load must be skipped.
    ///
    /// A load is skipped while one is in flight, and when data is already
    /// loaded unless `refresh` is set. Refreshing keeps the data visible.
    pub fn begin_load(&self, refresh: bool, now: Timestamp) -> Option<Self>
    where
        T: Clone,
    {
        match self {
            ResourceState::Loading { .. } => None,
            ResourceState::Loaded { is_refreshing, .. } if *is_refreshing || !refresh => None,
            ResourceState::Loaded {
                data,
                data_timestamp,
                ..
            } => Some(ResourceState::Loaded {
                data: data.clone(),
                data_timestamp: *data_timestamp,
                timestamp: now,
                is_refreshing: true,
                refresh_error: None,
            }),
            ResourceState::Initial | ResourceState::Error { .. } => {
                Some(ResourceState::loading(now))
            }
        }
    }

    /// The state after a failed load, given the state current at that moment.
    ///
    /// Loaded data survives untouched along with both of its timestamps;
    /// anything else becomes [`ResourceState::Error`].
    pub fn fail(&self, message: impl Into<String>, now: Timestamp) -> Self
    where
        T: Clone,
    {
        match self {
            ResourceState::Loaded {
                data,
                data_timestamp,
                timestamp,
                ..
            } => ResourceState::Loaded {
                data: data.clone(),
                data_timestamp: *data_timestamp,
                timestamp: *timestamp,
                is_refreshing: false,
                refresh_error: Some(non_empty(message.into())),
            },
            _ => ResourceState::error(message, now),
        }
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        ResourceState::Initial
    }
}

impl<T: Clone> From<&ResourceState<T>> for Option<T> {
    fn from(value: &ResourceState<T>) -> Self {
        value.data_ref().cloned()
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        DEFAULT_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
