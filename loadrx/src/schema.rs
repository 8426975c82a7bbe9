//! Shape checks for resource states crossing a serialization boundary.
//!
//! A state is a JSON object tagged by `status`. Parsing keeps exactly the
//! fields of the tagged status and ignores everything else, so an `INITIAL`
//! value carrying stray `data` normalizes to `{"status": "INITIAL"}`.

use crate::{ResourceState, SchemaError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// Validator for `ResourceState<T>` values.
pub struct ResourceSchema<T> {
    _data: PhantomData<fn() -> T>,
}

impl<T> ResourceSchema<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new() -> Self {
        ResourceSchema { _data: PhantomData }
    }

    pub fn parse(&self, value: &Value) -> Result<ResourceState<T>, SchemaError> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Parses `value` and writes it back, dropping fields foreign to its status.
    pub fn normalize(&self, value: &Value) -> Result<Value, SchemaError> {
        let state = self.parse(value)?;
        Ok(serde_json::to_value(&state)?)
    }

    /// Verifies that `state` comes back unchanged from its serialized form.
    pub fn check(&self, state: &ResourceState<T>) -> Result<(), SchemaError>
    where
        T: PartialEq + std::fmt::Debug,
    {
        let value = serde_json::to_value(state)?;
        let parsed = self.parse(&value)?;
        if &parsed == state {
            Ok(())
        } else {
            Err(SchemaError::Mismatch {
                expected: format!("{state:?}"),
                actual: format!("{parsed:?}"),
            })
        }
    }
}

impl<T> Default for ResourceSchema<T>
where
    T: Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::new()
    }
}
