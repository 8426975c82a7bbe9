mod load_error;
mod load_result;
mod loader;
mod resource_state;
mod resources;
#[cfg(feature = "serde")]
mod schema;
mod state_cell;
mod state_store;
mod stream_ext;
mod timestamp;
pub mod macros;
pub mod mock;

pub use load_error::*;
pub use load_result::*;
pub use loader::*;
pub use resource_state::*;
pub use resources::*;
#[cfg(feature = "serde")]
pub use schema::*;
pub use state_cell::*;
pub use state_store::*;
pub use stream_ext::*;
pub use timestamp::*;

#[cfg(test)]
mod unit_tests;

pub trait State: Clone + Send + Sync + 'static {}
