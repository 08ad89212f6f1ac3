pub mod error;
pub mod snapshot;

pub use error::{Result, StoreError};
pub use snapshot::{load, save};
