//! Accounting storage access
//!
//! [`EntityStore`] is the seam between the administration commands and the
//! accounting service. [`RestStore`] talks to the service over HTTP;
//! [`MemoryStore`] keeps everything in process.

pub mod constants;
pub mod memory;
pub mod models;
pub mod rest;
pub mod store;

pub use memory::{MemoryStore, StoreCall};
pub use models::{Federation, FederationCondition, FederationFlags};
pub use rest::RestStore;
pub use store::{EntityStore, StoreError, StoreResult};
