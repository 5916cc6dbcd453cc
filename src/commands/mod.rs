//! Command implementations, one module per administered entity type

pub mod federation;
