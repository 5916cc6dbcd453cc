pub mod entity;

pub use entity::{EntityArgs, EntityKind};
