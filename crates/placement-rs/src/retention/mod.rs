//! Retention layer primitives: device arenas and logical volumes.

pub mod store;
pub mod volume;
