//! Block placement primitives: striping and mirroring over fixed device sets.
#![allow(clippy::cargo_common_metadata)]

pub mod error;
pub mod events;
pub mod inspect;
pub mod layout;
pub mod retention;
