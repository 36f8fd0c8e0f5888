//! Error taxonomy for volume creation, range validation, and store access.

use thiserror::Error;

/// Failures raised while constructing a volume. Nothing is allocated when
/// construction fails.
#[derive(Debug, Error)]
pub enum CreationError {
    #[error("requested {requested} devices, the supported maximum is {max}")]
    TooManyDevices { requested: usize, max: usize },
    #[error("geometry fields must all be non-zero")]
    InvalidGeometry,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures raised by a single device arena.
///
/// `OutOfBounds` signals a defect in segment planning, never an expected
/// caller error; it is surfaced verbatim rather than clamped.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(
        "access of {len} bytes at block {block_index} offset {in_block_offset} exceeds the {arena_len}-byte arena"
    )]
    OutOfBounds {
        block_index: u64,
        in_block_offset: usize,
        len: usize,
        arena_len: u64,
    },
    #[error("store arena has been released")]
    Released,
    #[error("arena length {len} exceeds addressable size")]
    Unaddressable { len: u64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures raised by volume operations. Failed operations leave the volume
/// byte-identical to before.
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("write of {length} bytes at offset {offset} exceeds the {capacity}-byte capacity")]
    CapacityExceeded {
        offset: u64,
        length: u64,
        capacity: u64,
    },
    #[error("read of {length} bytes at offset {offset} exceeds the {capacity}-byte capacity")]
    ReadOutOfRange {
        offset: u64,
        length: u64,
        capacity: u64,
    },
    #[error("no device {device_index} in a {device_count}-device volume")]
    NoSuchDevice {
        device_index: usize,
        device_count: usize,
    },
    #[error("volume has been destroyed")]
    Destroyed,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Range validation failure raised by placement planning before any segment
/// is computed. Carries the requested range and the policy capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("range at offset {offset} of length {length} exceeds the {capacity}-byte capacity")]
pub struct RangeError {
    pub offset: u64,
    pub length: u64,
    pub capacity: u64,
}

impl RangeError {
    #[must_use]
    pub const fn into_capacity_exceeded(self) -> VolumeError {
        VolumeError::CapacityExceeded {
            offset: self.offset,
            length: self.length,
            capacity: self.capacity,
        }
    }

    #[must_use]
    pub const fn into_read_out_of_range(self) -> VolumeError {
        VolumeError::ReadOutOfRange {
            offset: self.offset,
            length: self.length,
            capacity: self.capacity,
        }
    }
}
