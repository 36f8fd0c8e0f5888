
use std::path::Path;

use crate::error::{CreationError, RangeError, VolumeError};
use crate::events::{self, IoDirection, SegmentEvent};
use crate::inspect::VolumeDump;
use crate::layout::geometry::Geometry;
use crate::layout::placement::PlacementPolicy;
use crate::layout::segment::Segment;
use crate::retention::store::BlockStore;

/// Hard cap on devices per volume.
pub const MAX_DEVICES: usize = 8;

/// Volume owns a fixed set of device arenas and the active placement policy.
/// Writes always place the payload at the start of the logical range; reads
/// address arbitrary in-capacity ranges.
#[derive(Debug)]
pub struct Volume {
    stores: Vec<BlockStore>,
    policy: PlacementPolicy,
    geom: Geometry,
    destroyed: bool,
}

impl Volume {
    /// Create a volume over anonymous in-memory arenas.
    ///
    /// # Errors
    /// [`CreationError::TooManyDevices`] when `device_count` exceeds
    /// [`MAX_DEVICES`], [`CreationError::InvalidGeometry`] when any geometry
    /// field is zero. Nothing is allocated on failure.
    pub fn create(policy: PlacementPolicy, geom: Geometry) -> Result<Self, CreationError> {
        validate(&geom)?;
        let stores = (0..geom.device_count)
            .map(|_| BlockStore::in_memory(geom.blocks_per_device, geom.block_size))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            stores,
            policy,
            geom,
            destroyed: false,
        })
    }

    /// Create a volume over pre-sized image files `device-<i>.img` under
    /// `dir`. Existing images are kept, so contents persist across runs.
    ///
    /// # Errors
    /// Same geometry failures as [`Volume::create`], plus any image
    /// create/open/map failure.
    pub fn open_prealloc(
        policy: PlacementPolicy,
        geom: Geometry,
        dir: &Path,
    ) -> Result<Self, CreationError> {
        validate(&geom)?;
        let stores = (0..geom.device_count)
            .map(|i| {
                BlockStore::open_prealloc(
                    &dir.join(format!("device-{i}.img")),
                    geom.blocks_per_device,
                    geom.block_size,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            stores,
            policy,
            geom,
            destroyed: false,
        })
    }

    #[must_use]
    pub const fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.geom
    }

    #[must_use]
    pub fn capacity_bytes(&self) -> u64 {
        self.policy.capacity_bytes(&self.geom)
    }

    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Write `data` at the start of the logical range.
    ///
    /// Validation is all-or-nothing: on error no device byte changes. One
    /// diagnostic event is emitted per segment written.
    ///
    /// # Errors
    /// [`VolumeError::CapacityExceeded`] when `data` does not fit,
    /// [`VolumeError::Destroyed`] after destroy. A [`VolumeError::Store`]
    /// escaping here signals a planning defect, not a caller error.
    pub fn write(&mut self, data: &[u8]) -> Result<(), VolumeError> {
        self.ensure_live()?;
        let plan = self
            .policy
            .plan_write(&self.geom, 0, data.len())
            .map_err(RangeError::into_capacity_exceeded)?;

        for segment in plan {
            let payload = segment_slice(data, &segment);
            self.stores[segment.device_index].write_at(
                segment.block_index,
                segment.in_block_offset,
                payload,
            )?;
            record_segment(IoDirection::Write, &segment, payload);
        }
        Ok(())
    }

    /// Read `length` bytes starting at logical `offset`.
    ///
    /// The result buffer is fully assembled or not produced at all. Repeated
    /// reads of the same range with no intervening write are byte-identical.
    ///
    /// # Errors
    /// [`VolumeError::ReadOutOfRange`] when the range end exceeds capacity,
    /// [`VolumeError::Destroyed`] after destroy.
    pub fn read(&self, offset: u64, length: usize) -> Result<Vec<u8>, VolumeError> {
        self.ensure_live()?;
        let plan = self
            .policy
            .plan_read(&self.geom, offset, length)
            .map_err(RangeError::into_read_out_of_range)?;

        let mut out = vec![0u8; length];
        for segment in plan {
            let bytes = self.stores[segment.device_index].read_at(
                segment.block_index,
                segment.in_block_offset,
                segment.len,
            )?;
            let start = (segment.logical_offset - offset) as usize;
            out[start..start + segment.len].copy_from_slice(&bytes);
            record_segment(IoDirection::Read, &segment, &bytes);
        }
        Ok(out)
    }

    /// Read-only copy of one device block, for diagnostics.
    ///
    /// # Errors
    /// [`VolumeError::NoSuchDevice`] for an out-of-range device,
    /// [`VolumeError::Destroyed`] after destroy.
    pub fn snapshot_block(
        &self,
        device_index: usize,
        block_index: u64,
    ) -> Result<Vec<u8>, VolumeError> {
        self.ensure_live()?;
        let store = self
            .stores
            .get(device_index)
            .ok_or(VolumeError::NoSuchDevice {
                device_index,
                device_count: self.stores.len(),
            })?;
        Ok(store.read_at(block_index, 0, self.geom.block_size)?)
    }

    /// Structured diagnostic dump of every device's blocks.
    ///
    /// # Errors
    /// [`VolumeError::Destroyed`] after destroy.
    pub fn dump(&self) -> Result<VolumeDump, VolumeError> {
        crate::inspect::dump(self)
    }

    /// Release every arena. Idempotent; later operations fail with
    /// [`VolumeError::Destroyed`].
    pub fn destroy(&mut self) {
        for store in &mut self.stores {
            store.release();
        }
        self.destroyed = true;
    }

    fn ensure_live(&self) -> Result<(), VolumeError> {
        if self.destroyed {
            Err(VolumeError::Destroyed)
        } else {
            Ok(())
        }
    }
}

fn validate(geom: &Geometry) -> Result<(), CreationError> {
    if geom.device_count > MAX_DEVICES {
        return Err(CreationError::TooManyDevices {
            requested: geom.device_count,
            max: MAX_DEVICES,
        });
    }
    if geom.is_degenerate() {
        return Err(CreationError::InvalidGeometry);
    }
    Ok(())
}

// Write plans start at logical offset zero, so `logical_offset` indexes the
// payload directly.
fn segment_slice<'a>(data: &'a [u8], segment: &Segment) -> &'a [u8] {
    let start = segment.logical_offset as usize;
    &data[start..start + segment.len]
}

fn record_segment(direction: IoDirection, segment: &Segment, payload: &[u8]) {
    if !events::is_enabled() {
        return;
    }
    events::record_segment(SegmentEvent {
        direction,
        device_index: segment.device_index,
        block_index: segment.block_index,
        payload: payload.to_vec(),
    });
}
