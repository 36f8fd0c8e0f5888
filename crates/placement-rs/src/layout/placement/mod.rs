//! Placement policies: pure forward/inverse mapping from logical byte ranges
//! to per-device segments. No store memory is touched here.


use crate::error::RangeError;
use crate::layout::geometry::Geometry;
use crate::layout::segment::Segment;

/// PlacementPolicy selects how logical bytes land on devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementPolicy {
    /// Fixed-size blocks round-robined across devices; capacity aggregates.
    Striping,
    /// Every device holds the full logical range; capacity is one copy.
    Mirroring,
}

impl PlacementPolicy {
    /// Total addressable bytes under this policy.
    #[must_use]
    pub fn capacity_bytes(self, geom: &Geometry) -> u64 {
        match self {
            Self::Striping => geom.arena_len().saturating_mul(geom.device_count as u64),
            Self::Mirroring => geom.arena_len(),
        }
    }

    /// Plan the ordered device segments realizing a write of `len` bytes at
    /// logical `offset`.
    ///
    /// # Errors
    /// Returns a [`RangeError`] when the range end exceeds the policy
    /// capacity; no segment is computed in that case.
    pub fn plan_write(
        self,
        geom: &Geometry,
        offset: u64,
        len: usize,
    ) -> Result<Vec<Segment>, RangeError> {
        self.check_range(geom, offset, len)?;
        if len == 0 {
            return Ok(Vec::new());
        }
        Ok(match self {
            Self::Striping => striped_segments(geom, offset, len),
            Self::Mirroring => mirrored_write_segments(geom, offset, len),
        })
    }

    /// Plan the ordered device segments serving a read of `len` bytes at
    /// logical `offset`.
    ///
    /// # Errors
    /// Returns a [`RangeError`] when the range end exceeds the policy
    /// capacity; no segment is computed in that case.
    pub fn plan_read(
        self,
        geom: &Geometry,
        offset: u64,
        len: usize,
    ) -> Result<Vec<Segment>, RangeError> {
        self.check_range(geom, offset, len)?;
        if len == 0 {
            return Ok(Vec::new());
        }
        Ok(match self {
            Self::Striping => striped_segments(geom, offset, len),
            Self::Mirroring => vec![mirrored_source_segment(geom, offset, len)],
        })
    }

    fn check_range(self, geom: &Geometry, offset: u64, len: usize) -> Result<(), RangeError> {
        let capacity = self.capacity_bytes(geom);
        match offset.checked_add(len as u64) {
            Some(end) if end <= capacity => Ok(()),
            _ => Err(RangeError {
                offset,
                length: len as u64,
                capacity,
            }),
        }
    }
}

/// Striped layout: logical block `i` lives on device `i % device_count` at
/// device-block `i / device_count`. Only the first segment of a range may
/// start mid-block; every later segment starts at offset zero.
fn striped_segments(geom: &Geometry, offset: u64, len: usize) -> Vec<Segment> {
    let block_size = geom.block_size as u64;
    let device_count = geom.device_count as u64;
    let end = offset + len as u64;

    let mut segments = Vec::new();
    let mut logical = offset;
    while logical < end {
        let logical_block = logical / block_size;
        let in_block = (logical % block_size) as usize;
        let take = ((end - logical) as usize).min(geom.block_size - in_block);
        segments.push(Segment {
            device_index: (logical_block % device_count) as usize,
            block_index: logical_block / device_count,
            in_block_offset: in_block,
            len: take,
            logical_offset: logical,
        });
        logical += take as u64;
    }
    segments
}

fn mirrored_write_segments(geom: &Geometry, offset: u64, len: usize) -> Vec<Segment> {
    (0..geom.device_count)
        .map(|device_index| Segment {
            device_index,
            ..mirrored_source_segment(geom, offset, len)
        })
        .collect()
}

/// Mirrored reads are always served by the first device, keeping repeated
/// reads byte-identical.
fn mirrored_source_segment(geom: &Geometry, offset: u64, len: usize) -> Segment {
    let block_size = geom.block_size as u64;
    Segment {
        device_index: 0,
        block_index: offset / block_size,
        in_block_offset: (offset % block_size) as usize,
        len,
        logical_offset: offset,
    }
}
