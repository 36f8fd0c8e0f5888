//! Read-only diagnostics: structured dumps of device block contents.


use std::fmt;

use crate::error::VolumeError;
use crate::retention::volume::Volume;

/// Placeholder glyph for never-written (zero) bytes in rendered dumps.
pub const ZERO_GLYPH: char = '.';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDump {
    pub block_index: u64,
    pub bytes: Vec<u8>,
    pub rendered: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDump {
    pub device_index: usize,
    pub blocks: Vec<BlockDump>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeDump {
    pub devices: Vec<DeviceDump>,
}

/// Render one block's bytes, substituting [`ZERO_GLYPH`] for zero bytes.
#[must_use]
pub fn render_block(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b == 0 { ZERO_GLYPH } else { char::from(b) })
        .collect()
}

/// Snapshot every device's blocks. Never mutates volume or store state.
///
/// # Errors
/// Fails only when the volume has been destroyed.
pub fn dump(volume: &Volume) -> Result<VolumeDump, VolumeError> {
    let geom = volume.geometry();
    let mut devices = Vec::with_capacity(geom.device_count);
    for device_index in 0..geom.device_count {
        let mut blocks = Vec::new();
        for block_index in 0..geom.blocks_per_device {
            let bytes = volume.snapshot_block(device_index, block_index)?;
            let rendered = render_block(&bytes);
            blocks.push(BlockDump {
                block_index,
                bytes,
                rendered,
            });
        }
        devices.push(DeviceDump {
            device_index,
            blocks,
        });
    }
    Ok(VolumeDump { devices })
}

impl fmt::Display for VolumeDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for device in &self.devices {
            write!(f, "device {}:", device.device_index)?;
            for block in &device.blocks {
                write!(f, " [{}]", block.rendered)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
