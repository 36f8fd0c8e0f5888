#[cfg(test)]
mod store_tests;

use memmap2::{MmapMut, MmapOptions};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// BlockStore is one device: a fixed arena of `blocks * block_size` bytes,
/// addressed by block index. Fresh arenas read as zero.
#[derive(Debug)]
pub struct BlockStore {
    map: Option<MmapMut>,
    file: Option<File>,
    path: Option<PathBuf>,
    blocks: u64,
    block_size: usize,
}

impl BlockStore {
    /// Anonymous zero-filled arena.
    ///
    /// # Errors
    /// Returns an error if the mapping cannot be created.
    pub fn in_memory(blocks: u64, block_size: usize) -> Result<Self, StoreError> {
        let len = arena_bytes(blocks, block_size);
        let map_len = usize::try_from(len).map_err(|_| StoreError::Unaddressable { len })?;
        let map = MmapOptions::new().len(map_len).map_anon()?;
        Ok(Self {
            map: Some(map),
            file: None,
            path: None,
            blocks,
            block_size,
        })
    }

    /// Arena backed by a pre-sized image file. Existing contents are kept, so
    /// a store reopened on the same path sees its previous bytes.
    ///
    /// # Errors
    /// Returns an error if the image cannot be created/opened or mapped.
    pub fn open_prealloc(path: &Path, blocks: u64, block_size: usize) -> Result<Self, StoreError> {
        let len = arena_bytes(blocks, block_size);
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.set_len(len)?;

        let map_len = usize::try_from(len).map_err(|_| StoreError::Unaddressable { len })?;
        let map = unsafe { MmapOptions::new().len(map_len).map_mut(&file)? };

        Ok(Self {
            map: Some(map),
            file: Some(file),
            path: Some(path.to_path_buf()),
            blocks,
            block_size,
        })
    }

    #[must_use]
    pub fn arena_len(&self) -> u64 {
        arena_bytes(self.blocks, self.block_size)
    }

    #[must_use]
    pub const fn blocks(&self) -> u64 {
        self.blocks
    }

    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.map.is_none()
    }

    /// Drop the arena and any backing file handle. Further access fails with
    /// [`StoreError::Released`].
    pub fn release(&mut self) {
        self.map.take();
        self.file.take();
    }

    /// Copy `data` into the arena at the addressed position. The copy may span
    /// block boundaries but never the arena boundary.
    ///
    /// # Errors
    /// [`StoreError::Released`] after release, [`StoreError::OutOfBounds`] if
    /// the span exceeds the arena. Nothing is written on failure.
    pub fn write_at(
        &mut self,
        block_index: u64,
        in_block_offset: usize,
        data: &[u8],
    ) -> Result<(), StoreError> {
        let arena_len = self.arena_len();
        let block_size = self.block_size;
        let Some(map) = self.map.as_mut() else {
            return Err(StoreError::Released);
        };
        let (start, end) = span(arena_len, block_size, block_index, in_block_offset, data.len())?;
        map[start..end].copy_from_slice(data);
        Ok(())
    }

    /// Copy `len` bytes out of the arena at the addressed position.
    ///
    /// # Errors
    /// [`StoreError::Released`] after release, [`StoreError::OutOfBounds`] if
    /// the span exceeds the arena.
    pub fn read_at(
        &self,
        block_index: u64,
        in_block_offset: usize,
        len: usize,
    ) -> Result<Vec<u8>, StoreError> {
        let Some(map) = self.map.as_ref() else {
            return Err(StoreError::Released);
        };
        let (start, end) = span(self.arena_len(), self.block_size, block_index, in_block_offset, len)?;
        Ok(map[start..end].to_vec())
    }
}

fn arena_bytes(blocks: u64, block_size: usize) -> u64 {
    blocks.saturating_mul(block_size as u64)
}

// The arena was mapped with a usize length, so an in-bounds span always fits.
fn span(
    arena_len: u64,
    block_size: usize,
    block_index: u64,
    in_block_offset: usize,
    len: usize,
) -> Result<(usize, usize), StoreError> {
    let start = block_index
        .checked_mul(block_size as u64)
        .and_then(|b| b.checked_add(in_block_offset as u64));
    let end = start.and_then(|s| s.checked_add(len as u64));
    match (start, end) {
        (Some(start), Some(end)) if end <= arena_len => Ok((start as usize, end as usize)),
        _ => Err(StoreError::OutOfBounds {
            block_index,
            in_block_offset,
            len,
            arena_len,
        }),
    }
}
