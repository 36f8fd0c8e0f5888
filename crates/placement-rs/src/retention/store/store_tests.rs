use crate::error::StoreError;
use crate::retention::store::BlockStore;
use rand::RngCore;
use tempfile::TempDir;

const BLOCKS: u64 = 8;
const BLOCK_SIZE: usize = 64;

#[test]
fn fresh_arena_reads_as_zero() {
    let store = BlockStore::in_memory(BLOCKS, BLOCK_SIZE).expect("in_memory");
    assert_eq!(store.arena_len(), 512);

    for block in 0..BLOCKS {
        let bytes = store.read_at(block, 0, BLOCK_SIZE).expect("read_at");
        assert!(bytes.iter().all(|&b| b == 0), "block {block} must be zero");
    }
}

#[test]
fn write_then_read_roundtrip() {
    let mut store = BlockStore::in_memory(BLOCKS, BLOCK_SIZE).expect("in_memory");

    let mut data = vec![0u8; 100];
    rand::rng().fill_bytes(&mut data);

    store.write_at(3, 7, &data).expect("write_at");
    let back = store.read_at(3, 7, data.len()).expect("read_at");
    assert_eq!(back, data, "roundtrip must match");
}

#[test]
fn access_may_span_blocks_but_never_the_arena_end() {
    let mut store = BlockStore::in_memory(BLOCKS, BLOCK_SIZE).expect("in_memory");

    // Spanning the last two blocks is fine.
    let data = vec![0xAB; 2 * BLOCK_SIZE];
    store.write_at(BLOCKS - 2, 0, &data).expect("span blocks");

    // One byte past the arena is not.
    let err = store.write_at(BLOCKS - 2, 1, &data).unwrap_err();
    assert!(matches!(
        err,
        StoreError::OutOfBounds {
            block_index: 6,
            in_block_offset: 1,
            arena_len: 512,
            ..
        }
    ));

    let err = store.read_at(BLOCKS - 1, 0, BLOCK_SIZE + 1).unwrap_err();
    assert!(matches!(err, StoreError::OutOfBounds { .. }));
}

#[test]
fn rejected_write_changes_nothing() {
    let mut store = BlockStore::in_memory(BLOCKS, BLOCK_SIZE).expect("in_memory");

    let data = vec![0xFF; BLOCK_SIZE + 1];
    assert!(store.write_at(BLOCKS - 1, 0, &data).is_err());

    let back = store.read_at(BLOCKS - 1, 0, BLOCK_SIZE).expect("read_at");
    assert!(back.iter().all(|&b| b == 0));
}

#[test]
fn huge_block_index_is_rejected_not_wrapped() {
    let store = BlockStore::in_memory(BLOCKS, BLOCK_SIZE).expect("in_memory");
    let err = store.read_at(u64::MAX, 0, 1).unwrap_err();
    assert!(matches!(err, StoreError::OutOfBounds { .. }));
}

#[test]
fn released_store_refuses_access() {
    let mut store = BlockStore::in_memory(BLOCKS, BLOCK_SIZE).expect("in_memory");
    assert!(!store.is_released());

    store.release();
    assert!(store.is_released());
    assert!(matches!(
        store.write_at(0, 0, b"x").unwrap_err(),
        StoreError::Released
    ));
    assert!(matches!(
        store.read_at(0, 0, 1).unwrap_err(),
        StoreError::Released
    ));
}

#[test]
fn open_prealloc_sizes_the_image_and_keeps_contents_across_reopen() {
    let dir = TempDir::new().expect("tmp dir");
    let path = dir.path().join("device-0.img");

    {
        let mut store = BlockStore::open_prealloc(&path, BLOCKS, BLOCK_SIZE).expect("open");
        assert_eq!(store.path(), Some(path.as_path()));
        assert_eq!(std::fs::metadata(&path).expect("metadata").len(), 512);
        store.write_at(2, 5, b"hello-from-mmap!").expect("write_at");
    }

    let store = BlockStore::open_prealloc(&path, BLOCKS, BLOCK_SIZE).expect("reopen");
    let back = store.read_at(2, 5, 16).expect("read_at");
    assert_eq!(&back, b"hello-from-mmap!");
}
