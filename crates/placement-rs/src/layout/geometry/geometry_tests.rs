use super::*;

#[test]
fn arena_len_is_blocks_times_block_size() {
    let geom = Geometry::new(2, 4, 4);
    assert_eq!(geom.arena_len(), 16);

    let geom = Geometry::new(3, 1024, 512);
    assert_eq!(geom.arena_len(), 512 * 1024);
}

#[test]
fn degenerate_geometries_are_flagged() {
    assert!(Geometry::new(0, 4, 4).is_degenerate());
    assert!(Geometry::new(2, 0, 4).is_degenerate());
    assert!(Geometry::new(2, 4, 0).is_degenerate());
    assert!(!Geometry::new(1, 1, 1).is_degenerate());
}

#[test]
fn arena_len_saturates_instead_of_overflowing() {
    let geom = Geometry::new(1, u64::MAX, 2);
    assert_eq!(geom.arena_len(), u64::MAX);
}
