//! Canned walkthrough: the classic two-device striping/mirroring sequence.

use anyhow::Result;

use placement_rs::layout::geometry::Geometry;
use placement_rs::layout::placement::PlacementPolicy;
use placement_rs::retention::volume::Volume;

pub fn run() -> Result<()> {
    let geom = Geometry::new(2, 4, 4);
    let mut striped = Volume::create(PlacementPolicy::Striping, geom)?;
    let mut mirrored = Volume::create(PlacementPolicy::Mirroring, geom)?;

    write_and_dump(&mut striped, b"HELLO")?;
    write_and_dump(&mut mirrored, b"HELLO")?;

    read_back(&striped, 0, 5)?;
    read_back(&mirrored, 0, 5)?;

    write_and_dump(&mut striped, b"RAIDZEROSYSTEM")?;
    read_back(&striped, 2, 10)?;

    write_and_dump(&mut mirrored, b"RAIDONESYSTEM")?;
    read_back(&mirrored, 1, 10)?;

    striped.destroy();
    mirrored.destroy();
    Ok(())
}

fn write_and_dump(volume: &mut Volume, payload: &[u8]) -> Result<()> {
    println!(
        "\n{:?} write {:?}",
        volume.policy(),
        String::from_utf8_lossy(payload)
    );
    volume.write(payload)?;
    print!("{}", volume.dump()?);
    Ok(())
}

fn read_back(volume: &Volume, offset: u64, length: usize) -> Result<()> {
    let bytes = volume.read(offset, length)?;
    println!(
        "{:?} read at offset {offset}, length {length}: {}",
        volume.policy(),
        String::from_utf8_lossy(&bytes)
    );
    Ok(())
}
