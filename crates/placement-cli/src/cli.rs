use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use placement_rs::layout::geometry::Geometry;
use placement_rs::layout::placement::PlacementPolicy;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the canned striping/mirroring walkthrough on in-memory volumes.
    Demo,

    /// Place a payload at the start of a file-backed volume.
    Write(WriteArgs),

    /// Read a byte range back from a file-backed volume.
    Read(ReadArgs),

    /// Print the per-device block dump of a file-backed volume.
    Dump(VolumeArgs),
}

#[derive(Args)]
pub struct VolumeArgs {
    /// Directory holding the device-<i>.img arenas.
    #[arg(long, env = "PLACEMENT_DISK_DIR")]
    pub disk_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = PolicyArg::Striping)]
    pub policy: PolicyArg,

    #[arg(long, default_value_t = 2)]
    pub devices: usize,

    #[arg(long, default_value_t = 4)]
    pub blocks: u64,

    #[arg(long, default_value_t = 4)]
    pub block_size: usize,
}

#[derive(Args)]
pub struct WriteArgs {
    #[command(flatten)]
    pub volume: VolumeArgs,

    /// Payload bytes (UTF-8).
    pub data: String,
}

#[derive(Args)]
pub struct ReadArgs {
    #[command(flatten)]
    pub volume: VolumeArgs,

    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    #[arg(long)]
    pub length: usize,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum PolicyArg {
    Striping,
    Mirroring,
}

impl PolicyArg {
    pub fn into_policy(self) -> PlacementPolicy {
        match self {
            Self::Striping => PlacementPolicy::Striping,
            Self::Mirroring => PlacementPolicy::Mirroring,
        }
    }
}

impl VolumeArgs {
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.devices, self.blocks, self.block_size)
    }
}
