mod cli;
mod demo;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use placement_rs::events::{self, EventSink, SegmentEvent};
use placement_rs::retention::volume::Volume;

use crate::cli::{Cli, Command, VolumeArgs};

struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn record_segment(&self, event: SegmentEvent) {
        info!(
            direction = ?event.direction,
            device = event.device_index,
            block = event.block_index,
            payload = %String::from_utf8_lossy(&event.payload),
            "segment"
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    events::install_event_sink(Arc::new(ConsoleSink));

    let cli = Cli::parse();
    match cli.command {
        Command::Demo => demo::run()?,
        Command::Write(args) => {
            let mut volume = open_volume(&args.volume)?;
            volume.write(args.data.as_bytes())?;
            print!("{}", volume.dump()?);
        }
        Command::Read(args) => {
            let volume = open_volume(&args.volume)?;
            let bytes = volume.read(args.offset, args.length)?;
            println!("{}", String::from_utf8_lossy(&bytes));
        }
        Command::Dump(args) => {
            let volume = open_volume(&args)?;
            print!("{}", volume.dump()?);
        }
    }
    Ok(())
}

fn open_volume(args: &VolumeArgs) -> Result<Volume> {
    std::fs::create_dir_all(&args.disk_dir)?;
    Ok(Volume::open_prealloc(
        args.policy.into_policy(),
        args.geometry(),
        &args.disk_dir,
    )?)
}
