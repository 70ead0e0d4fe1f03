use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tilemap_loader::{LoaderConfig, TileKind, TiledMap};

/// Load a tile map and write its composited preview as a PNG.
#[derive(Parser)]
struct Args {
    /// Source map image; its size sets the canvas size
    image: PathBuf,

    /// Map layout JSON
    map: PathBuf,

    /// Tileset JSON
    tileset: PathBuf,

    /// Where to write the preview
    #[arg(short, long, default_value = "preview.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 40)]
    tile_width: u32,

    #[arg(long, default_value_t = 40)]
    tile_height: u32,

    /// Use --tile-width/--tile-height even if the map declares a tile size
    #[arg(long, default_value_t = false)]
    force_tile_size: bool,

    /// Also dump the resolved grid as JSON to this file
    #[arg(long)]
    dump_grid: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = LoaderConfig::new()
        .with_tile_size(args.tile_width, args.tile_height)
        .with_honor_map_tile_size(!args.force_tile_size);

    let map = TiledMap::load(&args.image, &args.map, &args.tileset, &config)
        .with_context(|| format!("failed to load map {}", args.map.display()))?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for (_, kind) in map.grid.iter() {
        let label = match kind {
            TileKind::Empty => "empty".to_string(),
            TileKind::Wall => "wall".to_string(),
            TileKind::Other(t) => format!("type {}", t),
        };
        *counts.entry(label).or_default() += 1;
    }
    for (label, count) in &counts {
        info!("{:>10}: {} cell(s)", label, count);
    }

    if let Some(path) = &args.dump_grid {
        let json = serde_json::to_string_pretty(&map.grid)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    }

    let canvas = map.render(&config.palette);
    canvas
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("wrote {}", args.output.display());
    Ok(())
}
