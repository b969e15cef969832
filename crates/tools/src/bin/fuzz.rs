use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use levelgen::{
    GenerationError, GeneratorSettings, Level, LevelConfig, LevelGenerator, MAX_LEVEL_ID,
    MapConfig, MovementAtlas, TileKind,
};
use log::info;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 50)]
    levels: u32,
    /// Generate full-size maps instead of small ones
    #[arg(long)]
    full_size: bool,
}

fn assert_invariants(level_id: u32, level: &Level, min_surface_size: usize) {
    assert!(
        level.items.windows(2).all(|pair| pair[0].position.x <= pair[1].position.x),
        "Invariant failed: items out of x order on level {level_id}"
    );

    for (index, door) in level.doors.iter().enumerate() {
        assert_ne!(door.other.index(), index, "Invariant failed: self-linked door on level {level_id}");
        assert_eq!(
            level.door(door.other).other.index(),
            index,
            "Invariant failed: one-way door on level {level_id}"
        );
    }

    let accepted = level.surfaces.iter().filter(|surface| surface.len() >= min_surface_size).count();
    assert_eq!(
        level.doors.len(),
        2 * (accepted - 1),
        "Invariant failed: door count does not chain {accepted} tunnels on level {level_id}"
    );

    let mut seen = BTreeSet::new();
    for cell in level.surfaces.iter().flatten() {
        assert!(seen.insert(*cell), "Invariant failed: {cell:?} in two surfaces on level {level_id}");
    }

    for (cell, tile) in level.map.tiles().iter() {
        if tile == TileKind::Spike {
            assert!(
                level.map.is_solid_cell(cell.row as i32 + 1, cell.col as i32),
                "Invariant failed: floating spike at {cell:?} on level {level_id}"
            );
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = GeneratorSettings::default();
    if !args.full_size {
        settings.map = MapConfig { rows: 40, cols: 80, ..MapConfig::default() };
        settings.level = LevelConfig { min_surface_size: 20, ..LevelConfig::default() };
    }
    let min_surface_size = settings.level.min_surface_size;

    println!("Starting level fuzz on seed {} for {} levels...", args.seed, args.levels);
    let generator = LevelGenerator::with_settings(Arc::new(MovementAtlas::simulate()), settings);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut generated = 0;
    let mut rejected = 0;
    for _ in 0..args.levels {
        let level_id = (rng.next_u64() % (u64::from(MAX_LEVEL_ID) + 1)) as u32;
        match generator.generate(level_id) {
            Ok(level) => {
                assert_invariants(level_id, &level, min_surface_size);
                info!("level {level_id} ok ({:016x})", level.fingerprint());
                generated += 1;
            }
            Err(error @ GenerationError::NoAcceptedSurface { .. }) => {
                println!("{error}");
                rejected += 1;
            }
            Err(error) => return Err(error.into()),
        }
    }

    println!("Fuzzing completed successfully: {generated} levels checked, {rejected} without surfaces.");
    Ok(())
}
