use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use levelgen::{GeneratorSettings, Level, LevelGenerator, MAX_LEVEL_ID, MovementAtlas, TileKind};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level id to generate
    #[arg(
        short,
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_LEVEL_ID))
    )]
    level: u32,
    /// TOML file with `[map]` and `[level]` tables overriding the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the generated level as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// How many following level ids to try when generation fails
    #[arg(short, long, default_value_t = 0)]
    retries: u32,
}

fn load_settings(path: Option<&Path>) -> Result<GeneratorSettings> {
    let Some(path) = path else {
        return Ok(GeneratorSettings::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Tries `level_id` and then up to `retries` following ids, returning the first level that
/// generates along with the id it came from.
fn generate_with_retries(
    generator: &LevelGenerator,
    level_id: u32,
    retries: u32,
) -> Result<(u32, Level)> {
    let mut last_error = None;
    for attempt in 0..=retries {
        let Some(candidate) = level_id.checked_add(attempt).filter(|id| *id <= MAX_LEVEL_ID) else {
            break;
        };
        match generator.generate(candidate) {
            Ok(level) => return Ok((candidate, level)),
            Err(error) => {
                warn!("{error}");
                last_error = Some(error);
            }
        }
    }
    match last_error {
        Some(error) => Err(error).with_context(|| {
            format!("No level generated for ids {level_id}..={}", level_id.saturating_add(retries))
        }),
        None => bail!("Level id {level_id} is above the maximum of {MAX_LEVEL_ID}"),
    }
}

fn summary(level_id: u32, level: &Level) -> String {
    let tunnels = level.doors.len() / 2 + 1;
    let score: u32 = level.items.iter().map(|item| item.score).sum();
    [
        format!("Level {level_id} ({}x{} tiles)", level.map.rows(), level.map.cols()),
        format!("Fingerprint: {:016x}", level.fingerprint()),
        format!("Player: ({:.3}, {:.3})", level.player.x, level.player.y),
        format!("Goal: ({:.3}, {:.3})", level.goal.x, level.goal.y),
        format!(
            "Surfaces: {} ({} linked by {} doors)",
            level.surfaces.len(),
            tunnels,
            level.doors.len()
        ),
        format!("Regions: {}", level.regions.len()),
        format!("Items: {} worth {score} points", level.items.len()),
        format!("Spikes: {}", level.map.count(TileKind::Spike)),
    ]
    .join("\n")
}

fn write_level(path: &Path, level: &Level) -> Result<()> {
    let json = serde_json::to_string_pretty(level).context("Failed to serialize level")?;
    fs::write(path, json).with_context(|| format!("Failed to write level: {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?;
    let generator = LevelGenerator::with_settings(Arc::new(MovementAtlas::simulate()), settings);
    let (level_id, level) = generate_with_retries(&generator, args.level, args.retries)?;

    println!("{}", summary(level_id, &level));
    if let Some(path) = &args.output {
        write_level(path, &level)?;
        info!("level written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use levelgen::{AtlasCache, GenerationError, LevelConfig, MapConfig};

    use super::*;

    static ATLAS: AtlasCache = AtlasCache::new();

    fn small_generator(min_surface_size: usize) -> LevelGenerator {
        LevelGenerator::with_settings(
            ATLAS.get(),
            GeneratorSettings {
                map: MapConfig { rows: 40, cols: 60, ..MapConfig::default() },
                level: LevelConfig { min_surface_size, ..LevelConfig::default() },
            },
        )
    }

    #[test]
    fn level_ids_above_the_maximum_are_rejected() {
        assert!(Args::try_parse_from(["tools", "--level", "999999"]).is_ok());
        assert!(Args::try_parse_from(["tools", "--level", "1000000"]).is_err());
        assert!(Args::try_parse_from(["tools", "--level", "-1"]).is_err());
    }

    #[test]
    fn config_file_overrides_only_listed_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[map]\nrows = 40\ncols = 60\n\n[level]\nmin_surface_size = 12")
            .expect("write config");

        let settings = load_settings(Some(file.path())).expect("config should load");
        assert_eq!(settings.map.rows, 40);
        assert_eq!(settings.map.cols, 60);
        assert_eq!(settings.map.steps, MapConfig::default().steps);
        assert_eq!(settings.level.min_surface_size, 12);
        assert_eq!(settings.level.item_stride, LevelConfig::default().item_stride);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = load_settings(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(error.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn level_json_is_written_to_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("level.json");
        let (level_id, level) =
            generate_with_retries(&small_generator(5), 0, 0).expect("small level generates");

        write_level(&path, &level).expect("level should be written");
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read back")).expect("json");
        assert_eq!(level_id, 0);
        assert_eq!(written["items"].as_array().map(Vec::len), Some(level.items.len()));
        assert!(summary(level_id, &level).contains(&format!("{:016x}", level.fingerprint())));
    }

    #[test]
    fn retries_give_up_with_the_last_generation_error() {
        let error = generate_with_retries(&small_generator(100_000), 10, 2).unwrap_err();
        assert!(error.to_string().contains("10..=12"));
        assert!(matches!(
            error.downcast_ref::<GenerationError>(),
            Some(GenerationError::NoAcceptedSurface { level_id: 12, .. })
        ));
    }

    #[test]
    fn retries_stop_at_the_maximum_id() {
        let error = generate_with_retries(&small_generator(100_000), MAX_LEVEL_ID, 5).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<GenerationError>(),
            Some(GenerationError::NoAcceptedSurface { level_id: MAX_LEVEL_ID, .. })
        ));
    }
}
