//! Command-line front end for the cognitive placement puzzle.
//!
//! Plays one scenario over a line-oriented JSON protocol: intents and speech
//! requests arrive on stdin, one reply per line goes to stdout. Logs go to
//! stderr so they never interleave with replies.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `puzzle-config.yaml` (or `PUZZLE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Load the scenario from a file or the built-in set
//! 4. Create the engine and the narrator
//! 5. Answer stdin lines until EOF

mod error;
mod protocol;

use std::path::{Path, PathBuf};

use puzzle_engine::config::PuzzleConfig;
use puzzle_engine::{Narrator, PuzzleEngine, ScenarioError, TracingSpeech, scenario};
use puzzle_types::Scenario;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::protocol::Reply;

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "PUZZLE_CONFIG";

/// Configuration file used when `PUZZLE_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "puzzle-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if startup fails or stdin/stdout break.
#[tokio::main]
async fn main() -> Result<(), CliError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config);
    info!(
        scenario = config.session.scenario,
        scenario_path = ?config.session.scenario_path,
        trigger = ?config.twists.trigger,
        voice_enabled = config.speech.voice_enabled,
        "puzzle-cli starting"
    );

    // 3. Load the scenario.
    let scenario = load_scenario(&config)?;
    info!(
        scenario = %scenario.id,
        levels = scenario.level_count(),
        "Scenario loaded"
    );

    // 4. Create the engine and narrator.
    let mut engine = PuzzleEngine::new(scenario, &config)?;
    let mut narrator = Narrator::from_config(TracingSpeech, &config.speech);

    // 5. Serve stdin.
    let mut stdout = tokio::io::stdout();
    write_reply(&mut stdout, &protocol::started(&engine)).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut handled: u64 = 0;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = protocol::handle(&mut engine, &mut narrator, &line);
        write_reply(&mut stdout, &reply).await?;
        handled = handled.saturating_add(1);
    }

    info!(
        handled,
        score = engine.state().score,
        level = engine.state().current_level,
        "Input closed, session over"
    );
    Ok(())
}

/// Load the configuration file, falling back to defaults when it is absent.
fn load_config() -> Result<PuzzleConfig, CliError> {
    let path = std::env::var(CONFIG_PATH_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        Ok(PuzzleConfig::from_file(&path)?)
    } else {
        let mut config = PuzzleConfig::default();
        config.session.apply_env_overrides();
        Ok(config)
    }
}

/// Install the tracing subscriber on stderr.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(config: &PuzzleConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Pick the scenario file if one is configured, otherwise a built-in one.
fn load_scenario(config: &PuzzleConfig) -> Result<Scenario, ScenarioError> {
    match config.session.scenario_path.as_deref() {
        Some(path) => load_scenario_file(path),
        None => puzzle_engine::builtin_scenario(&config.session.scenario)
            .ok_or_else(|| ScenarioError::UnknownScenario(config.session.scenario.clone())),
    }
}

fn load_scenario_file(path: &Path) -> Result<Scenario, ScenarioError> {
    info!(path = %path.display(), "Loading scenario file");
    scenario::load(path)
}

/// Write one reply as a JSON line and flush.
async fn write_reply(stdout: &mut tokio::io::Stdout, reply: &Reply) -> Result<(), CliError> {
    let mut encoded = serde_json::to_string(reply)?;
    encoded.push('\n');
    stdout.write_all(encoded.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
