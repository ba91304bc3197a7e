pub mod replay;
pub mod script;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use settings::{MeasureSettings, SettingsStore};
use tracing::{info, warn};

pub use replay::{ReplayFrame, ReplayHost, ScriptedSurface};
pub use script::{HostEvent, Script, ScriptError};

#[derive(Debug, Parser)]
#[command(name = "measure_replay")]
#[command(about = "Replay a scripted AR measuring session through the measurement engine")]
pub struct Cli {
    /// JSON script of host events.
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,
    /// Settings file to use instead of the platform config directory.
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
    /// Print the final frame as JSON instead of the status text of every event.
    #[arg(long)]
    json: bool,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let settings = load_settings(cli.settings.as_deref());
    let script = Script::load(&cli.script)
        .with_context(|| format!("failed to load script {}", cli.script.display()))?;

    let [width, height] = script.viewport;
    let mut host = ReplayHost::new((width, height), settings);
    info!(events = script.events.len(), "replaying script");

    let mut last = None;
    for event in &script.events {
        let frame = host.apply(event);
        if !cli.json {
            println!("{}\n", frame.status);
        }
        info!(overlay = %frame.overlay.summary(), "frame");
        last = Some(frame);
    }

    if cli.json {
        let frame = last.context("script contains no events")?;
        let text = serde_json::to_string_pretty(&frame).context("failed to encode frame")?;
        println!("{text}");
    }
    Ok(())
}

fn load_settings(path: Option<&Path>) -> MeasureSettings {
    let store = match path {
        Some(path) => SettingsStore::at(path),
        None => match SettingsStore::new() {
            Ok(store) => store,
            Err(err) => {
                warn!("Using default settings (no config dir): {err}");
                return MeasureSettings::default();
            }
        },
    };
    match store.load() {
        Ok(settings) => settings,
        Err(err) => {
            warn!("Using default settings (failed to load): {err}");
            MeasureSettings::default()
        }
    }
}
