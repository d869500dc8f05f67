use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use calc_cli::script::{parse_keys, parse_script};
use calc_cli::session::{Session, Step};
use calc_core::{CalculatorMode, CalculatorState};
use calc_input::bindings;
use calc_settings::{
    FileSource, SettingsConfig, SettingsError, SettingsProvider, SettingsRefresher,
    SettingsSnapshot, SharedSettings,
};

use crate::cli::{BindingsArgs, RunArgs, SettingsArgs};
use crate::summary::{print_bindings, print_settings};

/// Everything a `run` produced.
pub struct RunOutcome {
    pub mode: CalculatorMode,
    pub steps: Vec<Step>,
    pub state: CalculatorState,
}

pub fn run_keys(args: &RunArgs) -> Result<RunOutcome> {
    let events = match &args.script {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read key script {}", path.display()))?;
            parse_script(&text).with_context(|| format!("parse {}", path.display()))?
        }
        None => parse_keys(&args.keys)?,
    };
    let (settings, _) = load_settings(args.settings.as_deref())?;
    let mode = CalculatorMode::from(args.mode);

    let run_span = info_span!("run", %mode, keys = events.len());
    let _run_guard = run_span.enter();
    let mut session = Session::new(mode);
    let steps = session.run(events, &settings);
    let rejected = steps
        .iter()
        .filter(|step| step.dispatch.notice().is_some())
        .count();
    let state = session.into_state();
    info!(
        rejected,
        display = %state.display,
        pending = state.has_pending_operation(),
        "key script finished"
    );

    Ok(RunOutcome { mode, steps, state })
}

pub fn run_bindings(args: &BindingsArgs) -> Result<()> {
    let (settings, _) = load_settings(args.settings.as_deref())?;
    let mode = CalculatorMode::from(args.mode);
    print_bindings(mode, &bindings(mode), &settings);
    Ok(())
}

pub fn run_settings(args: &SettingsArgs) -> Result<()> {
    let (settings, source) = load_settings(args.settings.as_deref())?;
    let source = source.map_or_else(
        || "defaults (no settings file)".to_string(),
        |path| path.display().to_string(),
    );
    print_settings(&source, &settings);
    Ok(())
}

/// Load the administrator snapshot.
///
/// An explicit path must load. Without one, the file named by the local
/// config is used when it exists; otherwise every capability is enabled.
/// Returns the snapshot and the file it came from.
fn load_settings(explicit: Option<&Path>) -> Result<(SettingsSnapshot, Option<PathBuf>)> {
    let config = SettingsConfig::load();
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config.settings_file();
            if !path.exists() {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok((SettingsSnapshot::default(), None));
            }
            path
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start settings runtime")?;
    let refresher = SettingsRefresher::new(FileSource::new(&path), SharedSettings::default())
        .with_retry_policy(config.retry);
    runtime
        .block_on(refresher.refresh_once())
        .map_err(describe_settings_error)?;

    let snapshot = refresher.shared().current_settings();
    Ok((SettingsSnapshot::clone(&snapshot), Some(path)))
}

fn describe_settings_error(error: SettingsError) -> anyhow::Error {
    let mut message = error.user_message();
    if let Some(hint) = error.suggestion() {
        message.push_str("\nhint: ");
        message.push_str(&hint);
    }
    anyhow::Error::new(error).context(message)
}
