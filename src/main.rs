// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::env;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ramp_allocation::{AllocationEngine, Config, RequirementKind, ViewModel};

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(&config);

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "snapshot" {
        run_snapshot(&config, &args[2..])?;
    } else {
        run_ui_mode(&config)?;
    }

    Ok(())
}

/// Logs go to stderr; stdout belongs to the TUI / JSON output.
fn init_logging(config: &Config) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// JSON printed by `snapshot`.
#[derive(Serialize)]
struct Snapshot<'a> {
    #[serde(flatten)]
    view: &'a ViewModel,
    remaining_display: String,
    style: &'static str,
    message: Option<String>,
}

/// One command-line edit, in the order given:
///   --required N | --kind headcount|fte | CODE=N | -CODE | +CODE
fn apply_edits(engine: &mut AllocationEngine, edits: &[String], strict: bool) -> Result<()> {
    let mut iter = edits.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--required" => {
                let raw = iter.next().ok_or_else(|| anyhow!("--required needs a value"))?;
                engine.set_required_raw(raw);
            }
            "--kind" => {
                let raw = iter.next().ok_or_else(|| anyhow!("--kind needs a value"))?;
                let kind = RequirementKind::from_form_value(raw)
                    .ok_or_else(|| anyhow!("unknown requirement kind '{}'", raw))?;
                engine.set_requirement_kind(kind);
            }
            other if other.starts_with('-') || other.starts_with('+') => {
                let (code, active) = (&other[1..], other.starts_with('+'));
                if strict {
                    engine
                        .try_set_region_active(code, active)
                        .with_context(|| format!("cannot apply '{}'", other))?;
                } else {
                    engine.set_region_active(code, active);
                }
            }
            other => {
                let (code, raw) = other
                    .split_once('=')
                    .ok_or_else(|| anyhow!("expected CODE=N, got '{}'", other))?;
                if strict {
                    let value = ramp_allocation::parse_count(raw) as i64;
                    engine
                        .try_set_allocated(code, value)
                        .with_context(|| format!("cannot apply '{}'", other))?;
                } else {
                    engine.set_allocated_raw(code, raw);
                }
            }
        }
    }

    Ok(())
}

fn run_snapshot(config: &Config, edits: &[String]) -> Result<()> {
    let mut engine = config.build_engine();
    apply_edits(&mut engine, edits, config.strict_regions)?;

    let view = engine.recompute();
    info!(summary = %view.summary(), "snapshot computed");

    let snapshot = Snapshot {
        view: &view,
        remaining_display: view.remaining_display(),
        style: view.status.style().css_class(),
        message: view.message(),
    };
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config) -> Result<()> {
    let engine = config.build_engine();
    info!(
        regions = config.catalog.len(),
        required = engine.state().required,
        strict = config.strict_regions,
        "starting allocation UI"
    );

    let mut app = ui::App::new(engine, config.strict_regions);
    ui::run_ui(&mut app)?;

    println!("{}", app.view.summary());
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config) -> Result<()> {
    Err(anyhow!("TUI mode not available. Rebuild with `--features tui`, or use `snapshot`."))
}
