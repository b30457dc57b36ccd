use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use stop_timetable::aggregate::build_timetable;
use stop_timetable::catalogue::Catalogue;
use stop_timetable::config::{OutputFormat, TimetableConfig};
use stop_timetable::domain::{LocalityId, StopCode, StopIdentity};
use stop_timetable::output::{render_json, render_text};

const USAGE: &str = "usage: stop-timetable <atco_code> <gazetteer_id>";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let stop = parse_args(std::env::args().skip(1))?;
    let config = TimetableConfig::from_env().map_err(|e| e.to_string())?;

    // Fail before loading anything if the bundle is absent
    if !tokio::fs::try_exists(&config.container_path)
        .await
        .unwrap_or(false)
    {
        return Err(format!(
            "schedule bundle not found at {}",
            config.container_path.display()
        ));
    }

    let catalogue_json = tokio::fs::read_to_string(&config.catalogue_path)
        .await
        .map_err(|e| format!("reading {}: {e}", config.catalogue_path.display()))?;
    let catalogue = Catalogue::from_json(&catalogue_json)
        .map_err(|e| format!("loading {}: {e}", config.catalogue_path.display()))?;

    let container = tokio::fs::read(&config.container_path)
        .await
        .map_err(|e| format!("reading {}: {e}", config.container_path.display()))?;
    info!(
        path = %config.container_path.display(),
        bytes = container.len(),
        "loaded schedule bundle"
    );

    let query = stop.clone();
    let entries = tokio::task::spawn_blocking(move || {
        build_timetable(container, &query, catalogue.entries())
    })
    .await
    .map_err(|e| format!("timetable task failed: {e}"))?
    .map_err(|e| format!("opening {}: {e}", config.container_path.display()))?;

    let rendered = match config.output {
        OutputFormat::Text => render_text(&stop.code, &entries),
        OutputFormat::Json => render_json(&entries).map_err(|e| e.to_string())? + "\n",
    };
    print!("{rendered}");

    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<StopIdentity, String> {
    let (Some(code), Some(locality), None) = (args.next(), args.next(), args.next()) else {
        return Err(USAGE.to_string());
    };

    let code = StopCode::parse(&code).map_err(|e| e.to_string())?;
    let locality = LocalityId::parse(&locality).map_err(|e| e.to_string())?;
    Ok(StopIdentity::new(code, locality))
}
