use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use xpts_radar::analysis_export::{self, OutputTargets};
use xpts_radar::config::RunConfig;
use xpts_radar::dataset;
use xpts_radar::pipeline;
use xpts_radar::summary::LeagueSummary;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = RunConfig::resolve(&args);
    let started = Instant::now();

    let records = dataset::load_team_records(&cfg.input)?;
    let report = pipeline::run(&records)
        .with_context(|| format!("analysis of {} failed", cfg.input.display()))?;

    let targets = OutputTargets {
        csv: &cfg.output,
        json: cfg.json.as_deref(),
        xlsx: cfg.xlsx.as_deref(),
    };
    let workbook = analysis_export::write_outputs(targets, &report).context("no output written")?;
    info!(path = %cfg.output.display(), rows = report.rows.len(), "saved risk analysis");
    if let Some(path) = &cfg.json {
        info!(path = %path.display(), "wrote json report");
    }
    if let (Some(path), Some(export)) = (&cfg.xlsx, &workbook) {
        info!(
            path = %path.display(),
            rows = export.rows,
            candidates = export.candidate_rows,
            "wrote workbook"
        );
    }

    if !cfg.quiet {
        println!("{}", LeagueSummary::from_report(&report).render());
    }

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        teams = report.rows.len(),
        output = %cfg.output.display(),
        "run complete"
    );
    Ok(())
}

/// Logs go to stderr so stdout carries only the summary.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("xpts_radar=info,warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
