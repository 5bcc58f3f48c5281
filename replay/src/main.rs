use anyhow::Context;
use clap::Parser;
use report::ReportWriter;
use scenario::Scenario;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod report;
mod scenario;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Replays recorded sensor scenarios through the fusion core")]
struct Args {
    /// Scenario YAML with one entry per scan cycle
    #[arg(long, conflicts_with = "demo")]
    scenario: Option<PathBuf>,
    /// Replay the built-in harbor scenario
    #[arg(long, default_value_t = false)]
    demo: bool,
    /// Load detector settings from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long)]
    noise_threshold: Option<f64>,
    #[arg(long)]
    fusion_threshold: Option<f64>,
    #[arg(long)]
    history_capacity: Option<usize>,
    /// Clear the whole tracking history on overflow instead of evicting LRU
    #[arg(long, default_value_t = false)]
    bulk_clear: bool,
    /// Print each cycle as one JSON line
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Append a one-line summary per cycle to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Pace cycles this many milliseconds apart (Ctrl+C stops the replay)
    #[arg(long)]
    interval_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base_config = match &args.workflow {
        Some(path) => WorkflowConfig::load(path)?,
        None => WorkflowConfig::default(),
    };
    let workflow_config = base_config.with_overrides(
        args.noise_threshold,
        args.fusion_threshold,
        args.history_capacity,
        args.bulk_clear,
    );

    let scenario = match (&args.scenario, args.demo) {
        (Some(path), _) => Scenario::load(path)?,
        (None, true) => Scenario::demo()?,
        (None, false) => anyhow::bail!("pass --scenario <path> or --demo"),
    };

    let runner = Runner::new(&workflow_config)?;
    let writer = ReportWriter::new(args.json, args.report.clone());
    writer.status(&format!(
        "Scenario {} -> {} cycles, {} readings",
        scenario.name,
        scenario.cycles.len(),
        scenario.reading_count()
    ));
    if let Some(description) = &scenario.description {
        writer.status(description);
    }

    match args.interval_ms.or(workflow_config.interval_ms) {
        Some(interval_ms) => replay_paced(&runner, &writer, &scenario, interval_ms)?,
        None => {
            for (index, cycle) in scenario.cycles.iter().enumerate() {
                let report = runner.execute_cycle(cycle);
                writer.write_cycle(index, &report)?;
            }
        }
    }

    writer.status(&format!(
        "Replay finished, {} detections recorded.",
        runner.detector().total_detections()
    ));
    Ok(())
}

fn replay_paced(
    runner: &Runner,
    writer: &ReportWriter,
    scenario: &Scenario,
    interval_ms: u64,
) -> anyhow::Result<()> {
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for paced replay")?;

    runtime.block_on(async {
        let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
        for (index, cycle) in scenario.cycles.iter().enumerate() {
            tokio::select! {
                _ = ticker.tick() => {}
                result = signal::ctrl_c() => {
                    result.context("awaiting Ctrl+C to stop")?;
                    writer.status("Interrupted, stopping replay.");
                    break;
                }
            }
            let report = runner.execute_cycle(cycle);
            writer.write_cycle(index, &report)?;
        }
        Ok::<(), anyhow::Error>(())
    })
}
