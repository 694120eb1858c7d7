//! small: runnable demo for the rust_fleet delivery simulation.
//!
//! Generates (or loads) a grid, runs the default fleet against it and writes
//! CSV output plus a plain-text summary to `output/small`.
//!
//! ```text
//! small [CONFIG.json] [MAP.txt]
//! ```
//!
//! Without arguments the built-in `FleetConfig::default()` is used.  A map
//! file overrides the configured grid size.  Set `RUST_LOG=debug` to follow
//! individual agents.

mod map;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleet_core::{FleetConfig, Ledger, SimRng, Tick};
use fleet_dispatch::Assignment;
use fleet_output::{CsvWriter, OutputWriter, SimOutputObserver};
use fleet_sim::{SimBuilder, SimObserver, SimReport};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:        &str = "output/small";
/// Stream offset for map generation, so the map and the package stream
/// don't share draws.
const MAP_STREAM:        u64  = 1;
const PROGRESS_INTERVAL: u64  = 100;

// ── Observer wrapper for progress and counts ─────────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:        SimOutputObserver<W>,
    assignments:  usize,
    summary_rows: usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, assignments: 0, summary_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_assignment(&mut self, tick: Tick, assignment: &Assignment) {
        self.assignments += 1;
        self.inner.on_assignment(tick, assignment);
    }

    fn on_tick_end(&mut self, tick: Tick, ledger: &Ledger, pending: usize) {
        self.summary_rows += 1;
        if tick.is_multiple_of(PROGRESS_INTERVAL) {
            info!(tick = %tick, profit = ledger.profit, delivered = ledger.delivered, pending, "progress");
        }
        self.inner.on_tick_end(tick, ledger, pending);
    }

    fn on_sim_end(&mut self, report: &SimReport) {
        self.inner.on_sim_end(report);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<FleetConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

/// The plain-text end-of-run summary: totals, then one line per agent.
fn render_summary(report: &SimReport) -> String {
    let mut lines = vec![
        format!("Final tick: {}", report.final_tick),
        format!("Delivered packages: {} ({} late)", report.delivered, report.late),
        format!("Dropped packages: {}", report.dropped),
        format!("Dead agents: {}", report.dead_agents),
    ];
    for agent in &report.agents {
        let cargo = match agent.undelivered.len() {
            0 => "no".to_string(),
            n => n.to_string(),
        };
        lines.push(format!(
            "{} ({}, {}) at {} has {cargo} undelivered packages.",
            agent.id, agent.kind, agent.state, agent.position
        ));
    }
    if report.unassigned > 0 {
        lines.push(format!("Found {} undelivered packages at the base.", report.unassigned));
    }
    lines.push(format!("Final profit: {}", report.profit));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let mut config = match args.next() {
        Some(path) => load_config(&path)?,
        None => FleetConfig::default(),
    };

    println!("=== small: rust_fleet delivery simulation ===");

    // 1. Grid: from file if given, otherwise generated from the config.
    let grid = match args.next() {
        Some(path) => {
            let grid = map::load(&path)?;
            config.rows = grid.rows();
            config.columns = grid.cols();
            println!("Loaded {}x{} map from {}", grid.rows(), grid.cols(), path.display());
            grid
        }
        None => {
            config.validate()?;
            let mut rng = SimRng::new(config.seed).child(MAP_STREAM);
            let (grid, attempts) = map::generate(&config, &mut rng)?;
            println!("Generated {}x{} map (valid on try #{attempts})", grid.rows(), grid.cols());
            grid
        }
    };
    println!(
        "Base {}  |  clients {}  |  agents {} drones, {} robots, {} scooters",
        grid.base(),
        grid.clients().len(),
        config.drones,
        config.robots,
        config.scooters,
    );
    println!(
        "Packages {} (one every {} ticks)  |  max ticks {}  |  seed {}",
        config.total_packages, config.spawn_interval, config.max_ticks, config.seed
    );
    println!();

    // 2. Output directory; keep the map next to the CSVs.
    let out_dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(out_dir)?;
    std::fs::write(out_dir.join("map.txt"), grid.render())?;

    // 3. Build and run.
    let mut sim = SimBuilder::new(config, grid).build()?;
    let writer = CsvWriter::new(out_dir)?;
    let mut obs = ProgressObserver::new(SimOutputObserver::new(writer));

    let t0 = Instant::now();
    let report = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  assignments         : {}", obs.assignments);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!("  agent_report.csv    : {} rows", report.agents.len());
    println!();

    let summary = render_summary(&report);
    print!("{summary}");
    std::fs::write(out_dir.join("simulation.txt"), &summary)?;

    Ok(())
}
