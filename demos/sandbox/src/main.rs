//! sandbox — one factory-floor episode with a scripted policy schedule.
//!
//! Usage: `sandbox [config.json] [output-dir]`.  Without arguments the
//! default 25×25 floor with 100 workers is used and output goes to
//! `./output`.  Logging defaults to `warn`; set `RUST_LOG=info` (or `debug`)
//! to see the environment's own log lines.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use ff_core::{EnvConfig, PolicyDelta};
use ff_output::{CsvWriter, EnvOutputObserver, OutputWriter};
use ff_sim::{ActionSpace, DailyStats, EnvObserver, FactoryEnvironment, StepResult};

// ── Policy schedule ───────────────────────────────────────────────────────────

/// `(step, action)`: applied through `step(Some(..))` at that step.
const SCHEDULE: &[(u64, &str)] = &[
    (48, r#"{"mask_mandate": true, "social_distancing": true}"#),
    (96, r#"{"splitting_level": 2, "shifts_per_day": 2, "testing_level": "medium"}"#),
    (144, r#"{"cleaning_type": "heavy"}"#),
];

// ── Observer wrapper that prints each day ─────────────────────────────────────

struct DailyPrinter<W: OutputWriter> {
    inner:      EnvOutputObserver<W>,
    step_rows:  usize,
    daily_rows: usize,
}

impl<W: OutputWriter> DailyPrinter<W> {
    fn new(inner: EnvOutputObserver<W>) -> Self {
        Self { inner, step_rows: 0, daily_rows: 0 }
    }
}

impl<W: OutputWriter> EnvObserver for DailyPrinter<W> {
    fn on_step_end(&mut self, result: &StepResult) {
        self.step_rows += 1;
        self.inner.on_step_end(result);
    }

    fn on_day_end(&mut self, day: &DailyStats) {
        self.daily_rows += 1;
        println!(
            "  day {:>3}  new {:>3}  healthy {:>4}  infected {:>4}  recovered {:>4}  dead {:>3}  \
             quarantined {:>3}  productivity {:.3}",
            day.day,
            day.new_infections,
            day.healthy,
            day.infected,
            day.recovered,
            day.dead,
            day.quarantined,
            day.mean_productivity
        );
        self.inner.on_day_end(day);
    }

    fn on_policy_change(&mut self, policy: &ff_core::PolicyConfig) {
        println!("  policy → action #{}", ActionSpace::encode(policy));
    }

    fn on_episode_end(&mut self, steps: u64) {
        self.inner.on_episode_end(steps);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => EnvConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => EnvConfig::default(),
    };
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("output"));

    println!("=== sandbox — factory floor episode ===");
    println!(
        "Floor: {}x{}  |  Workers: {}  |  Max steps: {}  |  Seed: {}",
        config.width, config.height, config.num_agents, config.max_steps, config.seed
    );
    println!();

    let schedule = SCHEDULE
        .iter()
        .map(|&(step, json)| Ok((step, PolicyDelta::from_json(json)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut env = FactoryEnvironment::standard(config)?;
    let writer = CsvWriter::new(&out_dir)
        .with_context(|| format!("opening output in {}", out_dir.display()))?;
    let mut obs = DailyPrinter::new(EnvOutputObserver::new(writer));

    let t0 = Instant::now();
    let mut last = None;
    while !env.is_done() {
        let next_step = env.clock.current_step + 1;
        let action = schedule.iter().find(|(at, _)| *at == next_step).map(|(_, d)| d);
        last = Some(env.step_observed(action, &mut obs)?);
    }
    obs.on_episode_end(env.clock.current_step);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        return Err(e).context("writing episode output");
    }

    let usage = serde_json::to_string_pretty(env.stats.policy_usage())?;
    std::fs::write(out_dir.join("policy_usage.json"), &usage)?;

    println!();
    if let Some(last) = &last {
        println!("Final state:        {:?}", last.state.as_slice());
    }
    println!("Steps:              {}", env.stats.steps());
    println!("Total infections:   {}", env.stats.total_new_infections());
    println!("Cumulative reward:  {:.3}", env.stats.cumulative_reward());
    println!("Rows written:       {} steps, {} days", obs.step_rows, obs.daily_rows);
    println!("Output:             {}", out_dir.display());
    info!("episode finished in {:.2?}", elapsed);
    Ok(())
}
