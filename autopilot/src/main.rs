use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use apocalypse_autopilot::benchmark::{resolve_pilots, run_benchmark, BenchmarkConfig, Objective};
use apocalypse_autopilot::highscore::JsonHighScoreStore;
use apocalypse_autopilot::pilots::{create_pilot, describe_pilots, pilot_ids};
use apocalypse_autopilot::runner::{run_pilot, run_pilot_with_store};
use apocalypse_autopilot::util::{parse_seed, parse_seed_csv, seed_sequence, seed_to_hex};

#[derive(Parser, Debug)]
#[command(name = "apocalypse-autopilot")]
#[command(about = "Headless pilot harness for the Asteroids: Apocalypse simulation core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available pilots
    ListPilots,
    /// Run a single pilot on one seed and print the metrics
    Run {
        #[arg(long)]
        pilot: String,
        #[arg(long)]
        seed: String,
        /// Frame cap (5 min at 60fps = 18000)
        #[arg(long, default_value_t = 18_000)]
        max_frames: u32,
        /// Persist the high score to this JSON file, like a played session
        #[arg(long)]
        high_score_file: Option<PathBuf>,
        /// Also write the run metrics to this path as JSON
        #[arg(long)]
        metrics_file: Option<PathBuf>,
    },
    /// Run every (pilot, seed) pair and rank the pilots
    Benchmark {
        /// Comma-separated pilot ids; defaults to the full roster
        #[arg(long)]
        pilots: Option<String>,
        /// Comma-separated explicit seeds
        #[arg(long)]
        seeds: Option<String>,
        /// First seed of a derived sequence when --seeds is absent
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value_t = 18_000)]
        max_frames: u32,
        #[arg(long, value_enum, default_value_t = CliObjective::Score)]
        objective: CliObjective,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Rayon worker count; defaults to one per core
        #[arg(long)]
        jobs: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliObjective {
    Score,
    Survival,
    Hybrid,
}

impl From<CliObjective> for Objective {
    fn from(value: CliObjective) -> Self {
        match value {
            CliObjective::Score => Objective::Score,
            CliObjective::Survival => Objective::Survival,
            CliObjective::Hybrid => Objective::Hybrid,
        }
    }
}

fn main() -> Result<()> {
    let Cli { command } = Cli::parse();

    match command {
        Commands::ListPilots => {
            for (id, description) in describe_pilots() {
                println!("{id:12} {description}");
            }
        }
        Commands::Run {
            pilot,
            seed,
            max_frames,
            high_score_file,
            metrics_file,
        } => {
            if create_pilot(&pilot).is_none() {
                let available = pilot_ids().join(", ");
                return Err(anyhow!("unknown pilot '{pilot}'. available: {available}"));
            }
            let seed = parse_seed(&seed)?;
            let metrics = match high_score_file {
                Some(path) => run_pilot_with_store(
                    &pilot,
                    seed,
                    max_frames,
                    Box::new(JsonHighScoreStore::new(path)),
                )?,
                None => run_pilot(&pilot, seed, max_frames)?,
            };

            if let Some(path) = metrics_file {
                let json = serde_json::to_vec_pretty(&metrics)
                    .context("failed to serialize run metrics")?;
                std::fs::write(&path, json)
                    .with_context(|| format!("failed writing {}", path.display()))?;
            }

            println!("pilot={}", metrics.pilot_id);
            println!("seed={}", seed_to_hex(seed));
            println!("frames={}", metrics.frame_count);
            println!("score={}", metrics.final_score);
            println!("lives={}", metrics.final_lives);
            println!("wave={}", metrics.final_wave);
            println!("game_over={}", metrics.game_over);
            println!(
                "input_frames=action:{},turn:{},thrust:{},fire:{}",
                metrics.action_frames,
                metrics.turn_frames,
                metrics.thrust_frames,
                metrics.fire_frames
            );
        }
        Commands::Benchmark {
            pilots,
            seeds,
            seed_start,
            seed_count,
            max_frames,
            objective,
            out_dir,
            jobs,
        } => {
            let pilots = resolve_pilots(pilots.as_deref())?;
            let seeds = match seeds {
                Some(csv) => parse_seed_csv(&csv)?,
                None => {
                    let start = match seed_start {
                        Some(s) => parse_seed(&s)?,
                        None => 0xA57E_0001,
                    };
                    seed_sequence(start, seed_count)
                }
            };
            let objective: Objective = objective.into();
            let out_dir = out_dir.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "benchmarks/{}-{}",
                    objective.as_str(),
                    timestamp_suffix()
                ))
            });

            let report = run_benchmark(BenchmarkConfig {
                pilots,
                seeds,
                max_frames,
                objective,
                out_dir: out_dir.clone(),
                jobs,
            })?;

            println!("objective={}", objective.as_str());
            println!("runs={}", report.run_count);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            println!("out_dir={}", out_dir.display());
            println!("rankings:");
            for (idx, pilot) in report.pilot_rankings.iter().enumerate() {
                println!(
                    "  {}. {}  objective={:.2} avg_score={:.1} avg_frames={:.1} avg_wave={:.1} survival={:.0}%",
                    idx + 1,
                    pilot.pilot_id,
                    pilot.objective_value,
                    pilot.avg_score,
                    pilot.avg_frames,
                    pilot.avg_wave,
                    pilot.survival_rate * 100.0,
                );
            }
        }
    }

    Ok(())
}

fn timestamp_suffix() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{now}")
}
