//! Multi-seed benchmark: fan every (pilot, seed) pair across a rayon pool,
//! aggregate per pilot, and write summary.json plus CSVs to the output
//! directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pilots::pilot_ids;
use crate::runner::{run_pilot, RunMetrics};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Score,
    Survival,
    Hybrid,
}

impl Objective {
    pub fn run_value(self, metrics: &RunMetrics) -> f64 {
        match self {
            Self::Score => {
                metrics.final_score as f64
                    + metrics.frame_count as f64 * 0.08
                    + metrics.final_lives.max(0) as f64 * 120.0
            }
            Self::Survival => {
                metrics.frame_count as f64
                    + metrics.final_lives.max(0) as f64 * 850.0
                    + metrics.final_score as f64 * 0.15
            }
            Self::Hybrid => {
                metrics.final_score as f64 * 0.75
                    + metrics.frame_count as f64 * 0.55
                    + metrics.final_lives.max(0) as f64 * 260.0
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Survival => "survival",
            Self::Hybrid => "hybrid",
        }
    }
}

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub max_frames: u32,
    pub objective: Objective,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(flatten)]
    pub metrics: RunMetrics,
    pub objective_value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PilotAggregate {
    pub pilot_id: String,
    pub runs: usize,
    pub avg_score: f64,
    pub max_score: u32,
    pub avg_frames: f64,
    pub max_frames: u32,
    pub avg_lives: f64,
    pub avg_wave: f64,
    pub survival_rate: f64,
    pub objective_value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub objective: Objective,
    pub max_frames: u32,
    pub jobs: Option<usize>,
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub run_count: usize,
    pub pilot_rankings: Vec<PilotAggregate>,
    pub runs: Vec<RunRecord>,
}

pub fn resolve_pilots(input: Option<&str>) -> Result<Vec<String>> {
    match input {
        None => Ok(pilot_ids().iter().map(|id| (*id).to_string()).collect()),
        Some(raw) => {
            let pilots: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
            if pilots.is_empty() {
                return Err(anyhow!("--pilots resolved to empty list"));
            }
            Ok(pilots)
        }
    }
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.pilots.is_empty() {
        return Err(anyhow!("benchmark requires at least one pilot"));
    }
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
        }
    }
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let run_jobs: Vec<(String, u32)> = config
        .pilots
        .iter()
        .flat_map(|pilot| config.seeds.iter().map(move |seed| (pilot.clone(), *seed)))
        .collect();

    let run_one = |(pilot_id, seed): &(String, u32)| -> Result<RunRecord> {
        let metrics = run_pilot(pilot_id, *seed, config.max_frames)
            .with_context(|| format!("benchmark run failed for pilot={pilot_id} seed={seed:#x}"))?;
        let objective_value = config.objective.run_value(&metrics);
        Ok(RunRecord {
            metrics,
            objective_value,
        })
    };

    let run_results: Vec<Result<RunRecord>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let mut grouped: HashMap<String, Vec<&RunRecord>> = HashMap::new();
    for run in &runs {
        grouped
            .entry(run.metrics.pilot_id.clone())
            .or_default()
            .push(run);
    }

    let mut rankings = Vec::new();
    for (pilot_id, pilot_runs) in grouped {
        let count = pilot_runs.len();
        let sum_score: u64 = pilot_runs
            .iter()
            .map(|r| r.metrics.final_score as u64)
            .sum();
        let max_score = pilot_runs
            .iter()
            .map(|r| r.metrics.final_score)
            .max()
            .unwrap_or_default();
        let sum_frames: u64 = pilot_runs
            .iter()
            .map(|r| r.metrics.frame_count as u64)
            .sum();
        let max_frames = pilot_runs
            .iter()
            .map(|r| r.metrics.frame_count)
            .max()
            .unwrap_or_default();
        let sum_lives: i64 = pilot_runs
            .iter()
            .map(|r| r.metrics.final_lives as i64)
            .sum();
        let sum_wave: u64 = pilot_runs.iter().map(|r| r.metrics.final_wave as u64).sum();
        let survived = pilot_runs
            .iter()
            .filter(|r| !r.metrics.game_over && r.metrics.frame_count >= config.max_frames)
            .count();
        let objective_value =
            pilot_runs.iter().map(|r| r.objective_value).sum::<f64>() / count as f64;

        rankings.push(PilotAggregate {
            pilot_id,
            runs: count,
            avg_score: sum_score as f64 / count as f64,
            max_score,
            avg_frames: sum_frames as f64 / count as f64,
            max_frames,
            avg_lives: sum_lives as f64 / count as f64,
            avg_wave: sum_wave as f64 / count as f64,
            survival_rate: survived as f64 / count as f64,
            objective_value,
        });
    }

    rankings.sort_by(|a, b| {
        b.objective_value
            .total_cmp(&a.objective_value)
            .then_with(|| b.avg_score.total_cmp(&a.avg_score))
            .then_with(|| b.avg_frames.total_cmp(&a.avg_frames))
    });

    let mut sorted_runs = runs;
    sorted_runs.sort_by(|a, b| {
        b.objective_value
            .total_cmp(&a.objective_value)
            .then_with(|| b.metrics.final_score.cmp(&a.metrics.final_score))
            .then_with(|| b.metrics.frame_count.cmp(&a.metrics.frame_count))
    });

    write_runs_csv(&config.out_dir.join("runs.csv"), &sorted_runs)?;
    write_rankings_csv(&config.out_dir.join("rankings.csv"), &rankings)?;

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        objective: config.objective,
        max_frames: config.max_frames,
        jobs: config.jobs,
        pilots: config.pilots,
        seeds: config.seeds,
        run_count: sorted_runs.len(),
        pilot_rankings: rankings,
        runs: sorted_runs,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;

    Ok(report)
}

fn write_runs_csv(path: &Path, rows: &[RunRecord]) -> Result<()> {
    let mut csv = String::from(
        "pilot_id,seed_hex,seed,frame_count,final_score,final_lives,final_wave,game_over,objective_value,action_frames,turn_frames,thrust_frames,fire_frames\n",
    );
    for row in rows {
        let m = &row.metrics;
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            m.pilot_id,
            m.seed_hex,
            m.seed,
            m.frame_count,
            m.final_score,
            m.final_lives,
            m.final_wave,
            m.game_over,
            row.objective_value,
            m.action_frames,
            m.turn_frames,
            m.thrust_frames,
            m.fire_frames
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}

fn write_rankings_csv(path: &Path, rows: &[PilotAggregate]) -> Result<()> {
    let mut csv = String::from(
        "rank,pilot_id,runs,avg_score,max_score,avg_frames,max_frames,avg_lives,avg_wave,survival_rate,objective_value\n",
    );
    for (idx, row) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{:.2},{},{:.2},{},{:.2},{:.2},{:.4},{:.4}\n",
            idx + 1,
            row.pilot_id,
            row.runs,
            row.avg_score,
            row.max_score,
            row.avg_frames,
            row.max_frames,
            row.avg_lives,
            row.avg_wave,
            row.survival_rate,
            row.objective_value
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}
