//! JSON-backed high-score persistence: a single `{"high_score": n}`
//! document. A missing or unreadable file reads as zero, and a failed save
//! never takes the game down.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use apocalypse_core::HighScoreStore;

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonHighScoreStore {
    fn load(&mut self) -> u32 {
        let Ok(data) = fs::read(&self.path) else {
            return 0;
        };
        serde_json::from_slice::<HighScoreFile>(&data)
            .map(|f| f.high_score)
            .unwrap_or(0)
    }

    fn save(&mut self, high_score: u32) {
        let doc = HighScoreFile { high_score };
        let result = serde_json::to_vec_pretty(&doc)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                fs::write(&self.path, bytes)?;
                Ok(())
            });
        if let Err(err) = result {
            eprintln!("high score save failed ({}): {err}", self.path.display());
        }
    }
}
