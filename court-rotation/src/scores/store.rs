use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::{Reader, WriterBuilder};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::roster::write_atomic;

#[derive(Debug, Serialize, Deserialize)]
struct ScoreRow {
    player: String,
    games: u32,
}

/// All-time totals kept as a `player,games` CSV file.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub const FILE_NAME: &'static str = "scores.csv";

    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file loads as no scores
    pub fn load(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let mut reader = Reader::from_path(&self.path)?;
        let mut scores = BTreeMap::new();
        for result in reader.deserialize() {
            let row: ScoreRow = result?;
            let player = row.player.trim().to_string();
            let total: &mut u32 = scores.entry(player.clone()).or_insert(0);
            *total = total
                .checked_add(row.games)
                .ok_or(StoreError::ScoreOverflow(player))?;
        }
        Ok(scores)
    }

    pub fn save(&self, scores: &BTreeMap<String, u32>) -> Result<(), StoreError> {
        let mut wtr = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
        for (player, games) in scores {
            wtr.serialize(ScoreRow {
                player: player.clone(),
                games: *games,
            })?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| StoreError::Io(e.into_error()))?;
        write_atomic(&self.path, &bytes)?;
        info!("Saved scores for {} player(s) to {}", scores.len(), self.path.display());
        Ok(())
    }
}
