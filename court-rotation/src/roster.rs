use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{RosterError, RosterKind, StoreError};

/// Ordered, duplicate-free player and court names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub courts: Vec<String>,
    #[serde(default)]
    pub players: Vec<String>,
}

fn list_mut(roster: &mut Roster, kind: RosterKind) -> &mut Vec<String> {
    match kind {
        RosterKind::Player => &mut roster.players,
        RosterKind::Court => &mut roster.courts,
    }
}

impl Roster {
    pub fn new(players: Vec<String>, courts: Vec<String>) -> Self {
        Self { courts, players }
    }

    /// Trims every name and rejects blank or repeated ones
    pub fn normalized(self) -> Result<Self, RosterError> {
        let mut roster = Roster::default();
        for player in &self.players {
            roster.add(RosterKind::Player, player)?;
        }
        for court in &self.courts {
            roster.add(RosterKind::Court, court)?;
        }
        Ok(roster)
    }

    pub fn add_player(&mut self, name: &str) -> Result<(), RosterError> {
        self.add(RosterKind::Player, name)
    }

    pub fn add_court(&mut self, name: &str) -> Result<(), RosterError> {
        self.add(RosterKind::Court, name)
    }

    pub fn remove_player(&mut self, name: &str) -> Result<(), RosterError> {
        self.remove(RosterKind::Player, name)
    }

    pub fn remove_court(&mut self, name: &str) -> Result<(), RosterError> {
        self.remove(RosterKind::Court, name)
    }

    /// Renames a player in place, keeping their position
    pub fn rename_player(&mut self, from: &str, to: &str) -> Result<(), RosterError> {
        let to = to.trim();
        if to.is_empty() {
            return Err(RosterError::EmptyName(RosterKind::Player));
        }
        let index = self
            .players
            .iter()
            .position(|p| p == from)
            .ok_or_else(|| RosterError::NotFound {
                kind: RosterKind::Player,
                name: from.to_string(),
            })?;
        if from != to && self.players.iter().any(|p| p == to) {
            warn!("player '{}' already exists", to);
            return Err(RosterError::DuplicateName {
                kind: RosterKind::Player,
                name: to.to_string(),
            });
        }
        self.players[index] = to.to_string();
        Ok(())
    }

    pub fn move_player(&mut self, from: usize, to: usize) -> Result<(), RosterError> {
        self.reorder(RosterKind::Player, from, to)
    }

    pub fn move_court(&mut self, from: usize, to: usize) -> Result<(), RosterError> {
        self.reorder(RosterKind::Court, from, to)
    }

    pub fn clear_players(&mut self) {
        self.players.clear();
    }

    pub fn clear_courts(&mut self) {
        self.courts.clear();
    }

    fn add(&mut self, kind: RosterKind, name: &str) -> Result<(), RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName(kind));
        }
        let list = list_mut(self, kind);
        if list.iter().any(|existing| existing == name) {
            warn!("{} '{}' already exists", kind, name);
            return Err(RosterError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
        list.push(name.to_string());
        Ok(())
    }

    fn remove(&mut self, kind: RosterKind, name: &str) -> Result<(), RosterError> {
        let list = list_mut(self, kind);
        match list.iter().position(|existing| existing == name) {
            Some(index) => {
                list.remove(index);
                Ok(())
            }
            None => Err(RosterError::NotFound {
                kind,
                name: name.to_string(),
            }),
        }
    }

    fn reorder(&mut self, kind: RosterKind, from: usize, to: usize) -> Result<(), RosterError> {
        let list = list_mut(self, kind);
        let len = list.len();
        for index in [from, to] {
            if index >= len {
                return Err(RosterError::IndexOutOfRange { kind, index, len });
            }
        }
        let item = list.remove(from);
        list.insert(to, item);
        Ok(())
    }
}

/// JSON file holding `{"courts": [...], "players": [...]}`.
#[derive(Debug, Clone)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub const FILE_NAME: &'static str = "data.json";

    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at `<dir>/data.json`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file loads as an empty roster
    pub fn load(&self) -> Result<Roster, StoreError> {
        if !self.path.exists() {
            return Ok(Roster::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        let roster: Roster = serde_json::from_str(&contents)?;
        match roster.normalized() {
            Ok(roster) => Ok(roster),
            Err(e) => {
                warn!("Rejected roster file {}: {}", self.path.display(), e);
                Err(e.into())
            }
        }
    }

    pub fn save(&self, roster: &Roster) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(roster)?;
        write_atomic(&self.path, json.as_bytes())?;
        info!(
            "Saved {} player(s) and {} court(s) to {}",
            roster.players.len(),
            roster.courts.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Writes to a sibling temp file then renames it over `path`.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}
