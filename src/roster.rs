//! Participants and where they come from
//!
//! The roster keeps the full fetched user list next to the current
//! participants, so removed players can be restored in one go.

use std::path::{Path, PathBuf};

use crate::error::{LadderError, Result};

/// Supplier of active user names (the user-listing API in a web host)
pub trait UserSource {
    fn active_user_names(&self) -> Result<Vec<String>>;
}

/// Newline-separated names file; blank lines and `#` comments are skipped
#[derive(Debug, Clone)]
pub struct NamesFile {
    path: PathBuf,
}

impl NamesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserSource for NamesFile {
    fn active_user_names(&self) -> Result<Vec<String>> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| LadderError::UserSource(format!("{}: {e}", self.path.display())))?;
        Ok(parse_names(&text))
    }
}

/// Fixed in-memory list
impl UserSource for Vec<String> {
    fn active_user_names(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

pub(crate) fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Ordered participants plus the full list they were drawn from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    all_users: Vec<String>,
    participants: Vec<String>,
}

impl Roster {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            all_users: names.clone(),
            participants: names,
        }
    }

    /// Current participants; index is the start column
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn all_users(&self) -> &[String] {
        &self.all_users
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn name(&self, column: usize) -> Option<&str> {
        self.participants.get(column).map(String::as_str)
    }

    /// Drop every participant called `name`. Returns whether anything changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p != name);
        self.participants.len() != before
    }

    /// Move the participant at `from` to position `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.participants.len() || to >= self.participants.len() || from == to {
            return false;
        }
        let name = self.participants.remove(from);
        self.participants.insert(to, name);
        true
    }

    /// Bring back everyone from the full list, in its original order
    pub fn restore_all(&mut self) -> bool {
        if self.participants == self.all_users {
            return false;
        }
        self.participants = self.all_users.clone();
        true
    }
}
