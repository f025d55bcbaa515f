use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: u64 = 100_000;
pub const DEFAULT_CAPACITY: u64 = 70_000_000;
pub const DEFAULT_NEEDED: u64 = 30_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Largest directory size counted by the small-directories sum.
    pub threshold: u64,
    /// Total disk capacity.
    pub capacity: u64,
    /// Free space required after deleting one directory.
    pub needed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            capacity: DEFAULT_CAPACITY,
            needed: DEFAULT_NEEDED,
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Bytes that must be freed given `used` bytes on disk, never below zero.
    pub fn min_space(&self, used: u64) -> u64 {
        self.needed.saturating_add(used).saturating_sub(self.capacity)
    }
}
