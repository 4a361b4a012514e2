//! High score
//!
//! A single best score, persisted as plain integer text so older saves keep
//! loading. Anything unreadable counts as zero.

use crate::persistence;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "sarcasticHighScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Parse a stored value; missing digits or garbage read as zero
    pub fn parse_stored(raw: &str) -> u64 {
        let digits: String = raw
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }

    /// Take a finished score. Returns true when it is a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn load() -> Self {
        let best = persistence::load_string(Self::STORAGE_KEY)
            .map(|raw| Self::parse_stored(&raw))
            .unwrap_or(0);
        log::info!("Loaded high score: {}", best);
        Self { best }
    }

    pub fn save(&self) {
        persistence::save_string(Self::STORAGE_KEY, &self.best.to_string());
        log::info!("High score saved ({})", self.best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored() {
        assert_eq!(HighScore::parse_stored("1234"), 1234);
        assert_eq!(HighScore::parse_stored(" 77 "), 77);
        // Leading digits win, like a lenient integer parse
        assert_eq!(HighScore::parse_stored("512.9"), 512);
        assert_eq!(HighScore::parse_stored("abc"), 0);
        assert_eq!(HighScore::parse_stored(""), 0);
        assert_eq!(HighScore::parse_stored("-5"), 0);
    }

    #[test]
    fn test_record_only_raises() {
        let mut high = HighScore::new(100);
        assert!(!high.record(50));
        assert!(!high.record(100));
        assert_eq!(high.best, 100);
        assert!(high.record(101));
        assert_eq!(high.best, 101);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load_round_trip() {
        HighScore::new(4242).save();
        assert_eq!(HighScore::load().best, 4242);
    }
}
