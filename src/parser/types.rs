use serde::Serialize;
use std::fmt;

/// Episode number, or span of numbers for files holding several episodes.
///
/// Invariants: `start >= 1`, and `end`, when present, is strictly greater
/// than `start`. A span ending on its own start collapses to one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EpisodeInfo {
    start: u32,
    end: Option<u32>,
}

impl EpisodeInfo {
    pub fn new(start: u32, end: Option<u32>) -> Option<Self> {
        if start == 0 {
            return None;
        }

        match end {
            Some(end) if end < start => None,
            Some(end) if end == start => Some(Self { start, end: None }),
            end => Some(Self { start, end }),
        }
    }

    pub fn single(start: u32) -> Option<Self> {
        Self::new(start, None)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> Option<u32> {
        self.end
    }

}

impl fmt::Display for EpisodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:02}", self.start)?;
        if let Some(end) = self.end {
            write!(f, "-E{:02}", end)?;
        }
        Ok(())
    }
}

/// Which recognizer identified an episode. Earlier variants take priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recognizer {
    /// `S01E05`, `S01E05-E06`
    SeasonEpisode,
    /// `Episode 5`, `Episode 5-6`
    EpisodeWord,
    /// `ep05`, `Ep.05`, `EP 5-6`
    EpisodeAbbrev,
    /// `Show - 05`, `Show_05`, `Show 05v2`
    TrailingNumber,
}

/// Extraction result with the recognizer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeMatch {
    pub info: EpisodeInfo,
    pub recognizer: Recognizer,
}
