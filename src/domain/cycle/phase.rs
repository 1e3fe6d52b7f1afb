//! Phase enum naming the stages of one automation cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One stage of the automation pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Collect candidate questions.
    Acquisition,
    /// Generate answers for them.
    Synthesis,
    /// Post the answers.
    Publication,
    /// Track how posted answers perform.
    Measurement,
}

impl Phase {
    /// Every phase, in the order a cycle runs them.
    pub const ALL: [Phase; 4] = [
        Phase::Acquisition,
        Phase::Synthesis,
        Phase::Publication,
        Phase::Measurement,
    ];

    pub fn first() -> Phase {
        Self::ALL[0]
    }

    /// 1-based position within the cycle.
    pub fn ordinal(&self) -> usize {
        match self {
            Phase::Acquisition => 1,
            Phase::Synthesis => 2,
            Phase::Publication => 3,
            Phase::Measurement => 4,
        }
    }

    /// The phase that follows this one, or None after the last.
    pub fn next(&self) -> Option<Phase> {
        Self::ALL.get(self.ordinal()).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Acquisition => "acquisition",
            Phase::Synthesis => "synthesis",
            Phase::Publication => "publication",
            Phase::Measurement => "measurement",
        }
    }

    /// Operator-facing description used in log lines.
    pub fn description(&self) -> &'static str {
        match self {
            Phase::Acquisition => "Scraping questions",
            Phase::Synthesis => "Generating answers",
            Phase::Publication => "Posting answers",
            Phase::Measurement => "Tracking performance",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
