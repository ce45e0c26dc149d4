//! Crawl driver phase definitions
//!
//! A run moves through these phases in order. Any phase before `Done` may
//! jump straight to it when the run has to stop early.

use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// State constructed with the seed as the only crawled URL
    Init,

    /// One-time admission pass over the seed page
    Seeding,

    /// Processing frontier URLs until the crawl bound or an empty frontier
    Running,

    /// Terminal: the crawled set is the run's output
    Done,
}

impl CrawlPhase {
    /// Returns true if `self -> next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Init, Self::Seeding)
                | (Self::Init, Self::Done)
                | (Self::Seeding, Self::Running)
                | (Self::Seeding, Self::Done)
                | (Self::Running, Self::Done)
        )
    }

    /// Lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Seeding => "seeding",
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
