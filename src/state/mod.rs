//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the crawled set and the pending frontier, owned by the driver
//! - `CrawlPhase`: the driver's INIT → SEEDING → RUNNING → DONE state machine

mod crawl_state;
mod phase;

// Re-export main types
pub use crawl_state::CrawlState;
pub use phase::CrawlPhase;
