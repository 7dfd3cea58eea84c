//! Spear Ranking
//!
//! Ranks users by expertise and resources by quality from a log of
//! timestamped user-resource activities:
//! - Activity log model with dense user/resource ids
//! - Discoverer-follower adjacency matrix (earlier actors weigh more)
//! - Credit transform over nonzero weights
//! - Mutual reinforcement (HITS-style) power iteration
//! - Ranked output, best first
//!
//! ```
//! use spear_ranking::{Activity, Spear};
//! use spear_common::RankingSettings;
//!
//! let spear = Spear::new(vec![
//!     Activity::new(1, "alice", "https://example.org/"),
//!     Activity::new(2, "bob", "https://example.org/"),
//! ])
//! .unwrap();
//!
//! let outcome = spear.run(&RankingSettings::default()).unwrap();
//! assert_eq!(outcome.expertise[0].identity, "alice");
//! ```

pub mod activity;
pub mod adjacency;
pub mod credit;
pub mod engine;
pub mod ranking;
mod spear;

pub use activity::{Activity, ActivityLog, IdentityIndex};
pub use adjacency::{position_scores, AdjacencyMatrix, PositionScore};
pub use credit::{apply_credit, hits_credit, sqrt_credit};
pub use engine::{MutualReinforcement, ScoreVectors};
pub use ranking::{rank, Ranked};
pub use spear::{RankingOutcome, RunStats, Spear};
