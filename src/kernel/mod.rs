//! Headless editing core: find/replace over document leaves and persistence scheduling.

pub mod find_replace;
pub mod match_set;
pub mod persistence;
pub mod replace;
pub mod search;
pub mod services;
pub mod statistics;

pub use find_replace::FindReplaceState;
pub use match_set::MatchSet;
pub use persistence::{PersistenceMessage, PersistenceScheduler, SaveState, SaveStatus};
pub use replace::{replace_all, replace_current, ReplaceError};
pub use search::{search, SearchConfig};
pub use statistics::{ReadingTime, TextStatistics};
