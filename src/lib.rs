#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![doc = include_str!("../README.md")]

/// Collection datatypes used by this crate.
pub mod data_structures;

/// Static evaluation of positions.
pub mod eval;

/// The state query interface consumed by the search, and the types shared by all search strategies.
pub mod game_tree_search;

/// Reference grid maze implementing the state query interface.
pub mod maze;

/// Re-exports the `smallvec` crate
pub use smallvec;

/// Re-exports the `enumset` crate
pub use enumset;

/// Re-exports the `thiserror` crate
pub use thiserror;

pub mod prelude {
    pub use crate::data_structures::ActionList;
    pub use crate::eval::{better_evaluation, score_evaluation, Evaluate, Evaluator, UnknownEvaluator};
    pub use crate::game_tree_search::{
        AgentIndex, Features, Game, GameTreeSearch, ScoredAction, SearchCounter, SearchError, SearchResult, Value,
        PROTAGONIST,
    };
    pub use crate::maze::{Direction, Layout, LayoutError, MazeError, MazeState, Position};
}

#[cfg(test)]
mod tests;
