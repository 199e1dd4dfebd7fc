#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

pub use pacman_sim::game_tree_search::*;

/// Strategy selection and construction
pub mod config;

pub(crate) mod context;

/// Implementation for expectimax search
pub mod expectimax;

/// Implementation for minimax search, with and without alpha-beta pruning
pub mod minimax;

pub use config::{AgentConfig, AgentSearch, ConfigError, SearchAlgorithm, SearchConfig};
pub use expectimax::ExpectimaxSearch;
pub use minimax::{alpha_beta::AlphaBetaSearch, MinimaxSearch};

#[cfg(test)]
mod tests;
