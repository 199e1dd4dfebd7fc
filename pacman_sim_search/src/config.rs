use std::{num::ParseIntError, str::FromStr};

use pacman_sim::eval::{Evaluate, Evaluator, UnknownEvaluator};

use crate::*;

pub const DEFAULT_DEPTH: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown search algorithm: {0:?}")]
    UnknownAlgorithm(String),
    #[error(transparent)]
    UnknownEvaluator(#[from] UnknownEvaluator),
    #[error("invalid search depth {0:?}")]
    InvalidDepth(String, #[source] ParseIntError),
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchAlgorithm {
    Minimax,
    #[default]
    AlphaBeta,
    Expectimax,
}

impl FromStr for SearchAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimax" => Ok(Self::Minimax),
            "alphabeta" | "alpha-beta" => Ok(Self::AlphaBeta),
            "expectimax" => Ok(Self::Expectimax),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Settings shared by all search strategies.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Number of turn-cycles (one move by every agent) to search before evaluating.
    ///
    /// The root is always expanded: at depth `0` each protagonist action is scored by
    /// evaluating its successor, not the root itself.
    pub depth: u8,
    /// Log the value of every root action and a summary of each search.
    pub debug: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl SearchConfig {
    pub const fn new(depth: u8) -> Self {
        Self { depth, debug: false }
    }

    pub fn with_debug(self, debug: bool) -> Self {
        Self { debug, ..self }
    }

    /// Number of individual agent moves after which minimax stops expanding.
    #[inline]
    pub fn move_limit(&self, num_agents: usize) -> u32 {
        u32::from(self.depth) * (num_agents as u32)
    }
}

/// Full description of a searching agent: which strategy, which evaluation function, how deep.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    pub algorithm: SearchAlgorithm,
    pub evaluator: Evaluator,
    pub search: SearchConfig,
}

impl AgentConfig {
    pub fn with_algorithm(self, algorithm: SearchAlgorithm) -> Self {
        Self { algorithm, ..self }
    }

    pub fn with_evaluator(self, evaluator: Evaluator) -> Self {
        Self { evaluator, ..self }
    }

    pub fn with_depth(self, depth: u8) -> Self {
        Self {
            search: SearchConfig { depth, ..self.search },
            ..self
        }
    }

    pub fn with_debug(self, debug: bool) -> Self {
        Self {
            search: self.search.with_debug(debug),
            ..self
        }
    }

    /// Parses the textual agent arguments, e.g. `("expectimax", "better", "3")`.
    pub fn from_args(algorithm: &str, evaluator: &str, depth: &str) -> Result<Self, ConfigError> {
        let depth = depth
            .trim()
            .parse::<u8>()
            .map_err(|e| ConfigError::InvalidDepth(depth.to_string(), e))?;
        Ok(Self {
            algorithm: algorithm.parse()?,
            evaluator: evaluator.parse()?,
            search: SearchConfig::new(depth),
        })
    }

    pub fn build(self) -> AgentSearch<Evaluator> {
        AgentSearch::new(self.algorithm, self.search, self.evaluator)
    }
}

/// One of the search strategies, chosen at configuration time.
#[derive(Debug, Clone)]
pub enum AgentSearch<E = Evaluator> {
    Minimax(MinimaxSearch<E>),
    AlphaBeta(AlphaBetaSearch<E>),
    Expectimax(ExpectimaxSearch<E>),
}

impl<E> AgentSearch<E> {
    pub fn new(algorithm: SearchAlgorithm, config: SearchConfig, evaluator: E) -> Self {
        match algorithm {
            SearchAlgorithm::Minimax => Self::Minimax(MinimaxSearch::new(config, evaluator)),
            SearchAlgorithm::AlphaBeta => Self::AlphaBeta(AlphaBetaSearch::new(config, evaluator)),
            SearchAlgorithm::Expectimax => Self::Expectimax(ExpectimaxSearch::new(config, evaluator)),
        }
    }

    pub fn algorithm(&self) -> SearchAlgorithm {
        match self {
            Self::Minimax(..) => SearchAlgorithm::Minimax,
            Self::AlphaBeta(..) => SearchAlgorithm::AlphaBeta,
            Self::Expectimax(..) => SearchAlgorithm::Expectimax,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        match self {
            Self::Minimax(search) => &search.config,
            Self::AlphaBeta(search) => &search.config,
            Self::Expectimax(search) => &search.config,
        }
    }
}

impl<G: Game, E: Evaluate<G>> GameTreeSearch<G> for AgentSearch<E> {
    fn search(&mut self, position: &G) -> Result<SearchResult<G>, SearchError<G::Error>> {
        match self {
            Self::Minimax(search) => search.search(position),
            Self::AlphaBeta(search) => search.search(position),
            Self::Expectimax(search) => search.search(position),
        }
    }
}
