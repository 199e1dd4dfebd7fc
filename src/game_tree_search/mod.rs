use std::fmt::Debug;
use std::ops::Add;

mod game_trait;
pub use game_trait::*;

mod value;
pub use value::*;

/// Index of the agent to move. `0` is the protagonist; the rest are adversaries.
pub type AgentIndex = usize;

/// The maximizing agent.
pub const PROTAGONIST: AgentIndex = 0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchCounter {
    /// Number of states visited through successor generation.
    pub states_visited: u64,
    /// Number of times a state was passed to the evaluation function (depth cutoff or terminal state).
    pub evals: u64,
    /// Number of alpha/beta cutoffs.
    pub prunes: u64,
}

impl SearchCounter {
    pub const ZERO: SearchCounter = SearchCounter {
        states_visited: 0,
        evals: 0,
        prunes: 0,
    };

    #[inline]
    pub fn add_in_place(&mut self, c: &SearchCounter) {
        self.states_visited += c.states_visited;
        self.evals += c.evals;
        self.prunes += c.prunes;
    }

    pub fn summary(&self, dt_ns: u128) -> String {
        let dt_ms: f64 = 1e-6 * (dt_ns as f64);
        let rate: f64 = if dt_ns == 0 {
            0.0
        } else {
            (1e-6_f64 * 1e9_f64) * (self.states_visited as f64) / (dt_ns as f64)
        };
        format!(
            "dt={dt_ms:.2}ms rate={rate:.4} Mstates/s states={} evals={} prunes={}",
            self.states_visited, self.evals, self.prunes
        )
    }
}

impl Add for SearchCounter {
    type Output = SearchCounter;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let mut a = self;
        a.add_in_place(&rhs);
        a
    }
}

/// Outcome of one decision.
#[derive(Debug, Clone)]
pub struct SearchResult<G: Game> {
    /// The protagonist's chosen action.
    pub action: G::Action,
    /// Value of the chosen action (or of the root when it is terminal).
    pub value: Value,
    pub counter: SearchCounter,
}

impl<G: Game> SearchResult<G> {
    #[inline]
    pub fn new(action: G::Action, value: Value, counter: SearchCounter) -> Self {
        SearchResult { action, value, counter }
    }
}

/// Indicates a search could not complete because the state interface broke its contract.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError<E: Debug> {
    /// A non-terminal state offered no legal actions to the agent to move.
    #[error("agent {agent} has no legal actions in a non-terminal state")]
    NoLegalActions { agent: AgentIndex },
    #[error("successor generation failed for agent {agent}: {error:?}")]
    Successor { agent: AgentIndex, error: E },
}

impl<E: Debug> SearchError<E> {
    #[inline]
    pub fn successor(agent: AgentIndex) -> impl FnOnce(E) -> Self {
        move |error| SearchError::Successor { agent, error }
    }
}

pub trait GameTreeSearch<G: Game> {
    fn search(&mut self, position: &G) -> Result<SearchResult<G>, SearchError<G::Error>>;

    /// The action to play from `position`.
    fn decide(&mut self, position: &G) -> Result<G::Action, SearchError<G::Error>> {
        self.search(position).map(|result| result.action)
    }
}
