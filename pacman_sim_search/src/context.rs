use std::time::Instant;

use log::{debug, warn};
use pacman_sim::eval::Evaluate;

use crate::*;

/// The incumbent before any root action is valued: the no-op, at `-inf`.
/// Stands unless some action strictly beats `-inf`.
#[inline]
pub(crate) fn root_seed<G: Game>() -> ScoredAction<G::Action> {
    ScoredAction::new(Value::MIN, G::no_op())
}

/// Per-decision search state. Lives for one call to `search`.
pub(crate) struct SearchContext<'e, E> {
    pub evaluator: &'e E,
    pub num_agents: usize,
    pub counter: SearchCounter,
    pub debug: bool,
    pub start_time: Instant,
}

impl<'e, E> SearchContext<'e, E> {
    pub fn new<G: Game>(evaluator: &'e E, position: &G, config: &SearchConfig) -> Self {
        Self {
            evaluator,
            num_agents: position.num_agents(),
            counter: SearchCounter::ZERO,
            debug: config.debug,
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn advance<G: Game>(
        &mut self,
        state: &G,
        agent: AgentIndex,
        action: G::Action,
    ) -> Result<G, SearchError<G::Error>> {
        self.counter.states_visited += 1;
        state.successor(agent, action).map_err(SearchError::successor(agent))
    }

    #[inline]
    pub fn eval<G: Game>(&mut self, state: &G) -> Value
    where
        E: Evaluate<G>,
    {
        self.counter.evals += 1;
        self.evaluator.evaluate(state)
    }

    /// A win or loss at the root leaves nothing to decide: play the no-op.
    pub fn terminal_root<G: Game>(&mut self, position: &G) -> Option<ScoredAction<G::Action>>
    where
        E: Evaluate<G>,
    {
        if !position.is_terminal() {
            return None;
        }
        warn!("search called on a finished game (win={})", position.is_win());
        Some(ScoredAction::new(self.eval(position), G::no_op()))
    }

    /// Values each protagonist action from `position` with `child_value` and keeps the first
    /// action strictly above every earlier one, starting from [`root_seed`].
    pub fn best_root_action<G, F>(
        &mut self,
        position: &G,
        mut child_value: F,
    ) -> Result<ScoredAction<G::Action>, SearchError<G::Error>>
    where
        G: Game,
        F: FnMut(&mut Self, &G) -> Result<Value, SearchError<G::Error>>,
    {
        let mut best = root_seed::<G>();
        let mut expanded = false;
        for action in position.legal_actions(PROTAGONIST) {
            let child = self.advance(position, PROTAGONIST, action)?;
            let value = child_value(self, &child)?;
            self.log_root_action(action, value);
            best = best.max_by_value(ScoredAction::new(value, action));
            expanded = true;
        }
        if !expanded {
            return Err(SearchError::NoLegalActions { agent: PROTAGONIST });
        }
        Ok(best)
    }

    #[inline]
    pub fn log_root_action<A: std::fmt::Debug>(&self, action: A, value: Value) {
        if self.debug {
            debug!("  {action:?}: {value:?}");
        }
    }

    pub fn finish<G: Game>(self, algorithm: SearchAlgorithm, best: ScoredAction<G::Action>) -> SearchResult<G> {
        if self.debug {
            let dt_ns = self.start_time.elapsed().as_nanos();
            debug!(
                "{algorithm:?}: action={:?} value={:?} {}",
                best.action,
                best.value,
                self.counter.summary(dt_ns)
            );
        }
        SearchResult::new(best.action, best.value, self.counter)
    }
}
