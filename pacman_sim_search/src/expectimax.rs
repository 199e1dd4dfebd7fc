use pacman_sim::eval::{Evaluate, Evaluator};

use crate::context::SearchContext;
use crate::*;

/// Average value over the actions of adversary `agent`, each assumed equally likely.
///
/// `cycles` is the number of full turn-cycles left before the search bottoms out.
fn expected_value<G: Game, E: Evaluate<G>>(
    ctx: &mut SearchContext<E>,
    state: &G,
    agent: AgentIndex,
    cycles: u8,
) -> Result<Value, SearchError<G::Error>> {
    if cycles == 0 || state.is_terminal() {
        return Ok(ctx.eval(state));
    }

    let last_adversary = agent + 1 == ctx.num_agents;
    let values = state
        .legal_actions(agent)
        .into_iter()
        .map(|action| {
            let next = ctx.advance(state, agent, action)?;
            if last_adversary {
                max_value(ctx, &next, cycles - 1)
            } else {
                expected_value(ctx, &next, agent + 1, cycles)
            }
        })
        .collect::<Result<Vec<Value>, _>>()?;
    Value::mean(values).ok_or(SearchError::NoLegalActions { agent })
}

fn max_value<G: Game, E: Evaluate<G>>(
    ctx: &mut SearchContext<E>,
    state: &G,
    cycles: u8,
) -> Result<Value, SearchError<G::Error>> {
    if cycles == 0 || state.is_terminal() {
        return Ok(ctx.eval(state));
    }

    let mut best: Option<Value> = None;
    for action in state.legal_actions(PROTAGONIST) {
        let next = ctx.advance(state, PROTAGONIST, action)?;
        let value = after_protagonist(ctx, &next, cycles)?;
        best = Some(best.map_or(value, |best| best.max(value)));
    }
    best.ok_or(SearchError::NoLegalActions { agent: PROTAGONIST })
}

/// Value of `state` right after the protagonist moved, with `cycles` turn-cycles left
/// counting the current one.
#[inline]
fn after_protagonist<G: Game, E: Evaluate<G>>(
    ctx: &mut SearchContext<E>,
    state: &G,
    cycles: u8,
) -> Result<Value, SearchError<G::Error>> {
    if ctx.num_agents == 1 {
        max_value(ctx, state, cycles.saturating_sub(1))
    } else {
        expected_value(ctx, state, PROTAGONIST + 1, cycles)
    }
}

/// Expectimax search, `config.depth` turn-cycles deep.
///
/// Adversaries are modelled as picking uniformly at random among their legal actions.
#[derive(Debug, Clone)]
pub struct ExpectimaxSearch<E = Evaluator> {
    pub config: SearchConfig,
    pub evaluator: E,
}

impl<E> ExpectimaxSearch<E> {
    pub fn new(config: SearchConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }
}

impl<G: Game, E: Evaluate<G>> GameTreeSearch<G> for ExpectimaxSearch<E> {
    fn search(&mut self, position: &G) -> Result<SearchResult<G>, SearchError<G::Error>> {
        let mut ctx = SearchContext::new(&self.evaluator, position, &self.config);
        let cycles = self.config.depth;
        let best = match ctx.terminal_root(position) {
            Some(best) => best,
            None => ctx.best_root_action(position, |ctx, child| after_protagonist(ctx, child, cycles))?,
        };
        Ok(ctx.finish(SearchAlgorithm::Expectimax, best))
    }
}
