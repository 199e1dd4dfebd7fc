use log::trace;
use pacman_sim::eval::{Evaluate, Evaluator};

use crate::context::{root_seed, SearchContext};
use crate::*;

/// Alpha-beta pruned minimax.
///
/// `window` is `(alpha, beta)`: the value the protagonist can already guarantee on this path,
/// and the value the adversaries can already hold it to. `action` is the move that led to `state`
/// and is carried by the result when `state` is a cutoff node.
fn alpha_beta<G: Game, E: Evaluate<G>>(
    ctx: &mut SearchContext<E>,
    state: &G,
    agent: AgentIndex,
    moves: u32,
    move_limit: u32,
    action: G::Action,
    window: (Value, Value),
) -> Result<ScoredAction<G::Action>, SearchError<G::Error>> {
    let agent = if agent == ctx.num_agents { PROTAGONIST } else { agent };
    if moves >= move_limit || state.is_terminal() {
        return Ok(ScoredAction::new(ctx.eval(state), action));
    }

    if agent == PROTAGONIST {
        max_value(ctx, state, moves, move_limit, window)
    } else {
        min_value(ctx, state, agent, moves, move_limit, window)
    }
}

fn max_value<G: Game, E: Evaluate<G>>(
    ctx: &mut SearchContext<E>,
    state: &G,
    moves: u32,
    move_limit: u32,
    (mut alpha, beta): (Value, Value),
) -> Result<ScoredAction<G::Action>, SearchError<G::Error>> {
    let seed = (moves == 0).then(root_seed::<G>);
    let mut best: Option<ScoredAction<G::Action>> = None;
    for action in state.legal_actions(PROTAGONIST) {
        let next = ctx.advance(state, PROTAGONIST, action)?;
        let child = alpha_beta(ctx, &next, PROTAGONIST + 1, moves + 1, move_limit, action, (alpha, beta))?
            .with_action(action);
        if moves == 0 {
            ctx.log_root_action(action, child.value);
        }

        let running = best.or(seed).map_or(child, |best| best.max_by_value(child));
        best = Some(running);
        if running.value >= beta {
            ctx.counter.prunes += 1;
            trace!("beta cutoff at move {moves}: {:?} >= {beta:?}", running.value);
            return Ok(running);
        }
        alpha = alpha.max(running.value);
    }
    best.ok_or(SearchError::NoLegalActions { agent: PROTAGONIST })
}

fn min_value<G: Game, E: Evaluate<G>>(
    ctx: &mut SearchContext<E>,
    state: &G,
    agent: AgentIndex,
    moves: u32,
    move_limit: u32,
    (alpha, mut beta): (Value, Value),
) -> Result<ScoredAction<G::Action>, SearchError<G::Error>> {
    let mut best: Option<ScoredAction<G::Action>> = None;
    for action in state.legal_actions(agent) {
        let next = ctx.advance(state, agent, action)?;
        let child = alpha_beta(ctx, &next, agent + 1, moves + 1, move_limit, action, (alpha, beta))?
            .with_action(action);

        let running = best.map_or(child, |best| best.min_by_value(child));
        best = Some(running);
        if running.value <= alpha {
            ctx.counter.prunes += 1;
            trace!("alpha cutoff at move {moves}: {:?} <= {alpha:?}", running.value);
            return Ok(running);
        }
        beta = beta.min(running.value);
    }
    best.ok_or(SearchError::NoLegalActions { agent })
}

/// Minimax with alpha-beta pruning, `config.depth` turn-cycles deep.
///
/// Returns the same action and value as [`crate::MinimaxSearch`] while visiting fewer states.
#[derive(Debug, Clone)]
pub struct AlphaBetaSearch<E = Evaluator> {
    pub config: SearchConfig,
    pub evaluator: E,
}

impl<E> AlphaBetaSearch<E> {
    pub fn new(config: SearchConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }
}

impl<G: Game, E: Evaluate<G>> GameTreeSearch<G> for AlphaBetaSearch<E> {
    fn search(&mut self, position: &G) -> Result<SearchResult<G>, SearchError<G::Error>> {
        let mut ctx = SearchContext::new(&self.evaluator, position, &self.config);
        let move_limit = self.config.move_limit(ctx.num_agents);
        let best = match ctx.terminal_root(position) {
            Some(best) => best,
            // The root is always expanded, even with no depth to search
            None => max_value(&mut ctx, position, 0, move_limit, (Value::MIN, Value::MAX))?,
        };
        Ok(ctx.finish(SearchAlgorithm::AlphaBeta, best))
    }
}
