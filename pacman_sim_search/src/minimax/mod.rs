use pacman_sim::eval::{Evaluate, Evaluator};

use crate::context::SearchContext;
use crate::*;

pub mod alpha_beta;

/// Value of `state` with `agent` to move, `moves` agent moves below the root.
///
/// The protagonist maximizes, adversaries minimize. `state` is a cutoff node once
/// `move_limit` moves have been made or the game is over.
fn minimax<G: Game, E: Evaluate<G>>(
    ctx: &mut SearchContext<E>,
    state: &G,
    agent: AgentIndex,
    moves: u32,
    move_limit: u32,
) -> Result<Value, SearchError<G::Error>> {
    let agent = if agent == ctx.num_agents { PROTAGONIST } else { agent };
    if moves >= move_limit || state.is_terminal() {
        return Ok(ctx.eval(state));
    }

    let mut best: Option<Value> = None;
    for action in state.legal_actions(agent) {
        let next = ctx.advance(state, agent, action)?;
        let value = minimax(ctx, &next, agent + 1, moves + 1, move_limit)?;
        best = Some(match best {
            None => value,
            Some(best) if agent == PROTAGONIST => best.max(value),
            Some(best) => best.min(value),
        });
    }
    best.ok_or(SearchError::NoLegalActions { agent })
}

/// Exhaustive minimax search, `config.depth` turn-cycles deep.
#[derive(Debug, Clone)]
pub struct MinimaxSearch<E = Evaluator> {
    pub config: SearchConfig,
    pub evaluator: E,
}

impl<E> MinimaxSearch<E> {
    pub fn new(config: SearchConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }
}

impl<G: Game, E: Evaluate<G>> GameTreeSearch<G> for MinimaxSearch<E> {
    fn search(&mut self, position: &G) -> Result<SearchResult<G>, SearchError<G::Error>> {
        let mut ctx = SearchContext::new(&self.evaluator, position, &self.config);
        let move_limit = self.config.move_limit(ctx.num_agents);
        let best = match ctx.terminal_root(position) {
            Some(best) => best,
            None => ctx.best_root_action(position, |ctx, child| minimax(ctx, child, 1, 1, move_limit))?,
        };
        Ok(ctx.finish(SearchAlgorithm::Minimax, best))
    }
}
