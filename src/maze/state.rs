use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::{
    data_structures::{ActionList, SmallList},
    game_tree_search::{AgentIndex, Features, Game, PROTAGONIST},
};

use super::{Direction, Grid, Layout, Position};

/// Score lost on every protagonist move.
pub const TIME_PENALTY: i32 = 1;
pub const FOOD_SCORE: i32 = 10;
pub const WIN_SCORE: i32 = 500;
pub const LOSE_PENALTY: i32 = 500;

/// Indicates a successor could not be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("the game is already over")]
    GameOver,
    #[error("no agent with index {0}")]
    InvalidAgent(AgentIndex),
    #[error("agent {agent} cannot move {action:?}")]
    IllegalAction { agent: AgentIndex, action: Direction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Win,
    Lose,
}

/// A position in a game played on a [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeState {
    walls: Arc<Grid<bool>>,
    food: Grid<bool>,
    food_left: usize,
    capsules: SmallList<Position>,
    /// Agent positions, protagonist first.
    agents: SmallList<Position>,
    score: i32,
    outcome: Option<Outcome>,
}

impl MazeState {
    pub fn new(layout: &Layout) -> Self {
        let mut agents = SmallList::with_capacity(layout.num_agents());
        agents.push(layout.protagonist);
        agents.extend(layout.adversaries.iter().copied());
        let food_left = layout
            .food
            .positions()
            .filter(|p| layout.food.get(*p) == Some(true))
            .count();
        let mut state = Self {
            walls: layout.walls.clone(),
            food: layout.food.clone(),
            food_left,
            capsules: layout.capsules.clone(),
            agents,
            score: 0,
            outcome: None,
        };
        state.check_collision();
        state
    }

    pub fn with_score(self, score: i32) -> Self {
        Self { score, ..self }
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn food_left(&self) -> usize {
        self.food_left
    }

    #[inline]
    pub fn agent_position(&self, agent: AgentIndex) -> Option<Position> {
        self.agents.get(agent).copied()
    }

    #[inline]
    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.get(position).unwrap_or(true)
    }

    #[inline]
    pub fn has_food(&self, position: Position) -> bool {
        self.food.get(position).unwrap_or(false)
    }

    fn moves_from(&self, position: Position) -> impl Iterator<Item = Direction> + '_ {
        Direction::MOVES
            .iter()
            .filter(move |direction| !self.is_wall(position.step(*direction)))
    }

    fn check_collision(&mut self) {
        let protagonist = self.agents[PROTAGONIST];
        if self.agents[1..].contains(&protagonist) {
            self.score -= LOSE_PENALTY;
            self.outcome = Some(Outcome::Lose);
        }
    }

    fn move_protagonist(&mut self, to: Position) {
        self.agents[PROTAGONIST] = to;
        self.score -= TIME_PENALTY;
        if self.has_food(to) {
            self.food.set(to, false);
            self.food_left -= 1;
            self.score += FOOD_SCORE;
            if self.food_left == 0 {
                self.score += WIN_SCORE;
                self.outcome = Some(Outcome::Win);
                return;
            }
        }
        self.capsules.retain(|capsule| *capsule != to);
        self.check_collision();
    }
}

impl Game for MazeState {
    type Action = Direction;
    type Actions = ActionList<Direction>;
    type Error = MazeError;

    #[inline]
    fn num_agents(&self) -> usize {
        self.agents.len()
    }

    fn legal_actions(&self, agent: AgentIndex) -> Self::Actions {
        let (None, Some(position)) = (self.outcome, self.agent_position(agent)) else {
            return ActionList::new();
        };
        let mut actions: ActionList<Direction> = self.moves_from(position).collect();
        // Adversaries only stand still when boxed in
        if agent == PROTAGONIST || actions.is_empty() {
            actions.push(Direction::Stop);
        }
        actions
    }

    fn successor(&self, agent: AgentIndex, action: Direction) -> Result<Self, MazeError> {
        if self.outcome.is_some() {
            return Err(MazeError::GameOver);
        }
        if agent >= self.num_agents() {
            return Err(MazeError::InvalidAgent(agent));
        }
        if !self.legal_actions(agent).contains(&action) {
            return Err(MazeError::IllegalAction { agent, action });
        }

        let mut next = self.clone();
        let to = self.agents[agent].step(action);
        if agent == PROTAGONIST {
            next.move_protagonist(to);
        } else {
            next.agents[agent] = to;
            next.check_collision();
        }
        trace!("agent {agent} {action:?} -> {to} score={}", next.score);
        Ok(next)
    }

    #[inline]
    fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    #[inline]
    fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }

    #[inline]
    fn score(&self) -> f64 {
        self.score.into()
    }

    #[inline]
    fn no_op() -> Direction {
        Direction::Stop
    }
}

impl Features for MazeState {
    type Position = Position;
    type Positions = Vec<Position>;

    #[inline]
    fn protagonist_position(&self) -> Position {
        self.agents[PROTAGONIST]
    }

    /// Panics if `agent` is not an adversary of this state.
    #[inline]
    fn adversary_position(&self, agent: AgentIndex) -> Position {
        assert!(agent != PROTAGONIST, "agent 0 is the protagonist");
        self.agents[agent]
    }

    fn food(&self) -> Vec<Position> {
        self.food.positions().filter(|p| self.has_food(*p)).collect()
    }

    fn capsules(&self) -> Vec<Position> {
        self.capsules.to_vec()
    }

    #[inline]
    fn distance(a: Position, b: Position) -> f64 {
        a.manhattan_distance(b).into()
    }
}

impl fmt::Display for MazeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for position in self.walls.positions() {
            if position.x == 0 && position.y > 0 {
                writeln!(f)?;
            }
            let glyph = if position == self.agents[PROTAGONIST] {
                'P'
            } else if self.agents[1..].contains(&position) {
                'G'
            } else if self.is_wall(position) {
                '%'
            } else if self.has_food(position) {
                '.'
            } else if self.capsules.contains(&position) {
                'o'
            } else {
                ' '
            };
            write!(f, "{glyph}")?;
        }
        writeln!(f)?;
        write!(f, "score={}", self.score)
    }
}
