use std::fmt::Debug;

use super::AgentIndex;

/// Read-only view of a simulation state, as seen by the search.
///
/// The search never mutates a state: every move is applied through [`Game::successor`],
/// which returns a fresh state. Agent `0` is the protagonist; agents `1..num_agents()`
/// are adversaries moving in index order.
pub trait Game: Clone + Debug {
    type Action: Copy + Debug + PartialEq + Eq;
    type Actions: IntoIterator<Item = Self::Action>;
    type Error: Debug;

    /// Total number of agents, protagonist included. Always at least 1.
    fn num_agents(&self) -> usize;

    /// Legal actions of `agent`. Only terminal states may return no actions.
    fn legal_actions(&self, agent: AgentIndex) -> Self::Actions;

    /// The state reached after `agent` performs `action`.
    fn successor(&self, agent: AgentIndex, action: Self::Action) -> Result<Self, Self::Error>;

    fn is_win(&self) -> bool;

    fn is_lose(&self) -> bool;

    #[inline]
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }

    /// Intrinsic score tracked by the simulation.
    fn score(&self) -> f64;

    /// The action that does nothing. Returned when there is nothing to decide.
    fn no_op() -> Self::Action;
}

/// Feature accessors used by the composite evaluation function.
pub trait Features: Game {
    type Position: Copy + Debug;
    type Positions: IntoIterator<Item = Self::Position>;

    fn protagonist_position(&self) -> Self::Position;

    /// Position of adversary `agent`, where `1 <= agent < num_agents()`.
    fn adversary_position(&self, agent: AgentIndex) -> Self::Position;

    /// Positions of the remaining food items.
    fn food(&self) -> Self::Positions;

    /// Positions of the remaining capsules.
    fn capsules(&self) -> Self::Positions;

    /// Grid (Manhattan) distance between two positions.
    fn distance(a: Self::Position, b: Self::Position) -> f64;
}
