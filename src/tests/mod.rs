use crate::prelude::*;





/// Panics: If the layout does not parse.
fn maze(text: &str) -> MazeState {
    Layout::parse(text).unwrap().start()
}

impl MazeState {
    /// Panics: If `successor` causes an error.
    fn advance_multiple<T: IntoIterator<Item = (AgentIndex, Direction)>>(&self, moves: T) -> MazeState {
        moves
            .into_iter()
            .fold(self.clone(), |state, (agent, action)| state.successor(agent, action).unwrap())
    }
}
