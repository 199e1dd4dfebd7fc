use std::rc::Rc;

use pacman_sim::eval::{score_evaluation, Evaluate};

use crate::*;



pub mod minimax;



/// Explicit game tree, for hand-computed fixtures.
#[derive(Debug, Clone)]
pub enum Tree {
    /// Non-terminal node with its static score and children, one per legal action.
    Node(i32, Vec<Tree>),
    /// Non-terminal node without children. Only valid below the depth limit.
    Leaf(i32),
    Win,
    Lose,
}

pub fn node<T: Into<Vec<Tree>>>(children: T) -> Tree {
    Tree::Node(0, children.into())
}

pub fn leaves<const N: usize>(scores: [i32; N]) -> Tree {
    node(scores.map(Tree::Leaf))
}

#[derive(Debug)]
struct TreeNode {
    score: i32,
    outcome: Option<bool>,
    children: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    NoSuchChild(usize),
    WrongAgent { expected: AgentIndex, found: AgentIndex },
}

/// A [`Tree`] played by `num_agents` agents taking turns. Actions are child indices.
///
/// Successor generation checks that agents move in turn order.
#[derive(Debug, Clone)]
pub struct TreeGame {
    nodes: Rc<Vec<TreeNode>>,
    index: usize,
    num_agents: usize,
    pub moves: u32,
}

impl TreeGame {
    pub fn new(tree: &Tree, num_agents: usize) -> Self {
        fn flatten(tree: &Tree, nodes: &mut Vec<TreeNode>) -> usize {
            let index = nodes.len();
            let (score, outcome) = match tree {
                Tree::Node(score, _) | Tree::Leaf(score) => (*score, None),
                Tree::Win => (0, Some(true)),
                Tree::Lose => (0, Some(false)),
            };
            nodes.push(TreeNode {
                score,
                outcome,
                children: vec![],
            });
            if let Tree::Node(_, children) = tree {
                let children = children.iter().map(|child| flatten(child, nodes)).collect();
                nodes[index].children = children;
            }
            index
        }

        let mut nodes = vec![];
        flatten(tree, &mut nodes);
        Self {
            nodes: Rc::new(nodes),
            index: 0,
            num_agents,
            moves: 0,
        }
    }

    fn node(&self) -> &TreeNode {
        &self.nodes[self.index]
    }
}

impl Game for TreeGame {
    type Action = usize;
    type Actions = std::ops::Range<usize>;
    type Error = TreeError;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, _agent: AgentIndex) -> Self::Actions {
        0..self.node().children.len()
    }

    fn successor(&self, agent: AgentIndex, action: usize) -> Result<Self, TreeError> {
        let expected = (self.moves as usize) % self.num_agents;
        if agent != expected {
            return Err(TreeError::WrongAgent { expected, found: agent });
        }
        let Some(&index) = self.node().children.get(action) else {
            return Err(TreeError::NoSuchChild(action));
        };
        Ok(Self {
            index,
            moves: self.moves + 1,
            ..self.clone()
        })
    }

    fn is_win(&self) -> bool {
        self.node().outcome == Some(true)
    }

    fn is_lose(&self) -> bool {
        self.node().outcome == Some(false)
    }

    fn score(&self) -> f64 {
        self.node().score.into()
    }

    fn no_op() -> usize {
        usize::MAX
    }
}

/// Score, with wins and losses mapped to `+inf`/`-inf`.
pub fn tree_eval(state: &TreeGame) -> Value {
    if state.is_win() {
        Value::MAX
    } else if state.is_lose() {
        Value::MIN
    } else {
        score_evaluation(state)
    }
}

/// Endless game where every agent always has `branching` actions. Tracks the number of moves made.
#[derive(Debug, Clone)]
pub struct CountingGame {
    pub num_agents: usize,
    pub branching: usize,
    pub moves: u32,
}

impl Game for CountingGame {
    type Action = usize;
    type Actions = std::ops::Range<usize>;
    type Error = TreeError;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, _agent: AgentIndex) -> Self::Actions {
        0..self.branching
    }

    fn successor(&self, agent: AgentIndex, _action: usize) -> Result<Self, TreeError> {
        let expected = (self.moves as usize) % self.num_agents;
        if agent != expected {
            return Err(TreeError::WrongAgent { expected, found: agent });
        }
        Ok(Self {
            moves: self.moves + 1,
            ..self.clone()
        })
    }

    fn is_win(&self) -> bool {
        false
    }

    fn is_lose(&self) -> bool {
        false
    }

    fn score(&self) -> f64 {
        0.0
    }

    fn no_op() -> usize {
        usize::MAX
    }
}

/// All three strategies over the same evaluator.
pub fn all_searches<E: Clone>(depth: u8, evaluator: E) -> [AgentSearch<E>; 3] {
    let config = SearchConfig::new(depth);
    [
        AgentSearch::new(SearchAlgorithm::Minimax, config, evaluator.clone()),
        AgentSearch::new(SearchAlgorithm::AlphaBeta, config, evaluator.clone()),
        AgentSearch::new(SearchAlgorithm::Expectimax, config, evaluator),
    ]
}

/// Panics: If the search fails.
pub fn search<G: Game, E: Evaluate<G>>(agent: &mut AgentSearch<E>, position: &G) -> SearchResult<G> {
    agent.search(position).unwrap()
}
