use std::str::FromStr;

use crate::game_tree_search::{Features, Game, Value};

/// Adversary distance beyond which keeping away earns nothing more.
pub const SAFETY_DISTANCE: f64 = 3.0;

/// Penalty per remaining food item.
pub const FOOD_WEIGHT: f64 = 1.0;

/// Penalty per remaining capsule.
pub const CAPSULE_WEIGHT: f64 = 2.0;

/// Static evaluation of a state from the protagonist's point of view.
pub trait Evaluate<G: Game> {
    fn evaluate(&self, state: &G) -> Value;
}

impl<G: Game, F: Fn(&G) -> Value> Evaluate<G> for F {
    #[inline]
    fn evaluate(&self, state: &G) -> Value {
        self(state)
    }
}

/// The state's own score, unchanged.
#[inline]
pub fn score_evaluation<G: Game>(state: &G) -> Value {
    Value::from(state.score())
}

/// Composite heuristic: the state's score, plus a capped bonus for distance from the
/// nearest adversary, minus the distance to the nearest food, the food count and
/// twice the capsule count.
///
/// Wins and losses evaluate to `+inf` and `-inf`.
pub fn better_evaluation<G: Features>(state: &G) -> Value {
    if state.is_win() {
        return Value::MAX;
    }
    if state.is_lose() {
        return Value::MIN;
    }

    let position = state.protagonist_position();
    let nearest_adversary = (1..state.num_agents())
        .map(|agent| G::distance(position, state.adversary_position(agent)))
        .fold(f64::INFINITY, f64::min);
    let (food_count, nearest_food) = state.food().into_iter().fold((0usize, None), |(count, nearest), food| {
        let d = G::distance(position, food);
        (count + 1, Some(nearest.map_or(d, |n: f64| n.min(d))))
    });
    let capsule_count = state.capsules().into_iter().count();

    // No food left: the distance term vanishes
    let nearest_food = nearest_food.unwrap_or(0.0);
    Value::new(
        state.score() + nearest_adversary.min(SAFETY_DISTANCE)
            - nearest_food
            - FOOD_WEIGHT * (food_count as f64)
            - CAPSULE_WEIGHT * (capsule_count as f64),
    )
}

/// Choice of evaluation function, fixed when a search is configured.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Evaluator {
    /// [`score_evaluation`]
    #[default]
    Score,
    /// [`better_evaluation`]
    Better,
}

impl<G: Features> Evaluate<G> for Evaluator {
    #[inline]
    fn evaluate(&self, state: &G) -> Value {
        match self {
            Evaluator::Score => score_evaluation(state),
            Evaluator::Better => better_evaluation(state),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown evaluation function: {0:?}")]
pub struct UnknownEvaluator(pub String);

impl FromStr for Evaluator {
    type Err = UnknownEvaluator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" | "scoreEvaluationFunction" => Ok(Self::Score),
            "better" | "betterEvaluationFunction" => Ok(Self::Better),
            _ => Err(UnknownEvaluator(s.to_string())),
        }
    }
}
