// Decision engine: safety evaluation followed by move selection
//
// This is the single entry point the transport layer calls with a parsed
// game state. It holds no per-game state, so concurrent games can share one
// instance.

use log::info;

use crate::config::Config;
use crate::safety::{SafetyEvaluator, SafetyMap};
use crate::selector::{MoveSelector, Selection};
use crate::types::{GameState, MoveResponse};

/// Everything computed while deciding a single turn
#[derive(Debug, Clone)]
pub struct Decision {
    pub safety: SafetyMap,
    pub selection: Selection,
    pub response: MoveResponse,
}

pub struct DecisionEngine {
    evaluator: SafetyEvaluator,
    selector: MoveSelector,
    fallback_shout: Option<String>,
}

impl DecisionEngine {
    pub fn new(config: &Config) -> Self {
        DecisionEngine {
            evaluator: SafetyEvaluator::new(&config.safety),
            selector: MoveSelector::new(&config.selection),
            fallback_shout: config.selection.fallback_shout.clone(),
        }
    }

    /// Computes the move for this turn
    pub fn decide(&self, state: &GameState) -> MoveResponse {
        self.decide_with_safety(state).response
    }

    /// Computes the move for this turn, keeping the intermediate results
    pub fn decide_with_safety(&self, state: &GameState) -> Decision {
        let safety = self.evaluator.evaluate(state);
        let selection = self.selector.select(&safety, state);

        let mut response = MoveResponse::new(selection.direction);
        if selection.is_fallback() {
            response.shout = self.fallback_shout.clone();
        }

        info!("MOVE {}: {}", state.turn, selection.direction);

        Decision {
            safety,
            selection,
            response,
        }
    }
}
