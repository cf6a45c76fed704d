// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The Bot ties the API endpoints to the decision engine. It never looks
// ahead: every move is judged from the snapshot it was handed.
// For more info see docs.battlesnake.com

use log::info;

use crate::config::Config;
use crate::debug_logger::{DebugLogEntry, DebugLogger};
use crate::engine::DecisionEngine;
use crate::types::{GameState, InfoResponse, MoveResponse};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    engine: DecisionEngine,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration and no debug log
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_debug_logger(config, DebugLogger::disabled())
    }

    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        let engine = DecisionEngine::new(&config);
        Bot {
            config,
            engine,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> InfoResponse {
        info!("INFO");
        self.config.info.to_response()
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, state: &GameState) {
        info!("GAME START {}", state.game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, state: &GameState) {
        info!("GAME OVER {} after {} turns", state.game.id, state.turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    pub fn get_move(&self, state: &GameState) -> MoveResponse {
        let decision = self.engine.decide_with_safety(state);

        if self.debug_logger.is_enabled() {
            self.debug_logger.log_move(DebugLogEntry::new(
                state.clone(),
                decision.response.direction,
                decision.safety.safe_moves(),
            ));
        }

        decision.response
    }
}
