// Library exports for the Battlesnake bot
// The server binary, the replay tool and the integration tests all build on these

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod handler;
pub mod replay;
pub mod safety;
pub mod selector;
pub mod server;
pub mod types;
