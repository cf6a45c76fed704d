// Debug logging module for asynchronous decision logging
//
// Fire-and-forget writes keep the move response off the disk path. Each
// decision becomes one JSON line holding the full state it was made from,
// which the replay tool reads back.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{Direction, GameState};

/// Represents a single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DebugLogEntry {
    pub turn: u32,
    pub chosen_move: Direction,
    pub safe_moves: Vec<Direction>,
    pub fallback: bool,
    pub state: GameState,
    pub timestamp: String,
}

impl DebugLogEntry {
    pub fn new(state: GameState, chosen_move: Direction, safe_moves: Vec<Direction>) -> Self {
        DebugLogEntry {
            turn: state.turn,
            chosen_move,
            fallback: safe_moves.is_empty(),
            safe_moves,
            state,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(&self, entry: DebugLogEntry) {
        if !self.enabled {
            return;
        }

        let logger = self.clone();
        tokio::spawn(async move {
            logger.write_entry(&entry).await;
        });
    }

    /// Appends one entry and flushes
    pub async fn write_entry(&self, entry: &DebugLogEntry) {
        let mut file_guard = self.file.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Battlesnake, Board, Coord, Game};

    fn sample_state(turn: u32) -> GameState {
        let you = Battlesnake {
            id: "me".to_string(),
            name: "me".to_string(),
            health: 90,
            body: vec![Coord::new(2, 2), Coord::new(2, 1)],
            head: Some(Coord::new(2, 2)),
            length: 2,
            latency: "0".to_string(),
            shout: None,
        };
        GameState {
            game: Game::default(),
            turn,
            board: Board {
                height: 7,
                width: 7,
                food: vec![Coord::new(4, 4)],
                snakes: vec![you.clone()],
                hazards: vec![],
            },
            you,
        }
    }

    #[tokio::test]
    async fn test_entries_are_written_as_json_lines() {
        let path = std::env::temp_dir().join(format!(
            "cautious_snake_debug_{}.jsonl",
            std::process::id()
        ));
        let path_str = path.to_string_lossy().to_string();

        let logger = DebugLogger::new(true, &path_str).await;
        assert!(logger.is_enabled());

        logger
            .write_entry(&DebugLogEntry::new(
                sample_state(1),
                Direction::Up,
                vec![Direction::Up, Direction::Left],
            ))
            .await;
        logger
            .write_entry(&DebugLogEntry::new(sample_state(2), Direction::Down, vec![]))
            .await;

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let entries: Vec<DebugLogEntry> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].chosen_move, Direction::Up);
        assert!(!entries[0].fallback);
        assert!(entries[1].fallback);
        assert_eq!(entries[1].state.turn, 2);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_disabled_logger_writes_nothing() {
        let logger = DebugLogger::new(false, "never_created.jsonl").await;
        assert!(!logger.is_enabled());
        logger.log_move(DebugLogEntry::new(sample_state(1), Direction::Up, vec![]));
        assert!(!std::path::Path::new("never_created.jsonl").exists());
    }
}
