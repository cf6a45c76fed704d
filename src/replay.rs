// Replay module for auditing logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the safety evaluation on each logged state
// 3. Flag logged moves that fall outside the recomputed safe set
// 4. Generate a summary report

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::engine::DecisionEngine;
use crate::types::Direction;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub safe_moves: Vec<Direction>,
    /// Logged move is in the recomputed safe set, or no safe move existed
    pub original_was_safe: bool,
    pub fallback: bool,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub safe_choices: usize,
    pub unsafe_choices: usize,
    pub fallbacks: usize,
    pub safe_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    engine: DecisionEngine,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            engine: DecisionEngine::new(&config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DebugLogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DebugLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &DebugLogEntry) -> ReplayResult {
        let decision = self.engine.decide_with_safety(&entry.state);
        let safe_moves = decision.safety.safe_moves();
        let fallback = safe_moves.is_empty();
        let original_was_safe = fallback || decision.safety.is_safe(entry.chosen_move);

        if self.verbose {
            if original_was_safe {
                info!(
                    "Turn {}: ✓ SAFE - {} (safe set: {:?})",
                    entry.turn,
                    entry.chosen_move,
                    Self::names(&safe_moves)
                );
            } else {
                warn!(
                    "Turn {}: ✗ UNSAFE - {} not in safe set {:?}",
                    entry.turn,
                    entry.chosen_move,
                    Self::names(&safe_moves)
                );
            }
        }

        ReplayResult {
            turn: entry.turn,
            original_move: entry.chosen_move,
            replayed_move: decision.response.direction,
            safe_moves,
            original_was_safe,
            fallback,
        }
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DebugLogEntry]) -> Vec<ReplayResult> {
        entries.iter().map(|entry| self.replay_entry(entry)).collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[DebugLogEntry],
        turn_numbers: &[u32],
    ) -> Result<Vec<ReplayResult>, String> {
        turn_numbers
            .iter()
            .map(|turn_num| {
                entries
                    .iter()
                    .find(|e| e.turn == *turn_num)
                    .map(|entry| self.replay_entry(entry))
                    .ok_or_else(|| format!("Turn {} not found in log file", turn_num))
            })
            .collect()
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let safe_choices = results.iter().filter(|r| r.original_was_safe).count();
        let fallbacks = results.iter().filter(|r| r.fallback).count();
        let safe_rate = if total_turns > 0 {
            (safe_choices as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            safe_choices,
            unsafe_choices: total_turns - safe_choices,
            fallbacks,
            safe_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Safe Choices:   {} ({:.1}%)", stats.safe_choices, stats.safe_rate);
        println!("Unsafe Choices: {}", stats.unsafe_choices);
        println!("Fallbacks:      {}", stats.fallbacks);
        println!("═══════════════════════════════════════════════════════════\n");

        let unsafe_results: Vec<_> = results.iter().filter(|r| !r.original_was_safe).collect();
        if !unsafe_results.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  UNSAFE CHOICES");
            println!("═══════════════════════════════════════════════════════════");

            for result in unsafe_results {
                println!(
                    "Turn {}: chose {}, safe set {:?}",
                    result.turn,
                    result.original_move,
                    Self::names(&result.safe_moves)
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[DebugLogEntry],
        expected_moves: &[(u32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    Self::names(acceptable),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }

    fn names(moves: &[Direction]) -> Vec<&'static str> {
        moves.iter().map(|d| d.as_str()).collect()
    }
}
