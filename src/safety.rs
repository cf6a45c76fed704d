// Safety evaluation for the next move
//
// Each filter is a pure predicate over the game state that can only turn a
// direction from safe to unsafe. The evaluator runs all of them and collects
// the verdicts into a fixed-size map indexed by Direction.

use log::warn;
use std::ops::Index;

use crate::config::{HeadToHeadPolicy, SafetyConfig};
use crate::types::{Battlesnake, Board, Coord, Direction, GameState};

/// Per-direction verdict: `true` means moving there is safe this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyMap {
    safe: [bool; 4],
}

impl SafetyMap {
    pub fn all_safe() -> Self {
        SafetyMap { safe: [true; 4] }
    }

    pub fn mark_unsafe(&mut self, dir: Direction) {
        self.safe[dir.index()] = false;
    }

    pub fn is_safe(&self, dir: Direction) -> bool {
        self.safe[dir.index()]
    }

    /// Safe directions in `Direction::ALL` order
    pub fn safe_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&dir| self.is_safe(dir))
            .collect()
    }

    /// True when no direction is safe
    pub fn is_empty(&self) -> bool {
        self.safe.iter().all(|&s| !s)
    }
}

impl Default for SafetyMap {
    fn default() -> Self {
        Self::all_safe()
    }
}

impl Index<Direction> for SafetyMap {
    type Output = bool;

    fn index(&self, dir: Direction) -> &bool {
        &self.safe[dir.index()]
    }
}

/// Computes which of the four directions are safe for our snake
#[derive(Debug, Clone)]
pub struct SafetyEvaluator {
    head_to_head: HeadToHeadPolicy,
    opponent_tail_vacates: bool,
}

impl SafetyEvaluator {
    pub fn new(config: &SafetyConfig) -> Self {
        SafetyEvaluator {
            head_to_head: config.head_to_head,
            opponent_tail_vacates: config.opponent_tail_vacates,
        }
    }

    /// Evaluates every direction against every filter.
    ///
    /// A snake without a body cannot be checked against anything, so the map is
    /// returned all-safe and selection falls through to its random policy.
    pub fn evaluate(&self, state: &GameState) -> SafetyMap {
        let mut map = SafetyMap::all_safe();

        let head = match state.you.head_coord() {
            Some(head) => head,
            None => {
                warn!(
                    "MOVE {}: snake '{}' has an empty body, skipping safety filters",
                    state.turn, state.you.id
                );
                return map;
            }
        };

        for &dir in Direction::ALL.iter() {
            let next = dir.apply(&head);

            let unsafe_move = Self::is_neck_reversal(&state.you, dir)
                || Self::is_out_of_bounds(&next, &state.board)
                || Self::is_self_collision(&next, &state.you, &state.board)
                || self.is_opponent_collision(&next, &state.you, &state.board);

            if unsafe_move {
                map.mark_unsafe(dir);
            }
        }

        map
    }

    /// Moving back onto the neck.
    /// A single-segment snake, or one whose neck is stacked under its head, has no reversal.
    pub fn is_neck_reversal(you: &Battlesnake, dir: Direction) -> bool {
        match (you.head_coord(), you.neck()) {
            (Some(head), Some(neck)) => Direction::between(&head, &neck) == Some(dir),
            _ => false,
        }
    }

    /// Checks if a coordinate is out of bounds
    pub fn is_out_of_bounds(next: &Coord, board: &Board) -> bool {
        !board.in_bounds(next)
    }

    /// Hitting our own body. The tail moves away unless we eat this turn.
    pub fn is_self_collision(next: &Coord, you: &Battlesnake, board: &Board) -> bool {
        let eating = board.has_food(next);
        let check_len = if eating {
            you.body.len()
        } else {
            you.body.len().saturating_sub(1)
        };

        you.body[..check_len].contains(next)
    }

    /// Hitting any other live snake, plus the configured head-to-head rule
    pub fn is_opponent_collision(&self, next: &Coord, you: &Battlesnake, board: &Board) -> bool {
        for opponent in board.opponents_of(you) {
            let check_len = if self.opponent_tail_vacates {
                opponent.body.len().saturating_sub(1)
            } else {
                opponent.body.len()
            };
            if opponent.body[..check_len].contains(next) {
                return true;
            }

            if self.head_to_head == HeadToHeadPolicy::LongerWins
                && Self::loses_head_to_head(next, you, opponent)
            {
                return true;
            }
        }
        false
    }

    /// True when `opponent` can also reach `next` this turn and is at least as long as us
    fn loses_head_to_head(next: &Coord, you: &Battlesnake, opponent: &Battlesnake) -> bool {
        let their_head = match opponent.head_coord() {
            Some(head) => head,
            None => return false,
        };

        their_head.manhattan(next) == 1 && you.len() <= opponent.len()
    }
}
