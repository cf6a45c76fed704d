// Move selection among the directions the safety stage left open
//
// The selector never overrides safety: heuristics only rank members of the
// safe set, and the fallback is used only when that set is empty.

use log::warn;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{SelectionConfig, SelectionPolicy};
use crate::safety::SafetyMap;
use crate::types::{Coord, Direction, GameState};

/// How the final direction was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Uniform pick among safe moves
    Random,
    /// Safe move ranked by the food heuristic
    Heuristic,
    /// No safe move existed
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub direction: Direction,
    pub outcome: SelectionOutcome,
}

impl Selection {
    pub fn is_fallback(&self) -> bool {
        self.outcome == SelectionOutcome::Fallback
    }
}

/// Source of randomness shared by concurrent move requests
enum RandomSource {
    /// Fresh thread-local generator per call
    Thread,
    /// One seeded generator, serialized behind a lock
    Seeded(Mutex<StdRng>),
}

impl RandomSource {
    fn pick<T: Copy>(&self, candidates: &[T]) -> T {
        match self {
            RandomSource::Thread => Self::pick_with(&mut rand::rng(), candidates),
            RandomSource::Seeded(rng) => Self::pick_with(&mut *rng.lock(), candidates),
        }
    }

    fn pick_with<R: Rng + ?Sized, T: Copy>(rng: &mut R, candidates: &[T]) -> T {
        candidates[rng.random_range(0..candidates.len())]
    }
}

pub struct MoveSelector {
    policy: SelectionPolicy,
    fallback: Direction,
    avoid_hazards: bool,
    rng: RandomSource,
}

impl MoveSelector {
    pub fn new(config: &SelectionConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => RandomSource::Seeded(Mutex::new(StdRng::seed_from_u64(seed))),
            None => RandomSource::Thread,
        };

        MoveSelector {
            policy: config.policy,
            fallback: config.fallback_move,
            avoid_hazards: config.avoid_hazards,
            rng,
        }
    }

    pub fn fallback(&self) -> Direction {
        self.fallback
    }

    /// Picks one direction from the safe set, or the fallback when it is empty
    pub fn select(&self, safety: &SafetyMap, state: &GameState) -> Selection {
        let safe_moves = safety.safe_moves();

        if safe_moves.is_empty() {
            warn!(
                "MOVE {}: No safe moves detected! Moving {}",
                state.turn, self.fallback
            );
            return Selection {
                direction: self.fallback,
                outcome: SelectionOutcome::Fallback,
            };
        }

        let head = state.you.head_coord();
        let candidates = match head {
            Some(head) if self.avoid_hazards => Self::drop_hazards(&safe_moves, &head, state),
            _ => safe_moves,
        };

        if let (SelectionPolicy::NearestFood, Some(head)) = (self.policy, head) {
            if let Some(closest) = Self::closest_food(&head, state) {
                let best = Self::moves_towards(&candidates, &head, &closest);
                return Selection {
                    direction: self.rng.pick(&best),
                    outcome: SelectionOutcome::Heuristic,
                };
            }
        }

        Selection {
            direction: self.rng.pick(&candidates),
            outcome: SelectionOutcome::Random,
        }
    }

    /// Removes moves landing on hazards, unless that would leave nothing
    fn drop_hazards(moves: &[Direction], head: &Coord, state: &GameState) -> Vec<Direction> {
        let clear: Vec<Direction> = moves
            .iter()
            .copied()
            .filter(|dir| !state.board.is_hazard(&dir.apply(head)))
            .collect();

        if clear.is_empty() {
            moves.to_vec()
        } else {
            clear
        }
    }

    fn closest_food(head: &Coord, state: &GameState) -> Option<Coord> {
        state
            .board
            .food
            .iter()
            .min_by_key(|food| head.manhattan(food))
            .copied()
    }

    /// All moves that tie for the shortest distance to `target`
    fn moves_towards(moves: &[Direction], head: &Coord, target: &Coord) -> Vec<Direction> {
        let distance = |dir: &Direction| dir.apply(head).manhattan(target);
        let best = moves.iter().map(distance).min().unwrap_or(0);

        moves
            .iter()
            .copied()
            .filter(|dir| distance(dir) == best)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::{Battlesnake, Board, Game};

    fn state_with_head(head: Coord, food: Vec<Coord>, hazards: Vec<Coord>) -> GameState {
        let you = Battlesnake {
            id: "me".to_string(),
            name: "me".to_string(),
            health: 80,
            body: vec![head],
            head: Some(head),
            length: 1,
            latency: "0".to_string(),
            shout: None,
        };
        GameState {
            game: Game::default(),
            turn: 12,
            board: Board {
                height: 11,
                width: 11,
                food,
                snakes: vec![you.clone()],
                hazards,
            },
            you,
        }
    }

    fn selector(policy: SelectionPolicy, seed: u64) -> MoveSelector {
        let mut config = Config::default_hardcoded().selection;
        config.policy = policy;
        config.rng_seed = Some(seed);
        MoveSelector::new(&config)
    }

    #[test]
    fn test_empty_safety_map_returns_fallback() {
        let mut map = SafetyMap::all_safe();
        for &dir in Direction::ALL.iter() {
            map.mark_unsafe(dir);
        }
        let state = state_with_head(Coord::new(5, 5), vec![], vec![]);

        let selection = selector(SelectionPolicy::Random, 1).select(&map, &state);
        assert_eq!(selection.direction, Direction::Down);
        assert!(selection.is_fallback());
    }

    #[test]
    fn test_single_safe_move_is_always_chosen() {
        let mut map = SafetyMap::all_safe();
        map.mark_unsafe(Direction::Up);
        map.mark_unsafe(Direction::Down);
        map.mark_unsafe(Direction::Right);
        let state = state_with_head(Coord::new(5, 5), vec![], vec![]);
        let selector = selector(SelectionPolicy::Random, 3);

        for _ in 0..50 {
            let selection = selector.select(&map, &state);
            assert_eq!(selection.direction, Direction::Left);
            assert_eq!(selection.outcome, SelectionOutcome::Random);
        }
    }

    #[test]
    fn test_nearest_food_steers_within_safe_set() {
        let state = state_with_head(Coord::new(5, 5), vec![Coord::new(9, 5)], vec![]);
        let mut map = SafetyMap::all_safe();
        let selector = selector(SelectionPolicy::NearestFood, 5);

        let selection = selector.select(&map, &state);
        assert_eq!(selection.direction, Direction::Right);
        assert_eq!(selection.outcome, SelectionOutcome::Heuristic);

        // Food is to the right but right is unsafe: never override safety
        map.mark_unsafe(Direction::Right);
        for _ in 0..20 {
            let selection = selector.select(&map, &state);
            assert_ne!(selection.direction, Direction::Right);
        }
    }

    #[test]
    fn test_nearest_food_without_food_is_random() {
        let state = state_with_head(Coord::new(5, 5), vec![], vec![]);
        let selection = selector(SelectionPolicy::NearestFood, 9).select(&SafetyMap::all_safe(), &state);
        assert_eq!(selection.outcome, SelectionOutcome::Random);
    }

    #[test]
    fn test_hazards_are_avoided_when_alternatives_exist() {
        let head = Coord::new(5, 5);
        let hazards = vec![Coord::new(5, 6), Coord::new(5, 4), Coord::new(4, 5)];
        let state = state_with_head(head, vec![], hazards);
        let selector = selector(SelectionPolicy::Random, 11);

        for _ in 0..30 {
            assert_eq!(
                selector.select(&SafetyMap::all_safe(), &state).direction,
                Direction::Right
            );
        }
    }

    #[test]
    fn test_hazards_kept_when_every_safe_move_is_hazardous() {
        let head = Coord::new(5, 5);
        let state = state_with_head(head, vec![], vec![Coord::new(5, 6)]);
        let mut map = SafetyMap::all_safe();
        map.mark_unsafe(Direction::Down);
        map.mark_unsafe(Direction::Left);
        map.mark_unsafe(Direction::Right);

        let selection = selector(SelectionPolicy::Random, 2).select(&map, &state);
        assert_eq!(selection.direction, Direction::Up);
    }

    #[test]
    fn test_same_seed_gives_same_sequence() {
        let state = state_with_head(Coord::new(5, 5), vec![], vec![]);
        let map = SafetyMap::all_safe();
        let a = selector(SelectionPolicy::Random, 42);
        let b = selector(SelectionPolicy::Random, 42);

        let first: Vec<Direction> = (0..20).map(|_| a.select(&map, &state).direction).collect();
        let second: Vec<Direction> = (0..20).map(|_| b.select(&map, &state).direction).collect();
        assert_eq!(first, second);
    }
}
