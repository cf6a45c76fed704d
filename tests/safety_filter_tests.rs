//! Safety Filter Tests
//!
//! Board scenarios for each of the four filters, run through the full
//! evaluator as well as the standalone predicates.

mod common;

use cautious_snake::config::{Config, HeadToHeadPolicy, SafetyConfig};
use cautious_snake::safety::SafetyEvaluator;
use cautious_snake::types::{Coord, Direction};
use common::{game_state, snake};

fn evaluator() -> SafetyEvaluator {
    SafetyEvaluator::new(&Config::default_hardcoded().safety)
}

#[test]
fn test_neck_below_head_excludes_down() {
    let state = game_state(snake("me", &[(5, 5), (5, 4)]), vec![], &[]);
    let map = evaluator().evaluate(&state);

    assert!(!map[Direction::Down], "Moving onto the neck must be unsafe");
    assert!(map[Direction::Up]);
    assert!(map[Direction::Left]);
    assert!(map[Direction::Right]);
}

#[test]
fn test_left_wall_excludes_left() {
    let state = game_state(snake("me", &[(0, 5), (0, 4)]), vec![], &[]);
    let map = evaluator().evaluate(&state);

    assert!(!map[Direction::Left], "x would become -1");
    assert!(!map[Direction::Down], "neck");
    assert_eq!(map.safe_moves(), vec![Direction::Up, Direction::Right]);
}

#[test]
fn test_corner_excludes_both_walls() {
    let state = game_state(snake("me", &[(10, 10)]), vec![], &[]);
    let map = evaluator().evaluate(&state);
    assert_eq!(map.safe_moves(), vec![Direction::Down, Direction::Left]);
}

#[test]
fn test_tail_cell_is_free_unless_eating() {
    let you = snake("me", &[(3, 3), (3, 4), (3, 5)]);
    let target = Coord { x: 3, y: 5 };

    let hungry = game_state(you.clone(), vec![], &[]);
    assert!(
        !SafetyEvaluator::is_self_collision(&target, &you, &hungry.board),
        "Tail vacates on a normal move"
    );

    let fed = game_state(you.clone(), vec![], &[(3, 5)]);
    assert!(
        SafetyEvaluator::is_self_collision(&target, &you, &fed.board),
        "Tail stays when food is eaten"
    );

    // Non-tail segments are always blocked
    assert!(SafetyEvaluator::is_self_collision(
        &Coord { x: 3, y: 4 },
        &you,
        &hungry.board
    ));
}

#[test]
fn test_chasing_own_tail_through_evaluator() {
    // Curled snake whose tail sits right of the head
    let you = snake("me", &[(3, 3), (3, 4), (4, 4), (4, 3)]);

    let map = evaluator().evaluate(&game_state(you.clone(), vec![], &[]));
    assert!(map[Direction::Right], "Tail moves away this turn");

    let map = evaluator().evaluate(&game_state(you, vec![], &[(4, 3)]));
    assert!(!map[Direction::Right], "Tail stays because we grow");
}

#[test]
fn test_opponent_body_excludes_up() {
    let you = snake("me", &[(4, 4), (4, 3)]);
    let rival = snake("rival", &[(6, 5), (5, 5), (4, 5), (3, 5)]);
    let map = evaluator().evaluate(&game_state(you, vec![rival], &[]));

    assert!(!map[Direction::Up], "(4,5) belongs to another snake");
}

#[test]
fn test_opponent_head_is_blocked_regardless_of_length() {
    let you = snake("me", &[(4, 4), (4, 3), (4, 2), (4, 1), (4, 0)]);
    let rival = snake("rival", &[(5, 4), (6, 4)]);

    for policy in [HeadToHeadPolicy::Ignore, HeadToHeadPolicy::LongerWins].iter() {
        let evaluator = SafetyEvaluator::new(&SafetyConfig {
            head_to_head: *policy,
            opponent_tail_vacates: false,
        });
        let map = evaluator.evaluate(&game_state(you.clone(), vec![rival.clone()], &[]));
        assert!(!map[Direction::Right], "{:?}", policy);
    }
}

#[test]
fn test_evaluate_is_pure() {
    let you = snake("me", &[(5, 5), (5, 4), (6, 4)]);
    let rival = snake("rival", &[(7, 5), (7, 6), (7, 7)]);
    let state = game_state(you, vec![rival], &[(5, 6)]);
    let evaluator = evaluator();

    let first = evaluator.evaluate(&state);
    let second = evaluator.evaluate(&state);
    assert_eq!(first, second);
}

#[test]
fn test_fully_boxed_snake_has_no_safe_move() {
    let you = snake("me", &[(0, 0), (0, 1), (0, 2)]);
    let rival = snake("rival", &[(1, 1), (1, 0), (2, 0)]);
    let map = evaluator().evaluate(&game_state(you, vec![rival], &[]));

    assert!(map.is_empty());
}
