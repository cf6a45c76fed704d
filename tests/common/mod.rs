// Shared builders for integration tests
#![allow(dead_code)]

use cautious_snake::types::{Battlesnake, Board, Coord, Game, GameState};

pub fn coords(points: &[(i32, i32)]) -> Vec<Coord> {
    points.iter().map(|&(x, y)| Coord { x, y }).collect()
}

pub fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body = coords(body);
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 100,
        head: body.first().copied(),
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

/// An 11x11 game where `you` is the first snake on the board
pub fn game_state(you: Battlesnake, opponents: Vec<Battlesnake>, food: &[(i32, i32)]) -> GameState {
    let mut snakes = vec![you.clone()];
    snakes.extend(opponents);

    GameState {
        game: Game {
            id: "test-game".to_string(),
            ruleset: serde_json::json!({ "name": "standard" }),
            timeout: 500,
            source: "test".to_string(),
        },
        turn: 10,
        board: Board {
            height: 11,
            width: 11,
            food: coords(food),
            snakes,
            hazards: vec![],
        },
        you,
    }
}
