//! Tests for the JSON shape of boards, histories and snapshots.

use timed_tictactoe::{
    Board, Difficulty, EngineConfig, MatchController, MoveRecord, MoveSource, Player, Position,
};

#[test]
fn test_board_round_trips_through_json() {
    let board: Board = "XO./.X./..O".parse().unwrap();
    let json = serde_json::to_string(&board).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, board);
}

#[test]
fn test_history_round_trips_through_json() {
    let mut game = MatchController::seeded(EngineConfig::default(), 13).unwrap();
    game.start(Difficulty::Hard).unwrap();
    game.place_human_move(0, 0).unwrap();

    let json = serde_json::to_string(game.history()).unwrap();
    let back: Vec<MoveRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_slice(), game.history());
    assert_eq!(back[0].source, MoveSource::Manual);
    assert_eq!(back[0].action.position, Position::TopLeft);
    assert_eq!(back[0].action.player, Player::Human);
}

#[test]
fn test_snapshot_serializes_for_frontends() {
    let mut game = MatchController::seeded(EngineConfig::default(), 13).unwrap();
    game.start(Difficulty::Hard).unwrap();
    game.place_human_move(1, 1).unwrap();

    let value = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(value["phase"], "InProgress");
    assert_eq!(value["difficulty"], "hard");
    assert_eq!(value["turn"], "Computer");
    assert_eq!(value["outcome"], "Ongoing");
    assert_eq!(value["is_computer_thinking"], true);
    assert_eq!(value["move_count"], 1);
    assert!(value["human_time_remaining"].is_null());
    assert_eq!(value["last_move"]["source"], "Manual");
    assert_eq!(value["last_move"]["action"]["position"], "Center");
}
