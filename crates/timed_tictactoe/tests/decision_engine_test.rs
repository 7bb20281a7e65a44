//! Tests for the computer's decision cascade.

use rand::SeedableRng;
use rand::rngs::StdRng;
use timed_tictactoe::ai::search::best_move;
use timed_tictactoe::{
    Board, DecisionEngine, DecisionError, Difficulty, EngineConfig, Outcome, Position, Strategy,
    decide,
};

fn without_randomness() -> DecisionEngine {
    DecisionEngine::from_config(
        &EngineConfig::default()
            .with_easy_random_rate(0.0)
            .with_medium_random_rate(0.0),
    )
    .unwrap()
}

#[test]
fn test_hard_takes_immediate_win() {
    // O wins at TopRight, which also happens to block X's diagonal.
    let board: Board = "OO./XX./X..".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let decision = decide(&board, Difficulty::Hard, &mut rng).unwrap();
    assert_eq!(*decision.position(), Position::TopRight);
    assert_eq!(*decision.strategy(), Strategy::Win);
}

#[test]
fn test_block_on_medium_and_hard() {
    let board: Board = "XX./.O./...".parse().unwrap();
    let engine = without_randomness();
    for difficulty in [Difficulty::Medium, Difficulty::Hard] {
        let mut rng = StdRng::seed_from_u64(2);
        let decision = engine.decide(&board, difficulty, &mut rng).unwrap();
        assert_eq!(*decision.position(), Position::TopRight);
        assert_eq!(*decision.strategy(), Strategy::Block);
    }
}

#[test]
fn test_hard_creates_fork() {
    // O at TopRight threatens both the top row and the right column.
    let board: Board = "O../X.O/.X.".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let decision = decide(&board, Difficulty::Hard, &mut rng).unwrap();
    assert_eq!(*decision.position(), Position::TopRight);
    assert_eq!(*decision.strategy(), Strategy::Fork);
}

#[test]
fn test_hard_denies_human_fork() {
    let board: Board = "X../.O./..X".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    let decision = decide(&board, Difficulty::Hard, &mut rng).unwrap();
    assert_eq!(*decision.position(), Position::TopRight);
    assert_eq!(*decision.strategy(), Strategy::ForkDenial);
}

#[test]
fn test_fork_logic_never_affects_easy_or_medium() {
    let engine = without_randomness();

    let fork_available: Board = "O../X.O/.X.".parse().unwrap();
    let fork_threatened: Board = "X../.O./..X".parse().unwrap();

    for difficulty in [Difficulty::Easy, Difficulty::Medium] {
        let mut rng = StdRng::seed_from_u64(5);
        let decision = engine.decide(&fork_available, difficulty, &mut rng).unwrap();
        assert_eq!(*decision.strategy(), Strategy::Center);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let decision = engine
                .decide(&fork_threatened, difficulty, &mut rng)
                .unwrap();
            assert_eq!(*decision.strategy(), Strategy::Corner);
            assert!(decision.position().is_corner());
        }
    }
}

#[test]
fn test_default_rates_never_reach_hard_only_steps() {
    let boards: Vec<Board> = ["O../X.O/.X.", "X../.O./..X", ".........", "X........"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for board in &boards {
            for difficulty in [Difficulty::Easy, Difficulty::Medium] {
                let decision = decide(board, difficulty, &mut rng).unwrap();
                assert!(board.is_empty(*decision.position()));
                assert!(!matches!(
                    decision.strategy(),
                    Strategy::Fork | Strategy::ForkDenial | Strategy::Search
                ));
            }
        }
    }
}

#[test]
fn test_hard_never_randomizes() {
    let engine = DecisionEngine::from_config(
        &EngineConfig::default()
            .with_easy_random_rate(1.0)
            .with_medium_random_rate(1.0),
    )
    .unwrap();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let decision = engine.decide(&Board::new(), Difficulty::Hard, &mut rng).unwrap();
        assert_eq!(*decision.strategy(), Strategy::Center);
    }
}

#[test]
fn test_same_seed_same_decision() {
    let board: Board = "X../.../...".parse().unwrap();
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let first = decide(&board, difficulty, &mut StdRng::seed_from_u64(99)).unwrap();
        let second = decide(&board, difficulty, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_minimax_avoids_one_ply_loss() {
    let board: Board = "O../XX./O.X".parse().unwrap();
    let (pos, score) = best_move(&board, 6).unwrap();
    assert_eq!(pos, Position::MiddleRight);
    assert!(score > -9);
}

#[test]
fn test_precondition_violations_are_errors() {
    let mut rng = StdRng::seed_from_u64(6);
    let won: Board = "OOO/XX./X..".parse().unwrap();
    assert_eq!(
        decide(&won, Difficulty::Medium, &mut rng),
        Err(DecisionError::AlreadyDecided(Outcome::ComputerWin))
    );
    let full: Board = "XOX/XOO/OXX".parse().unwrap();
    assert_eq!(
        decide(&full, Difficulty::Hard, &mut rng),
        Err(DecisionError::BoardFull)
    );
}

#[test]
fn test_out_of_range_rate_is_rejected() {
    let config = EngineConfig::default().with_easy_random_rate(1.5);
    let err = DecisionEngine::from_config(&config).unwrap_err();
    assert!(err.message.contains("easy_random_rate"));

    let config = EngineConfig::default().with_medium_random_rate(-0.1);
    assert!(DecisionEngine::from_config(&config).is_err());
}
