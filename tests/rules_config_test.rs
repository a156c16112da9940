//! Tests for configurable continuation and win policies through the keeper.

use checkers_keeper::{
    AnyIdentity, Color, Continuation, EventManager, Game, GenesisState, Keeper, KeeperConfig,
    KeeperError, MemoryStore, MsgPlayMove, MsgPlayMoveResponse, NextGame, Rules, StoredGame,
    WinCondition,
};

/// Black man on (0,1) facing a double jump over (1,2) and (3,4).
const DOUBLE_JUMP: &str =
    "********|b*******|*r******|********|***r****|********|*******r|********";
/// Black man on (0,1) facing the last red piece on (1,2).
const LAST_PIECE: &str =
    "********|b*******|*r******|********|********|********|********|********";
/// Red man on (0,7) walled in by black men it cannot jump.
const RED_BLOCKED: &str =
    "********|********|********|********|********|**b*****|*b******|r*******";

/// Keeper whose only game "1" is `board` with `turn` to move.
fn keeper_with(board: &str, turn: &str, rules: Rules) -> Keeper<MemoryStore, AnyIdentity> {
    let game = Game::parse(board, turn).expect("Fixture board invalid");
    let genesis = GenesisState {
        next_game: NextGame::new(2),
        stored_game_list: vec![StoredGame::new(
            "alice".to_string(),
            "1".to_string(),
            &game,
            "bob".to_string(),
            "carol".to_string(),
        )],
    };
    let mut keeper = Keeper::new(MemoryStore::new(), AnyIdentity, rules);
    keeper.init_genesis(&genesis).expect("Genesis failed");
    keeper
}

fn play(
    keeper: &mut Keeper<MemoryStore, AnyIdentity>,
    who: &str,
    from: (i32, i32),
    to: (i32, i32),
) -> Result<MsgPlayMoveResponse, KeeperError> {
    let msg = MsgPlayMove::new(who.to_string(), "1".to_string(), from.0, from.1, to.0, to.1);
    keeper.play_move(&msg, &mut EventManager::new())
}

#[test]
fn test_alternate_passes_turn_after_capture() {
    let mut keeper = keeper_with(DOUBLE_JUMP, "b", Rules::default());
    play(&mut keeper, "carol", (0, 1), (2, 3)).expect("Jump rejected");
    assert_eq!(keeper.stored_game("1").expect("Game missing").turn(), "r");
}

#[test]
fn test_multi_jump_keeps_turn_while_jumps_remain() {
    let rules = Rules::default().with_continuation(Continuation::MultiJump);
    let mut keeper = keeper_with(DOUBLE_JUMP, "b", rules);

    let first = play(&mut keeper, "carol", (0, 1), (2, 3)).expect("First jump rejected");
    assert_eq!((first.captured_x, first.captured_y), (1, 2));
    assert_eq!(keeper.stored_game("1").expect("Game missing").turn(), "b");

    let second = play(&mut keeper, "carol", (2, 3), (4, 5)).expect("Second jump rejected");
    assert_eq!((second.captured_x, second.captured_y), (3, 4));

    let stored = keeper.stored_game("1").expect("Game missing");
    assert_eq!(stored.turn(), "r");
    assert_eq!(*stored.move_count(), 2);
}

#[test]
fn test_capturing_last_piece_wins() {
    let mut keeper = keeper_with(LAST_PIECE, "b", Rules::default());

    let response = play(&mut keeper, "carol", (0, 1), (2, 3)).expect("Winning jump rejected");
    assert_eq!(response.winner, "black");

    let stored = keeper.stored_game("1").expect("Game missing");
    assert_eq!(stored.turn(), "*");

    let err = play(&mut keeper, "bob", (2, 3), (3, 4)).expect_err("Move after the win");
    assert!(matches!(err, KeeperError::OutOfTurn { .. }));
    assert_eq!(*keeper.stored_game("1").expect("Game missing").move_count(), 1);
}

#[test]
fn test_no_legal_moves_condition() {
    // Black steps (3,4) -> (2,5); red on (0,7) is then stuck behind (1,6).
    let board = "********|********|********|********|***b****|********|*b******|r*******";
    let rules = Rules::default().with_win_condition(WinCondition::NoLegalMoves);
    let mut keeper = keeper_with(board, "b", rules);
    let response = play(&mut keeper, "carol", (3, 4), (2, 5)).expect("Step rejected");
    assert_eq!(response.winner, "black");

    let mut plain = keeper_with(board, "b", Rules::default());
    let response = play(&mut plain, "carol", (3, 4), (2, 5)).expect("Step rejected");
    assert_eq!(response.winner, "NO_PLAYER");
}

#[test]
fn test_blocked_fixture_has_no_red_moves() {
    let game = Game::parse(RED_BLOCKED, "r").expect("Fixture board invalid");
    let rules = Rules::default();
    assert!(rules.legal_moves(game.board(), Color::Red).is_empty());
}

#[test]
fn test_config_rules_drive_keeper() {
    let config = KeeperConfig::from_toml("[rules]\ncontinuation = \"multi_jump\"")
        .expect("Config invalid");
    let mut keeper = keeper_with(DOUBLE_JUMP, "b", *config.rules());
    play(&mut keeper, "carol", (0, 1), (2, 3)).expect("Jump rejected");
    assert_eq!(keeper.stored_game("1").expect("Game missing").turn(), "b");
}
