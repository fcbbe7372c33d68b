// Unit tests for error mapping - pure domain logic without any runtime
use crate::errors::{ErrorCode, GameError};

#[test]
fn maps_command_rejections() {
    assert_eq!(
        GameError::not_players_turn("bob").code(),
        ErrorCode::NotPlayersTurn
    );
    assert_eq!(GameError::illegal_move("R5 on B3").code(), ErrorCode::IllegalMove);
    assert_eq!(
        GameError::invalid_color("missing").code(),
        ErrorCode::InvalidColorChoice
    );
    assert_eq!(
        GameError::card_not_in_hand("#17").code(),
        ErrorCode::CardNotInHand
    );
    assert_eq!(GameError::unknown_player("zed").code(), ErrorCode::UnknownPlayer);
}

#[test]
fn maps_lifecycle() {
    assert_eq!(GameError::GameNotInProgress.code().as_str(), "GAME_NOT_IN_PROGRESS");
    assert_eq!(GameError::GameAlreadyEnded.code().as_str(), "GAME_ALREADY_ENDED");
    let e = GameError::InsufficientPlayers { min: 2, got: 1 };
    assert_eq!(e.code(), ErrorCode::InsufficientPlayers);
    assert_eq!(e.to_string(), "insufficient players: need at least 2, got 1");
}

#[test]
fn only_deck_exhaustion_is_fatal() {
    assert!(GameError::deck_exhausted("both piles empty").is_fatal());
    assert!(!GameError::GameNotInProgress.is_fatal());
    assert!(!GameError::illegal_move("x").is_fatal());
    assert!(!GameError::SessionClosed.is_fatal());
}

#[test]
fn config_errors_use_config_code() {
    let e = GameError::invalid_config("initialHandSize must be 1..=20");
    assert_eq!(e.code().as_str(), "CONFIG_ERROR");
}
