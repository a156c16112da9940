//! Message handlers: creating games and playing moves.

use tracing::{error, info, instrument, warn};

use super::events::{
    ACTION_MOVE_PLAYED, ACTION_NEW_GAME_CREATED, ATTRIBUTE_ACTION, ATTRIBUTE_BLACK,
    ATTRIBUTE_CAPTURED_X, ATTRIBUTE_CAPTURED_Y, ATTRIBUTE_CREATOR, ATTRIBUTE_ID_VALUE,
    ATTRIBUTE_INDEX, ATTRIBUTE_MODULE, ATTRIBUTE_RED, ATTRIBUTE_WINNER, Attribute, Event,
    EventSink,
};
use super::{
    IdentityRule, Keeper, KeeperError, MODULE_NAME, MsgCreateGame, MsgCreateGameResponse,
    MsgPlayMove, MsgPlayMoveResponse, NEXT_GAME_KEY, NextGame, StoredGame, entry,
    stored_game_key,
};
use crate::games::checkers::Game;
use crate::store::KvStore;

impl<S: KvStore, R: IdentityRule> Keeper<S, R> {
    /// Creates a game in the standard starting position and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::Validation`] if an identity is malformed,
    /// [`KeeperError::MissingNextGame`] if the id counter was never
    /// initialized and [`KeeperError::GameIdInUse`] if the counter points at
    /// an id already taken.
    #[instrument(skip(self, msg, events), fields(creator = %msg.creator))]
    pub fn create_game(
        &mut self,
        msg: &MsgCreateGame,
        events: &mut impl EventSink,
    ) -> Result<MsgCreateGameResponse, KeeperError> {
        let next_game = self
            .load_next_game()?
            .ok_or(KeeperError::MissingNextGame)?;
        let index = next_game.id_value.to_string();
        let key = stored_game_key(&index);
        if self.store.get(&key)?.is_some() {
            error!(game_id = %index, "Next id already taken");
            return Err(KeeperError::GameIdInUse(index));
        }

        let stored = StoredGame::new(
            msg.creator.clone(),
            index.clone(),
            &Game::new(),
            msg.red.clone(),
            msg.black.clone(),
        );
        stored.validate(&self.identity).inspect_err(|e| {
            warn!(error = %e, "Rejected game creation");
        })?;

        let batch = vec![
            entry(key, &stored)?,
            entry(
                NEXT_GAME_KEY.to_string(),
                &NextGame::new(next_game.id_value + 1),
            )?,
        ];
        self.store.write_batch(batch)?;

        events.emit(Event::message(vec![
            Attribute::new(ATTRIBUTE_MODULE, MODULE_NAME),
            Attribute::new(ATTRIBUTE_ACTION, ACTION_NEW_GAME_CREATED),
            Attribute::new(ATTRIBUTE_CREATOR, msg.creator.as_str()),
            Attribute::new(ATTRIBUTE_INDEX, index.as_str()),
            Attribute::new(ATTRIBUTE_RED, msg.red.as_str()),
            Attribute::new(ATTRIBUTE_BLACK, msg.black.as_str()),
        ]));

        info!(game_id = %index, red = %msg.red, black = %msg.black, "Game created");
        Ok(MsgCreateGameResponse { id_value: index })
    }

    /// Plays one move for the participant `msg.creator`.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::GameNotFound`] for an unknown id,
    /// [`KeeperError::OutOfTurn`] if the sender may not move now and
    /// [`KeeperError::WrongMove`] if the rules reject the move.
    #[instrument(skip(self, msg, events), fields(game_id = %msg.id_value, creator = %msg.creator))]
    pub fn play_move(
        &mut self,
        msg: &MsgPlayMove,
        events: &mut impl EventSink,
    ) -> Result<MsgPlayMoveResponse, KeeperError> {
        let mut stored = self
            .load_stored_game(&msg.id_value)?
            .ok_or_else(|| KeeperError::GameNotFound(msg.id_value.clone()))?;

        let mut game = stored.parse_game()?;
        let player = stored.authorized_player(&msg.creator, game.turn());
        if !player.is_some_and(|p| game.turn_is(p)) {
            warn!(turn = %game.turn(), ?player, "Move out of turn");
            return Err(KeeperError::OutOfTurn {
                identity: msg.creator.clone(),
                turn: game.turn(),
            });
        }

        let mv = msg.as_move();
        let outcome = game.play(&self.rules, mv).map_err(|e| {
            warn!(error = %e, %mv, "Rejected move");
            KeeperError::WrongMove(e)
        })?;

        stored.record_move(&game);
        let batch = vec![entry(stored_game_key(stored.index()), &stored)?];
        self.store.write_batch(batch)?;

        let captured = outcome.captured_square();
        let winner = outcome.winner.to_string();
        events.emit(Event::message(vec![
            Attribute::new(ATTRIBUTE_MODULE, MODULE_NAME),
            Attribute::new(ATTRIBUTE_ACTION, ACTION_MOVE_PLAYED),
            Attribute::new(ATTRIBUTE_CREATOR, msg.creator.as_str()),
            Attribute::new(ATTRIBUTE_ID_VALUE, msg.id_value.as_str()),
            Attribute::new(ATTRIBUTE_CAPTURED_X, captured.x.to_string()),
            Attribute::new(ATTRIBUTE_CAPTURED_Y, captured.y.to_string()),
            Attribute::new(ATTRIBUTE_WINNER, winner.as_str()),
        ]));

        info!(
            %mv,
            move_count = *stored.move_count(),
            turn = %outcome.turn,
            winner = %winner,
            "Move played"
        );
        Ok(MsgPlayMoveResponse {
            id_value: msg.id_value.clone(),
            captured_x: captured.x,
            captured_y: captured.y,
            winner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::{Player, Rules};
    use crate::keeper::{AnyIdentity, EventManager, KeeperError};
    use crate::store::MemoryStore;

    fn keeper() -> Keeper<MemoryStore, AnyIdentity> {
        let mut store = MemoryStore::new();
        store
            .set(NEXT_GAME_KEY, r#"{"idValue":1}"#)
            .expect("memory store");
        Keeper::new(store, AnyIdentity, Rules::default())
    }

    #[test]
    fn test_create_without_counter_is_fatal() {
        let mut keeper = Keeper::new(MemoryStore::new(), AnyIdentity, Rules::default());
        let err = keeper
            .create_game(
                &MsgCreateGame::new("alice".into(), "bob".into(), "carol".into()),
                &mut EventManager::new(),
            )
            .expect_err("no counter");
        assert!(matches!(err, KeeperError::MissingNextGame));
        assert!(err.is_fatal());
        assert!(keeper.store().is_empty());
    }

    #[test]
    fn test_create_never_overwrites_a_game() {
        let mut keeper = keeper();
        let mut events = EventManager::new();
        let msg = MsgCreateGame::new("alice".into(), "bob".into(), "carol".into());
        keeper.create_game(&msg, &mut events).expect("created");
        keeper
            .store
            .set(NEXT_GAME_KEY, r#"{"idValue":1}"#)
            .expect("memory store");
        let before = keeper.store().clone();

        let err = keeper
            .create_game(&msg, &mut events)
            .expect_err("id 1 is taken");
        assert!(matches!(&err, KeeperError::GameIdInUse(id) if id == "1"));
        assert!(err.is_fatal());
        assert_eq!(keeper.store(), &before);
        assert_eq!(events.events().len(), 1);
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let mut keeper = keeper();
        let mut events = EventManager::new();
        keeper
            .create_game(
                &MsgCreateGame::new("alice".into(), "bob".into(), "carol".into()),
                &mut events,
            )
            .expect("created");

        let mut stored = keeper.load_stored_game("1").expect("loads").expect("exists");
        let finished = Game::parse(
            "********|********|********|********|********|********|********|b*******",
            "*",
        )
        .expect("parses");
        stored.record_move(&finished);
        keeper
            .store
            .set(&stored_game_key("1"), &serde_json::to_string(&stored).expect("encodes"))
            .expect("memory store");

        let err = keeper
            .play_move(&MsgPlayMove::new("carol".into(), "1".into(), 0, 7, 1, 6), &mut events)
            .expect_err("game is over");
        assert!(matches!(
            err,
            KeeperError::OutOfTurn {
                turn: Player::NoPlayer,
                ..
            }
        ));
    }
}
