use log::{debug, error, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

use super::messages;
use super::score_store::{BestScores, ScoreStore};
use super::settings::Settings;
use crate::events::{EventObserver, Unsubscriber};
use crate::model::{
    parse_guess, Difficulty, GameActionEvent, GuessError, GuessOutcome, Hint, Round, RoundState,
};
use crate::ui::Presentation;

/// Owns the current round and drives a [`Presentation`] and a [`ScoreStore`].
pub struct GameSession<P: Presentation, S: ScoreStore> {
    presentation: P,
    store: S,
    rng: StdRng,
    debug_mode: bool,
    round: Round,
}

impl<P: Presentation, S: ScoreStore> GameSession<P, S> {
    /// Builds the session and opens the first round on `settings.difficulty`.
    pub fn new(presentation: P, store: S, settings: &Settings) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let round = Self::draw_round(&mut rng, settings.difficulty);
        let mut session = Self {
            presentation,
            store,
            rng,
            debug_mode: settings.debug_mode,
            round,
        };
        session.present_new_round();
        session
    }

    fn draw_round(rng: &mut StdRng, difficulty: Difficulty) -> Round {
        let profile = difficulty.profile();
        let answer = rng.random_range(profile.min..=profile.max);
        Round::new(&profile, answer)
    }

    /// Starts a fresh round. Unknown or missing tier names fall back to medium.
    pub fn start(&mut self, difficulty_name: Option<&str>) {
        let difficulty = Difficulty::from_name(difficulty_name);
        self.round = Self::draw_round(&mut self.rng, difficulty);
        self.present_new_round();
    }

    /// Starts a round with a fixed answer.
    pub(crate) fn start_with_answer(&mut self, difficulty: Difficulty, answer: i64) {
        self.round = Round::new(&difficulty.profile(), answer);
        self.present_new_round();
    }

    fn present_new_round(&mut self) {
        let round = &self.round;
        info!(
            target: "game_session",
            "Round {} started on {} ({}..={}, {} attempts)",
            round.id, round.difficulty, round.min, round.max, round.max_attempts
        );
        if self.debug_mode {
            debug!(target: "game_session", "Answer for round {} is {}", round.id, round.answer);
        }

        let (min, max) = (round.min, round.max);
        self.presentation.show_difficulty(round.difficulty);
        self.presentation.set_range_text(&messages::range_text(min, max));
        self.presentation.clear_message();
        self.presentation.set_input_enabled(true);
        self.presentation.set_hint_enabled(true);
        self.presentation.clear_guess_input();
        self.presentation
            .set_input_placeholder(&messages::placeholder_text(min, max));
        self.presentation.focus_input();
        self.refresh_attempts();
        self.refresh_best_score();
    }

    pub fn submit_guess(&mut self, raw: &str) -> GuessOutcome {
        if !self.round.is_open() {
            self.presentation.set_message(&messages::round_closed());
            return GuessOutcome::RoundClosed;
        }

        let value = match parse_guess(raw) {
            Ok(value) => value,
            Err(e) => {
                debug!(target: "game_session", "Rejected guess {:?}: {}", raw, e);
                self.presentation
                    .set_message(&messages::not_a_number(&self.round));
                return GuessOutcome::Rejected(e);
            }
        };
        if !self.round.contains(value) {
            let e = GuessError::OutOfRange {
                value,
                min: self.round.min,
                max: self.round.max,
            };
            debug!(target: "game_session", "Rejected guess {:?}: {}", raw, e);
            self.presentation
                .set_message(&messages::out_of_range(&self.round));
            return GuessOutcome::Rejected(e);
        }

        self.round.attempts += 1;
        self.refresh_attempts();
        debug!(
            target: "game_session",
            "Guess {} ({}/{})",
            value, self.round.attempts, self.round.max_attempts
        );

        let answer = self.round.answer;
        if value == answer as f64 {
            self.finish_won();
            return GuessOutcome::Won {
                attempts: self.round.attempts,
            };
        }

        if self.round.attempts_exhausted() {
            self.close_round(RoundState::Lost);
            self.presentation.set_message(&messages::lost(&self.round));
            return GuessOutcome::Lost { answer };
        }

        let outcome = if value < answer as f64 {
            self.presentation.set_message(&messages::too_low());
            GuessOutcome::TooLow
        } else {
            self.presentation.set_message(&messages::too_high());
            GuessOutcome::TooHigh
        };
        self.presentation.clear_guess_input();
        self.presentation.focus_input();
        outcome
    }

    fn finish_won(&mut self) {
        self.close_round(RoundState::Won);
        self.presentation.set_message(&messages::won(&self.round));

        let difficulty = self.round.difficulty;
        match BestScores::record_win(&mut self.store, difficulty, self.round.attempts) {
            Ok(true) => info!(
                target: "game_session",
                "New best on {}: {} attempts", difficulty, self.round.attempts
            ),
            Ok(false) => {}
            Err(e) => error!(target: "game_session", "Failed to save best score: {}", e),
        }
        self.refresh_best_score();
    }

    fn close_round(&mut self, state: RoundState) {
        info!(
            target: "game_session",
            "Round {} closed as {:?} after {} attempts", self.round.id, state, self.round.attempts
        );
        self.round.state = state;
        self.presentation.set_input_enabled(false);
        self.presentation.set_hint_enabled(false);
    }

    /// Reveals one hint per round. Returns None when the request was refused.
    pub fn give_hint(&mut self) -> Option<Hint> {
        if self.round.hint_used {
            self.presentation.set_message(&messages::hint_already_used());
            return None;
        }
        if !self.round.is_open() {
            self.presentation.set_message(&messages::round_closed());
            return None;
        }

        let hint = Hint::for_round(&self.round);
        self.round.hint_used = true;
        self.presentation.set_hint_enabled(false);
        self.presentation.set_message(&messages::hint(&hint));
        debug!(target: "game_session", "Hint for round {}: {:?}", self.round.id, hint);
        Some(hint)
    }

    pub fn handle_event(&mut self, event: &GameActionEvent) {
        trace!(target: "game_session", "Handling {:?}", event);
        match event {
            GameActionEvent::ChangeDifficulty(name) => self.start(Some(name.as_str())),
            GameActionEvent::Restart => {
                let selected = self.presentation.read_selected_difficulty();
                self.start(selected.as_deref());
            }
            GameActionEvent::SubmitGuess => {
                let raw = self.presentation.read_guess_input();
                self.submit_guess(&raw);
            }
            GameActionEvent::RequestHint => {
                self.give_hint();
            }
        }
    }

    fn refresh_attempts(&mut self) {
        self.presentation
            .set_attempts(&messages::attempts_text(&self.round));
    }

    fn refresh_best_score(&mut self) {
        let best = BestScores::get(&self.store, self.round.difficulty);
        self.presentation
            .set_best_score(&messages::best_score_text(best));
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn best_score(&self) -> Option<u32> {
        BestScores::get(&self.store, self.round.difficulty)
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<P: Presentation + 'static, S: ScoreStore + 'static> GameSession<P, S> {
    /// Routes every action on `observer` into the shared session.
    pub fn wire_subscription(
        session: Rc<RefCell<Self>>,
        observer: &EventObserver<GameActionEvent>,
    ) -> Unsubscriber<GameActionEvent> {
        observer.subscribe(move |event| {
            if let Ok(mut session) = session.try_borrow_mut() {
                session.handle_event(event);
            } else {
                error!(target: "game_session", "Dropped re-entrant event {:?}", event);
            }
        })
    }
}
