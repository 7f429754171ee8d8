use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use itertools::Itertools;
use log::{error, trace};

use crate::events::{Channel, EventEmitter};
use crate::game::{GameSession, ScoreStore};
use crate::helpers::Capitalize;
use crate::model::{Difficulty, Feedback, GameActionEvent};
use crate::ui::Presentation;

/// Line-oriented presentation. Write failures are kept and surfaced through
/// [`TerminalPresentation::take_error`] since the trait methods cannot fail.
pub struct TerminalPresentation<W: Write> {
    out: W,
    selected: Difficulty,
    input: String,
    placeholder: String,
    attempts: String,
    best: String,
    input_enabled: bool,
    hint_enabled: bool,
    error: Option<io::Error>,
}

impl<W: Write> TerminalPresentation<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            selected: Difficulty::default(),
            input: String::new(),
            placeholder: String::new(),
            attempts: String::new(),
            best: String::new(),
            input_enabled: false,
            hint_enabled: false,
            error: None,
        }
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", line) {
            self.error = Some(e);
        }
    }

    pub fn type_guess(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn write_help(&mut self) {
        let tiers = Difficulty::all().iter().map(|d| d.name()).join("/");
        self.write_line("Commands:");
        self.write_line("  <number>        submit a guess");
        self.write_line("  hint, h         reveal a hint (once per round)");
        self.write_line("  restart, r      start a new round");
        self.write_line(&format!("  {:<15} switch difficulty", tiers));
        self.write_line("  help, ?         show this help");
        self.write_line("  quit, q         leave the game");
    }

    pub fn write_status(&mut self) {
        let hint = if self.hint_enabled { "hint available" } else { "no hint" };
        let status = format!("{} | {} | {}", self.attempts, self.best, hint);
        self.write_line(&status);
    }

    pub fn write_prompt(&mut self) {
        if self.error.is_some() {
            return;
        }
        let prompt = if self.input_enabled {
            format!("{}> ", self.placeholder)
        } else {
            "Round over (restart/quit)> ".to_string()
        };
        let result = write!(self.out, "{}", prompt).and_then(|_| self.out.flush());
        if let Err(e) = result {
            self.error = Some(e);
        }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Presentation for TerminalPresentation<W> {
    fn set_range_text(&mut self, text: &str) {
        self.write_line(&format!("Guess a number between {}.", text));
    }

    fn set_input_placeholder(&mut self, text: &str) {
        self.placeholder = text.to_string();
    }

    fn set_message(&mut self, feedback: &Feedback) {
        self.write_line(&format!("[{}] {}", feedback.kind, feedback.text));
    }

    fn clear_message(&mut self) {}

    fn set_attempts(&mut self, text: &str) {
        self.attempts = text.to_string();
    }

    fn set_best_score(&mut self, text: &str) {
        self.best = text.to_string();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_hint_enabled(&mut self, enabled: bool) {
        self.hint_enabled = enabled;
    }

    fn read_guess_input(&self) -> String {
        self.input.clone()
    }

    fn clear_guess_input(&mut self) {
        self.input.clear();
    }

    fn focus_input(&mut self) {}

    fn read_selected_difficulty(&self) -> Option<String> {
        Some(self.selected.name().to_string())
    }

    fn show_difficulty(&mut self, difficulty: Difficulty) {
        self.selected = difficulty;
        self.write_line(&format!("Difficulty: {}", difficulty.name().capitalize()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    Guess(String),
    Hint,
    Restart,
    Difficulty(String),
    Help,
    Quit,
}

impl TerminalCommand {
    pub fn parse(line: &str) -> TerminalCommand {
        let trimmed = line.trim();
        let lowered = trimmed.to_ascii_lowercase();
        match lowered.as_str() {
            "hint" | "h" => TerminalCommand::Hint,
            "restart" | "r" => TerminalCommand::Restart,
            "help" | "?" => TerminalCommand::Help,
            "quit" | "q" | "exit" => TerminalCommand::Quit,
            "easy" | "medium" | "hard" => TerminalCommand::Difficulty(lowered),
            _ => match lowered.strip_prefix("difficulty ") {
                Some(name) => TerminalCommand::Difficulty(name.trim().to_string()),
                None => TerminalCommand::Guess(trimmed.to_string()),
            },
        }
    }
}

pub type TerminalSession<W, S> = GameSession<TerminalPresentation<W>, S>;

/// Reads commands until `quit` or end of input, routing them to the session as
/// [`GameActionEvent`]s.
pub fn run<R, W, S>(input: R, session: Rc<RefCell<TerminalSession<W, S>>>) -> io::Result<()>
where
    R: BufRead,
    W: Write + 'static,
    S: ScoreStore + 'static,
{
    let (emitter, observer) = Channel::<GameActionEvent>::new();
    let subscription = GameSession::wire_subscription(session.clone(), &observer);

    prompt(&session)?;
    for line in input.lines() {
        let line = line?;
        let command = TerminalCommand::parse(&line);
        trace!(target: "terminal", "Command {:?}", command);
        if command == TerminalCommand::Quit {
            break;
        }
        dispatch(&session, &emitter, command);
        prompt(&session)?;
    }

    subscription.unsubscribe();
    let mut session = session.borrow_mut();
    session.presentation_mut().write_line("Bye!");
    match session.presentation_mut().take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn dispatch<W: Write, S: ScoreStore>(
    session: &Rc<RefCell<TerminalSession<W, S>>>,
    emitter: &EventEmitter<GameActionEvent>,
    command: TerminalCommand,
) {
    match command {
        TerminalCommand::Guess(text) => {
            session.borrow_mut().presentation_mut().type_guess(&text);
            emitter.emit(&GameActionEvent::SubmitGuess);
        }
        TerminalCommand::Hint => emitter.emit(&GameActionEvent::RequestHint),
        TerminalCommand::Restart => emitter.emit(&GameActionEvent::Restart),
        TerminalCommand::Difficulty(name) => {
            emitter.emit_owned(GameActionEvent::ChangeDifficulty(name))
        }
        TerminalCommand::Help => session.borrow_mut().presentation_mut().write_help(),
        TerminalCommand::Quit => {}
    }
}

fn prompt<W: Write, S: ScoreStore>(session: &Rc<RefCell<TerminalSession<W, S>>>) -> io::Result<()> {
    let mut session = session.borrow_mut();
    let presentation = session.presentation_mut();
    presentation.write_status();
    presentation.write_prompt();
    match presentation.take_error() {
        Some(e) => {
            error!(target: "terminal", "Terminal write failed: {}", e);
            Err(e)
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::game::{MemoryScoreStore, Settings};
    use crate::model::RoundState;

    fn session_with_answer(
        difficulty: Difficulty,
        answer: i64,
    ) -> Rc<RefCell<TerminalSession<Vec<u8>, MemoryScoreStore>>> {
        let settings = Settings {
            seed: Some(11),
            ..Settings::default()
        };
        let mut session = GameSession::new(
            TerminalPresentation::new(Vec::new()),
            MemoryScoreStore::new(),
            &settings,
        );
        session.start_with_answer(difficulty, answer);
        Rc::new(RefCell::new(session))
    }

    fn output(session: &Rc<RefCell<TerminalSession<Vec<u8>, MemoryScoreStore>>>) -> String {
        String::from_utf8(session.borrow().presentation().writer().clone()).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(TerminalCommand::parse(" 42 \n"), TerminalCommand::Guess("42".into()));
        assert_eq!(TerminalCommand::parse("abc"), TerminalCommand::Guess("abc".into()));
        assert_eq!(TerminalCommand::parse(""), TerminalCommand::Guess("".into()));
        assert_eq!(TerminalCommand::parse("H"), TerminalCommand::Hint);
        assert_eq!(TerminalCommand::parse("restart"), TerminalCommand::Restart);
        assert_eq!(TerminalCommand::parse("Hard"), TerminalCommand::Difficulty("hard".into()));
        assert_eq!(
            TerminalCommand::parse("difficulty  easy"),
            TerminalCommand::Difficulty("easy".into())
        );
        assert_eq!(TerminalCommand::parse("?"), TerminalCommand::Help);
        assert_eq!(TerminalCommand::parse("q"), TerminalCommand::Quit);
    }

    #[test]
    fn test_play_a_round() {
        let session = session_with_answer(Difficulty::Medium, 42);
        let input = Cursor::new("abc\n150\n10\nhint\nhint\n42\n43\nquit\n");

        run(input, session.clone()).unwrap();

        let text = output(&session);
        assert!(text.contains("[error] Please enter a valid number between 1 and 100"));
        assert!(text.contains("[error] Please enter a number between 1 and 100"));
        assert!(text.contains("[hint] Too low — try a higher number."));
        assert!(text.contains("[hint] The number is even."));
        assert!(text.contains("[info] You already used the hint for this round."));
        assert!(text.contains("[success] 🎉 Congratulations! 42 is correct! You took 2 attempts."));
        assert!(text.contains("[info] This round is over. Restart to play again."));
        assert!(text.contains("Round over (restart/quit)> "));
        assert!(text.ends_with("Bye!\n"));

        let session = session.borrow();
        assert_eq!(session.round().state, RoundState::Won);
        assert_eq!(session.round().attempts, 2);
        assert_eq!(session.best_score(), Some(2));
    }

    #[test]
    fn test_difficulty_and_restart_commands() {
        let session = session_with_answer(Difficulty::Medium, 42);
        run(Cursor::new("hard\nrestart\n"), session.clone()).unwrap();

        let text = output(&session);
        assert!(text.contains("Difficulty: Hard"));
        assert!(text.contains("Guess a number between 1 and 500."));
        assert!(text.contains("Enter a number (1-500)> "));
        assert_eq!(session.borrow().round().difficulty, Difficulty::Hard);
        assert_eq!(session.borrow().round().attempts, 0);
    }

    #[test]
    fn test_help_lists_tiers() {
        let session = session_with_answer(Difficulty::Easy, 5);
        run(Cursor::new("help\n"), session.clone()).unwrap();
        assert!(output(&session).contains("easy/medium/hard"));
    }
}
