use std::cell::RefCell;
use std::rc::Rc;

use gtk4::gdk::Display;
use gtk4::{
    prelude::*, Align, Application, ApplicationWindow, Button, CssProvider, DropDown, Entry,
    Label, Orientation, STYLE_PROVIDER_PRIORITY_APPLICATION,
};

use crate::events::{Channel, EventEmitter};
use crate::game::{FileScoreStore, GameSession, Settings};
use crate::model::{Difficulty, Feedback, GameActionEvent};
use crate::ui::controls::{self, Control};
use crate::ui::Presentation;

const APP_ID: &str = "org.numguess.NumberGuessing";

const CSS: &str = "
.message { font-weight: bold; min-height: 2em; }
.message.success { color: #2e7d32; }
.message.error { color: #c62828; }
.message.hint { color: #1565c0; }
.message.info { color: #616161; }
.range { font-size: 1.2em; }
";

pub struct GtkPresentation {
    difficulty_dropdown: DropDown,
    range_label: Label,
    guess_entry: Entry,
    submit_button: Button,
    hint_button: Button,
    message_label: Label,
    attempts_label: Label,
    best_label: Label,
}

impl Presentation for GtkPresentation {
    fn set_range_text(&mut self, text: &str) {
        self.range_label
            .set_text(&format!("Guess a number between {}", text));
    }

    fn set_input_placeholder(&mut self, text: &str) {
        self.guess_entry.set_placeholder_text(Some(text));
    }

    fn set_message(&mut self, feedback: &Feedback) {
        self.message_label.set_text(&feedback.text);
        self.message_label
            .set_css_classes(&["message", feedback.kind.css_class()]);
    }

    fn clear_message(&mut self) {
        self.message_label.set_text("");
        self.message_label.set_css_classes(&["message"]);
    }

    fn set_attempts(&mut self, text: &str) {
        self.attempts_label.set_text(text);
    }

    fn set_best_score(&mut self, text: &str) {
        self.best_label.set_text(text);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.submit_button.set_sensitive(enabled);
    }

    fn set_hint_enabled(&mut self, enabled: bool) {
        self.hint_button.set_sensitive(enabled);
    }

    fn read_guess_input(&self) -> String {
        self.guess_entry.text().to_string()
    }

    fn clear_guess_input(&mut self) {
        self.guess_entry.set_text("");
    }

    fn focus_input(&mut self) {
        self.guess_entry.grab_focus();
    }

    fn read_selected_difficulty(&self) -> Option<String> {
        let index = self.difficulty_dropdown.selected() as usize;
        Some(Difficulty::from_index(index).name().to_string())
    }

    fn show_difficulty(&mut self, difficulty: Difficulty) {
        let index = difficulty.index() as u32;
        // Only touch the selector when it disagrees, setting it re-emits a change.
        if self.difficulty_dropdown.selected() != index {
            self.difficulty_dropdown.set_selected(index);
        }
    }
}

fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_string(CSS);
    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        log::warn!(target: "window", "No display, skipping stylesheet");
    }
}

fn button(label: &str) -> Button {
    Button::builder()
        .label(label)
        .margin_start(5)
        .margin_end(5)
        .build()
}

pub fn build_ui(app: &Application, settings: &Settings) {
    load_css();
    let (game_action_emitter, game_action_observer) = Channel::<GameActionEvent>::new();

    let names = controls::difficulty_labels();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let difficulty_dropdown = DropDown::from_strings(&names);
    difficulty_dropdown.set_selected(settings.difficulty.index() as u32);

    let range_label = Label::builder().css_classes(["range"]).build();
    let guess_entry = Entry::builder().hexpand(true).build();
    let submit_button = button("Submit");
    let hint_button = button("Hint");
    let restart_button = button("Restart");
    let message_label = Label::builder()
        .css_classes(["message"])
        .wrap(true)
        .build();
    let attempts_label = Label::new(None);
    let best_label = Label::new(None);

    let presentation = GtkPresentation {
        difficulty_dropdown: difficulty_dropdown.clone(),
        range_label: range_label.clone(),
        guess_entry: guess_entry.clone(),
        submit_button: submit_button.clone(),
        hint_button: hint_button.clone(),
        message_label: message_label.clone(),
        attempts_label: attempts_label.clone(),
        best_label: best_label.clone(),
    };
    let store = FileScoreStore::open(settings.scores_path());
    let session = Rc::new(RefCell::new(GameSession::new(presentation, store, settings)));
    // Stays subscribed for the lifetime of the application.
    let _subscription = GameSession::wire_subscription(session.clone(), &game_action_observer);

    connect_controls(
        game_action_emitter,
        &difficulty_dropdown,
        &guess_entry,
        &submit_button,
        &hint_button,
        &restart_button,
    );

    let input_row = gtk4::Box::builder()
        .orientation(Orientation::Horizontal)
        .spacing(5)
        .build();
    input_row.append(&guess_entry);
    input_row.append(&submit_button);

    let button_row = gtk4::Box::builder()
        .orientation(Orientation::Horizontal)
        .halign(Align::Center)
        .spacing(10)
        .build();
    button_row.append(&hint_button);
    button_row.append(&restart_button);

    let info_row = gtk4::Box::builder()
        .orientation(Orientation::Horizontal)
        .halign(Align::Center)
        .spacing(20)
        .build();
    info_row.append(&attempts_label);
    info_row.append(&best_label);

    let content = gtk4::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(12)
        .margin_top(20)
        .margin_bottom(20)
        .margin_start(20)
        .margin_end(20)
        .build();
    content.append(&difficulty_dropdown);
    content.append(&range_label);
    content.append(&input_row);
    content.append(&button_row);
    content.append(&message_label);
    content.append(&info_row);

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Number Guessing Game")
        .default_width(420)
        .child(&content)
        .build();

    window.present();
    guess_entry.grab_focus();
}

fn connect_controls(
    game_action_emitter: EventEmitter<GameActionEvent>,
    difficulty_dropdown: &DropDown,
    guess_entry: &Entry,
    submit_button: &Button,
    hint_button: &Button,
    restart_button: &Button,
) {
    difficulty_dropdown.connect_selected_notify({
        let emitter = game_action_emitter.clone();
        move |dropdown| {
            log::trace!(target: "window", "Difficulty selector moved to {}", dropdown.selected());
            emitter.emit_owned(controls::difficulty_selected(dropdown.selected()));
        }
    });

    guess_entry.connect_activate({
        let emitter = game_action_emitter.clone();
        move |_| emitter.emit_owned(Control::GuessEntryActivated.action())
    });

    for (button, control) in [
        (submit_button, Control::SubmitButton),
        (hint_button, Control::HintButton),
        (restart_button, Control::RestartButton),
    ] {
        let emitter = game_action_emitter.clone();
        button.connect_clicked(move |_| emitter.emit_owned(control.action()));
    }
}

pub fn run_app(settings: Settings) {
    let app = Application::builder().application_id(APP_ID).build();
    app.connect_activate(move |app| build_ui(app, &settings));
    app.run();
}
