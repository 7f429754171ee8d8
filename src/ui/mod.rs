pub mod controls;
mod presentation;
pub mod terminal;
#[cfg(feature = "gtk-ui")]
pub mod window;

pub use presentation::Presentation;
pub use terminal::{TerminalCommand, TerminalPresentation};
