pub mod clipboard;
pub mod messages;
pub mod session;
pub mod state;
pub mod timer;

pub use clipboard::{Clipboard, ClipboardError};
pub use messages::user_message;
pub use session::{SessionOptions, SharedSettings, TranslationSession};
pub use state::SessionState;
pub use timer::{Timer, TokioTimer};
