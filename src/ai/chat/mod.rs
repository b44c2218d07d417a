mod core;
mod models;

pub use self::core::{ChatBuilder, ChatSession};
pub use models::{DEFAULT_SYSTEM_MESSAGE, Transcript};
