//! Core of the image processor: a linear editing pipeline with
//! single-step undo and an append-only action log.
//!
//! The desktop front end in `main.rs` drives a `Session`; nothing here
//! depends on presentation state or reads configuration files.

pub mod error;
pub mod imaging;
pub mod logging;
pub mod state;

pub use error::{SessionError, SessionResult};
pub use imaging::ImageKind;
pub use state::action_log::{
    ActionLog, ActionLogError, ActionRecord, JsonFileLog, MemoryLog, Operation,
};
pub use state::data::{Image, ImageInfo, PixelMode};
pub use state::session::Session;
