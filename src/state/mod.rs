/// State management module
///
/// This module handles the editing session state:
/// - Image values and metadata snapshots (data.rs)
/// - The load/transform/undo/reset/save lifecycle (session.rs)
/// - The append-only audit trail of successful operations (action_log.rs)

pub mod action_log;
pub mod data;
pub mod session;
