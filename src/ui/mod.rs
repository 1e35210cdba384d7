/// User interface module
///
/// This module handles the presentation layer around the editing session:
/// - Per-user directories (paths.rs)
/// - Persisted control values (settings.rs)
/// - Preview image handles (preview.rs)
/// - Image information panel text (info.rs)

pub mod info;
pub mod paths;
pub mod preview;
pub mod settings;
