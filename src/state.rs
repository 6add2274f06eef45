use std::path::Path;

use crate::ui::plot::SkyFigure;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Line shown in the top bar of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// The viewer state, independent of rendering.
pub struct ViewerState {
    /// Figure being shown.
    pub figure: SkyFigure,

    /// Outcome of the last user action.
    pub status_message: Option<StatusMessage>,
}

impl ViewerState {
    pub fn new(figure: SkyFigure) -> Self {
        Self {
            figure,
            status_message: None,
        }
    }

    /// Save the figure and report the outcome in the status line.
    pub fn save_to(&mut self, path: &Path) {
        match self.figure.save(path) {
            Ok(()) => {
                self.status_message = Some(StatusMessage::Info(format!(
                    "Saved to {}",
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Failed to save {}: {e}", path.display());
                self.status_message = Some(StatusMessage::Error(format!("Error: {e}")));
            }
        }
    }
}
