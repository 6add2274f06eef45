use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{StatusMessage, ViewerState};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Save as…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(RichText::new(&state.figure.title).strong());

        match &state.status_message {
            Some(StatusMessage::Info(msg)) => {
                ui.separator();
                ui.label(msg.as_str());
            }
            Some(StatusMessage::Error(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Save sky map")
        .set_file_name("gamma_sky.png")
        .add_filter("PNG", &["png"])
        .add_filter("JPEG", &["jpg", "jpeg"])
        .add_filter("Bitmap", &["bmp"])
        .save_file();

    if let Some(path) = file {
        state.save_to(&path);
    }
}
