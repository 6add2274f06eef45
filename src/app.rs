use eframe::egui;

use crate::state::ViewerState;
use crate::ui::panels;
use crate::ui::plot::SkyFigure;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SkyViewerApp {
    pub state: ViewerState,
    texture: Option<egui::TextureHandle>,
}

impl SkyViewerApp {
    pub fn new(figure: SkyFigure) -> Self {
        Self {
            state: ViewerState::new(figure),
            texture: None,
        }
    }
}

impl eframe::App for SkyViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        let figure = &self.state.figure;
        let texture = self.texture.get_or_insert_with(|| {
            let image = egui::ColorImage::from_rgb(
                [figure.width as usize, figure.height as usize],
                &figure.rgb,
            );
            ctx.load_texture("sky_figure", image, egui::TextureOptions::LINEAR)
        });

        // ---- Central panel: the figure, scaled to fit ----
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let available = ui.available_size();
                let size = texture.size_vec2();
                let scale = (available.x / size.x).min(available.y / size.y);
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(egui::load::SizedTexture::new(
                        texture.id(),
                        size * scale,
                    )));
                });
            });
    }
}

/// Open a window showing `figure`; returns once the window is closed.
pub fn show(figure: SkyFigure) -> eframe::Result {
    let title = format!("Gamma Sky – {}", figure.title);
    let inner_size = [figure.width as f32, figure.height as f32 + 30.0];

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(inner_size)
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(SkyViewerApp::new(figure)))),
    )
}
