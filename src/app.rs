use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, table, toast};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SheetSiftApp {
    pub state: AppState,
}

impl SheetSiftApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SheetSiftApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Finished background requests ----
        self.state.poll();
        if self.state.take_pending_download() {
            panels::download_current(&mut self.state, true);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: filter form ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::filter_form(ui, &mut self.state);
        });

        // ---- Overlays ----
        table::results_window(ctx, &mut self.state);
        toast::show_toasts(ctx, &mut self.state.toasts);
    }
}
