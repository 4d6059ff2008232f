use eframe::egui::{self, RichText, Ui};

use crate::data::export::write_export;
use crate::error::Severity;
use crate::pipeline::{Notification, OutputMode};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – filter form
// ---------------------------------------------------------------------------

/// Render the link / column / term form and the two action buttons.
pub fn filter_form(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter a Google Sheet");
    ui.label("The sheet must be shared with \"Anyone with the link\".");
    ui.add_space(8.0);

    egui::Grid::new("filter_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Sheet link");
            ui.add(
                egui::TextEdit::singleline(&mut state.form.sheet_url)
                    .hint_text("https://docs.google.com/spreadsheets/d/…")
                    .desired_width(480.0),
            );
            ui.end_row();

            ui.label("Column");
            ui.add(
                egui::TextEdit::singleline(&mut state.form.column)
                    .hint_text("1")
                    .desired_width(60.0),
            );
            ui.end_row();

            ui.label("Search term");
            ui.add(
                egui::TextEdit::singleline(&mut state.form.term)
                    .hint_text("case-insensitive")
                    .desired_width(240.0),
            );
            ui.end_row();
        });

    ui.add_space(12.0);

    ui.horizontal(|ui: &mut Ui| {
        action_button(ui, state, OutputMode::Display, "Filter & Display", "Loading...");
        action_button(ui, state, OutputMode::Download, "Filter & Download", "Processing...");
    });
}

fn action_button(ui: &mut Ui, state: &mut AppState, mode: OutputMode, idle: &str, busy: &str) {
    let is_busy = state.is_busy(mode);
    let label = if is_busy { busy } else { idle };
    if ui
        .add_enabled(!is_busy, egui::Button::new(RichText::new(label).strong()))
        .clicked()
    {
        let ctx = ui.ctx().clone();
        state.submit(mode, &ctx);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let has_result = state.results.current().is_some();
            if ui
                .add_enabled(has_result, egui::Button::new("Save last result…"))
                .clicked()
            {
                download_current(state, false);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_result, egui::Button::new("Show last result"))
                .clicked()
            {
                state.show_results = true;
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(stored) = state.results.current() {
            ui.label(format!(
                "Last result: {} rows for \"{}\" at {}",
                stored.result.match_count(),
                stored.result.term,
                stored.stored_at.format("%H:%M:%S")
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// Save dialog
// ---------------------------------------------------------------------------

/// Save the current result as CSV through a native dialog.
///
/// `after_filter` picks the message wording: a fresh "Filter & Download"
/// versus a later download from the results window.
pub fn download_current(state: &mut AppState, after_filter: bool) {
    let Some(stored) = state.results.current() else {
        state.notify(Notification::new(
            "No data available to download",
            Severity::Error,
        ));
        return;
    };
    let result = stored.result.clone();

    let file = rfd::FileDialog::new()
        .set_title("Save filtered rows")
        .set_file_name(&state.download_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        state.notify(Notification::new("Download cancelled.", Severity::Warning));
        return;
    };

    let notification = match write_export(&path, &result.table) {
        Ok(()) if after_filter => Notification::delivered(OutputMode::Download, &result),
        Ok(()) => Notification::new(
            format!("Downloaded {} rows successfully!", result.match_count()),
            Severity::Success,
        ),
        Err(e) => Notification::new(format!("Could not save the file: {e:#}"), Severity::Error),
    };
    state.notify(notification);
}
