use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{cell_at, Table, UNKNOWN_HEADER};
use crate::state::AppState;
use crate::ui::links::{cell_spans, Span};
use crate::ui::panels;

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Results window
// ---------------------------------------------------------------------------

/// Show the last result in a closable window (Escape closes it too).
pub fn results_window(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_results {
        return;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.show_results = false;
        return;
    }

    let Some(stored) = state.results.current() else {
        state.show_results = false;
        return;
    };
    let result = stored.result.clone();

    let mut open = true;
    let mut download = false;

    egui::Window::new("Filtered Results")
        .open(&mut open)
        .default_size([900.0, 560.0])
        .resizable(true)
        .collapsible(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label(result.summary());
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new(format!("{} rows", result.match_count())).strong());
                if ui.button("Download CSV").clicked() {
                    download = true;
                }
            });
            ui.separator();
            data_table(ui, &result.table);
        });

    if download {
        panels::download_current(state, false);
    }
    if !open {
        state.show_results = false;
    }
}

fn data_table(ui: &mut Ui, table: &Table) {
    if table.is_empty() {
        ui.label("No data to display");
        return;
    }
    let headers = table.header();
    let rows = table.data_rows();

    egui::ScrollArea::horizontal()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(80.0).clip(true), headers.len())
                .header(ROW_HEIGHT, |mut header| {
                    for name in headers {
                        let name = if name.trim().is_empty() {
                            UNKNOWN_HEADER
                        } else {
                            name.as_str()
                        };
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row_ui| {
                        let row = &rows[row_ui.index()];
                        for (index, header) in headers.iter().enumerate() {
                            let cell = cell_at(row, index);
                            row_ui.col(|ui: &mut Ui| {
                                ui.spacing_mut().item_spacing.x = 0.0;
                                for span in cell_spans(cell, header, headers, row) {
                                    let response = match span {
                                        Span::Text(text) => ui.label(text),
                                        Span::Link(link) => ui.hyperlink_to(link.text, link.url),
                                    };
                                    response.on_hover_text(cell);
                                }
                            });
                        }
                    });
                });
        });
}
