use std::time::Duration;

use eframe::egui::{self, Color32, RichText};

use crate::error::Severity;
use crate::pipeline::Notification;

/// How long a toast stays on screen, in seconds.
pub const TOAST_SECONDS: f64 = 4.0;

/// A notification plus the time it first appeared.
#[derive(Debug, Clone)]
pub struct Toast {
    notification: Notification,
    shown_at: Option<f64>,
}

impl Toast {
    pub fn new(notification: Notification) -> Self {
        Toast {
            notification,
            shown_at: None,
        }
    }

    pub fn severity(&self) -> Severity {
        self.notification.severity
    }

    pub fn message(&self) -> &str {
        &self.notification.message
    }

    fn expired(&self, now: f64) -> bool {
        self.shown_at.is_some_and(|t| now - t >= TOAST_SECONDS)
    }
}

fn fill_for(severity: Severity) -> Color32 {
    match severity {
        Severity::Error => Color32::from_rgb(239, 68, 68),
        Severity::Warning => Color32::from_rgb(234, 179, 8),
        Severity::Success => Color32::from_rgb(34, 197, 94),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw live toasts stacked in the top-right corner and drop expired ones.
pub fn show_toasts(ctx: &egui::Context, toasts: &mut Vec<Toast>) {
    let now = ctx.input(|i| i.time);
    toasts.retain(|t| !t.expired(now));
    if toasts.is_empty() {
        return;
    }

    for toast in toasts.iter_mut() {
        toast.shown_at.get_or_insert(now);
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 16.0])
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            for toast in toasts.iter() {
                egui::Frame::new()
                    .fill(fill_for(toast.severity()))
                    .corner_radius(6.0)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(toast.message()).color(Color32::WHITE));
                    });
                ui.add_space(6.0);
            }
        });

    // Keep frames coming so toasts disappear on time.
    ctx.request_repaint_after(Duration::from_millis(250));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_expires_after_it_was_shown() {
        let mut toast = Toast::new(Notification::new("hi", Severity::Success));
        assert!(!toast.expired(1_000.0));
        toast.shown_at = Some(10.0);
        assert!(!toast.expired(13.9));
        assert!(toast.expired(14.0));
    }
}
