use std::collections::BTreeMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Local};
use eframe::egui;

use crate::data::model::{FilterRequest, FilteredTable};
use crate::error::{FilterError, Severity};
use crate::pipeline::{Notification, OutputMode, Pipeline};
use crate::ui::toast::Toast;

// ---------------------------------------------------------------------------
// Result slot
// ---------------------------------------------------------------------------

/// The last successful result, tagged with the request that produced it.
#[derive(Debug, Clone)]
pub struct StoredResult {
    pub seq: u64,
    pub stored_at: DateTime<Local>,
    pub result: FilteredTable,
}

/// Single-writer cell holding the most recent successful filter.
///
/// Results are ordered by request sequence number, so a slow older request
/// can never overwrite a newer one that already landed.
#[derive(Debug, Default)]
pub struct ResultSlot {
    current: Option<StoredResult>,
}

impl ResultSlot {
    /// Whether a result for `seq` has been superseded.
    pub fn is_stale(&self, seq: u64) -> bool {
        matches!(&self.current, Some(stored) if stored.seq > seq)
    }

    /// Store a result unless it is stale. Returns whether it was stored.
    pub fn store(&mut self, seq: u64, result: FilteredTable) -> bool {
        if self.is_stale(seq) {
            return false;
        }
        self.current = Some(StoredResult {
            seq,
            stored_at: Local::now(),
            result,
        });
        true
    }

    pub fn current(&self) -> Option<&StoredResult> {
        self.current.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Form input
// ---------------------------------------------------------------------------

/// Raw text of the three form fields.
#[derive(Debug, Clone)]
pub struct FormInput {
    pub sheet_url: String,
    pub column: String,
    pub term: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            sheet_url: String::new(),
            column: "1".to_string(),
            term: String::new(),
        }
    }
}

/// What a worker thread sends back.
struct Completed {
    seq: u64,
    mode: OutputMode,
    outcome: Result<FilteredTable, FilterError>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub form: FormInput,

    /// Last successful result; what the results window shows and exports.
    pub results: ResultSlot,

    /// Whether the results window is open.
    pub show_results: bool,

    /// Notifications waiting to be shown or still on screen.
    pub toasts: Vec<Toast>,

    /// Suggested file name for downloads.
    pub download_name: String,

    /// Set when a finished Download request needs its save dialog.
    pending_download: bool,

    in_flight: BTreeMap<u64, OutputMode>,
    next_seq: u64,
    /// Sequence number of the newest request that finished, whatever its outcome.
    latest_landed: u64,
    pipeline: Arc<Pipeline>,
    tx: Sender<Completed>,
    rx: Receiver<Completed>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, download_name: String) -> Self {
        let (tx, rx) = channel();
        Self {
            form: FormInput::default(),
            results: ResultSlot::default(),
            show_results: false,
            toasts: Vec::new(),
            download_name,
            pending_download: false,
            in_flight: BTreeMap::new(),
            next_seq: 0,
            latest_landed: 0,
            pipeline: Arc::new(pipeline),
            tx,
            rx,
        }
    }

    /// Queue a notification.
    pub fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Error => log::error!("{}", notification.message),
            Severity::Warning => log::warn!("{}", notification.message),
            Severity::Success => log::info!("{}", notification.message),
        }
        self.toasts.push(Toast::new(notification));
    }

    /// Whether a request for `mode` is still running.
    pub fn is_busy(&self, mode: OutputMode) -> bool {
        self.in_flight.values().any(|m| *m == mode)
    }

    /// Validate the form and start a background filter run.
    ///
    /// Missing input is reported immediately and nothing is fetched.
    pub fn submit(&mut self, mode: OutputMode, ctx: &egui::Context) {
        let request = match FilterRequest::from_form(
            &self.form.sheet_url,
            &self.form.column,
            &self.form.term,
        ) {
            Ok(request) => request,
            Err(e) => {
                self.notify(Notification::from_error(&e));
                return;
            }
        };

        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight.insert(seq, mode);

        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.tx.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let outcome = pipeline.run(&request);
            let _ = tx.send(Completed { seq, mode, outcome });
            ctx.request_repaint();
        });
    }

    /// Apply every finished request. Called once per frame.
    pub fn poll(&mut self) {
        while let Ok(done) = self.rx.try_recv() {
            self.complete(done.seq, done.mode, done.outcome);
        }
    }

    fn complete(&mut self, seq: u64, mode: OutputMode, outcome: Result<FilteredTable, FilterError>) {
        self.in_flight.remove(&seq);

        if seq < self.latest_landed || self.results.is_stale(seq) {
            log::debug!("Discarding result of request {seq}; a newer one already landed");
            return;
        }
        self.latest_landed = seq;

        match outcome {
            Ok(result) => {
                let delivered = Notification::delivered(mode, &result);
                self.results.store(seq, result);
                match mode {
                    OutputMode::Display => {
                        self.show_results = true;
                        self.notify(delivered);
                    }
                    OutputMode::Download => self.pending_download = true,
                }
            }
            Err(e) => self.notify(Notification::from_error(&e)),
        }
    }

    /// Take the pending-download flag, leaving it cleared.
    pub fn take_pending_download(&mut self) -> bool {
        std::mem::take(&mut self.pending_download)
    }
}
