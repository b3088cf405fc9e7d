use crate::api::{Prediction, PredictionClient};
use crate::sketch::encode::encode_png_base64;
use crate::sketch::SketchSurface;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long the feedback success message stays visible.
pub const SUCCESS_MESSAGE_TTL: Duration = Duration::from_secs(10);

pub const FEEDBACK_SUCCESS_MESSAGE: &str = "Feedback submitted successfully";

/// Lifecycle of a single prediction cycle. `Displayed` and `Failed` are
/// terminal until the next predict call; clearing the canvas or starting a
/// new stroke returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionPhase {
    Idle,
    Predicting,
    Displayed,
    Failed,
}

/// Legal phase transitions. Completions may land after a reset to `Idle`
/// because in-flight calls are never cancelled; those stale transitions are
/// allowed and the latest response wins.
pub fn can_transition(from: PredictionPhase, to: PredictionPhase) -> bool {
    matches!(
        (from, to),
        (PredictionPhase::Idle, PredictionPhase::Predicting)
            | (PredictionPhase::Predicting, PredictionPhase::Displayed)
            | (PredictionPhase::Predicting, PredictionPhase::Failed)
            | (PredictionPhase::Displayed, PredictionPhase::Predicting)
            | (PredictionPhase::Failed, PredictionPhase::Predicting)
            | (PredictionPhase::Idle, PredictionPhase::Displayed)
            | (PredictionPhase::Idle, PredictionPhase::Failed)
            | (_, PredictionPhase::Idle)
    ) || from == to
}

/// Outcome messages sent back from the request worker threads.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PredictFinished(Result<Prediction, String>),
    FeedbackFinished(Result<(), String>),
}

/// Build the base64 PNG payload for a predict call. An all-zero raster is
/// rejected here, before any network call is attempted; the message is meant
/// for inline display next to the canvas.
pub fn prepare_predict_payload(surface: &SketchSurface) -> Result<String, String> {
    if surface.is_empty() {
        return Err("Draw a digit (0-9) before predicting".into());
    }
    encode_png_base64(surface.raster()).map_err(|err| {
        tracing::error!("failed to encode canvas: {err:#}");
        "Could not encode the canvas image".to_string()
    })
}

/// Validate the human-supplied true label. Only a single digit 0-9 passes.
pub fn parse_true_label(input: &str) -> Result<u8, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Value is required!".into());
    }
    if !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return Err("Value is not a number!".into());
    }
    match trimmed.parse::<u8>() {
        Ok(label) if label <= 9 => Ok(label),
        _ => Err("Value must be a single digit (0-9)!".into()),
    }
}

/// Owner of all cross-view mutable state for the lifetime of the window:
/// the last submitted image, the last prediction, loading flags, and the
/// transient messages. Constructed once on startup and handed to the view
/// layer by reference.
///
/// Network calls run on short-lived worker threads; their outcomes arrive on
/// an mpsc channel that the UI drains once per frame via [`Session::pump`].
pub struct Session {
    client: Arc<PredictionClient>,
    tx: Sender<SessionEvent>,
    rx: Receiver<SessionEvent>,
    phase: PredictionPhase,
    result: Option<Prediction>,
    predicting: bool,
    submitting_feedback: bool,
    error: Option<String>,
    success: Option<(String, Instant)>,
    last_image: Option<String>,
}

impl Session {
    pub fn new(client: PredictionClient) -> Self {
        let (tx, rx) = channel();
        Self {
            client: Arc::new(client),
            tx,
            rx,
            phase: PredictionPhase::Idle,
            result: None,
            predicting: false,
            submitting_feedback: false,
            error: None,
            success: None,
            last_image: None,
        }
    }

    pub fn phase(&self) -> PredictionPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&Prediction> {
        self.result.as_ref()
    }

    pub fn is_predicting(&self) -> bool {
        self.predicting
    }

    pub fn is_submitting_feedback(&self) -> bool {
        self.submitting_feedback
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success.as_ref().map(|(message, _)| message.as_str())
    }

    pub fn has_submitted_image(&self) -> bool {
        self.last_image.is_some()
    }

    /// Sender feeding the session's event channel, as handed to the request
    /// worker threads.
    pub fn event_sender(&self) -> Sender<SessionEvent> {
        self.tx.clone()
    }

    /// Kick off a predict call for the given base64 PNG payload. The payload
    /// is remembered so later feedback can reference the same image.
    pub fn predict(&mut self, image_b64: String) {
        self.last_image = Some(image_b64.clone());
        self.predicting = true;
        self.error = None;
        self.success = None;
        self.set_phase(PredictionPhase::Predicting);

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let outcome = client.predict(&image_b64).map_err(|err| err.to_string());
            let _ = tx.send(SessionEvent::PredictFinished(outcome));
        });
    }

    /// Send the true label for the most recently submitted image. Fails
    /// locally, without any network call, when no image has been submitted
    /// in this session.
    pub fn submit_feedback(&mut self, label: u8) -> Result<(), String> {
        let Some(image) = self.last_image.clone() else {
            return Err("Predict a digit before submitting feedback".into());
        };
        self.submitting_feedback = true;
        self.error = None;
        self.success = None;

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let outcome = client
                .record_feedback(&image, label)
                .map_err(|err| err.to_string());
            let _ = tx.send(SessionEvent::FeedbackFinished(outcome));
        });
        Ok(())
    }

    /// Drain worker outcomes and apply them. Loading flags drop on every
    /// exit path; when responses overlap, whichever arrives last wins.
    /// `on_event` sees each event after it has been applied.
    pub fn pump(&mut self, mut on_event: impl FnMut(&SessionEvent)) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.apply(&event);
                    on_event(&event);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::PredictFinished(Ok(prediction)) => {
                self.predicting = false;
                self.result = Some(*prediction);
                self.set_phase(PredictionPhase::Displayed);
            }
            SessionEvent::PredictFinished(Err(message)) => {
                self.predicting = false;
                self.error = Some(message.clone());
                self.set_phase(PredictionPhase::Failed);
            }
            SessionEvent::FeedbackFinished(Ok(())) => {
                self.submitting_feedback = false;
                self.success = Some((FEEDBACK_SUCCESS_MESSAGE.to_string(), Instant::now()));
            }
            SessionEvent::FeedbackFinished(Err(message)) => {
                self.submitting_feedback = false;
                self.error = Some(message.clone());
            }
        }
    }

    /// Drop the displayed result and return to `Idle`. Called when the canvas
    /// is cleared or a new stroke begins. In-flight calls keep running.
    pub fn clear_result(&mut self) {
        self.result = None;
        self.set_phase(PredictionPhase::Idle);
    }

    /// Expire the success message once its deadline passes. Any newer message
    /// already replaced the pending one, which makes the timer cancellable.
    pub fn expire_messages(&mut self, now: Instant) {
        if let Some((_, shown_at)) = &self.success {
            if now.saturating_duration_since(*shown_at) >= SUCCESS_MESSAGE_TTL {
                self.success = None;
            }
        }
    }

    /// True while a timed message is pending, so the UI keeps repainting.
    pub fn has_pending_expiry(&self) -> bool {
        self.success.is_some()
    }

    fn set_phase(&mut self, next: PredictionPhase) {
        if !can_transition(self.phase, next) {
            tracing::warn!(from = ?self.phase, to = ?next, "unexpected prediction phase transition");
        }
        self.phase = next;
    }
}
