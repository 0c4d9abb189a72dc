use std::fmt;

use serde::Serialize;

use crate::hand::HandId;

/// Observable state transition produced by a frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionEvent {
    GrabAcquired { hand: HandId },
    GrabReleased { hand: HandId },
    Seated { seat: usize },
    Stood { seat: usize },
}

impl InteractionEvent {
    pub fn tag(&self) -> &'static str {
        match self {
            InteractionEvent::GrabAcquired { .. } | InteractionEvent::GrabReleased { .. } => {
                "[ACTION]"
            }
            InteractionEvent::Seated { .. } | InteractionEvent::Stood { .. } => "[SEAT]",
        }
    }

    pub fn message(&self) -> String {
        match self {
            InteractionEvent::GrabAcquired { hand } => format!("Hand {hand} grabbing box"),
            InteractionEvent::GrabReleased { hand } => format!("Hand {hand} released box"),
            InteractionEvent::Seated { seat } => format!("Seated at seat {seat}"),
            InteractionEvent::Stood { seat } => format!("Stood up (from seat {seat})"),
        }
    }
}

impl fmt::Display for InteractionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tag(), self.message())
    }
}

/// Fire-and-forget destination for tagged diagnostic lines.
pub trait DiagnosticsSink {
    fn log(&mut self, tag: &str, message: &str);
}

impl DiagnosticsSink for () {
    fn log(&mut self, _tag: &str, _message: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggedLine {
    pub tag: String,
    pub message: String,
}

/// Keeps every line in memory, in emission order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    lines: Vec<LoggedLine>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LoggedLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl DiagnosticsSink for EventLog {
    fn log(&mut self, tag: &str, message: &str) {
        self.lines.push(LoggedLine {
            tag: tag.to_string(),
            message: message.to_string(),
        });
    }
}

/// Forwards lines to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn log(&mut self, tag: &str, message: &str) {
        log::info!("{tag} {message}");
    }
}

/// Records an event in the frame's list and mirrors it to the sink.
pub(crate) struct EventRecorder<'a> {
    events: &'a mut Vec<InteractionEvent>,
    sink: &'a mut dyn DiagnosticsSink,
}

impl<'a> EventRecorder<'a> {
    pub(crate) fn new(
        events: &'a mut Vec<InteractionEvent>,
        sink: &'a mut dyn DiagnosticsSink,
    ) -> Self {
        Self { events, sink }
    }

    pub(crate) fn emit(&mut self, event: InteractionEvent) {
        self.sink.log(event.tag(), &event.message());
        self.events.push(event);
    }
}
