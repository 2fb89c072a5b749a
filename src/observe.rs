//! Tracing hook for the layout engine.
//!
//! The engine reports what it does through an optional [`Observer`] instead
//! of logging directly, so library users decide where diagnostics go.
//! [`TracingObserver`] forwards every event to `tracing`.

/// One step of a formatting run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    /// A frame was pushed; `depth` is the depth after the push
    Push { label: &'a str, depth: usize },
    /// A frame was popped; `depth` is the depth after the pop
    Pop { label: &'a str, depth: usize },
    /// Output appended at `depth`
    Append { output: &'a str, depth: usize },
    /// A text segment about to be reflowed
    Text { text: &'a str },
    /// Code handed to the formatter with its width budget
    CodeIn { code: &'a str, width: usize },
    /// What the formatter returned; `None` means the code was kept
    CodeOut { code: Option<&'a str> },
}

pub trait Observer {
    fn on_event(&self, event: &Event<'_>);
}

/// Forwards events to `tracing` under the `erbfmt::layout` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&self, event: &Event<'_>) {
        match event {
            Event::Push { label, depth } => {
                tracing::debug!(target: "erbfmt::layout", depth, "push {label}");
            }
            Event::Pop { label, depth } => {
                tracing::debug!(target: "erbfmt::layout", depth, "pop {label}");
            }
            Event::Append { output, depth } => {
                tracing::trace!(target: "erbfmt::layout", depth, "append {output:?}");
            }
            Event::Text { text } => {
                tracing::trace!(target: "erbfmt::layout", "text {text:?}");
            }
            Event::CodeIn { code, width } => {
                tracing::debug!(target: "erbfmt::layout", width, "code in {code:?}");
            }
            Event::CodeOut { code: Some(code) } => {
                tracing::debug!(target: "erbfmt::layout", "code out {code:?}");
            }
            Event::CodeOut { code: None } => {
                tracing::debug!(target: "erbfmt::layout", "code kept as written");
            }
        }
    }
}
