//! Line protocol shared by all sources, and a [`SnapshotSource`] over any
//! buffered reader.
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`, holding one
//! [`Refresh`]:
//!
//! ```json
//! [{"name":"1","hasFocus":true,"children":[{"title":"Inbox - Chrome","processName":"chrome"}]}]
//! {"workspaces":[{"name":"1"},{"name":"2"}]}
//! ```
//!
//! Blank lines are ignored; lines that fail to decode are logged and
//! skipped.

use crate::snapshot::Refresh;
use crate::traits::SnapshotSource;
use log::{debug, info, warn};
use std::io::BufRead;
use std::sync::mpsc;

/// Errors produced by snapshot sources.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why [`forward_lines`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// The reader hit end of input.
    Exhausted,
    /// The receiving end of the sink was dropped.
    SinkClosed,
}

/// Decode refreshes line by line from `reader` and send them to `sink`.
pub(crate) fn forward_lines<R: BufRead>(
    reader: R,
    sink: &mpsc::Sender<Refresh>,
) -> Result<Flow, std::io::Error> {
    for line in reader.lines() {
        let text = line?;
        if text.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Refresh>(&text) {
            Ok(refresh) => {
                debug!("received refresh with {} workspace(s)", refresh.workspaces.len());
                if sink.send(refresh).is_err() {
                    info!("sink closed, shutting down");
                    return Ok(Flow::SinkClosed);
                }
            }
            Err(e) => {
                warn!("bad refresh: {}", e);
            }
        }
    }
    Ok(Flow::Exhausted)
}

/// A [`SnapshotSource`] reading refreshes from a buffered reader until
/// end of input.
pub struct StreamSource<R> {
    reader: Option<R>,
}

impl<R: BufRead + Send> StreamSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

impl<R: BufRead + Send> SnapshotSource for StreamSource<R> {
    type Error = SourceError;

    /// Read until end of input.  A second call returns immediately.
    fn run(&mut self, sink: mpsc::Sender<Refresh>) -> Result<(), Self::Error> {
        let Some(reader) = self.reader.take() else {
            return Ok(());
        };
        forward_lines(reader, &sink)?;
        info!("input closed");
        Ok(())
    }
}
