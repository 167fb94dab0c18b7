//! The seam between the naming core and whatever delivers workspace
//! snapshots.
//!
//! The host runtime pushes a fresh [`Refresh`] whenever window-manager
//! state changes.  How it gets here (stdin, a Unix socket, a test harness)
//! is hidden behind [`SnapshotSource`].

use crate::snapshot::Refresh;
use std::sync::mpsc;

/// A source of [`Refresh`]es.
///
/// # Contract
///
/// * [`run`](SnapshotSource::run) **blocks** until the source is exhausted,
///   the sink is closed, or an unrecoverable error occurs.
/// * Each decoded refresh is sent through `sink` exactly once, in arrival
///   order.
/// * Input that fails to decode is logged and skipped; it never ends the
///   source.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait SnapshotSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start reading and forward every incoming [`Refresh`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Refresh>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namer::WorkspaceNamer;
    use crate::snapshot::{Container, Workspace};

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    /// A test double that emits a fixed sequence of refreshes.
    struct MockSource {
        refreshes: Vec<Refresh>,
    }

    impl SnapshotSource for MockSource {
        type Error = MockError;

        fn run(&mut self, sink: mpsc::Sender<Refresh>) -> Result<(), MockError> {
            for refresh in self.refreshes.drain(..) {
                let _ = sink.send(refresh);
            }
            Ok(())
        }
    }

    #[test]
    fn mock_source_feeds_namer() {
        let browser = Workspace {
            windows: vec![Container::window(Some("News - Chrome"), Some("chrome"))],
            ..Workspace::named("1")
        };
        let mut src = MockSource {
            refreshes: vec![
                Refresh {
                    workspaces: vec![browser],
                },
                Refresh {
                    workspaces: vec![Workspace::named("2")],
                },
            ],
        };
        let (tx, rx) = mpsc::channel();
        src.run(tx).unwrap();

        let namer = WorkspaceNamer::default();
        let labels: Vec<Option<String>> = rx
            .try_iter()
            .flat_map(|r| namer.label_all(&r.workspaces))
            .map(|l| l.label)
            .collect();
        assert_eq!(labels, [Some("1: Web".to_string()), Some("2".to_string())]);
    }
}
