//! Unix-socket [`SnapshotSource`] implementation.
//!
//! Binds a Unix stream socket and accepts one connection at a time.  Each
//! connection speaks the line protocol described in
//! [`stream`](super::stream): one JSON refresh per line.

use super::stream::{forward_lines, Flow, SourceError};
use crate::snapshot::Refresh;
use crate::traits::SnapshotSource;
use log::{debug, error, info};
use std::io::BufReader;
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// A [`SnapshotSource`] that listens on a Unix stream socket for
/// JSON-encoded refreshes.
///
/// When a connection closes, the listener waits for the next one, so the
/// host may reconnect after a restart.
pub struct UnixSocketListener {
    path: PathBuf,
}

impl UnixSocketListener {
    /// Create a new listener bound to `path`.
    ///
    /// The socket file is created when [`run`](SnapshotSource::run) is
    /// called.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SnapshotSource for UnixSocketListener {
    type Error = SourceError;

    /// Bind the socket and start accepting connections.
    ///
    /// This method **blocks** until the sink is closed.  Run it on a
    /// dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Refresh>) -> Result<(), Self::Error> {
        // Remove stale socket if present.
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    debug!("host connected");
                    match forward_lines(BufReader::new(stream), &sink) {
                        Ok(Flow::SinkClosed) => {
                            let _ = std::fs::remove_file(&self.path);
                            return Ok(());
                        }
                        Ok(Flow::Exhausted) => debug!("host disconnected"),
                        Err(e) => error!("read error: {}", e),
                    }
                }
                Err(e) => {
                    error!("accept error: {}", e);
                }
            }
        }
        Ok(())
    }
}
