//! Snapshot sources reading newline-delimited JSON refreshes.
//!
//! [`stream::StreamSource`] reads from any buffered reader (the binary
//! uses stdin); [`listener::UnixSocketListener`] accepts host connections
//! on a Unix socket.  Both share the line protocol in [`stream`].

pub mod listener;
pub mod stream;
