//! **wsnamer** — workspace labels inferred from running windows.
//!
//! A status bar shows one chip per window-manager workspace.  Instead of a
//! bare number, wsnamer looks at the windows living in a workspace and picks
//! a human-readable label: a configured name when the workspace's processes
//! match a rule (`chrome` → `"Web"`), the single app's name when only one
//! app is open, and the workspace number (or a window count) otherwise.
//!
//! # Architecture
//!
//! The naming core is a pure function of its input:
//!
//! * [`extract`] flattens a workspace tree into app and process names.
//! * [`title`] turns raw window titles into app names.
//! * [`rules`] maps process names to configured display names.
//! * [`namer::WorkspaceNamer`] ties the three together.
//!
//! Snapshots arrive through the [`traits::SnapshotSource`] trait, so the
//! core is not coupled to any transport.  Concrete sources (stdin and a
//! Unix socket) live in [`ipc`].

pub mod config;
pub mod extract;
pub mod ipc;
pub mod namer;
pub mod rules;
pub mod snapshot;
pub mod title;
pub mod traits;
