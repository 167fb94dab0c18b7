//! Flattening a workspace tree into app and process names.
//!
//! Nodes are visited in a fixed order: the workspace's flat `windows`
//! first, then every node under `containers` (pre-order, depth first), then
//! every node under `children`, and finally the workspace's own fields.
//!
//! Each node contributes at most one process name and at most one app name.
//! The app name is the cleaned title, or the raw process name when the node
//! has no usable title.
//!
//! Traversal uses an explicit stack, so no tree shape can overflow the call
//! stack.  Nodes nested deeper than the configured limit are skipped.

use crate::snapshot::{Container, Node, Workspace};
use crate::title::clean_title;
use log::warn;
use std::collections::HashSet;

/// Default nesting limit below the workspace root.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// App and process names found in one workspace.
///
/// Both lists keep first-seen order and hold no case-insensitive
/// duplicates; the first spelling encountered is the one kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Display-oriented names, preferred for labels.
    pub app_names: Vec<String>,
    /// Raw executable names, used for rule matching.
    pub process_names: Vec<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.app_names.is_empty() && self.process_names.is_empty()
    }
}

/// Order-preserving, case-insensitive set of names.
#[derive(Default)]
struct NameSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl NameSet {
    fn insert(&mut self, name: &str) {
        if name.trim().is_empty() {
            return;
        }
        if self.seen.insert(name.to_lowercase()) {
            self.names.push(name.to_string());
        }
    }
}

#[derive(Default)]
struct Collector {
    apps: NameSet,
    processes: NameSet,
}

impl Collector {
    fn visit(&mut self, node: Node<'_>) {
        let process = node.process_name().filter(|p| !p.trim().is_empty());
        if let Some(process) = process {
            self.processes.insert(process);
        }
        let app = node
            .title()
            .map(clean_title)
            .filter(|name| !name.is_empty());
        match app {
            Some(app) => self.apps.insert(&app),
            None => {
                if let Some(process) = process {
                    self.apps.insert(process);
                }
            }
        }
    }

    fn finish(self) -> Extraction {
        Extraction {
            app_names: self.apps.names,
            process_names: self.processes.names,
        }
    }
}

/// Extract names from `workspace` using [`DEFAULT_MAX_DEPTH`].
pub fn extract(workspace: &Workspace) -> Extraction {
    extract_with_depth(workspace, DEFAULT_MAX_DEPTH)
}

/// Extract names from `workspace`, ignoring nodes nested more than
/// `max_depth` levels below it.
///
/// Entries of `windows`, `containers` and `children` sit at depth 1.
pub fn extract_with_depth(workspace: &Workspace, max_depth: usize) -> Extraction {
    let mut collector = Collector::default();
    let mut truncated = false;

    if max_depth >= 1 {
        for window in &workspace.windows {
            collector.visit(Node::Window(window));
        }
    } else if !workspace.windows.is_empty() {
        truncated = true;
    }

    for roots in [&workspace.containers, &workspace.children] {
        truncated |= walk(roots, max_depth, &mut collector);
    }

    collector.visit(Node::WorkspaceRoot(workspace));

    if truncated {
        warn!(
            "workspace {:?} nests deeper than {} levels; deeper windows ignored",
            workspace.name.as_deref().unwrap_or("?"),
            max_depth
        );
    }
    collector.finish()
}

/// Pre-order walk over `roots`.  Returns whether anything was cut off.
fn walk(roots: &[Container], max_depth: usize, collector: &mut Collector) -> bool {
    let mut truncated = false;
    let mut stack: Vec<(&Container, usize)> = roots.iter().rev().map(|c| (c, 1)).collect();

    while let Some((container, depth)) = stack.pop() {
        if depth > max_depth {
            truncated = true;
            continue;
        }
        let node = Node::Container(container);
        collector.visit(node);
        stack.extend(node.descendants().iter().rev().map(|c| (c, depth + 1)));
    }
    truncated
}
