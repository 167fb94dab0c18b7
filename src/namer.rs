//! The workspace namer: extraction, rule matching and fallbacks in one
//! pure call.
//!
//! [`WorkspaceNamer`] holds the immutable rule table and settings.  It keeps
//! no state between calls, so one instance can label every workspace of
//! every refresh, from any thread.
//!
//! # Typical usage
//!
//! ```
//! use wsnamer::namer::WorkspaceNamer;
//! use wsnamer::snapshot::{Container, Workspace};
//!
//! let namer = WorkspaceNamer::default();
//! let ws = Workspace {
//!     windows: vec![Container::window(Some("Inbox - Chrome"), Some("chrome.exe"))],
//!     ..Workspace::named("2")
//! };
//! assert_eq!(namer.label(&ws).as_deref(), Some("2: Web"));
//! ```

use crate::config::Config;
use crate::extract::{extract_with_depth, DEFAULT_MAX_DEPTH};
use crate::rules::{resolve, MatchMode, RuleError, RuleTable};
use crate::snapshot::Workspace;
use serde::Serialize;

/// Labels workspaces from the windows they contain.
#[derive(Debug, Clone)]
pub struct WorkspaceNamer {
    rules: RuleTable,
    mode: MatchMode,
    max_depth: usize,
}

impl Default for WorkspaceNamer {
    /// Built-in rule table, exact matching, default depth limit.
    fn default() -> Self {
        Self::new(RuleTable::default(), MatchMode::default(), DEFAULT_MAX_DEPTH)
    }
}

/// One workspace's entry in a labelled refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceLabel {
    /// The window manager's name for the workspace.
    pub name: Option<String>,
    /// What the bar should display.
    pub label: Option<String>,
    pub focused: bool,
}

impl WorkspaceNamer {
    pub fn new(rules: RuleTable, mode: MatchMode, max_depth: usize) -> Self {
        Self {
            rules,
            mode,
            max_depth,
        }
    }

    /// Build a namer from a loaded [`Config`].
    ///
    /// A config without a `rules` section uses the built-in table.
    pub fn from_config(config: &Config) -> Result<Self, RuleError> {
        let rules = match &config.rules {
            Some(rules) => RuleTable::new(rules.clone())?,
            None => RuleTable::default(),
        };
        Ok(Self::new(rules, config.matching, config.max_depth))
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Infer a label for `workspace`.
    ///
    /// `workspace_number` prefixes single-name results (`"2: Web"`) and
    /// replaces the count when several unrelated apps share the workspace.
    /// A blank number is treated as absent.  Returns `None` when the
    /// workspace holds nothing identifiable.
    pub fn name(&self, workspace: &Workspace, workspace_number: Option<&str>) -> Option<String> {
        let number = workspace_number.filter(|n| !n.trim().is_empty());
        let extraction = extract_with_depth(workspace, self.max_depth);
        resolve(&self.rules, self.mode, &extraction, number)
    }

    /// The label a bar should display for `workspace`.
    ///
    /// Uses the workspace's own `name` as the number.  When nothing can be
    /// inferred, falls back to `displayName`, then to `name`.
    pub fn label(&self, workspace: &Workspace) -> Option<String> {
        self.name(workspace, workspace.name.as_deref())
            .or_else(|| workspace.display_name.clone())
            .or_else(|| workspace.name.clone())
    }

    /// Label every workspace of one refresh, in order.
    pub fn label_all(&self, workspaces: &[Workspace]) -> Vec<WorkspaceLabel> {
        workspaces
            .iter()
            .map(|ws| WorkspaceLabel {
                name: ws.name.clone(),
                label: self.label(ws),
                focused: ws.has_focus,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use crate::snapshot::Container;

    fn with_processes(processes: &[&str]) -> Workspace {
        Workspace {
            children: processes
                .iter()
                .map(|p| Container::window(None, Some(p)))
                .collect(),
            ..Workspace::default()
        }
    }

    #[test]
    fn empty_workspace_has_no_label() {
        let namer = WorkspaceNamer::default();
        assert_eq!(namer.name(&Workspace::default(), None), None);
        assert_eq!(namer.name(&Workspace::default(), Some("1")), None);
    }

    #[test]
    fn chrome_is_web() {
        let namer = WorkspaceNamer::default();
        let ws = with_processes(&["chrome.exe"]);
        assert_eq!(namer.name(&ws, None).as_deref(), Some("Web"));
        assert_eq!(namer.name(&ws, Some("2")).as_deref(), Some("2: Web"));
        assert_eq!(namer.name(&ws, Some("Web")).as_deref(), Some("Web"));
    }

    #[test]
    fn unmatched_pair_uses_number() {
        let namer = WorkspaceNamer::default();
        let ws = with_processes(&["notepad", "calculator"]);
        assert_eq!(namer.name(&ws, Some("3")).as_deref(), Some("3"));
        assert_eq!(namer.name(&ws, None).as_deref(), Some("2"));
    }

    #[test]
    fn single_app_without_number() {
        let namer = WorkspaceNamer::default();
        let ws = Workspace {
            windows: vec![Container::window(Some("Steam"), None)],
            ..Workspace::default()
        };
        assert_eq!(namer.name(&ws, None).as_deref(), Some("Steam"));
        assert_eq!(namer.name(&ws, Some("")).as_deref(), Some("Steam"));
        assert_eq!(namer.name(&ws, Some("  ")).as_deref(), Some("Steam"));
    }

    #[test]
    fn blank_process_name_gives_no_label() {
        let namer = WorkspaceNamer::default();
        let ws = Workspace {
            windows: vec![Container {
                process_name: Some("   ".into()),
                ..Container::default()
            }],
            ..Workspace::default()
        };
        assert_eq!(namer.name(&ws, Some("3")), None);
    }

    #[test]
    fn cursor_with_terminal_matches_two_token_rule() {
        let namer = WorkspaceNamer::new(
            RuleTable::new(vec![
                Rule::new(["cursor"], "Editor"),
                Rule::new(["cursor", "cmd"], "Dev"),
            ])
            .unwrap(),
            MatchMode::Exact,
            DEFAULT_MAX_DEPTH,
        );
        let ws = with_processes(&["cursor", "cmd"]);
        assert_eq!(namer.name(&ws, None).as_deref(), Some("Dev"));
        assert_eq!(namer.name(&with_processes(&["Cursor"]), None).as_deref(), Some("Editor"));
    }

    #[test]
    fn label_falls_back_to_display_name_then_name() {
        let namer = WorkspaceNamer::default();
        let ws = Workspace {
            display_name: Some("Main".into()),
            ..Workspace::named("1")
        };
        assert_eq!(namer.label(&ws).as_deref(), Some("Main"));
        assert_eq!(namer.label(&Workspace::named("7")).as_deref(), Some("7"));
        assert_eq!(namer.label(&Workspace::default()), None);
    }

    #[test]
    fn label_uses_name_as_number() {
        let namer = WorkspaceNamer::default();
        let ws = Workspace {
            children: vec![Container::split(vec![Container::window(
                Some("Library - Steam"),
                Some("steamwebhelper"),
            )])],
            ..Workspace::named("4")
        };
        assert_eq!(namer.label(&ws).as_deref(), Some("4: Steam"));
    }

    #[test]
    fn label_all_keeps_order_and_focus() {
        let namer = WorkspaceNamer::default();
        let mut focused = with_processes(&["chrome"]);
        focused.name = Some("1".into());
        focused.has_focus = true;
        let labels = namer.label_all(&[focused, Workspace::named("2")]);
        assert_eq!(
            labels,
            vec![
                WorkspaceLabel {
                    name: Some("1".into()),
                    label: Some("1: Web".into()),
                    focused: true,
                },
                WorkspaceLabel {
                    name: Some("2".into()),
                    label: Some("2".into()),
                    focused: false,
                },
            ]
        );
    }

    #[test]
    fn from_config_uses_custom_rules() {
        let config: Config = serde_json::from_str(
            r#"{"rules": [{"processes": ["code"], "name": "Code"}], "matching": "subset"}"#,
        )
        .unwrap();
        let namer = WorkspaceNamer::from_config(&config).unwrap();
        assert_eq!(namer.mode(), MatchMode::Subset);
        assert_eq!(namer.rules().len(), 1);
        let ws = with_processes(&["code", "chrome"]);
        assert_eq!(namer.name(&ws, Some("1")).as_deref(), Some("1: Code"));
    }

    #[test]
    fn namer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WorkspaceNamer>();
    }
}
