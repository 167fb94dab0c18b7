//! Rule table and matcher.
//!
//! A [`Rule`] pairs a set of process-name tokens with a display name:
//! `{"processes": ["docker", "datagrip"], "name": "Database"}`.  The
//! [`RuleTable`] is evaluated top to bottom and the first rule that matches
//! a workspace's processes wins.  There is no scoring.
//!
//! Tokens and processes are compared case-insensitively, and a token
//! matches a process when either string contains the other.  That keeps
//! platform variants together (`datagrip64` vs `datagrip`,
//! `chrome.exe` vs `chrome`).

use crate::extract::Extraction;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// One entry of the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Process-name tokens that must all be present in the workspace.
    #[serde(alias = "requiredProcesses")]
    pub processes: Vec<String>,
    /// Label shown when the rule fires.
    #[serde(alias = "displayName")]
    pub name: String,
}

impl Rule {
    pub fn new<I, S>(processes: I, name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            processes: processes.into_iter().map(Into::into).collect(),
            name: name.into(),
        }
    }
}

/// How strictly a rule's tokens must line up with a workspace's processes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every token is present **and** every process is covered by some
    /// token.  `{"cursor", "cmd"}` matches `["cursor", "cmd"]` but not
    /// `["cursor"]`.
    #[default]
    Exact,
    /// Every token is present; unrelated extra processes are tolerated.
    Subset,
}

/// A rule that cannot be used.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule #{index} has an empty name")]
    EmptyName { index: usize },
    #[error("rule #{index} ({name:?}) lists no process names")]
    NoProcesses { index: usize, name: String },
}

/// A validated rule with its tokens lower-cased and deduplicated.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: Rule,
    tokens: Vec<String>,
}

impl CompiledRule {
    fn matches(&self, processes: &[String], mode: MatchMode) -> bool {
        let all_present = self
            .tokens
            .iter()
            .all(|token| processes.iter().any(|p| related(p, token)));
        match mode {
            MatchMode::Subset => all_present,
            MatchMode::Exact => {
                all_present
                    && processes
                        .iter()
                        .all(|p| self.tokens.iter().any(|token| related(p, token)))
            }
        }
    }
}

/// Either string contains the other.  Both sides are already lower-case.
fn related(process: &str, token: &str) -> bool {
    process.contains(token) || token.contains(process)
}

/// Ordered, immutable rule table.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
}

/// The built-in rules, in evaluation order.
fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::new(["docker", "datagrip"], "Database"),
        Rule::new(["chrome"], "Web"),
        Rule::new(["cursor"], "Dev"),
        Rule::new(["cursor", "cmd"], "Dev"),
        Rule::new(["datagrip64"], "Datagrip"),
        Rule::new(["steamwebhelper", "steamwebhelper"], "Steam"),
    ]
}

impl Default for RuleTable {
    /// The built-in table.
    fn default() -> Self {
        Self::new(builtin_rules()).expect("built-in rule table is valid")
    }
}

impl RuleTable {
    /// Validate and compile `rules`, keeping their order.
    ///
    /// Blank tokens are dropped.  A rule left without tokens would match
    /// every workspace, so it is rejected, as is a rule with a blank name.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| {
                if rule.name.trim().is_empty() {
                    return Err(RuleError::EmptyName { index });
                }
                let mut tokens: Vec<String> = Vec::new();
                for token in &rule.processes {
                    let token = token.trim().to_lowercase();
                    if !token.is_empty() && !tokens.contains(&token) {
                        tokens.push(token);
                    }
                }
                if tokens.is_empty() {
                    return Err(RuleError::NoProcesses {
                        index,
                        name: rule.name,
                    });
                }
                Ok(CompiledRule { rule, tokens })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|r| &r.rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Return the first rule matching `processes`, if any.
    ///
    /// An empty process set never matches.
    pub fn find<S: AsRef<str>>(&self, processes: &[S], mode: MatchMode) -> Option<&Rule> {
        let normalized: Vec<String> = processes
            .iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        if normalized.is_empty() {
            return None;
        }
        let hit = self.rules.iter().find(|r| r.matches(&normalized, mode))?;
        debug!("rule {:?} matched processes {:?}", hit.rule.name, normalized);
        Some(&hit.rule)
    }
}

/// Prefix `name` with the workspace number, unless they are the same.
pub fn with_number(name: &str, number: Option<&str>) -> String {
    match number {
        Some(n) if n != name => format!("{}: {}", n, name),
        _ => name.to_string(),
    }
}

/// Pick a label for a workspace from what was extracted from it.
///
/// 1. first matching rule → its name;
/// 2. exactly one app → that app;
/// 3. exactly one process → that process;
/// 4. several processes → the number, else the process count;
/// 5. several apps → the number, else the app count;
/// 6. nothing → `None`.
///
/// Results from steps 1–3 carry the number prefix (see [`with_number`]).
pub fn resolve(
    table: &RuleTable,
    mode: MatchMode,
    extraction: &Extraction,
    number: Option<&str>,
) -> Option<String> {
    let apps = &extraction.app_names;
    let processes = &extraction.process_names;

    if let Some(rule) = table.find(processes.as_slice(), mode) {
        return Some(with_number(&rule.name, number));
    }
    trace!("no rule for {:?}, falling back", processes);

    if apps.len() == 1 {
        return Some(with_number(&apps[0], number));
    }
    if processes.len() == 1 {
        return Some(with_number(&processes[0], number));
    }
    if processes.len() > 1 {
        return Some(number.map_or_else(|| processes.len().to_string(), str::to_string));
    }
    if apps.len() > 1 {
        return Some(number.map_or_else(|| apps.len().to_string(), str::to_string));
    }
    None
}
