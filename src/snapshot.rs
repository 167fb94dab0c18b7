//! Workspace snapshots as pushed by the host runtime.
//!
//! The window manager integration describes each workspace as a loosely
//! typed tree: any node may carry a `title`, a `processName` and nested
//! `children`, and the workspace itself may expose `windows`, `containers`
//! and `children` lists side by side.  None of these fields is guaranteed.
//!
//! Decoding is deliberately forgiving.  A field of the wrong JSON type is
//! read as absent, non-object entries inside a node list are skipped, and
//! blank strings count as missing.  One odd window must never cost the
//! whole refresh its labels.
//!
//! # Wire format
//!
//! A [`Refresh`] is either a bare array of workspaces or an object with a
//! `"workspaces"` key:
//!
//! ```json
//! [{"name":"1","windows":[{"title":"Inbox - Chrome","processName":"chrome"}]}]
//! {"workspaces":[{"name":"2","hasFocus":true,"children":[]}]}
//! ```

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// A node in a workspace's window tree: a window or a grouping of windows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Window title, if the node is a window that has one.
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Executable name of the owning process (e.g. `"chrome"`).
    #[serde(default, deserialize_with = "lenient_text")]
    pub process_name: Option<String>,
    /// Nested nodes, in window-manager order.
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub children: Vec<Container>,
}

impl Container {
    /// A leaf window.  Blank strings are treated as absent.
    pub fn window(title: Option<&str>, process_name: Option<&str>) -> Self {
        Self {
            title: non_empty(title),
            process_name: non_empty(process_name),
            children: Vec::new(),
        }
    }

    /// A grouping node holding `children`.
    pub fn split(children: Vec<Container>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }
}

/// One workspace as reported by the window manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// The window manager's identifier for the workspace, usually its number.
    #[serde(default, deserialize_with = "lenient_label")]
    pub name: Option<String>,
    /// A user-configured display name, if any.
    #[serde(default, deserialize_with = "lenient_text")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub has_focus: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub process_name: Option<String>,
    /// Flat window records.  These are leaves: their children are ignored.
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub windows: Vec<Container>,
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub containers: Vec<Container>,
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub children: Vec<Container>,
}

impl Workspace {
    /// An empty workspace called `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// The kinds of node the extractor walks over.
///
/// Each kind reads the same optional fields but differs in how its
/// subtree is treated.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// An entry from a workspace's flat `windows` list.
    Window(&'a Container),
    /// A node from `containers`/`children`; its subtree is descended.
    Container(&'a Container),
    /// The workspace itself, contributing its own direct fields.
    WorkspaceRoot(&'a Workspace),
}

impl<'a> Node<'a> {
    pub fn title(&self) -> Option<&'a str> {
        match self {
            Node::Window(c) | Node::Container(c) => c.title.as_deref(),
            Node::WorkspaceRoot(w) => w.title.as_deref(),
        }
    }

    pub fn process_name(&self) -> Option<&'a str> {
        match self {
            Node::Window(c) | Node::Container(c) => c.process_name.as_deref(),
            Node::WorkspaceRoot(w) => w.process_name.as_deref(),
        }
    }

    /// Children to descend into.  Windows and the root have none here;
    /// the root's lists are scheduled by the extractor itself.
    pub fn descendants(&self) -> &'a [Container] {
        match self {
            Node::Container(c) => &c.children,
            Node::Window(_) | Node::WorkspaceRoot(_) => &[],
        }
    }
}

/// All workspaces reported in one host refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refresh {
    pub workspaces: Vec<Workspace>,
}

impl<'de> Deserialize<'de> for Refresh {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Refresh;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "array of workspaces or object {{workspaces: [...]}}")
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Refresh, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut workspaces = Vec::new();
                while let Some(item) = seq.next_element::<Value>()? {
                    if let Some(ws) = workspace_from_value(item) {
                        workspaces.push(ws);
                    }
                }
                Ok(Refresh { workspaces })
            }
            fn visit_map<A>(self, mut map: A) -> Result<Refresh, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut workspaces = None;
                while let Some(k) = map.next_key::<String>()? {
                    match k.as_str() {
                        "workspaces" => {
                            let items: Value = map.next_value()?;
                            workspaces = Some(match items {
                                Value::Array(items) => {
                                    items.into_iter().filter_map(workspace_from_value).collect()
                                }
                                _ => Vec::new(),
                            });
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                let workspaces = workspaces
                    .ok_or_else(|| <A::Error as DeError>::missing_field("workspaces"))?;
                Ok(Refresh { workspaces })
            }
        }
        deserializer.deserialize_any(V)
    }
}

//  Lenient field helpers

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty()).map(str::to_owned)
}

fn workspace_from_value(value: Value) -> Option<Workspace> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

fn container_from_value(value: Value) -> Option<Container> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// A non-blank string, or absent for anything else.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Like [`lenient_text`], but numeric workspace names are kept as text.
fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// An array of nodes; non-object entries are dropped, non-arrays read as empty.
fn lenient_nodes<'de, D>(deserializer: D) -> Result<Vec<Container>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(container_from_value).collect(),
        _ => Vec::new(),
    })
}
