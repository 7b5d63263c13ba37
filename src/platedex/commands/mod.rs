//! # Command Layer
//!
//! This module contains the **core business logic** of platedex. Each command
//! lives in its own submodule as a plain function over a [`DataStore`]:
//!
//! ```text
//! run(store, ...) -> Result<CmdResult>
//! ```
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: no stdout, stderr or colors; return data, the CLI renders it
//! - **Argument parsing**: selectors and assignments arrive already parsed
//! - **Exit codes**: return `Result`, let the caller decide
//!
//! Commands that write files (`export`, `template`) do so only when handed an
//! output path; otherwise the CSV text is returned in [`CmdResult::output`].
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_items`: items that were created or modified, with their index
//!   after the operation
//! - `listed_items`: items to display, each with its canonical index
//! - `collections`: collection summaries (for `collections list`)
//! - `bounds`, `config`, `output`: command-specific payloads
//! - `messages`: structured messages with levels
//!
//! ## Display Indexes
//!
//! An item's index is its 1-based position in its kind's listing ordered by
//! registration number. The index does not depend on the active filter, sort
//! or search, so `list --sort age-asc` and `show 3` agree on what `3` means.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and check `CmdResult` contents, store
//! state afterwards, and error conditions.
//!
//! [`DataStore`]: crate::store::DataStore

use crate::bounds::DataBounds;
use crate::config::PlatedexConfig;
use crate::error::PlatedexError;
use crate::model::{Collection, Item};
use std::fmt;
use std::str::FromStr;

pub mod acquire;
pub mod add;
pub mod archive;
pub mod bounds;
pub mod collections;
pub mod config;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod show;
pub mod template;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// An item paired with its canonical display index.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub index: usize,
    pub item: Item,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub collection: Collection,
    pub member_count: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_items: Vec<DisplayItem>,
    pub listed_items: Vec<DisplayItem>,
    pub collections: Vec<CollectionSummary>,
    pub bounds: Option<DataBounds>,
    pub config: Option<PlatedexConfig>,
    /// Text produced for stdout (CSV export without an output path).
    pub output: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_items(mut self, items: Vec<DisplayItem>) -> Self {
        self.affected_items = items;
        self
    }

    pub fn with_listed_items(mut self, items: Vec<DisplayItem>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn with_collections(mut self, collections: Vec<CollectionSummary>) -> Self {
        self.collections = collections;
        self
    }

    pub fn with_bounds(mut self, bounds: DataBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_config(mut self, config: PlatedexConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_output(mut self, output: String) -> Self {
        self.output = Some(output);
        self
    }
}

/// Picks items within one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    /// 1-based display index.
    Index(usize),
    /// Registration number, matched exactly but case-insensitively.
    Registration(String),
}

impl FromStr for ItemSelector {
    type Err = PlatedexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PlatedexError::Validation("Empty selector".to_string()));
        }
        // Leading zeros mean a registration ("007"), not an index.
        if !s.starts_with('0') && s.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = s.parse() {
                return Ok(ItemSelector::Index(n));
            }
        }
        Ok(ItemSelector::Registration(s.to_string()))
    }
}

impl fmt::Display for ItemSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSelector::Index(n) => write!(f, "{}", n),
            ItemSelector::Registration(r) => f.write_str(r),
        }
    }
}

/// A `name=value` field assignment. An empty value clears the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub name: String,
    pub value: String,
}

impl FieldAssignment {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl FromStr for FieldAssignment {
    type Err = PlatedexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s.split_once('=').ok_or_else(|| {
            PlatedexError::Validation(format!("Expected name=value, got `{}`", s))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(PlatedexError::Validation(format!(
                "Missing field name in `{}`",
                s
            )));
        }
        Ok(FieldAssignment::new(name, value))
    }
}
