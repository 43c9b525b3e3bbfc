pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod model;

pub use checker::Spellcheck;
pub use config::Config;
pub use error::{Error, Result};

use serde::Serialize;

/// Report line used when a misspelling cannot be traced to a physical line.
pub const VIA_INCLUDE: &str = "(via include)";

/// A misspelled word and its char offset into the comment text it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Misspelling {
    pub word: String,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    pub path: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub word: String,
    pub offset: usize,
    /// `None` when the comment text is not found in the file, e.g. for
    /// documentation pulled in through an alias or include.
    pub location: Option<SourcePosition>,
    pub suggestions: Vec<String>,
    #[serde(skip)]
    pub suggestion_text: String,
}

/// Misspellings found in one documentation item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub header: String,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub items: Vec<ItemReport>,
    /// Most frequent misspellings, most common first.
    pub top_misspellings: Vec<(String, usize)>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
