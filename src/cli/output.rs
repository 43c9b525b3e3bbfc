use crate::error::Error;
use crate::{ItemReport, Report, ReportEntry, VIA_INCLUDE};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::error;

/// Chars of context shown on each side of a misspelled word.
pub const CONTEXT_CHARS: usize = 10;

const HIGHLIGHT_START: &str = "\x1b[1;31m";
const HIGHLIGHT_END: &str = "\x1b[m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Quote the misspelled `word` with up to [`CONTEXT_CHARS`] chars on either
/// side, then list `suggestions`.
///
/// `offset` is where the scanner reported the word; the word itself is
/// searched for near it. `...` marks context cut off by the window, never
/// the start or end of the text.
pub fn suggestion_text(
    text: &str,
    word: &str,
    offset: usize,
    suggestions: &[String],
) -> crate::Result<String> {
    let chars: Vec<char> = text.chars().collect();
    let word_chars: Vec<char> = word.chars().collect();

    let is_word_at =
        |pos: usize| chars.get(pos..pos + word_chars.len()) == Some(word_chars.as_slice());

    let window_start = offset.saturating_sub(CONTEXT_CHARS);
    let expected = offset.saturating_sub(1);

    let found = if is_word_at(expected) {
        Some(expected)
    } else {
        (window_start..=window_start + CONTEXT_CHARS)
            .rev()
            .find(|&pos| is_word_at(pos))
    };

    let Some(start) = found else {
        error!(word, offset, "[bug] unable to build suggestion text");
        error!(">>>> start text <<<<\n{}\n>>>>> end text <<<<<", text);
        return Err(Error::Format {
            word: word.to_string(),
            offset,
        });
    };

    let end = start + word_chars.len();
    let after_end = (end + CONTEXT_CHARS).min(chars.len());

    let before: String = chars[window_start..start].iter().collect();
    let after: String = chars[end..after_end].iter().collect();

    let before_marker = if window_start > 0 { "..." } else { "" };
    let after_marker = if after_end < chars.len() { "..." } else { "" };

    Ok(format!(
        "\"{}{}{}{}{}{}{}\"\n\n\"{}\" suggestions:\n\t{}\n\n",
        before_marker,
        before,
        HIGHLIGHT_START,
        word,
        HIGHLIGHT_END,
        after,
        after_marker,
        word,
        suggestions.join(", ")
    ))
}

impl ReportEntry {
    /// `path:line:column`, or the include marker when the line is unknown.
    pub fn location_text(&self) -> String {
        match &self.location {
            Some(position) => format!("{}:{}:{}", position.path, position.line, position.column),
            None => VIA_INCLUDE.to_string(),
        }
    }
}

impl ItemReport {
    /// Header, a blank line, then a location line and suggestion block per
    /// misspelling.
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![self.header.clone(), String::new()];

        for entry in &self.entries {
            out.push(entry.location_text());
            out.push(entry.suggestion_text.clone());
        }

        out
    }
}

/// Ranked summary rows with counts right-aligned to the widest count.
pub fn format_summary(top: &[(String, usize)]) -> Vec<String> {
    let width = top
        .iter()
        .map(|(_, count)| count.to_string().len())
        .max()
        .unwrap_or(1);

    top.iter()
        .map(|(word, count)| format!("{:>width$} {}", count, word, width = width))
        .collect()
}

pub fn render_text(report: &Report) -> String {
    if report.is_empty() {
        return "No misspellings found\n".to_string();
    }

    let lines: Vec<String> = report.items.iter().flat_map(ItemReport::lines).collect();

    let mut out = lines.join("\n");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');

    out.push_str("Top misspellings:\n");
    for row in format_summary(&report.top_misspellings) {
        out.push_str(&row);
        out.push('\n');
    }

    out
}

#[derive(Debug, Serialize)]
struct JsonMisspelling<'a> {
    word: &'a str,
    count: usize,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    total_errors: usize,
    items: &'a [ItemReport],
    top_misspellings: Vec<JsonMisspelling<'a>>,
}

pub fn render_json(report: &Report) -> crate::Result<String> {
    let output = JsonOutput {
        total_errors: report.items.iter().map(|item| item.entries.len()).sum(),
        items: &report.items,
        top_misspellings: report
            .top_misspellings
            .iter()
            .map(|(word, count)| JsonMisspelling { word, count: *count })
            .collect(),
    };

    let mut json = serde_json::to_string_pretty(&output)?;
    json.push('\n');
    Ok(json)
}

pub fn render(report: &Report, format: OutputFormat) -> crate::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}
