//! Shared formatters for widget cells.
//!
//! Every piece of backend text reaches markup through [`Html::text`] or
//! [`escape_html`]; [`Html::trusted`] is reserved for markup written here.

use chrono::{DateTime, Utc};
use std::fmt;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// An HTML fragment that is safe to insert into a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Html(String);

impl Html {
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Escapes `text` and wraps it.
    pub fn text(text: &str) -> Self {
        Self(escape_html(text))
    }

    /// Wraps markup authored by this crate. Never pass backend data here.
    pub fn trusted(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn push(&mut self, other: &Html) {
        self.0.push_str(&other.0);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Html> for Html {
    fn from_iter<I: IntoIterator<Item = Html>>(iter: I) -> Self {
        let mut out = Html::empty();
        for fragment in iter {
            out.push(&fragment);
        }
        out
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Timestamp and byte-size formatting shared by all widgets of one host.
#[derive(Debug, Clone)]
pub struct Formatter {
    timestamp_format: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_FORMAT)
    }
}

impl Formatter {
    pub fn new(timestamp_format: impl Into<String>) -> Self {
        Self {
            timestamp_format: timestamp_format.into(),
        }
    }

    pub fn timestamp(&self, value: Option<DateTime<Utc>>) -> String {
        value
            .map(|ts| ts.format(&self.timestamp_format).to_string())
            .unwrap_or_default()
    }

    /// `"N bytes"` below 1 KiB, then KB and MB with at most one decimal.
    pub fn file_size(&self, size: u64) -> String {
        if size < KIB {
            format!("{} bytes", size)
        } else if size < MIB {
            format!("{} KB", one_decimal(size, KIB))
        } else {
            format!("{} MB", one_decimal(size, MIB))
        }
    }
}

fn one_decimal(size: u64, unit: u64) -> String {
    let tenths = ((size as f64 * 10.0) / unit as f64).round() as u64;
    if tenths % 10 == 0 {
        (tenths / 10).to_string()
    } else {
        format!("{}.{}", tenths / 10, tenths % 10)
    }
}
