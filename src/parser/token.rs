//! Line tokenizer for `description.yaml`.
//!
//! Splits a description into logical `key: value` lines. Blank lines,
//! `#` comments and lines without a colon produce no token.

/// The shape of a tokenized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `key: value`
    KeyValue,
    /// `- key: value`
    ArrayItem,
}

/// A single `key: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// 1-based source line.
    pub line: usize,
    /// Count of leading spaces.
    pub indent: usize,
    pub kind: TokenKind,
    /// Lower-cased key.
    pub key: String,
    /// Trimmed value with one layer of matching quotes removed.
    pub value: String,
}

impl Token {
    pub fn is_array_item(&self) -> bool {
        self.kind == TokenKind::ArrayItem
    }

    /// Key-value lines at column zero.
    pub fn is_top_level(&self) -> bool {
        self.kind == TokenKind::KeyValue && self.indent == 0
    }
}

/// Tokenize a description file. A leading byte order mark is dropped.
pub fn tokenize(source: &str) -> Vec<Token> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| tokenize_line(i + 1, line))
        .collect()
}

/// Tokenize a single line, or `None` if it carries no key-value pair.
pub fn tokenize_line(line_no: usize, line: &str) -> Option<Token> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    // Tabs are not expanded; only leading spaces count.
    let indent = line.chars().take_while(|c| *c == ' ').count();

    let (kind, body) = match trimmed.strip_prefix("- ") {
        Some(rest) => (TokenKind::ArrayItem, rest),
        None => (TokenKind::KeyValue, trimmed),
    };

    let Some((key, value)) = split_key_value(body) else {
        log::trace!("line {}: no key-value pair, skipped", line_no);
        return None;
    };

    Some(Token {
        line: line_no,
        indent,
        kind,
        key,
        value,
    })
}

/// Split `key: value` at the first colon.
fn split_key_value(text: &str) -> Option<(String, String)> {
    let colon = text.find(':')?;
    let key = text[..colon].trim().to_lowercase();
    let value = unquote(text[colon + 1..].trim());
    Some((key, value.to_string()))
}

/// Remove one layer of matching single or double quotes.
pub fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
