//! Markdown-lite formatting for tutor replies.
//!
//! Each input line becomes exactly one [`DisplayNode`]. Inline markers are
//! plain textual substitutions rather than a recursive parser: a delimiter
//! without a closing partner stays literal text and nothing is nested.

/// An inline run of text inside a paragraph or list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Strong(String),
    Emphasis(String),
    /// `\(..\)` is inline math, `\[..\]` is display math. Delimiters are stripped.
    Math { tex: String, display: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNode {
    Heading { level: u8, text: String },
    /// `label` keeps the leading `N.` token verbatim.
    ListItem { label: String, spans: Vec<Span> },
    Spacer,
    Paragraph(Vec<Span>),
}

/// Lazy per-line formatter. Clone it to restart from the first line.
#[derive(Debug, Clone)]
pub struct FormattedLines<'a> {
    lines: std::str::Lines<'a>,
}

impl Iterator for FormattedLines<'_> {
    type Item = DisplayNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(format_line)
    }
}

pub fn format_lines(text: &str) -> FormattedLines<'_> {
    FormattedLines {
        lines: text.lines(),
    }
}

const HEADINGS: [(&str, u8); 3] = [("### ", 3), ("## ", 2), ("# ", 1)];

fn format_line(line: &str) -> DisplayNode {
    for (prefix, level) in HEADINGS {
        if let Some(text) = line.strip_prefix(prefix) {
            return DisplayNode::Heading {
                level,
                text: text.to_string(),
            };
        }
    }

    if let Some((label, rest)) = split_list_label(line) {
        return DisplayNode::ListItem {
            label: label.to_string(),
            spans: format_inline(rest),
        };
    }

    if line.trim().is_empty() {
        return DisplayNode::Spacer;
    }

    DisplayNode::Paragraph(format_inline(line))
}

/// Matches `^\d+\.\s` and returns (`"N."`, remainder after the whitespace).
fn split_list_label(line: &str) -> Option<(&str, &str)> {
    let digits_end = line.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let after_digits = line[digits_end..].strip_prefix('.')?;
    let mut chars = after_digits.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some((&line[..=digits_end], chars.as_str())),
        _ => None,
    }
}

#[derive(Clone, Copy)]
enum InlineKind {
    Strong,
    Emphasis,
    Math { display: bool },
}

// `**` must be tried before `*`.
const INLINE_RULES: [(&str, &str, InlineKind); 4] = [
    ("**", "**", InlineKind::Strong),
    ("*", "*", InlineKind::Emphasis),
    ("\\(", "\\)", InlineKind::Math { display: false }),
    ("\\[", "\\]", InlineKind::Math { display: true }),
];

/// Splits one line into inline spans.
pub fn format_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        if let Some((span, consumed)) = match_delimited(rest) {
            if !plain.is_empty() {
                spans.push(Span::Text(std::mem::take(&mut plain)));
            }
            spans.push(span);
            rest = &rest[consumed..];
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            plain.push(c);
        }
        rest = chars.as_str();
    }

    if !plain.is_empty() {
        spans.push(Span::Text(plain));
    }
    spans
}

fn match_delimited(input: &str) -> Option<(Span, usize)> {
    for (open, close, kind) in INLINE_RULES {
        let Some(after) = input.strip_prefix(open) else {
            continue;
        };
        let Some(end) = after.find(close) else {
            continue;
        };
        let inner = &after[..end];
        let span = match kind {
            // An empty emphasis ("**" or "****") is just literal asterisks.
            InlineKind::Strong | InlineKind::Emphasis if inner.is_empty() => continue,
            InlineKind::Strong => Span::Strong(inner.to_string()),
            InlineKind::Emphasis => Span::Emphasis(inner.to_string()),
            InlineKind::Math { display } => Span::Math {
                tex: inner.to_string(),
                display,
            },
        };
        return Some((span, open.len() + end + close.len()));
    }
    None
}
