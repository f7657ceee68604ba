//! Free-form text to prompt jobs.
//!
//! Two caller-selected modes:
//! - flat: one prompt per non-blank line, each line run through an ordered
//!   list of matchers (`<n>. text`, then `title: description`, then verbatim);
//! - sectioned: lines starting with `<n>.` open a section whose first line is
//!   the title and whose remaining lines form the description.
use serde::{Deserialize, Serialize};

use crate::generation::models::PromptJob;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    #[default]
    Flat,
    Sectioned,
}

/// Outcome of matching a single trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMatch<'a> {
    Numbered(&'a str),
    Titled { title: &'a str, description: &'a str },
    Plain(&'a str),
}

impl<'a> LineMatch<'a> {
    pub fn prompt(&self) -> &'a str {
        match *self {
            LineMatch::Numbered(text) => text,
            LineMatch::Titled { description, .. } => description,
            LineMatch::Plain(line) => line,
        }
    }
}

type Matcher = for<'a> fn(&'a str) -> Option<LineMatch<'a>>;

// Precedence is list order.
const LINE_MATCHERS: [Matcher; 3] = [match_numbered, match_titled, match_plain];

pub fn classify_line(line: &str) -> LineMatch<'_> {
    LINE_MATCHERS
        .iter()
        .find_map(|m| m(line))
        .unwrap_or(LineMatch::Plain(line))
}

/// `<digits>.` followed by optional whitespace and at least one character.
fn match_numbered(line: &str) -> Option<LineMatch<'_>> {
    let rest = strip_enumeration(line)?;
    (!rest.is_empty()).then_some(LineMatch::Numbered(rest))
}

/// Splits on the first colon that has a non-empty title before it and
/// non-blank text after it.
fn match_titled(line: &str) -> Option<LineMatch<'_>> {
    line.char_indices()
        .filter(|&(i, c)| c == ':' && i > 0)
        .find_map(|(i, _)| {
            let description = line[i + 1..].trim_start();
            (!description.is_empty()).then(|| LineMatch::Titled { title: &line[..i], description })
        })
}

fn match_plain(line: &str) -> Option<LineMatch<'_>> {
    Some(LineMatch::Plain(line))
}

/// Returns the text after a leading `<digits>.` marker (whitespace skipped),
/// or `None` when the line has no such marker.
fn strip_enumeration(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.').map(str::trim_start)
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Flat mode: one prompt per non-blank line.
pub fn parse_prompts(text: &str) -> Vec<String> {
    non_blank_lines(text)
        .map(|line| classify_line(line).prompt().to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSection {
    pub title: String,
    pub description: String,
}

impl PromptSection {
    pub fn full_prompt(&self) -> String {
        format!("{} - {}", self.title, self.description)
    }
}

/// Sectioned mode. Text before the first numbered line forms its own
/// section. Sections without both a title and a description are dropped,
/// so a lone `1. Title` line yields nothing.
pub fn parse_sections(text: &str) -> Vec<PromptSection> {
    let mut groups: Vec<Vec<&str>> = Vec::new();
    for line in non_blank_lines(text) {
        match groups.last_mut() {
            Some(group) if strip_enumeration(line).is_none() => group.push(line),
            _ => groups.push(vec![line]),
        }
    }

    groups
        .into_iter()
        .filter_map(|group| {
            let (head, body) = group.split_first()?;
            let title = strip_enumeration(head).unwrap_or(head).trim();
            let description = body.join(" ");
            let description = description.trim();
            if title.is_empty() || description.is_empty() {
                return None;
            }
            Some(PromptSection { title: title.to_string(), description: description.to_string() })
        })
        .collect()
}

/// Parse into indexed jobs; sectioned jobs keep their title and description.
pub fn parse_jobs(text: &str, mode: ParseMode) -> Vec<PromptJob> {
    match mode {
        ParseMode::Flat => parse_prompts(text)
            .into_iter()
            .enumerate()
            .map(|(index, text)| PromptJob::new(text, index))
            .collect(),
        ParseMode::Sectioned => parse_sections(text)
            .into_iter()
            .enumerate()
            .map(|(index, s)| PromptJob::new(s.full_prompt(), index).with_details(s.title, s.description))
            .collect(),
    }
}
