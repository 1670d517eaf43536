//! Highlight spans for matched text.

use orgtree_core::{OrganizationNode, UserId};
use serde::Serialize;

use crate::query::Query;

/// Byte range `[start, end)` of a match within the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The field of a node (or one of its users) a highlight belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "field", rename_all = "camelCase")]
pub enum MatchField {
    Name,
    Description,
    #[serde(rename = "type")]
    Kind,
    UserName { user: UserId },
    UserEmail { user: UserId },
    UserTitle { user: UserId },
}

/// Matches of a query within one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldHighlight {
    #[serde(flatten)]
    pub field: MatchField,
    pub spans: Vec<Span>,
}

/// Every non-overlapping case-insensitive occurrence of `query` in `text`,
/// left to right, as byte spans of the original text.
///
/// The text is folded one character at a time, the same way the query is, so
/// every text `Query::is_in` accepts yields at least one span. A match that
/// starts or ends inside a character's folding covers the whole character.
pub fn highlight(query: &Query, text: &str) -> Vec<Span> {
    let needle: Vec<char> = query.as_str().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    // Folded characters and the index of the original character each came from.
    let mut folded = Vec::new();
    let mut origin = Vec::new();
    for (index, (_, c)) in chars.iter().enumerate() {
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.push(index);
        }
    }

    let mut spans = Vec::new();
    let mut at = 0;
    while at + needle.len() <= folded.len() {
        if folded[at..at + needle.len()] != needle[..] {
            at += 1;
            continue;
        }
        let first = origin[at];
        let last = origin[at + needle.len() - 1];
        let end = chars.get(last + 1).map_or(text.len(), |(offset, _)| *offset);
        spans.push(Span::new(chars[first].0, end));

        at += needle.len();
        while origin.get(at) == Some(&last) {
            at += 1;
        }
    }
    spans
}

/// Highlights for every field of `node` that contains `query`.
pub fn node_highlights(query: &Query, node: &OrganizationNode, search_users: bool) -> Vec<FieldHighlight> {
    let mut fields: Vec<(MatchField, &str)> = vec![(MatchField::Name, node.name.as_str())];
    if let Some(description) = &node.description {
        fields.push((MatchField::Description, description.as_str()));
    }
    fields.push((MatchField::Kind, node.kind.as_str()));
    if search_users {
        for user in &node.users {
            fields.push((MatchField::UserName { user: user.id }, user.name.as_str()));
            fields.push((MatchField::UserEmail { user: user.id }, user.email.as_str()));
            if let Some(title) = &user.title {
                fields.push((MatchField::UserTitle { user: user.id }, title.as_str()));
            }
        }
    }

    fields
        .into_iter()
        .filter_map(|(field, text)| {
            let spans = highlight(query, text);
            (!spans.is_empty()).then_some(FieldHighlight { field, spans })
        })
        .collect()
}
