//! Opaque markers standing in for embedded code
//!
//! Before markup is scanned, every ERB tag is swapped for a marker such as
//! `erb7tag`, so code containing `<`, `>` or quotes can never confuse the tag
//! scanner. Text that already looks like a marker is swapped first, which
//! keeps generated markers unique within the document.

use std::borrow::Cow;
use std::collections::HashMap;

use unicode_width::UnicodeWidthStr;

use super::patterns::{ERB_TAG_RE, MARKER_RE, PRE_PLACEHOLDER_RE};

/// Side tables mapping markers back to the text they replaced
#[derive(Debug, Default, Clone)]
pub struct Placeholders {
    /// Marker-shaped text found in the source
    pre_existing: HashMap<String, String>,
    /// ERB tags, verbatim
    code_tags: HashMap<String, String>,
    next_id: usize,
}

impl Placeholders {
    /// Replace marker-shaped text, then every ERB tag, with fresh markers.
    ///
    /// Returns the rewritten body together with the tables needed to undo it.
    #[must_use]
    pub fn extract(body: &str) -> (String, Self) {
        let mut tables = Self::default();

        let body = PRE_PLACEHOLDER_RE.replace_all(body, |caps: &regex::Captures<'_>| {
            let marker = tables.next_marker();
            tables
                .pre_existing
                .insert(marker.clone(), caps[0].to_string());
            marker
        });
        let body = ERB_TAG_RE.replace_all(&body, |caps: &regex::Captures<'_>| {
            let marker = tables.next_marker();
            tables.code_tags.insert(marker.clone(), caps[0].to_string());
            marker
        });

        (body.into_owned(), tables)
    }

    fn next_marker(&mut self) -> String {
        let marker = format!("erb{}tag", self.next_id);
        self.next_id += 1;
        marker
    }

    /// The original ERB tag behind `marker`, if it is a code marker
    #[must_use]
    pub fn code_tag(&self, marker: &str) -> Option<&str> {
        self.code_tags.get(marker).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pre_existing.len() + self.code_tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Undo [`Placeholders::extract`]: code tags first, since their text can
    /// itself contain markers for pre-existing text.
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        let code = restore_from(&self.code_tags, text);
        restore_from(&self.pre_existing, &code).into_owned()
    }

    /// Display width of `text` once all markers are restored
    #[must_use]
    pub fn width(&self, text: &str) -> usize {
        if self.is_empty() {
            return text.width();
        }
        self.restore(text).width()
    }
}

fn restore_from<'t>(table: &HashMap<String, String>, text: &'t str) -> Cow<'t, str> {
    if table.is_empty() {
        return Cow::Borrowed(text);
    }
    MARKER_RE.replace_all(text, |caps: &regex::Captures<'_>| {
        table
            .get(&caps[0])
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    })
}
