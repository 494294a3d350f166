//! Budget-constrained post composition.
//!
//! Assembles `prefix + separator + body + hashtag + signature` so the
//! result never exceeds the platform budget, truncating the body with an
//! ellipsis when needed. All lengths are counted in Unicode scalar values
//! (`char`s), the same unit the loader trims in, so budget arithmetic
//! never mixes units.

use crate::select::SelectedFact;

const ELLIPSIS: &str = "…";

/// Per-category presentation: a prefix and an optional hashtag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStyle {
    pub prefix: String,
    pub hashtag: Option<String>,
}

impl CategoryStyle {
    pub fn new(prefix: impl Into<String>) -> Self {
        CategoryStyle {
            prefix: prefix.into(),
            hashtag: None,
        }
    }

    pub fn with_hashtag(mut self, hashtag: impl Into<String>) -> Self {
        self.hashtag = Some(hashtag.into());
        self
    }
}

/// Immutable formatting configuration, passed in as a parameter so tests
/// can run with arbitrary styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    /// Hard character budget for the final post (280 on X).
    pub budget: usize,

    /// Fixed connector between prefix and body.
    pub separator: String,

    /// Appended to every post regardless of style.
    pub signature: String,

    /// Appended to the prefix when the fact is an anniversary hit.
    pub anniversary_marker: String,

    /// Category name → style, matched case-insensitively.
    pub styles: Vec<(String, CategoryStyle)>,

    /// Fallback for unknown or empty categories.
    pub default_style: CategoryStyle,
}

impl StyleConfig {
    /// Style lookup by category, falling back to the default style.
    pub fn style_for(&self, category: &str) -> &CategoryStyle {
        self.styles
            .iter()
            .find(|(name, _)| name.to_lowercase() == category.to_lowercase())
            .map(|(_, style)| style)
            .unwrap_or(&self.default_style)
    }
}

/// Compose the final post text. Output length is ≤ `style.budget` chars
/// for any body length, including degenerate styles where the fixed parts
/// alone meet or exceed the budget (the composed string is clamped, so
/// even an oversized prefix cannot push the output over).
pub fn compose(selected: &SelectedFact<'_>, style: &StyleConfig) -> String {
    let category_style = style.style_for(&selected.fact.category);

    let mut prefix = category_style.prefix.clone();
    if selected.anniversary_hit {
        // The marker lives inside the prefix so it is counted before the
        // body budget is computed.
        prefix.push_str(&style.anniversary_marker);
    }

    let mut tail = String::new();
    if let Some(hashtag) = &category_style.hashtag {
        tail.push_str(hashtag);
    }
    tail.push_str(&style.signature);

    let fixed = char_len(&prefix) + char_len(&style.separator) + char_len(&tail);
    let allowed = style.budget.saturating_sub(fixed);

    let body = truncate_body(&selected.fact.body, allowed);

    let composed = format!("{prefix}{}{body}{tail}", style.separator);
    if char_len(&composed) > style.budget {
        // Only reachable when the fixed parts alone exceed the budget;
        // the invariant outranks the fixed parts.
        return composed.chars().take(style.budget).collect();
    }
    composed
}

/// Cut `body` down to `allowed` chars, appending an ellipsis when there is
/// room for one. Zero `allowed` degrades to an empty body.
fn truncate_body(body: &str, allowed: usize) -> String {
    if char_len(body) <= allowed {
        return body.to_string();
    }
    let ellipsis_len = char_len(ELLIPSIS);
    if allowed > ellipsis_len {
        let mut cut: String = body.chars().take(allowed - ellipsis_len).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        body.chars().take(allowed).collect()
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
