//! Advisory consistency checks between source text and translation.

use std::collections::BTreeSet;

use serde::Serialize;
use tscat_core::{Entry, Status};

use crate::catalog::Catalog;
use crate::format::placeholders;

/// One problem found in a translated entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub context: String,
    pub source: String,
    pub translation: String,
    pub issue: Issue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// `%N` used on one side only.
    Placeholders {
        missing: Vec<usize>,
        extra: Vec<usize>,
    },
    /// Different number of `&X` mnemonics.
    Accelerator { source: usize, translation: usize },
    /// Different trailing punctuation; empty string means none.
    Punctuation {
        source: String,
        translation: String,
    },
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placeholders { missing, extra } => {
                let list = |nums: &[usize]| {
                    nums.iter()
                        .map(|n| format!("%{n}"))
                        .collect::<Vec<_>>()
                        .join(" ")
                };
                match (missing.is_empty(), extra.is_empty()) {
                    (false, true) => write!(f, "missing placeholders {}", list(missing)),
                    (true, false) => write!(f, "extra placeholders {}", list(extra)),
                    _ => write!(
                        f,
                        "missing placeholders {}, extra placeholders {}",
                        list(missing),
                        list(extra)
                    ),
                }
            }
            Self::Accelerator { source, translation } => write!(
                f,
                "accelerator count differs: {source} in source, {translation} in translation"
            ),
            Self::Punctuation { source, translation } => write!(
                f,
                "trailing punctuation differs: '{source}' vs '{translation}'"
            ),
        }
    }
}

/// Lint every translated entry. Unfinished and obsolete entries are skipped;
/// they are never shown.
pub fn check(catalog: &Catalog) -> Vec<Finding> {
    catalog
        .entries()
        .iter()
        .filter(|e| e.status == Status::Translated && !e.translation.is_empty())
        .flat_map(|entry| issues(entry).into_iter().map(move |issue| finding(entry, issue)))
        .collect()
}

fn finding(entry: &Entry, issue: Issue) -> Finding {
    Finding {
        context: entry.context.clone(),
        source: entry.source.clone(),
        translation: entry.translation.clone(),
        issue,
    }
}

fn issues(entry: &Entry) -> Vec<Issue> {
    let (src, tr) = (entry.source.as_str(), entry.translation.as_str());
    let mut found = Vec::new();

    let (in_src, in_tr) = (placeholders(src), placeholders(tr));
    if in_src != in_tr {
        found.push(Issue::Placeholders {
            missing: difference(&in_src, &in_tr),
            extra: difference(&in_tr, &in_src),
        });
    }

    let (acc_src, acc_tr) = (accelerators(src), accelerators(tr));
    if acc_src != acc_tr {
        found.push(Issue::Accelerator {
            source: acc_src,
            translation: acc_tr,
        });
    }

    let (end_src, end_tr) = (trailing_punctuation(src), trailing_punctuation(tr));
    if end_src != end_tr {
        found.push(Issue::Punctuation {
            source: end_src.to_string(),
            translation: end_tr.to_string(),
        });
    }

    found
}

fn difference(a: &BTreeSet<usize>, b: &BTreeSet<usize>) -> Vec<usize> {
    a.difference(b).copied().collect()
}

/// Number of `&X` mnemonics. `&&` is a literal ampersand, and an `&` before
/// whitespace or at the end is not a mnemonic.
fn accelerators(text: &str) -> usize {
    let mut count = 0;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '&' {
            continue;
        }
        match chars.next() {
            Some('&') | None => {}
            Some(next) if next.is_whitespace() => {}
            Some(_) => count += 1,
        }
    }
    count
}

/// Sentence-ending mark of `text`; `…` and `...` both count as an ellipsis.
fn trailing_punctuation(text: &str) -> &'static str {
    let text = text.trim_end();
    if text.ends_with("...") || text.ends_with('…') {
        return "...";
    }
    match text.chars().last() {
        Some('.') => ".",
        Some(':') => ":",
        Some('?') => "?",
        Some('!') => "!",
        _ => "",
    }
}
