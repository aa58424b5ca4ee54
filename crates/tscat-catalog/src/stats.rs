//! Translation progress counts.

use serde::Serialize;
use tscat_core::Status;

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub translated: usize,
    pub unfinished: usize,
    pub obsolete: usize,
}

impl Counts {
    fn add(&mut self, status: Status) {
        match status {
            Status::Translated => self.translated += 1,
            Status::Unfinished => self.unfinished += 1,
            Status::Obsolete => self.obsolete += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.translated + self.unfinished + self.obsolete
    }

    /// Share of live (non-obsolete) entries that are translated, 0.0..=1.0.
    /// A catalog with nothing live counts as complete.
    pub fn completion(&self) -> f64 {
        let live = self.translated + self.unfinished;
        if live == 0 {
            return 1.0;
        }
        self.translated as f64 / live as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextStats {
    pub name: String,
    #[serde(flatten)]
    pub counts: Counts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub language: String,
    pub totals: Counts,
    pub completion: f64,
    /// Contexts in document order.
    pub contexts: Vec<ContextStats>,
}

impl Catalog {
    pub fn stats(&self) -> Stats {
        let mut totals = Counts::default();
        let mut contexts: Vec<ContextStats> = Vec::new();
        for entry in self.entries() {
            totals.add(entry.status);
            let idx = match contexts.iter().position(|c| c.name == entry.context) {
                Some(idx) => idx,
                None => {
                    contexts.push(ContextStats {
                        name: entry.context.clone(),
                        counts: Counts::default(),
                    });
                    contexts.len() - 1
                }
            };
            contexts[idx].counts.add(entry.status);
        }
        Stats {
            language: self.language().to_string(),
            totals,
            completion: totals.completion(),
            contexts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tscat_core::{Entry, Header};

    #[test]
    fn test_counts_per_context() {
        let mut gone = Entry::translated("MainWindow", "Update", "Оновити");
        gone.status = Status::Obsolete;
        let catalog = Catalog::from_entries(
            Header::new("uk"),
            vec![
                Entry::translated("MainWindow", "&Quit", "&Вийти"),
                Entry::unfinished("SearchView", "No results"),
                Entry::translated("MainWindow", "&Stop", "&Зупинити"),
                gone,
            ],
        )
        .unwrap();

        let stats = catalog.stats();
        assert_eq!(stats.language, "uk");
        assert_eq!(
            stats.totals,
            Counts {
                translated: 2,
                unfinished: 1,
                obsolete: 1
            }
        );
        assert_eq!(stats.totals.total(), 4);
        assert!((stats.completion - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.contexts.len(), 2);
        assert_eq!(stats.contexts[0].name, "MainWindow");
        assert_eq!(stats.contexts[0].counts.translated, 2);
        assert_eq!(stats.contexts[0].counts.obsolete, 1);
        assert_eq!(stats.contexts[1].counts.unfinished, 1);
    }

    #[test]
    fn test_empty_catalog_is_complete() {
        let stats = Catalog::empty("uk").stats();
        assert_eq!(stats.totals.total(), 0);
        assert_eq!(stats.completion, 1.0);
        assert!(stats.contexts.is_empty());
    }

    #[test]
    fn test_context_stats_serialize_flat() {
        let stats = Catalog::from_entries(
            Header::new("uk"),
            vec![Entry::translated("ClearButton", "Clear", "Очистити")],
        )
        .unwrap()
        .stats();
        let json = serde_json::to_value(&stats.contexts[0]).unwrap();
        assert_eq!(json["name"], "ClearButton");
        assert_eq!(json["translated"], 1);
        assert_eq!(json["unfinished"], 0);
    }
}
