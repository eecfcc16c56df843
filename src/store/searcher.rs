/// Project searcher with fuzzy matching
///
/// Finds projects by name.

use crate::store::{ProjectRecord, ProjectStore};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// A project paired with its match score
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub project: ProjectRecord,
    pub score: i64,
}

/// Handles project searching with fuzzy matching
pub struct Searcher<'a> {
    store: &'a ProjectStore,
    matcher: SkimMatcherV2,
}

impl<'a> Searcher<'a> {
    pub fn new(store: &'a ProjectStore) -> Self {
        Self {
            store,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Search project names, best match first
    ///
    /// Ties keep the projects' display order. An empty query returns nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = self
            .store
            .get_all()
            .into_iter()
            .filter_map(|project| {
                self.matcher
                    .fuzzy_match(&project.name, query)
                    .map(|score| SearchResult { project, score })
            })
            .collect();

        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(limit);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(names: &[&str]) -> (ProjectStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = ProjectStore::open(temp.path().join("projects.json")).unwrap();
        for name in names {
            let dir = temp.path().join(name);
            fs::create_dir_all(&dir).unwrap();
            store
                .add(name, &dir.to_string_lossy(), "", "", None)
                .unwrap();
        }
        (store, temp)
    }

    #[test]
    fn test_fuzzy_search() {
        let (store, _temp) = setup(&["billing-api", "web-frontend", "infra"]);
        let searcher = Searcher::new(&store);

        let results = searcher.search("bapi", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].project.name, "billing-api");
    }

    #[test]
    fn test_best_match_first() {
        let (store, _temp) = setup(&["web-frontend", "web"]);
        let searcher = Searcher::new(&store);

        let results = searcher.search("web", 10);
        assert_eq!(results.len(), 2);
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_limit_and_empty_query() {
        let (store, _temp) = setup(&["a1", "a2", "a3"]);
        let searcher = Searcher::new(&store);

        assert_eq!(searcher.search("a", 2).len(), 2);
        assert!(searcher.search("  ", 10).is_empty());
    }
}
