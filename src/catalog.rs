//! Pure operations over an already-fetched repository list: normalization,
//! the pinned heuristic, search and sorting.

use crate::models::{PinnedRepository, Repository};
use crate::types::GitHubRepo;
use serde::Deserialize;
use std::cmp::Ordering;

/// Number of repositories shown in the pinned section.
pub const PINNED_LIMIT: usize = 6;

/// Drop forks and archived repositories, normalize, and order by stars.
///
/// The sort is stable, so repositories with equal star counts keep the
/// provider's order.
pub fn normalize_listing(repos: Vec<GitHubRepo>) -> Vec<Repository> {
    let mut listing: Vec<Repository> = repos
        .into_iter()
        .filter(|repo| !repo.fork && !repo.archived)
        .map(Repository::from)
        .collect();
    sort_repos(&mut listing, SortMode::Stars);
    listing
}

/// The provider does not expose a user's pin selection, so the most starred
/// repositories stand in for it.
pub fn derive_pinned(repos: &[Repository]) -> Vec<PinnedRepository> {
    repos
        .iter()
        .take(PINNED_LIMIT)
        .cloned()
        .map(PinnedRepository::pinned)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Stars,
    Updated,
    Alphabetical,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Stars, SortMode::Updated, SortMode::Alphabetical];

    /// Parse a query-string value, falling back to [`SortMode::Stars`].
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("updated") => SortMode::Updated,
            Some("alphabetical") => SortMode::Alphabetical,
            _ => SortMode::Stars,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Stars => "stars",
            SortMode::Updated => "updated",
            SortMode::Alphabetical => "alphabetical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Stars => "Stars",
            SortMode::Updated => "Updated",
            SortMode::Alphabetical => "A-Z",
        }
    }
}

/// Compare two names the way a human-facing, case-insensitive listing would:
/// letters compare ignoring case, and on a tie lowercase comes first.
///
/// Beyond letter case this is plain code point order, not full collation:
/// punctuation and digits may order differently than `en` collation
/// (`"a_b"` sorts after `"a1"` here).
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}

pub fn sort_repos(repos: &mut [Repository], mode: SortMode) {
    match mode {
        SortMode::Stars => repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count)),
        SortMode::Updated => repos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortMode::Alphabetical => repos.sort_by(|a, b| locale_compare(&a.name, &b.name)),
    }
}

/// Case-insensitive substring search over name, description and language.
pub fn filter_repos(repos: &[Repository], query: &str) -> Vec<Repository> {
    if query.is_empty() {
        return repos.to_vec();
    }

    let needle = query.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);

    repos
        .iter()
        .filter(|repo| {
            contains(&repo.name)
                || repo.description.as_deref().is_some_and(contains)
                || repo.language.as_deref().is_some_and(contains)
        })
        .cloned()
        .collect()
}

/// Search text and sort order applied to the projects list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepoQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: Option<String>,
}

impl RepoQuery {
    pub fn new(q: impl Into<String>, sort: SortMode) -> Self {
        RepoQuery {
            q: q.into(),
            sort: Some(sort.as_str().to_string()),
        }
    }

    pub fn sort_mode(&self) -> SortMode {
        SortMode::parse(self.sort.as_deref())
    }

    /// Recompute the visible list from the full source list.
    pub fn apply(&self, repos: &[Repository]) -> Vec<Repository> {
        let mut visible = filter_repos(repos, &self.q);
        sort_repos(&mut visible, self.sort_mode());
        visible
    }
}
