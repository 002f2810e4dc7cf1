//! Fuzzy search over project and task names
//!
//! Scoring combines the normalized Levenshtein ratio of the whole name with
//! a per-token score, so `"front"` finds `"Frontend Development"` and word
//! order matters less than spelling.

use std::cmp::Ordering;

use serde::Serialize;

use crate::client::models::{Project, Task};

/// Matches scoring below this are discarded
pub const MIN_SCORE: f64 = 0.5;

/// Maximum number of results returned
pub const MAX_RESULTS: usize = 10;

/// Project name shown for tasks whose project is unknown
pub const NO_PROJECT: &str = "No Project";

/// Score a token gets when the query token is a prefix of it
const PREFIX_BASE: f64 = 0.85;

/// Weight of a plain edit-distance ratio; only identical strings and
/// prefixes score near 1.0
const FUZZY_WEIGHT: f64 = 0.9;

/// Per extra candidate token, capped
const EXTRA_TOKEN_PENALTY: f64 = 0.05;
const MAX_EXTRA_PENALTY: f64 = 0.2;

/// What a result points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Project,
    Task,
}

/// Something that can be found
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    pub kind: SearchKind,
    pub id: u64,
    pub name: String,
    /// Owning project, tasks only
    pub project_name: Option<String>,
}

/// A ranked match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: SearchKind,
    pub id: u64,
    pub name: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

/// Build candidates from the project and task lists, skipping archived ones.
pub fn candidates(projects: &[Project], tasks: &[Task]) -> Vec<SearchCandidate> {
    let project_candidates = projects
        .iter()
        .filter(|p| !p.archived)
        .map(|p| SearchCandidate {
            kind: SearchKind::Project,
            id: p.id,
            name: p.name.clone(),
            project_name: None,
        });

    let task_candidates = tasks.iter().filter(|t| !t.archived).map(|t| {
        let project_name = t
            .project_id
            .and_then(|pid| projects.iter().find(|p| p.id == pid))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| NO_PROJECT.to_string());
        SearchCandidate {
            kind: SearchKind::Task,
            id: t.id,
            name: t.name.clone(),
            project_name: Some(project_name),
        }
    });

    project_candidates.chain(task_candidates).collect()
}

/// Rank `candidates` against `query`.
///
/// Returns at most [`MAX_RESULTS`] matches scoring at least [`MIN_SCORE`],
/// best first. An empty query or candidate list yields no results.
pub fn search(query: &str, candidates: &[SearchCandidate]) -> Vec<SearchResult> {
    let query = normalize(query);
    if query.is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = candidates
        .iter()
        .filter_map(|c| {
            let score = score(&query, &normalize(&c.name));
            (score >= MIN_SCORE).then(|| SearchResult {
                kind: c.kind,
                id: c.id,
                name: c.name.clone(),
                score,
                project_name: c.project_name.clone(),
            })
        })
        .collect();

    results.sort_by(compare);
    results.truncate(MAX_RESULTS);
    results
}

fn compare(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.kind.cmp(&b.kind))
        .then_with(|| a.id.cmp(&b.id))
}

/// Lowercase and collapse whitespace
fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Similarity of two normalized strings in `[0, 1]`
fn score(query: &str, name: &str) -> f64 {
    if query == name {
        return 1.0;
    }
    if name.is_empty() {
        return 0.0;
    }
    let whole = strsim::normalized_levenshtein(query, name) * FUZZY_WEIGHT;
    whole.max(token_score(query, name)).clamp(0.0, 1.0)
}

fn token_score(query: &str, name: &str) -> f64 {
    let query_tokens: Vec<&str> = query.split(' ').collect();
    let name_tokens: Vec<&str> = name.split(' ').collect();

    let total: f64 = query_tokens
        .iter()
        .map(|qt| {
            name_tokens
                .iter()
                .map(|nt| token_similarity(qt, nt))
                .fold(0.0, f64::max)
        })
        .sum();
    let average = total / query_tokens.len() as f64;

    let extra = name_tokens.len().saturating_sub(query_tokens.len()) as f64;
    let penalty = (extra * EXTRA_TOKEN_PENALTY).min(MAX_EXTRA_PENALTY);
    average * (1.0 - penalty)
}

fn token_similarity(query_token: &str, name_token: &str) -> f64 {
    if query_token == name_token {
        return 1.0;
    }
    let ratio = strsim::normalized_levenshtein(query_token, name_token) * FUZZY_WEIGHT;
    let query_len = query_token.chars().count();
    if query_len >= 2 && name_token.starts_with(query_token) {
        let coverage = query_len as f64 / name_token.chars().count() as f64;
        return ratio.max(PREFIX_BASE + (1.0 - PREFIX_BASE) * coverage);
    }
    ratio
}
