

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::similarity::{cosine_similarity, distance_to_similarity, SimilarityError};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub category: String,
}

impl Document {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            category: category.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category: category.into(),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub text: String,
    pub similarity: f64,
    pub category: String,
}

impl ScoredResult {
    pub fn new(document: &Document, similarity: f64) -> Self {
        Self {
            text: document.text.clone(),
            similarity,
            category: document.category.clone(),
        }
    }

    /// For backends that report cosine distance rather than similarity.
    pub fn from_distance(document: &Document, distance: f64) -> Self {
        Self::new(document, distance_to_similarity(distance))
    }
}


/// Validates a caller-supplied signed limit.
pub fn parse_limit(raw: i64) -> Result<usize, SimilarityError> {
    if raw < 1 {
        return Err(SimilarityError::InvalidArgument(format!(
            "limit must be at least 1, got {raw}"
        )));
    }
    usize::try_from(raw)
        .map_err(|_| SimilarityError::InvalidArgument(format!("limit out of range: {raw}")))
}


fn check_limit(limit: Option<usize>) -> Result<(), SimilarityError> {
    match limit {
        Some(0) => Err(SimilarityError::InvalidArgument(
            "limit must be at least 1, got 0".to_string(),
        )),
        _ => Ok(()),
    }
}


/// Sorts pre-scored results by descending similarity and applies `limit`.
///
/// Equal scores keep their input order.
pub fn rank_scored(
    mut results: Vec<ScoredResult>,
    limit: Option<usize>,
) -> Result<Vec<ScoredResult>, SimilarityError> {
    check_limit(limit)?;

    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    if let Some(limit) = limit {
        results.truncate(limit);
    }

    Ok(results)
}


/// Scores every corpus entry against `query` and returns them best-first.
///
/// Validation happens before any output is produced: a zero limit, an
/// empty query or any dimension mismatch fails the whole call.
pub fn rank_by_similarity(
    query: &[f32],
    corpus: &[(Document, Vec<f32>)],
    limit: Option<usize>,
) -> Result<Vec<ScoredResult>, SimilarityError> {
    check_limit(limit)?;

    if query.is_empty() {
        return Err(SimilarityError::InvalidArgument(
            "query vector is empty".to_string(),
        ));
    }

    let scored = corpus
        .iter()
        .map(|(document, vector)| {
            cosine_similarity(query, vector).map(|score| ScoredResult::new(document, score))
        })
        .collect::<Result<Vec<_>, _>>()?;

    rank_scored(scored, limit)
}
