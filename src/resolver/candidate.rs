use crate::matcher::MatchResult;
use crate::route::{ModuleKey, RouteDescription};
use std::sync::Arc;

/// Rejection reason of the condition stage.
pub const INVALID_CONDITION: &str = "Invalid condition";
/// Rejection reason of the path stage.
pub const PATH_DID_NOT_MATCH: &str = "Path did not match";
/// Rejection reason of the method stage.
pub const METHOD_DID_NOT_MATCH: &str = "Request method did not match";

/// A registered route paired with its match state during one resolution pass.
///
/// Stages never mutate a candidate; the path stage replaces it with a copy carrying
/// the new [`MatchResult`].
#[derive(Debug, Clone)]
pub struct RouteCandidate {
    pub module_key: ModuleKey,
    pub index: usize,
    pub description: Arc<RouteDescription>,
    pub match_result: MatchResult,
}

impl RouteCandidate {
    #[must_use]
    pub fn new(description: Arc<RouteDescription>) -> Self {
        Self {
            module_key: description.module_key.clone(),
            index: description.index,
            description,
            match_result: MatchResult::no_match(),
        }
    }

    #[must_use]
    pub fn with_match(self, match_result: MatchResult) -> Self {
        Self {
            match_result,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.match_result.parameter_count()
    }

    #[inline]
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.description.segment_count
    }

    #[inline]
    #[must_use]
    pub fn is_exact_match(&self) -> bool {
        self.match_result.is_exact()
    }
}

/// Candidates eliminated so far, grouped by reason in first-rejection order.
#[derive(Debug, Clone, Default)]
pub struct RejectionBucket {
    entries: Vec<(&'static str, Vec<RouteCandidate>)>,
}

impl RejectionBucket {
    pub fn reject(&mut self, reason: &'static str, candidate: RouteCandidate) {
        match self.entries.iter_mut().find(|(r, _)| *r == reason) {
            Some((_, rejected)) => rejected.push(candidate),
            None => self.entries.push((reason, vec![candidate])),
        }
    }

    /// Candidates rejected for `reason`, in rejection order.
    #[must_use]
    pub fn get(&self, reason: &str) -> &[RouteCandidate] {
        self.entries
            .iter()
            .find(|(r, _)| *r == reason)
            .map(|(_, rejected)| rejected.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[RouteCandidate])> {
        self.entries.iter().map(|(r, c)| (*r, c.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of rejected candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, c)| c.len()).sum()
    }

    /// Whether a route with this module key and index was rejected for any reason.
    #[must_use]
    pub fn contains(&self, module_key: &ModuleKey, index: usize) -> bool {
        self.entries
            .iter()
            .flat_map(|(_, c)| c.iter())
            .any(|c| c.module_key == *module_key && c.index == index)
    }
}

/// Run one filter stage.
///
/// `stage` returns `Ok` with the (possibly replaced) candidate to keep it, or `Err`
/// with the candidate to reject it under `reason`.
pub(crate) fn filter<F>(
    candidates: Vec<RouteCandidate>,
    reason: &'static str,
    rejections: &mut RejectionBucket,
    mut stage: F,
) -> Vec<RouteCandidate>
where
    F: FnMut(RouteCandidate) -> Result<RouteCandidate, RouteCandidate>,
{
    let mut survivors = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match stage(candidate) {
            Ok(kept) => survivors.push(kept),
            Err(rejected) => rejections.reject(reason, rejected),
        }
    }
    survivors
}
