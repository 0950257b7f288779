//! Final selection among method-stage survivors.

use super::candidate::RouteCandidate;

/// First survivor that matched without capturing parameters.
pub(crate) fn select_exact(survivors: &[RouteCandidate]) -> Option<&RouteCandidate> {
    survivors.iter().find(|c| c.is_exact_match())
}

/// Most specific parameterized survivor.
///
/// Fewest captured parameters first, then most path segments among those; ties
/// go to the earliest registered candidate.
pub(crate) fn select_best(survivors: &[RouteCandidate]) -> Option<&RouteCandidate> {
    let fewest_params = survivors.iter().map(RouteCandidate::parameter_count).min()?;
    let most_segments = survivors
        .iter()
        .filter(|c| c.parameter_count() == fewest_params)
        .map(RouteCandidate::segment_count)
        .max()?;
    survivors
        .iter()
        .find(|c| c.parameter_count() == fewest_params && c.segment_count() == most_segments)
}
