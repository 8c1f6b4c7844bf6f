//! morpho-core — facial anthropometrics and scoring engine.
//!
//! Deterministic, stateless transformation from an ordered facial-landmark
//! sequence to geometric ratios, a population-relative rarity score, named
//! market-fit scores with a counterfactual "potential" projection, and one
//! weighted headline score. Landmark detection and transport live outside
//! this crate; it only consumes the detector's output shape.
//!
//! Every function is referentially transparent given its inputs and the
//! compiled-in reference tables, so analyses may run concurrently with zero
//! coordination.

pub mod geometry;
pub mod landmarks;
pub mod market;
pub mod metrics;
pub mod overall;
pub mod profiles;
pub mod rarity;
pub mod stats;
pub mod types;

pub use metrics::ExtractError;
pub use profiles::{validate_tables, ReferenceProfile, MARKETS, POPULATION};
pub use stats::StatsError;
pub use types::{LandmarkPoint, MetricSet, Report, Trait};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// Run the full analysis pipeline on one landmark sequence.
///
/// Extraction is all-or-nothing; the scorers then consume the complete
/// metric set independently. `rarity` is `None` when no extracted trait
/// overlapped the population table.
pub fn analyze(landmarks: &[LandmarkPoint]) -> Result<Report, AnalyzeError> {
    let metric_set = metrics::extract(landmarks)?;
    let analysis = metrics::classify(&metric_set);

    let rarity = rarity::score_rarity(&metric_set, &POPULATION);
    if rarity.is_none() {
        tracing::warn!("no trait overlapped the population table; rarity omitted");
    }

    let market_fit = market::score_all_markets(&metric_set, &MARKETS)?;
    let potential = market::project_potential(&metric_set, &MARKETS)?;
    let overall = overall::score_overall(&metric_set);

    tracing::debug!(
        overall = overall.score,
        markets = market_fit.len(),
        rarity = rarity.as_ref().map(|r| r.score),
        "analysis complete"
    );

    Ok(Report {
        metrics: metric_set,
        analysis,
        rarity,
        market_fit,
        potential,
        overall,
    })
}
