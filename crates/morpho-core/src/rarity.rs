//! Population-relative rarity scoring.
//!
//! A trait is rare when its deviation from the population mean — in either
//! direction — is statistically unlikely. The two-tailed exceedance
//! probability of the z-score maps onto a bounded 1–10 magnitude on a log
//! scale, so "one in ten" and "one in ten thousand" land meaningfully apart.

use crate::profiles::ReferenceProfile;
use crate::stats;
use crate::types::{GlobalRarityLabel, MetricSet, RarityLabel, RarityReport, TraitRarity};

// --- Magnitude mapping ---
const RARITY_MIN: f64 = 1.0;
const RARITY_MAX: f64 = 10.0;
const LOG_SLOPE: f64 = 3.5;
/// Floor for the exceedance probability before the logarithm; the CDF
/// saturates to 1 for extreme z, which would otherwise send `log10` to -inf.
const MIN_PROBABILITY: f64 = 1e-12;

/// Magnitude for one trait from its two-tailed exceedance probability.
///
/// Monotonically decreasing in `p` (rarer ⇒ smaller `p` ⇒ higher score),
/// clamped to [1, 10]: z = 0 maps to exactly 1, |z| ≳ 4.3 saturates at 10.
fn magnitude(p: f64) -> f64 {
    (1.0 - LOG_SLOPE * p.max(MIN_PROBABILITY).log10()).clamp(RARITY_MIN, RARITY_MAX)
}

fn trait_label(magnitude: f64) -> RarityLabel {
    if magnitude > 8.0 {
        RarityLabel::ExtremelyRare
    } else if magnitude > 6.0 {
        RarityLabel::Distinct
    } else if magnitude > 4.0 {
        RarityLabel::Uncommon
    } else {
        RarityLabel::Typical
    }
}

fn global_label(score: f64) -> GlobalRarityLabel {
    if score > 7.0 {
        GlobalRarityLabel::StatisticallyUnique
    } else if score > 5.0 {
        GlobalRarityLabel::HighDistinctiveness
    } else if score > 3.0 {
        GlobalRarityLabel::AboveAverage
    } else {
        GlobalRarityLabel::CommonMorphology
    }
}

/// Score a metric set against a population profile.
///
/// Traits absent from the metric set are skipped without error; the aggregate
/// is the arithmetic mean over the traits that had data. Returns `None` when
/// zero traits overlap — insufficient data, a valid steady state for callers
/// to render as such.
pub fn score_rarity(metrics: &MetricSet, population: &ReferenceProfile) -> Option<RarityReport> {
    let mut details = Vec::new();
    let mut total = 0.0;

    for (t, g) in population.traits {
        let Some(value) = metrics.get(*t) else {
            continue;
        };
        let z = (value - g.mean) / g.std;
        if !z.is_finite() {
            tracing::warn!(trait_name = t.name(), value, "non-finite z-score, skipping trait");
            continue;
        }

        let p = 2.0 * (1.0 - stats::normal_cdf(z.abs()));
        let rarity = magnitude(p);
        total += rarity;
        details.push(TraitRarity {
            trait_id: *t,
            value,
            z_score: z,
            rarity,
            label: trait_label(rarity),
        });
    }

    if details.is_empty() {
        return None;
    }

    let score = total / details.len() as f64;
    Some(RarityReport {
        score,
        label: global_label(score),
        details,
    })
}
