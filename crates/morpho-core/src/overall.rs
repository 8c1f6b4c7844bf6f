//! Headline score aggregation.
//!
//! A fixed, individually weighted panel of metrics, each scored by Gaussian
//! falloff around its ideal with a per-metric tolerance. The weighted mean is
//! taken over only the metrics actually present, re-normalizing the weights,
//! so a partial set still produces a meaningful headline number.

use crate::types::{MetricSet, OverallLabel, OverallScore, Trait};

struct PanelEntry {
    trait_id: Trait,
    weight: f64,
    ideal: f64,
    /// Tolerance as a fraction of the ideal.
    tolerance_fraction: f64,
}

const fn entry(trait_id: Trait, weight: f64, ideal: f64, tolerance_fraction: f64) -> PanelEntry {
    PanelEntry {
        trait_id,
        weight,
        ideal,
        tolerance_fraction,
    }
}

/// Scored panel; weights sum to 1.0 when every metric is present.
/// Symmetry is held to the tightest tolerance, canthal tilt the loosest.
const PANEL: [PanelEntry; 6] = [
    entry(Trait::Symmetry, 0.20, 100.0, 0.10),
    entry(Trait::PhiRatio, 0.20, 1.618, 0.15),
    entry(Trait::Fwhr, 0.20, 1.9, 0.25),
    entry(Trait::CanthalTilt, 0.15, 6.0, 0.40),
    entry(Trait::JawToCheekRatio, 0.15, 0.9, 0.25),
    entry(Trait::MidToLowerRatio, 0.10, 1.0, 0.25),
];

/// Returned when no panel metric is present at all.
const NEUTRAL: OverallScore = OverallScore {
    score: 50,
    label: OverallLabel::Average,
};

/// Gaussian falloff sub-score: 100 at the ideal, symmetric in the deviation.
fn sub_score(value: f64, ideal: f64, tolerance_fraction: f64) -> f64 {
    let tolerance = ideal * tolerance_fraction;
    let deviation = (value - ideal) / tolerance;
    100.0 * (-(deviation * deviation)).exp()
}

fn label_for(score: u32) -> OverallLabel {
    if score >= 90 {
        OverallLabel::Elite
    } else if score >= 80 {
        OverallLabel::Exceptional
    } else if score >= 70 {
        OverallLabel::AboveAverage
    } else if score >= 60 {
        OverallLabel::Good
    } else if score >= 50 {
        OverallLabel::Average
    } else {
        OverallLabel::BelowAverage
    }
}

/// Aggregate the panel into one 0–100 headline score plus label.
pub fn score_overall(metrics: &MetricSet) -> OverallScore {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for e in &PANEL {
        let Some(value) = metrics.get(e.trait_id) else {
            continue;
        };
        weighted_sum += e.weight * sub_score(value, e.ideal, e.tolerance_fraction);
        weight_total += e.weight;
    }

    if weight_total == 0.0 {
        return NEUTRAL;
    }

    let score = (weighted_sum / weight_total).round().clamp(0.0, 100.0) as u32;
    OverallScore {
        score,
        label: label_for(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal_metrics() -> MetricSet {
        let mut m = MetricSet::default();
        for e in &PANEL {
            m.set(e.trait_id, e.ideal);
        }
        m
    }

    #[test]
    fn test_panel_weights_sum_to_one() {
        let total: f64 = PANEL.iter().map(|e| e.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_ideals_score_hundred() {
        let result = score_overall(&ideal_metrics());
        assert_eq!(result.score, 100);
        assert_eq!(result.label, OverallLabel::Elite);
    }

    #[test]
    fn test_sub_score_peaks_at_ideal() {
        assert!((sub_score(1.618, 1.618, 0.15) - 100.0).abs() < 1e-12);
        assert!(sub_score(1.7, 1.618, 0.15) < 100.0);
    }

    #[test]
    fn test_sub_score_symmetric_around_ideal() {
        let above = sub_score(2.0, 1.9, 0.25);
        let below = sub_score(1.8, 1.9, 0.25);
        assert!((above - below).abs() < 1e-12);
    }

    #[test]
    fn test_weights_renormalize_over_present_metrics() {
        // Only one panel metric present, exactly at its ideal: a perfect
        // score, not one diluted by absent metrics.
        let mut m = MetricSet::default();
        m.set(Trait::PhiRatio, 1.618);
        assert_eq!(score_overall(&m).score, 100);
    }

    #[test]
    fn test_empty_set_returns_neutral_default() {
        let result = score_overall(&MetricSet::default());
        assert_eq!(result.score, 50);
        assert_eq!(result.label, OverallLabel::Average);
    }

    #[test]
    fn test_score_decreases_with_deviation() {
        let mut near = ideal_metrics();
        near.set(Trait::Fwhr, 1.95);
        let mut far = ideal_metrics();
        far.set(Trait::Fwhr, 2.4);

        let ideal = score_overall(&ideal_metrics()).score;
        let near = score_overall(&near).score;
        let far = score_overall(&far).score;
        assert!(near <= ideal);
        assert!(far < near);
    }

    #[test]
    fn test_label_bands() {
        assert_eq!(label_for(100), OverallLabel::Elite);
        assert_eq!(label_for(90), OverallLabel::Elite);
        assert_eq!(label_for(89), OverallLabel::Exceptional);
        assert_eq!(label_for(79), OverallLabel::AboveAverage);
        assert_eq!(label_for(69), OverallLabel::Good);
        assert_eq!(label_for(59), OverallLabel::Average);
        assert_eq!(label_for(49), OverallLabel::BelowAverage);
    }
}
