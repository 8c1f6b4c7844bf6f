//! Static reference tables: population statistics and market profiles.
//!
//! These are compiled-in constants, versioned with the crate — scoring output
//! is tightly coupled to the exact numeric values. A `std <= 0` entry is a
//! configuration defect; [`validate_tables`] surfaces it at program start so
//! the scorers never meet it at run time.

use crate::stats::StatsError;
use crate::types::Trait;
use serde::Serialize;

/// Mean / standard-deviation pair for one trait's reference distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gaussian {
    pub mean: f64,
    pub std: f64,
}

const fn g(mean: f64, std: f64) -> Gaussian {
    Gaussian { mean, std }
}

/// A named, read-only table of per-trait reference distributions.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReferenceProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub traits: &'static [(Trait, Gaussian)],
}

impl ReferenceProfile {
    pub fn get(&self, t: Trait) -> Option<Gaussian> {
        self.traits
            .iter()
            .find(|(pt, _)| *pt == t)
            .map(|(_, stats)| *stats)
    }
}

/// General-population distribution per trait, for rarity scoring.
pub static POPULATION: ReferenceProfile = ReferenceProfile {
    name: "population",
    description: "General-population anthropometric reference",
    traits: &[
        (Trait::Fwhr, g(1.75, 0.1)),
        (Trait::CanthalTilt, g(1.0, 3.0)),
        (Trait::MidToLowerRatio, g(1.0, 0.15)),
        (Trait::JawToCheekRatio, g(0.75, 0.08)),
        (Trait::EyeSpacingRatio, g(1.0, 0.15)),
    ],
};

/// Named market profiles for fit scoring. Profiles never interact; each is
/// scored independently against the same metric set.
pub static MARKETS: [ReferenceProfile; 4] = [
    ReferenceProfile {
        name: "editorial",
        description: "High fashion, sharp features, unconventional beauty.",
        traits: &[
            (Trait::Fwhr, g(1.9, 0.15)),
            (Trait::CanthalTilt, g(6.0, 4.0)),
            (Trait::JawToCheekRatio, g(0.9, 0.1)),
            (Trait::MidToLowerRatio, g(1.0, 0.2)),
        ],
    },
    ReferenceProfile {
        name: "commercial",
        description: "Approachable, classic beauty, balanced proportions.",
        traits: &[
            (Trait::Fwhr, g(1.75, 0.08)),
            (Trait::CanthalTilt, g(2.0, 2.0)),
            (Trait::JawToCheekRatio, g(0.8, 0.05)),
            (Trait::MidToLowerRatio, g(1.0, 0.1)),
        ],
    },
    ReferenceProfile {
        name: "character",
        description: "Unconventional features, distinct deviations.",
        traits: &[
            (Trait::Fwhr, g(1.75, 0.3)),
            (Trait::CanthalTilt, g(0.0, 10.0)),
            (Trait::JawToCheekRatio, g(0.75, 0.2)),
        ],
    },
    ReferenceProfile {
        name: "ideal_golden",
        description: "Golden-ratio compliance and neoclassical canons.",
        traits: &[
            (Trait::PhiRatio, g(1.618, 0.12)),
            (Trait::EyeSpacingRatio, g(1.0, 0.15)),
            (Trait::MouthNoseRatio, g(1.618, 0.2)),
            (Trait::Fwhr, g(1.9, 0.15)),
        ],
    },
];

/// Fail-fast check over every shipped table.
///
/// Call once at program start; a failure means the binary ships a broken
/// reference table and must not score anything.
pub fn validate_tables() -> Result<(), StatsError> {
    let all = std::iter::once(&POPULATION).chain(MARKETS.iter());
    for profile in all {
        for (t, stats) in profile.traits {
            if !(stats.std > 0.0) {
                tracing::error!(
                    profile = profile.name,
                    trait_name = t.name(),
                    std = stats.std,
                    "reference table entry has non-positive std"
                );
                return Err(StatsError::NonPositiveStd(stats.std));
            }
        }
    }
    Ok(())
}
