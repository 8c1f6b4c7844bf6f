use serde::{Deserialize, Serialize};
use std::fmt;

/// A single facial landmark in a consistent unit space (normalized or pixel).
///
/// The engine is unit-agnostic: every metric is a ratio or an angle, so the
/// unit cancels as long as all points of one analysis share it. `z` is carried
/// for callers that have it but is ignored by all current measurements.
///
/// Coordinates must be finite. A NaN or infinite coordinate on a referenced
/// landmark fails the whole extraction (see [`crate::metrics::ExtractError`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl LandmarkPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// True when both planar coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Closed set of scored trait identifiers.
///
/// Shared by the extractor, the reference profiles and every scorer, so a
/// "missing trait" is an `Option`, never a runtime key-existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trait {
    #[serde(rename = "fWHR")]
    Fwhr,
    #[serde(rename = "canthalTilt")]
    CanthalTilt,
    #[serde(rename = "midToLowerRatio")]
    MidToLowerRatio,
    #[serde(rename = "jawToCheekRatio")]
    JawToCheekRatio,
    #[serde(rename = "phiRatio")]
    PhiRatio,
    #[serde(rename = "eyeSpacingRatio")]
    EyeSpacingRatio,
    #[serde(rename = "mouthNoseRatio")]
    MouthNoseRatio,
    #[serde(rename = "symmetry")]
    Symmetry,
}

impl Trait {
    pub const ALL: [Trait; 8] = [
        Trait::Fwhr,
        Trait::CanthalTilt,
        Trait::MidToLowerRatio,
        Trait::JawToCheekRatio,
        Trait::PhiRatio,
        Trait::EyeSpacingRatio,
        Trait::MouthNoseRatio,
        Trait::Symmetry,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Trait::Fwhr => "fWHR",
            Trait::CanthalTilt => "canthalTilt",
            Trait::MidToLowerRatio => "midToLowerRatio",
            Trait::JawToCheekRatio => "jawToCheekRatio",
            Trait::PhiRatio => "phiRatio",
            Trait::EyeSpacingRatio => "eyeSpacingRatio",
            Trait::MouthNoseRatio => "mouthNoseRatio",
            Trait::Symmetry => "symmetry",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Vertical facial thirds as percentages of total face height.
///
/// `upper + mid + lower == 100` up to rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Thirds {
    pub upper: f64,
    pub mid: f64,
    pub lower: f64,
}

/// The full set of extracted measurements for one face.
///
/// Immutable after extraction; downstream consumers that need a variant
/// (the potential projector) work on their own clone. Every scored trait is
/// optional so that partial sets — hand-built fixtures, reduced index maps —
/// degrade to "skip the trait" in every scorer instead of erroring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    #[serde(rename = "fWHR")]
    pub fwhr: Option<f64>,
    /// Degrees; positive = outer canthus physically above the inner.
    pub canthal_tilt: Option<f64>,
    pub mid_to_lower_ratio: Option<f64>,
    pub jaw_to_cheek_ratio: Option<f64>,
    pub phi_ratio: Option<f64>,
    pub eye_spacing_ratio: Option<f64>,
    pub mouth_nose_ratio: Option<f64>,
    /// 0–100, 100 = perfectly mirrored left/right.
    pub symmetry: Option<f64>,
    /// Degrees; mean interior jaw angle at the gonion. Not a scored trait.
    pub gonial_angle: Option<f64>,
    pub thirds: Thirds,
}

impl MetricSet {
    pub fn get(&self, t: Trait) -> Option<f64> {
        match t {
            Trait::Fwhr => self.fwhr,
            Trait::CanthalTilt => self.canthal_tilt,
            Trait::MidToLowerRatio => self.mid_to_lower_ratio,
            Trait::JawToCheekRatio => self.jaw_to_cheek_ratio,
            Trait::PhiRatio => self.phi_ratio,
            Trait::EyeSpacingRatio => self.eye_spacing_ratio,
            Trait::MouthNoseRatio => self.mouth_nose_ratio,
            Trait::Symmetry => self.symmetry,
        }
    }

    pub fn set(&mut self, t: Trait, value: f64) {
        let slot = match t {
            Trait::Fwhr => &mut self.fwhr,
            Trait::CanthalTilt => &mut self.canthal_tilt,
            Trait::MidToLowerRatio => &mut self.mid_to_lower_ratio,
            Trait::JawToCheekRatio => &mut self.jaw_to_cheek_ratio,
            Trait::PhiRatio => &mut self.phi_ratio,
            Trait::EyeSpacingRatio => &mut self.eye_spacing_ratio,
            Trait::MouthNoseRatio => &mut self.mouth_nose_ratio,
            Trait::Symmetry => &mut self.symmetry,
        };
        *slot = Some(value);
    }

    /// Number of scored traits carrying a value.
    pub fn len(&self) -> usize {
        Trait::ALL.iter().filter(|t| self.get(**t).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Qualitative face-shape bucket from fWHR and jaw/cheek ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FaceShape {
    #[serde(rename = "Square/Rectangle")]
    SquareRectangle,
    #[serde(rename = "Broad/Wide")]
    BroadWide,
    #[serde(rename = "Oblong/Oval")]
    OblongOval,
    #[serde(rename = "Hybrid")]
    Hybrid,
}

impl FaceShape {
    pub fn as_str(self) -> &'static str {
        match self {
            FaceShape::SquareRectangle => "Square/Rectangle",
            FaceShape::BroadWide => "Broad/Wide",
            FaceShape::OblongOval => "Oblong/Oval",
            FaceShape::Hybrid => "Hybrid",
        }
    }
}

/// Qualitative canthal-tilt bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TiltCategory {
    #[serde(rename = "Positive (Hunter)")]
    Positive,
    #[serde(rename = "Negative (Prey)")]
    Negative,
    #[serde(rename = "Neutral")]
    Neutral,
}

impl TiltCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TiltCategory::Positive => "Positive (Hunter)",
            TiltCategory::Negative => "Negative (Prey)",
            TiltCategory::Neutral => "Neutral",
        }
    }
}

/// Qualitative mid/lower-face proportion bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Proportions {
    #[serde(rename = "Long Midface")]
    LongMidface,
    #[serde(rename = "Compact Midface")]
    CompactMidface,
    #[serde(rename = "Balanced")]
    Balanced,
}

impl Proportions {
    pub fn as_str(self) -> &'static str {
        match self {
            Proportions::LongMidface => "Long Midface",
            Proportions::CompactMidface => "Compact Midface",
            Proportions::Balanced => "Balanced",
        }
    }
}

/// Qualitative jawline bucket from the gonial angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Jawline {
    #[serde(rename = "Square/Sharp")]
    SquareSharp,
    #[serde(rename = "Soft/Obtuse")]
    SoftObtuse,
    #[serde(rename = "Defined")]
    Defined,
}

impl Jawline {
    pub fn as_str(self) -> &'static str {
        match self {
            Jawline::SquareSharp => "Square/Sharp",
            Jawline::SoftObtuse => "Soft/Obtuse",
            Jawline::Defined => "Defined",
        }
    }
}

/// Qualitative classification of one extracted metric set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub face_shape: FaceShape,
    pub eye_tilt: TiltCategory,
    pub proportions: Proportions,
    pub jawline: Jawline,
}

/// Per-trait rarity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RarityLabel {
    #[serde(rename = "Extremely Rare")]
    ExtremelyRare,
    #[serde(rename = "Distinct")]
    Distinct,
    #[serde(rename = "Uncommon")]
    Uncommon,
    #[serde(rename = "Typical")]
    Typical,
}

impl RarityLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            RarityLabel::ExtremelyRare => "Extremely Rare",
            RarityLabel::Distinct => "Distinct",
            RarityLabel::Uncommon => "Uncommon",
            RarityLabel::Typical => "Typical",
        }
    }
}

/// Aggregate rarity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GlobalRarityLabel {
    #[serde(rename = "Statistically Unique")]
    StatisticallyUnique,
    #[serde(rename = "High Distinctiveness")]
    HighDistinctiveness,
    #[serde(rename = "Above Average")]
    AboveAverage,
    #[serde(rename = "Common Morphology")]
    CommonMorphology,
}

impl GlobalRarityLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            GlobalRarityLabel::StatisticallyUnique => "Statistically Unique",
            GlobalRarityLabel::HighDistinctiveness => "High Distinctiveness",
            GlobalRarityLabel::AboveAverage => "Above Average",
            GlobalRarityLabel::CommonMorphology => "Common Morphology",
        }
    }
}

/// Headline score label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverallLabel {
    #[serde(rename = "Elite")]
    Elite,
    #[serde(rename = "Exceptional")]
    Exceptional,
    #[serde(rename = "Above Average")]
    AboveAverage,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Average")]
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl OverallLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            OverallLabel::Elite => "Elite",
            OverallLabel::Exceptional => "Exceptional",
            OverallLabel::AboveAverage => "Above Average",
            OverallLabel::Good => "Good",
            OverallLabel::Average => "Average",
            OverallLabel::BelowAverage => "Below Average",
        }
    }
}

/// Per-trait rarity detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitRarity {
    #[serde(rename = "trait")]
    pub trait_id: Trait,
    pub value: f64,
    pub z_score: f64,
    /// 1–10 rarity magnitude.
    pub rarity: f64,
    pub label: RarityLabel,
}

/// Aggregate rarity result across all traits that had reference data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityReport {
    /// Mean of per-trait magnitudes, in [1, 10].
    pub score: f64,
    pub label: GlobalRarityLabel,
    pub details: Vec<TraitRarity>,
}

/// Fit of one metric set against one named market profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketScore {
    pub market: &'static str,
    pub description: &'static str,
    /// 0–100 integer percentage.
    pub score: u32,
    /// Traits that contributed; 0 means the profile had no data overlap.
    pub traits_scored: usize,
}

/// Market fit before and after the counterfactual adjustment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotentialScore {
    pub market: &'static str,
    pub current: u32,
    pub potential: u32,
    /// Signed; negative when the adjustment moves a trait away from the
    /// market mean.
    pub gain: i32,
}

/// Headline score with its qualitative label.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub score: u32,
    pub label: OverallLabel,
}

/// Complete analysis output for one landmark set.
///
/// Plain data for a presentation layer: numeric fields stay raw so the
/// consumer controls rounding and formatting. `rarity` is `None` when no
/// extracted trait overlapped the population table (insufficient data, not
/// an error).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub metrics: MetricSet,
    pub analysis: Analysis,
    pub rarity: Option<RarityReport>,
    pub market_fit: Vec<MarketScore>,
    pub potential: Vec<PotentialScore>,
    pub overall: OverallScore,
}
