//! Metric extraction: landmark sequence → [`MetricSet`].
//!
//! Maps the fixed index map onto a stable set of semantic ratios and angles.
//! Extraction is all-or-nothing: a short sequence, a non-finite coordinate or
//! degenerate geometry fails the whole call, because every downstream scorer
//! assumes a complete metric set.

use crate::geometry::{self, YAxis};
use crate::landmarks::{index, MIN_LANDMARKS};
use crate::types::{
    Analysis, FaceShape, Jawline, LandmarkPoint, MetricSet, Proportions, Thirds, TiltCategory,
};
use thiserror::Error;

// --- Classification thresholds (contract values) ---
const TILT_POSITIVE_DEG: f64 = 4.0;
const TILT_NEGATIVE_DEG: f64 = -2.0;
const SHAPE_SQUARE_JAW_RATIO: f64 = 0.9;
const SHAPE_BROAD_FWHR: f64 = 1.9;
const SHAPE_OBLONG_FWHR: f64 = 1.6;
const PROPORTIONS_LONG: f64 = 1.1;
const PROPORTIONS_COMPACT: f64 = 0.9;
const JAWLINE_SQUARE_DEG: f64 = 110.0;
const JAWLINE_SOFT_DEG: f64 = 125.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("landmark sequence too short: need {required} points, got {actual}")]
    InsufficientLandmarks { required: usize, actual: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    InvalidPoint { index: usize },
    #[error("degenerate geometry: zero-length {measure}")]
    DegenerateGeometry { measure: &'static str },
}

/// Divide with a zero-denominator guard. The denominators here are face
/// spans, so a zero means coincident landmarks, not a valid face.
fn ratio(num: f64, den: f64, measure: &'static str) -> Result<f64, ExtractError> {
    if den <= 0.0 {
        return Err(ExtractError::DegenerateGeometry { measure });
    }
    Ok(num / den)
}

/// Elevation of the outer canthus over the inner canthus, in degrees.
///
/// Screen-space inverted via [`YAxis::Down`], then folded so the mirrored eye
/// (outer corner toward smaller x) reports the same sign convention: positive
/// means the outer corner sits physically higher.
fn canthal_elevation(inner: &LandmarkPoint, outer: &LandmarkPoint) -> f64 {
    let raw = geometry::angle_degrees(inner, outer, YAxis::Down);
    if raw > 90.0 {
        180.0 - raw
    } else if raw < -90.0 {
        -180.0 - raw
    } else {
        raw
    }
}

/// Extract the full metric set from an ordered landmark sequence.
///
/// The sequence must cover the index map ([`MIN_LANDMARKS`] points); a full
/// 468-point Face Mesh detection always does.
pub fn extract(landmarks: &[LandmarkPoint]) -> Result<MetricSet, ExtractError> {
    if landmarks.len() < MIN_LANDMARKS {
        return Err(ExtractError::InsufficientLandmarks {
            required: MIN_LANDMARKS,
            actual: landmarks.len(),
        });
    }

    let point = |i: usize| -> Result<&LandmarkPoint, ExtractError> {
        let p = &landmarks[i];
        if p.is_finite() {
            Ok(p)
        } else {
            Err(ExtractError::InvalidPoint { index: i })
        }
    };

    let trichion = point(index::TRICHION)?;
    let glabella = point(index::GLABELLA)?;
    let nasion = point(index::NASION)?;
    let nose_tip = point(index::NOSE_TIP)?;
    let menton = point(index::MENTON)?;
    let eye_left_outer = point(index::EYE_LEFT_OUTER)?;
    let eye_left_inner = point(index::EYE_LEFT_INNER)?;
    let eye_right_inner = point(index::EYE_RIGHT_INNER)?;
    let eye_right_outer = point(index::EYE_RIGHT_OUTER)?;
    let zygoma_left = point(index::ZYGOMA_LEFT)?;
    let zygoma_right = point(index::ZYGOMA_RIGHT)?;
    let gonion_left = point(index::GONION_LEFT)?;
    let gonion_right = point(index::GONION_RIGHT)?;
    let nose_alare_left = point(index::NOSE_ALARE_LEFT)?;
    let nose_alare_right = point(index::NOSE_ALARE_RIGHT)?;
    let mouth_left = point(index::MOUTH_LEFT)?;
    let mouth_right = point(index::MOUTH_RIGHT)?;

    // Bizygomatic width over glabella-to-chin height.
    let bizygoma = geometry::distance(zygoma_left, zygoma_right);
    let upper_face_height = geometry::distance(glabella, menton);
    let fwhr = ratio(bizygoma, upper_face_height, "glabella-menton height")?;

    // Midface over lower face.
    let midface = geometry::distance(glabella, nose_tip);
    let lower_face = geometry::distance(nose_tip, menton);
    let mid_to_lower_ratio = ratio(midface, lower_face, "nose-menton height")?;

    // Bigonial (jaw) width relative to the cheeks.
    let bigonial = geometry::distance(gonion_left, gonion_right);
    let jaw_to_cheek_ratio = ratio(bigonial, bizygoma, "bizygomatic width")?;

    // Total face length over width, compared against phi downstream.
    let face_length = geometry::distance(trichion, menton);
    let phi_ratio = ratio(face_length, bizygoma, "bizygomatic width")?;

    // Intercanthal distance over mean single-eye width.
    let intercanthal = geometry::distance(eye_left_inner, eye_right_inner);
    let eye_width = (geometry::distance(eye_left_inner, eye_left_outer)
        + geometry::distance(eye_right_inner, eye_right_outer))
        / 2.0;
    let eye_spacing_ratio = ratio(intercanthal, eye_width, "eye width")?;

    let mouth_width = geometry::distance(mouth_left, mouth_right);
    let nose_width = geometry::distance(nose_alare_left, nose_alare_right);
    let mouth_nose_ratio = ratio(mouth_width, nose_width, "nose width")?;

    let canthal_tilt = (canthal_elevation(eye_left_inner, eye_left_outer)
        + canthal_elevation(eye_right_inner, eye_right_outer))
        / 2.0;

    // Vertical thirds as percentages of their sum.
    let upper = geometry::distance(trichion, glabella);
    let mid = geometry::distance(glabella, nose_tip);
    let lower = geometry::distance(nose_tip, menton);
    let total = upper + mid + lower;
    if total <= 0.0 {
        return Err(ExtractError::DegenerateGeometry {
            measure: "vertical face height",
        });
    }
    let thirds = Thirds {
        upper: upper / total * 100.0,
        mid: mid / total * 100.0,
        lower: lower / total * 100.0,
    };

    // Symmetry index: relative left/right deviation from the facial midline
    // across three landmark pairs, subtracted from 100.
    let midline_x = (nasion.x + menton.x) / 2.0;
    let deviation = |left: &LandmarkPoint, right: &LandmarkPoint| -> f64 {
        let dist_l = (left.x - midline_x).abs();
        let dist_r = (right.x - midline_x).abs();
        let span = (dist_l + dist_r) / 2.0;
        if span == 0.0 {
            0.0
        } else {
            (dist_l - dist_r).abs() / span * 100.0
        }
    };
    let symmetry = (100.0
        - (deviation(gonion_left, gonion_right)
            + deviation(zygoma_left, zygoma_right)
            + deviation(eye_left_outer, eye_right_outer))
            / 3.0)
        .max(0.0);

    // Interior angle at each gonion between the ramus (toward the zygoma)
    // and the mandible body (toward the chin), averaged over both sides.
    let gonial_angle = (geometry::angle_between_degrees(gonion_left, zygoma_left, menton)
        + geometry::angle_between_degrees(gonion_right, zygoma_right, menton))
        / 2.0;

    tracing::debug!(
        fwhr,
        canthal_tilt,
        jaw_to_cheek_ratio,
        phi_ratio,
        symmetry,
        "metrics extracted"
    );

    Ok(MetricSet {
        fwhr: Some(fwhr),
        canthal_tilt: Some(canthal_tilt),
        mid_to_lower_ratio: Some(mid_to_lower_ratio),
        jaw_to_cheek_ratio: Some(jaw_to_cheek_ratio),
        phi_ratio: Some(phi_ratio),
        eye_spacing_ratio: Some(eye_spacing_ratio),
        mouth_nose_ratio: Some(mouth_nose_ratio),
        symmetry: Some(symmetry),
        gonial_angle: Some(gonial_angle),
        thirds,
    })
}

/// Face-shape bucket from fWHR and jaw/cheek ratio.
pub fn classify_face_shape(fwhr: f64, jaw_ratio: f64) -> FaceShape {
    if jaw_ratio > SHAPE_SQUARE_JAW_RATIO {
        FaceShape::SquareRectangle
    } else if fwhr > SHAPE_BROAD_FWHR {
        FaceShape::BroadWide
    } else if fwhr < SHAPE_OBLONG_FWHR {
        FaceShape::OblongOval
    } else {
        FaceShape::Hybrid
    }
}

/// Canthal-tilt bucket. Degrees above 4 read as positive ("hunter") tilt,
/// below -2 as negative.
pub fn classify_tilt(degrees: f64) -> TiltCategory {
    if degrees > TILT_POSITIVE_DEG {
        TiltCategory::Positive
    } else if degrees < TILT_NEGATIVE_DEG {
        TiltCategory::Negative
    } else {
        TiltCategory::Neutral
    }
}

/// Mid/lower proportion bucket; 1.0 is the balanced ideal.
pub fn classify_proportions(ratio: f64) -> Proportions {
    if ratio > PROPORTIONS_LONG {
        Proportions::LongMidface
    } else if ratio < PROPORTIONS_COMPACT {
        Proportions::CompactMidface
    } else {
        Proportions::Balanced
    }
}

/// Jawline bucket from the mean gonial angle.
pub fn classify_jawline(gonial_degrees: f64) -> Jawline {
    if gonial_degrees < JAWLINE_SQUARE_DEG {
        Jawline::SquareSharp
    } else if gonial_degrees > JAWLINE_SOFT_DEG {
        Jawline::SoftObtuse
    } else {
        Jawline::Defined
    }
}

/// Classify a metric set into its qualitative buckets.
///
/// A missing metric classifies as its neutral bucket, so partial sets stay
/// total; sets produced by [`extract`] always carry every value.
pub fn classify(metrics: &MetricSet) -> Analysis {
    Analysis {
        face_shape: classify_face_shape(
            metrics.fwhr.unwrap_or(1.75),
            metrics.jaw_to_cheek_ratio.unwrap_or(0.75),
        ),
        eye_tilt: classify_tilt(metrics.canthal_tilt.unwrap_or(0.0)),
        proportions: classify_proportions(metrics.mid_to_lower_ratio.unwrap_or(1.0)),
        jawline: classify_jawline(metrics.gonial_angle.unwrap_or(118.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::MIN_LANDMARKS;

    fn set(pts: &mut [LandmarkPoint], i: usize, x: f64, y: f64) {
        pts[i] = LandmarkPoint::new(x, y);
    }

    /// Synthetic frontal face with known geometry:
    /// bizygomatic 190, glabella-chin 100 (fWHR 1.9), bigonial 171
    /// (jaw ratio 0.9), equal mid/lower face (ratio 1.0), 6° canthal tilt,
    /// perfectly mirrored left/right.
    fn synthetic_face() -> Vec<LandmarkPoint> {
        let mut pts = vec![LandmarkPoint::new(0.0, 0.0); MIN_LANDMARKS];
        let tilt_rise = 30.0 * 6.0f64.to_radians().tan();

        set(&mut pts, index::TRICHION, 95.0, -60.0);
        set(&mut pts, index::GLABELLA, 95.0, 0.0);
        set(&mut pts, index::NASION, 95.0, 10.0);
        set(&mut pts, index::NOSE_TIP, 95.0, 50.0);
        set(&mut pts, index::MENTON, 95.0, 100.0);

        set(&mut pts, index::EYE_LEFT_INNER, 70.0, 20.0);
        set(&mut pts, index::EYE_LEFT_OUTER, 40.0, 20.0 - tilt_rise);
        set(&mut pts, index::EYE_RIGHT_INNER, 120.0, 20.0);
        set(&mut pts, index::EYE_RIGHT_OUTER, 150.0, 20.0 - tilt_rise);

        set(&mut pts, index::ZYGOMA_LEFT, 0.0, 30.0);
        set(&mut pts, index::ZYGOMA_RIGHT, 190.0, 30.0);
        set(&mut pts, index::GONION_LEFT, 9.5, 80.0);
        set(&mut pts, index::GONION_RIGHT, 180.5, 80.0);

        set(&mut pts, index::NOSE_ALARE_LEFT, 87.0, 55.0);
        set(&mut pts, index::NOSE_ALARE_RIGHT, 103.0, 55.0);
        set(&mut pts, index::MOUTH_LEFT, 80.0, 70.0);
        set(&mut pts, index::MOUTH_RIGHT, 110.0, 70.0);

        pts
    }

    #[test]
    fn test_extract_core_ratios() {
        let m = extract(&synthetic_face()).unwrap();
        assert!((m.fwhr.unwrap() - 1.9).abs() < 1e-9);
        assert!((m.jaw_to_cheek_ratio.unwrap() - 0.9).abs() < 1e-9);
        assert!((m.mid_to_lower_ratio.unwrap() - 1.0).abs() < 1e-9);
        assert!((m.phi_ratio.unwrap() - 160.0 / 190.0).abs() < 1e-9);
        assert!((m.mouth_nose_ratio.unwrap() - 1.875).abs() < 1e-9);
    }

    #[test]
    fn test_extract_canthal_tilt_both_eyes_agree() {
        let m = extract(&synthetic_face()).unwrap();
        // Both eyes are built with a 6° rise; the mirrored eye must not
        // flip the sign.
        assert!((m.canthal_tilt.unwrap() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_extract_eye_spacing() {
        let m = extract(&synthetic_face()).unwrap();
        let tilt_rise = 30.0 * 6.0f64.to_radians().tan();
        let eye_width = (30.0f64 * 30.0 + tilt_rise * tilt_rise).sqrt();
        assert!((m.eye_spacing_ratio.unwrap() - 50.0 / eye_width).abs() < 1e-9);
    }

    #[test]
    fn test_extract_thirds_sum_to_hundred() {
        let m = extract(&synthetic_face()).unwrap();
        let t = m.thirds;
        assert!((t.upper + t.mid + t.lower - 100.0).abs() < 1e-9);
        assert!((t.upper - 37.5).abs() < 1e-9);
        assert!((t.mid - 31.25).abs() < 1e-9);
    }

    #[test]
    fn test_extract_mirrored_face_is_fully_symmetric() {
        let m = extract(&synthetic_face()).unwrap();
        assert!((m.symmetry.unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_extract_gonial_angle_in_plausible_band() {
        let m = extract(&synthetic_face()).unwrap();
        let gonial = m.gonial_angle.unwrap();
        assert!(gonial > 90.0 && gonial < 140.0, "gonial = {gonial}");
    }

    #[test]
    fn test_extract_rejects_short_sequence() {
        let pts = vec![LandmarkPoint::new(0.0, 0.0); 100];
        assert_eq!(
            extract(&pts),
            Err(ExtractError::InsufficientLandmarks {
                required: MIN_LANDMARKS,
                actual: 100
            })
        );
    }

    #[test]
    fn test_extract_rejects_non_finite_point() {
        let mut pts = synthetic_face();
        pts[index::EYE_LEFT_OUTER] = LandmarkPoint::new(f64::NAN, 10.0);
        assert_eq!(
            extract(&pts),
            Err(ExtractError::InvalidPoint {
                index: index::EYE_LEFT_OUTER
            })
        );
    }

    #[test]
    fn test_extract_rejects_coincident_landmarks() {
        // Every referenced point at the origin: all spans are zero.
        let pts = vec![LandmarkPoint::new(0.0, 0.0); MIN_LANDMARKS];
        assert!(matches!(
            extract(&pts),
            Err(ExtractError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_classify_tilt_contract_boundaries() {
        assert_eq!(classify_tilt(4.0), TiltCategory::Neutral);
        assert_eq!(classify_tilt(4.1), TiltCategory::Positive);
        assert_eq!(classify_tilt(-2.0), TiltCategory::Neutral);
        assert_eq!(classify_tilt(-2.1), TiltCategory::Negative);
    }

    #[test]
    fn test_classify_face_shape_buckets() {
        assert_eq!(classify_face_shape(1.7, 0.91), FaceShape::SquareRectangle);
        assert_eq!(classify_face_shape(1.95, 0.8), FaceShape::BroadWide);
        assert_eq!(classify_face_shape(1.5, 0.8), FaceShape::OblongOval);
        assert_eq!(classify_face_shape(1.7, 0.8), FaceShape::Hybrid);
        // Jaw dominates fWHR.
        assert_eq!(classify_face_shape(1.5, 0.95), FaceShape::SquareRectangle);
    }

    #[test]
    fn test_classify_proportions_buckets() {
        assert_eq!(classify_proportions(1.11), Proportions::LongMidface);
        assert_eq!(classify_proportions(0.89), Proportions::CompactMidface);
        assert_eq!(classify_proportions(1.0), Proportions::Balanced);
        assert_eq!(classify_proportions(1.1), Proportions::Balanced);
        assert_eq!(classify_proportions(0.9), Proportions::Balanced);
    }

    #[test]
    fn test_classify_jawline_buckets() {
        assert_eq!(classify_jawline(105.0), Jawline::SquareSharp);
        assert_eq!(classify_jawline(130.0), Jawline::SoftObtuse);
        assert_eq!(classify_jawline(118.0), Jawline::Defined);
    }

    #[test]
    fn test_classify_full_set() {
        let m = extract(&synthetic_face()).unwrap();
        let analysis = classify(&m);
        // fWHR 1.9 is not > 1.9 and jaw 0.9 is not > 0.9: Hybrid.
        assert_eq!(analysis.face_shape, FaceShape::Hybrid);
        // 6° > 4°.
        assert_eq!(analysis.eye_tilt, TiltCategory::Positive);
        assert_eq!(analysis.proportions, Proportions::Balanced);
    }

    #[test]
    fn test_classify_empty_set_is_neutral() {
        let analysis = classify(&MetricSet::default());
        assert_eq!(analysis.face_shape, FaceShape::Hybrid);
        assert_eq!(analysis.eye_tilt, TiltCategory::Neutral);
        assert_eq!(analysis.proportions, Proportions::Balanced);
        assert_eq!(analysis.jawline, Jawline::Defined);
    }
}
