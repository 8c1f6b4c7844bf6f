//! Fixed landmark index map for the MediaPipe Face Mesh topology.
//!
//! Semantic names map to indices into the 468-point canonical mesh. The map
//! is documented constants, not configuration; the extractor only requires
//! the sequence to cover the highest index actually referenced.

/// Indices into the landmark sequence, named by anatomical site.
///
/// "Left"/"right" follow image orientation (the un-mirrored detector frame),
/// matching the canonical mesh numbering.
pub mod index {
    // Vertical midline
    /// Top of the mesh; stands in for the hairline.
    pub const TRICHION: usize = 10;
    /// Mid-brow point between the eyes.
    pub const GLABELLA: usize = 168;
    /// Bridge of the nose.
    pub const NASION: usize = 6;
    pub const NOSE_TIP: usize = 1;
    /// Lowest chin point.
    pub const MENTON: usize = 152;

    // Eyes
    pub const EYE_LEFT_OUTER: usize = 33;
    pub const EYE_LEFT_INNER: usize = 133;
    pub const EYE_RIGHT_INNER: usize = 362;
    pub const EYE_RIGHT_OUTER: usize = 263;

    // Cheek / jaw
    pub const ZYGOMA_LEFT: usize = 234;
    pub const ZYGOMA_RIGHT: usize = 454;
    pub const GONION_LEFT: usize = 58;
    pub const GONION_RIGHT: usize = 288;

    // Nose / mouth
    pub const NOSE_ALARE_LEFT: usize = 129;
    pub const NOSE_ALARE_RIGHT: usize = 358;
    pub const MOUTH_LEFT: usize = 61;
    pub const MOUTH_RIGHT: usize = 291;
}

/// Every index the extractor dereferences.
pub const REFERENCED: [usize; 17] = [
    index::TRICHION,
    index::GLABELLA,
    index::NASION,
    index::NOSE_TIP,
    index::MENTON,
    index::EYE_LEFT_OUTER,
    index::EYE_LEFT_INNER,
    index::EYE_RIGHT_INNER,
    index::EYE_RIGHT_OUTER,
    index::ZYGOMA_LEFT,
    index::ZYGOMA_RIGHT,
    index::GONION_LEFT,
    index::GONION_RIGHT,
    index::NOSE_ALARE_LEFT,
    index::NOSE_ALARE_RIGHT,
    index::MOUTH_LEFT,
    index::MOUTH_RIGHT,
];

/// Minimum landmark-sequence length: highest referenced index + 1.
///
/// A full Face Mesh detection carries 468 points (478 with iris refinement),
/// both of which satisfy this.
pub const MIN_LANDMARKS: usize = index::ZYGOMA_RIGHT + 1;
