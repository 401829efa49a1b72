use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Aspect-ratio category of a video, used to namespace published objects.
///
/// The classification bands are deliberately narrow, centered on 16:9 and
/// 9:16. Dimensions outside both bands (including degenerate ones) are
/// `Other`, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    /// Classify pixel dimensions by their width/height ratio.
    ///
    /// Bounds are exclusive: ratio in (1.77, 1.78) is landscape, ratio in
    /// (0.56, 0.57) is portrait, everything else is other. Total over all
    /// inputs; a non-finite ratio falls through to `Other`.
    pub fn classify(width: i64, height: i64) -> Self {
        let ratio = width as f64 / height as f64;
        if ratio > 1.77 && ratio < 1.78 {
            Orientation::Landscape
        } else if ratio > 0.56 && ratio < 0.57 {
            Orientation::Portrait
        } else {
            Orientation::Other
        }
    }

    /// Path segment under which objects of this orientation are stored.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Other => "other",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.key_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_common_resolutions() {
        assert_eq!(Orientation::classify(1280, 720), Orientation::Landscape);
        assert_eq!(Orientation::classify(1920, 1080), Orientation::Landscape);
        assert_eq!(Orientation::classify(1080, 1920), Orientation::Portrait);
        assert_eq!(Orientation::classify(720, 1280), Orientation::Portrait);
        assert_eq!(Orientation::classify(640, 480), Orientation::Other);
        assert_eq!(Orientation::classify(1000, 1000), Orientation::Other);
    }

    #[test]
    fn test_classify_band_boundaries_are_exclusive() {
        // 1.775 sits inside the landscape band; exactly 1.78 does not.
        assert_eq!(Orientation::classify(1775, 1000), Orientation::Landscape);
        assert_eq!(Orientation::classify(1780, 1000), Orientation::Other);
        assert_eq!(Orientation::classify(1770, 1000), Orientation::Other);
        // Same on the portrait side.
        assert_eq!(Orientation::classify(565, 1000), Orientation::Portrait);
        assert_eq!(Orientation::classify(560, 1000), Orientation::Other);
        assert_eq!(Orientation::classify(570, 1000), Orientation::Other);
    }

    #[test]
    fn test_classify_degenerate_dimensions() {
        assert_eq!(Orientation::classify(0, 0), Orientation::Other);
        assert_eq!(Orientation::classify(1280, 0), Orientation::Other);
        assert_eq!(Orientation::classify(0, 720), Orientation::Other);
    }

    #[test]
    fn test_key_prefix() {
        assert_eq!(Orientation::Landscape.key_prefix(), "landscape");
        assert_eq!(Orientation::Portrait.key_prefix(), "portrait");
        assert_eq!(Orientation::Other.key_prefix(), "other");
    }
}
