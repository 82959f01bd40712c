//! Stream quality selection policy.
//!
//! Whether a run takes the highest available quality outright or caps the
//! stream width is a configuration value, so both behaviors drive the same
//! pipeline instead of duplicated code paths.

use serde::{Deserialize, Serialize};

use crate::source::StreamHandle;

/// Picks the stream candidate to clip from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityPolicy {
    /// Highest available quality, any resolution.
    Highest,

    /// Highest available quality among streams no wider than `max_width`.
    WidthCapped { max_width: u32 },
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self::Highest
    }
}

impl QualityPolicy {
    /// Select the best eligible candidate, or `None` if nothing qualifies.
    ///
    /// Width is the quality ordering; candidates are muxed streams so a wider
    /// frame is a better rendition of the same video.
    pub fn select<'a>(&self, candidates: &'a [StreamHandle]) -> Option<&'a StreamHandle> {
        match self {
            Self::Highest => candidates.iter().max_by_key(|s| s.width),
            Self::WidthCapped { max_width } => candidates
                .iter()
                .filter(|s| s.width <= *max_width)
                .max_by_key(|s| s.width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(width: u32) -> StreamHandle {
        StreamHandle {
            url: format!("https://example.test/{width}"),
            quality_label: format!("{width}w"),
            width,
        }
    }

    #[test]
    fn test_highest_picks_widest() {
        let candidates = vec![handle(360), handle(1080), handle(720)];
        let picked = QualityPolicy::Highest.select(&candidates).unwrap();
        assert_eq!(picked.width, 1080);
    }

    #[test]
    fn test_width_cap_filters_then_picks_widest() {
        let candidates = vec![handle(360), handle(1080), handle(720)];
        let policy = QualityPolicy::WidthCapped { max_width: 720 };
        assert_eq!(policy.select(&candidates).unwrap().width, 720);

        let policy = QualityPolicy::WidthCapped { max_width: 500 };
        assert_eq!(policy.select(&candidates).unwrap().width, 360);
    }

    #[test]
    fn test_no_eligible_candidate() {
        assert!(QualityPolicy::Highest.select(&[]).is_none());

        let candidates = vec![handle(1080)];
        let policy = QualityPolicy::WidthCapped { max_width: 720 };
        assert!(policy.select(&candidates).is_none());
    }
}
