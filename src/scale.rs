use crate::palette::{self, TextColor, CLASSIFY_3, CLASSIFY_5, DEFAULT_TEXT_THRESHOLD, LINEAR_HIGH, LINEAR_LOW, NEUTRAL};
use plotters::style::RGBColor;
use std::fmt;

/// Fraction of the range added on each side of a normalized linear domain
const NORMALIZED_PADDING: f64 = 0.1;

/// How aggregate values map to colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPolicy {
    /// Continuous interpolation between two endpoint colors
    Linear { normalized: bool },
    /// Three equal-width bands
    Classify3,
    /// Five equal-width bands
    Classify5,
}

impl Default for BandPolicy {
    fn default() -> Self {
        BandPolicy::Linear { normalized: false }
    }
}

impl BandPolicy {
    fn palette(self) -> &'static [RGBColor] {
        match self {
            BandPolicy::Linear { .. } => &[],
            BandPolicy::Classify3 => &CLASSIFY_3,
            BandPolicy::Classify5 => &CLASSIFY_5,
        }
    }
}

impl fmt::Display for BandPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandPolicy::Linear { normalized: false } => f.write_str("linear-2"),
            BandPolicy::Linear { normalized: true } => f.write_str("linear-2(normalized)"),
            BandPolicy::Classify3 => f.write_str("classify-3"),
            BandPolicy::Classify5 => f.write_str("classify-5"),
        }
    }
}

/// Value -> color mapping over a fixed `(min, max)` domain
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    domain: (f64, f64),
    policy: BandPolicy,
    low: RGBColor,
    high: RGBColor,
    text_threshold: f64,
}

impl ColorScale {
    /// Build a scale over `[min_value, max_value]`.
    ///
    /// A degenerate domain (equal bounds, or the inverted infinities of an
    /// empty grid) yields a scale that returns [`NEUTRAL`] for every input.
    pub fn build(min_value: f64, max_value: f64, policy: BandPolicy) -> Self {
        if !(min_value.is_finite() && max_value.is_finite()) || min_value > max_value {
            log::warn!("color scale built over empty domain [{}, {}]", min_value, max_value);
        }
        Self {
            domain: (min_value, max_value),
            policy,
            low: LINEAR_LOW,
            high: LINEAR_HIGH,
            text_threshold: DEFAULT_TEXT_THRESHOLD,
        }
    }

    /// Replace the linear endpoint colors
    pub fn with_endpoints(mut self, low: RGBColor, high: RGBColor) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    /// Luminance threshold shared by every cell of this grid
    pub fn with_text_threshold(mut self, threshold: f64) -> Self {
        self.text_threshold = threshold;
        self
    }

    pub fn policy(&self) -> BandPolicy {
        self.policy
    }

    pub fn text_threshold(&self) -> f64 {
        self.text_threshold
    }

    pub fn is_degenerate(&self) -> bool {
        let (min, max) = self.domain;
        !(min.is_finite() && max.is_finite()) || min >= max
    }

    pub fn color_for(&self, value: f64) -> RGBColor {
        if self.is_degenerate() {
            return NEUTRAL;
        }
        let (min, max) = self.domain;
        match self.policy {
            BandPolicy::Linear { normalized } => {
                let (lo, hi) = if normalized { pad_domain(min, max) } else { (min, max) };
                let v = if value.is_nan() { lo } else { value.clamp(lo, hi) };
                palette::lerp(self.low, self.high, (v - lo) / (hi - lo))
            }
            BandPolicy::Classify3 | BandPolicy::Classify5 => {
                let colors = self.policy.palette();
                colors[band_index(value, min, max, colors.len())]
            }
        }
    }

    pub fn text_color_for(&self, value: f64) -> TextColor {
        palette::text_color_for(self.color_for(value), self.text_threshold)
    }
}

fn pad_domain(min: f64, max: f64) -> (f64, f64) {
    let padding = (max - min) * NORMALIZED_PADDING;
    (min - padding, max + padding)
}

/// `floor((v - min) / width)`, with values at or past the bounds pinned to
/// the first/last band
fn band_index(value: f64, min: f64, max: f64, bands: usize) -> usize {
    let width = (max - min) / bands as f64;
    let idx = ((value - min) / width).floor();
    if idx.is_nan() || idx < 0.0 {
        0
    } else {
        (idx as usize).min(bands - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_scale_is_constant() {
        let scale = ColorScale::build(5.0, 5.0, BandPolicy::Linear { normalized: false });
        assert_eq!(scale.color_for(0.0), NEUTRAL);
        assert_eq!(scale.color_for(5.0), NEUTRAL);
        assert_eq!(scale.color_for(100.0), NEUTRAL);
    }

    #[test]
    fn test_empty_grid_domain_is_degenerate() {
        let scale = ColorScale::build(f64::INFINITY, f64::NEG_INFINITY, BandPolicy::Classify5);
        assert!(scale.is_degenerate());
        assert_eq!(scale.color_for(3.0), NEUTRAL);
    }

    #[test]
    fn test_linear_endpoints() {
        let scale = ColorScale::build(0.0, 100.0, BandPolicy::Linear { normalized: false });
        assert_eq!(scale.color_for(0.0), LINEAR_LOW);
        assert_eq!(scale.color_for(100.0), LINEAR_HIGH);
        // out-of-range input clamps
        assert_eq!(scale.color_for(500.0), LINEAR_HIGH);
        assert_eq!(scale.color_for(-5.0), LINEAR_LOW);
    }

    #[test]
    fn test_linear_normalized_pads_domain() {
        let scale = ColorScale::build(0.0, 100.0, BandPolicy::Linear { normalized: true });
        // max sits inside the padded domain, not at the dark endpoint
        assert_ne!(scale.color_for(100.0), LINEAR_HIGH);
        assert_eq!(scale.color_for(110.0), LINEAR_HIGH);
        assert_eq!(scale.color_for(-10.0), LINEAR_LOW);
        assert_eq!(scale.color_for(-1000.0), LINEAR_LOW);
    }

    #[test]
    fn test_classify_bands() {
        let scale = ColorScale::build(0.0, 30.0, BandPolicy::Classify3);
        assert_eq!(scale.color_for(0.0), CLASSIFY_3[0]);
        assert_eq!(scale.color_for(9.99), CLASSIFY_3[0]);
        assert_eq!(scale.color_for(10.0), CLASSIFY_3[1]);
        assert_eq!(scale.color_for(25.0), CLASSIFY_3[2]);
        assert_eq!(scale.color_for(30.0), CLASSIFY_3[2]);

        let scale = ColorScale::build(0.0, 100.0, BandPolicy::Classify5);
        assert_eq!(scale.color_for(45.0), CLASSIFY_5[2]);
        assert_eq!(scale.color_for(100.0), CLASSIFY_5[4]);
    }

    #[test]
    fn test_custom_endpoints_and_threshold() {
        let scale = ColorScale::build(0.0, 1.0, BandPolicy::default())
            .with_endpoints(RGBColor(0, 0, 0), RGBColor(255, 255, 255))
            .with_text_threshold(200.0);
        assert_eq!(scale.color_for(1.0), RGBColor(255, 255, 255));
        assert_eq!(scale.text_color_for(1.0), TextColor::Black);
        // mid gray is below the raised threshold
        assert_eq!(scale.text_color_for(0.5), TextColor::White);
    }

    #[test]
    fn test_band_policy_display() {
        assert_eq!(BandPolicy::default().to_string(), "linear-2");
        assert_eq!(BandPolicy::Classify5.to_string(), "classify-5");
    }
}
