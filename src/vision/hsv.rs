//! RGB to HSV conversion.
//!
//! Value is kept on the 0–255 scale of the source channels. The classifier's
//! absolute thresholds are calibrated against that scale.

use serde::{Deserialize, Serialize};

/// A color in hue/saturation/value space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`.
    pub hue: f64,
    /// Saturation, `[0, 1]`.
    pub saturation: f64,
    /// Value, `[0, 255]` (not normalized).
    pub value: f64,
}

impl Hsv {
    /// Value expressed as a percentage of full brightness.
    pub fn value_percent(&self) -> f64 {
        self.value / 2.55
    }
}

/// Converts an RGB triple to HSV.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let value = r.max(g).max(b);
    let chroma = value - r.min(g).min(b);

    let sector = if chroma == 0.0 {
        0.0
    } else if value == r {
        (g - b) / chroma
    } else if value == g {
        2.0 + (b - r) / chroma
    } else {
        4.0 + (r - g) / chroma
    };
    let sector = if sector < 0.0 { sector + 6.0 } else { sector };

    let saturation = if value == 0.0 { 0.0 } else { chroma / value };

    Hsv {
        hue: 60.0 * sector,
        saturation,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_white() {
        assert_eq!(
            rgb_to_hsv(255, 255, 255),
            Hsv { hue: 0.0, saturation: 0.0, value: 255.0 }
        );
    }

    #[test]
    fn test_red() {
        assert_eq!(
            rgb_to_hsv(255, 0, 0),
            Hsv { hue: 0.0, saturation: 1.0, value: 255.0 }
        );
    }

    #[test]
    fn test_black() {
        assert_eq!(
            rgb_to_hsv(0, 0, 0),
            Hsv { hue: 0.0, saturation: 0.0, value: 0.0 }
        );
    }

    #[test]
    fn test_primary_and_secondary_hues() {
        assert!(approx(rgb_to_hsv(0, 255, 0).hue, 120.0));
        assert!(approx(rgb_to_hsv(0, 0, 255).hue, 240.0));
        assert!(approx(rgb_to_hsv(255, 255, 0).hue, 60.0));
        assert!(approx(rgb_to_hsv(0, 255, 255).hue, 180.0));
    }

    #[test]
    fn test_negative_sector_wraps() {
        // Magenta-ish red: max is red, g < b, so the raw sector is negative.
        let hsv = rgb_to_hsv(255, 0, 128);
        assert!(hsv.hue > 300.0 && hsv.hue < 360.0, "hue = {}", hsv.hue);
    }

    #[test]
    fn test_value_stays_on_byte_scale() {
        let hsv = rgb_to_hsv(100, 50, 25);
        assert!(approx(hsv.value, 100.0));
        assert!(approx(hsv.saturation, 0.75));
        assert!(approx(hsv.value_percent(), 100.0 / 2.55));
    }
}
