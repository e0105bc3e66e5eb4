//! sRGB colours, CIE L*a*b* conversion, and the CIEDE2000 colour difference
//!
//! Conversion chain: hex -> sRGB -> linear RGB -> XYZ (D65) -> L*a*b*.
//! `delta_e_2000` follows the CIEDE2000 formula with kL = kC = kH = 1 and
//! rounds to two decimal places.

#![allow(clippy::many_single_char_names)]

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::BoardError;

/// A 24-bit sRGB colour, written canonically as `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// L*a*b* coordinates of this colour
    pub fn to_lab(&self) -> Lab {
        hex_to_lab(*self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

impl TryFrom<String> for Color {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_hex_color(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

/// Parse `#rrggbb` or `rrggbb` (either case)
pub fn parse_hex_color(text: &str) -> Result<Color, BoardError> {
    let invalid = || BoardError::InvalidColor(text.to_string());
    let digits = text.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
}

/// CIE L*a*b* coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

// D65 reference white
const REF_X: f64 = 95.047;
const REF_Y: f64 = 100.0;
const REF_Z: f64 = 108.883;

const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA: f64 = 903.3;

/// Convert an sRGB colour to L*a*b* under D65
pub fn hex_to_lab(color: Color) -> Lab {
    let (x, y, z) = rgb_to_xyz(color);
    xyz_to_lab(x, y, z)
}

/// sRGB gamma expansion of one 0-255 channel, scaled to 0-100
fn linearize(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    let linear = if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    };
    linear * 100.0
}

fn rgb_to_xyz(color: Color) -> (f64, f64, f64) {
    let r = linearize(color.r);
    let g = linearize(color.g);
    let b = linearize(color.b);

    (
        r * 0.4124564 + g * 0.3575761 + b * 0.1804375,
        r * 0.2126729 + g * 0.7151522 + b * 0.0721750,
        r * 0.0193339 + g * 0.1191920 + b * 0.9503041,
    )
}

fn xyz_to_lab(x: f64, y: f64, z: f64) -> Lab {
    let f = |t: f64| {
        if t > LAB_EPSILON {
            t.cbrt()
        } else {
            (LAB_KAPPA * t + 16.0) / 116.0
        }
    };

    let fx = f(x / REF_X);
    let fy = f(y / REF_Y);
    let fz = f(z / REF_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Hue angle in degrees, in [0, 360)
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    let h = b.atan2(a_prime).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// CIEDE2000 colour difference, rounded to two decimals
pub fn delta_e_2000(lab1: Lab, lab2: Lab) -> f64 {
    let Lab { l: l1, a: a1, b: b1 } = lab1;
    let Lab { l: l2, a: a2, b: b2 } = lab2;

    let (k_l, k_c, k_h) = (1.0, 1.0, 1.0);
    let pow25_7 = 25f64.powi(7);

    let c1 = (a1 * a1 + b1 * b1).sqrt();
    let c2 = (a2 * a2 + b2 * b2).sqrt();
    let c_avg_pow7 = ((c1 + c2) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (c_avg_pow7 / (c_avg_pow7 + pow25_7)).sqrt());

    let a1_prime = a1 * (1.0 + g);
    let a2_prime = a2 * (1.0 + g);

    let c1_prime = (a1_prime * a1_prime + b1 * b1).sqrt();
    let c2_prime = (a2_prime * a2_prime + b2 * b2).sqrt();

    let h1_prime = hue_angle(b1, a1_prime);
    let h2_prime = hue_angle(b2, a2_prime);

    let delta_l_prime = l2 - l1;
    let delta_c_prime = c2_prime - c1_prime;

    let chroma_product = c1_prime * c2_prime;
    let h_diff = h2_prime - h1_prime;
    let delta_h_prime = if chroma_product == 0.0 {
        0.0
    } else if h_diff.abs() <= 180.0 {
        h_diff
    } else if h_diff > 180.0 {
        h_diff - 360.0
    } else {
        h_diff + 360.0
    };

    let delta_big_h_prime = 2.0 * chroma_product.sqrt() * to_radians(delta_h_prime / 2.0).sin();

    let l_avg_prime = (l1 + l2) / 2.0;
    let c_avg_prime = (c1_prime + c2_prime) / 2.0;

    let h_sum = h1_prime + h2_prime;
    let h_avg_prime = if chroma_product == 0.0 {
        h_sum
    } else if (h1_prime - h2_prime).abs() <= 180.0 {
        h_sum / 2.0
    } else if h_sum < 360.0 {
        (h_sum + 360.0) / 2.0
    } else {
        (h_sum - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * to_radians(h_avg_prime - 30.0).cos()
        + 0.24 * to_radians(2.0 * h_avg_prime).cos()
        + 0.32 * to_radians(3.0 * h_avg_prime + 6.0).cos()
        - 0.20 * to_radians(4.0 * h_avg_prime - 63.0).cos();

    let delta_theta = 30.0 * (-((h_avg_prime - 275.0) / 25.0).powi(2)).exp();

    let c_avg_prime_pow7 = c_avg_prime.powi(7);
    let r_c = 2.0 * (c_avg_prime_pow7 / (c_avg_prime_pow7 + pow25_7)).sqrt();

    let l_offset_sq = (l_avg_prime - 50.0).powi(2);
    let s_l = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
    let s_c = 1.0 + 0.045 * c_avg_prime;
    let s_h = 1.0 + 0.015 * c_avg_prime * t;

    let r_t = -to_radians(2.0 * delta_theta).sin() * r_c;

    let lightness = delta_l_prime / (k_l * s_l);
    let chroma = delta_c_prime / (k_c * s_c);
    let hue = delta_big_h_prime / (k_h * s_h);

    let delta_e = (lightness * lightness + chroma * chroma + hue * hue + r_t * chroma * hue).sqrt();

    (delta_e * 100.0).round() / 100.0
}

/// CIEDE2000 difference between two sRGB colours
pub fn color_difference(a: Color, b: Color) -> f64 {
    delta_e_2000(hex_to_lab(a), hex_to_lab(b))
}

/// Human-readable verdict for a CIEDE2000 difference
pub fn interpret_delta_e(delta_e: f64) -> &'static str {
    if delta_e < 1.0 {
        "Not perceptible by human eye"
    } else if delta_e < 2.0 {
        "Perceptible through close observation"
    } else if delta_e < 3.5 {
        "Perceptible at a glance"
    } else if delta_e < 5.0 {
        "Noticeable difference"
    } else if delta_e < 10.0 {
        "Clear difference"
    } else if delta_e < 20.0 {
        "Significant difference"
    } else {
        "Very different colors"
    }
}

/// Similarity percentage (100 = identical), one decimal place
pub fn accuracy_percent(delta_e: f64) -> f64 {
    const MAX_DELTA_E: f64 = 100.0;
    let accuracy = ((MAX_DELTA_E - delta_e) / MAX_DELTA_E * 100.0).clamp(0.0, 100.0);
    (accuracy * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::all_coordinates;

    fn approx(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000").unwrap(), Color::new(255, 128, 0));
        assert_eq!(parse_hex_color("FF8000").unwrap(), Color::new(255, 128, 0));
        assert!(parse_hex_color("#ff80").is_err());
        assert!(parse_hex_color("#gg8000").is_err());
        assert!(parse_hex_color("").is_err());
        assert_eq!(Color::new(1, 171, 255).to_string(), "#01abff");
    }

    #[test]
    fn test_hex_to_lab_reference_points() {
        let white = hex_to_lab(Color::new(255, 255, 255));
        assert!(approx(white.l, 100.0, 0.01));
        assert!(approx(white.a, 0.0, 0.01));
        assert!(approx(white.b, 0.0, 0.01));

        let black = hex_to_lab(Color::new(0, 0, 0));
        assert!(approx(black.l, 0.0, 1e-9));

        let red = hex_to_lab(Color::new(255, 0, 0));
        assert!(approx(red.l, 53.24, 0.01));
        assert!(approx(red.a, 80.09, 0.01));
        assert!(approx(red.b, 67.20, 0.01));
    }

    #[test]
    fn test_delta_e_reference_pairs() {
        // Sharma, Wu & Dalal CIEDE2000 test data
        let cases = [
            ((50.0, 2.6772, -79.7751), (50.0, 0.0, -82.7485), 2.04),
            ((50.0, -1.3802, -84.2814), (50.0, 0.0, -82.7485), 1.00),
            ((50.0, 2.49, -0.001), (50.0, -2.49, 0.0009), 7.18),
            ((50.0, 2.5, 0.0), (50.0, 0.0, -2.5), 4.31),
            ((60.2574, -34.0099, 36.2677), (60.4626, -34.1751, 39.4387), 1.26),
            ((22.7233, 20.0904, -46.694), (23.0331, 14.973, -42.5619), 2.04),
            ((2.0776, 0.0795, -1.135), (0.9033, -0.0636, -0.5514), 0.91),
        ];

        for ((l1, a1, b1), (l2, a2, b2), expected) in cases {
            let x = Lab::new(l1, a1, b1);
            let y = Lab::new(l2, a2, b2);
            assert_eq!(delta_e_2000(x, y), expected, "{x:?} vs {y:?}");
        }
    }

    #[test]
    fn test_delta_e_zero_for_identical() {
        for coordinate in all_coordinates() {
            let color = coordinate.color();
            assert_eq!(color_difference(color, color), 0.0);
        }
    }

    #[test]
    fn test_delta_e_symmetric() {
        let colors: Vec<Color> = all_coordinates().step_by(7).map(|c| c.color()).collect();
        for &x in &colors {
            for &y in &colors {
                assert_eq!(color_difference(x, y), color_difference(y, x));
            }
        }
    }

    #[test]
    fn test_delta_e_achromatic() {
        let gray = Lab::new(50.0, 0.0, 0.0);
        let darker = Lab::new(40.0, 0.0, 0.0);
        let d = delta_e_2000(gray, darker);
        assert!(d > 0.0);
        assert_eq!(d, delta_e_2000(darker, gray));
    }

    #[test]
    fn test_interpret_and_accuracy() {
        assert_eq!(interpret_delta_e(0.5), "Not perceptible by human eye");
        assert_eq!(interpret_delta_e(3.0), "Perceptible at a glance");
        assert_eq!(interpret_delta_e(12.0), "Significant difference");
        assert_eq!(interpret_delta_e(55.0), "Very different colors");

        assert_eq!(accuracy_percent(0.0), 100.0);
        assert_eq!(accuracy_percent(12.34), 87.7);
        assert_eq!(accuracy_percent(150.0), 0.0);
    }
}
