//! HSL conversion and hue rotation.
//!
//! The global hue control rotates every resolved dot color around the HSL
//! hue circle. Saturation and lightness are carried through unchanged, so
//! greys stay grey whatever the rotation.

use super::rgb::Rgb;

/// A color in HSL space.
///
/// `h` is in degrees (0.0..360.0), `s` and `l` in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r as f64 / 255.0;
        let g = rgb.g as f64 / 255.0;
        let b = rgb.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl { h: h * 60.0, s, l }
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        let h = hsl.h / 360.0;
        let (r, g, b) = if hsl.s == 0.0 {
            (hsl.l, hsl.l, hsl.l)
        } else {
            let q = if hsl.l < 0.5 {
                hsl.l * (1.0 + hsl.s)
            } else {
                hsl.l + hsl.s - hsl.l * hsl.s
            };
            let p = 2.0 * hsl.l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };

        let to_u8 = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

#[inline]
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Rotate the hue of `color` by `degrees` (may be negative, wraps mod 360).
///
/// A rotation of exactly zero returns the input untouched, skipping the
/// HSL round trip and its rounding.
pub fn rotate_hue(color: Rgb, degrees: f32) -> Rgb {
    if degrees == 0.0 || !degrees.is_finite() {
        return color;
    }
    let mut hsl = Hsl::from(color);
    hsl.h = (hsl.h + degrees as f64).rem_euclid(360.0);
    Rgb::from(hsl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rotation_is_identity() {
        let c = Rgb::new(17, 99, 201);
        assert_eq!(rotate_hue(c, 0.0), c);
    }

    #[test]
    fn test_red_rotates_to_green_and_blue() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(rotate_hue(red, 120.0), Rgb::new(0, 255, 0));
        assert_eq!(rotate_hue(red, 240.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_negative_rotation_wraps() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(rotate_hue(red, -120.0), Rgb::new(0, 0, 255));
        assert_eq!(rotate_hue(red, 360.0), red);
    }

    #[test]
    fn test_grey_is_unaffected() {
        let grey = Rgb::new(128, 128, 128);
        assert_eq!(rotate_hue(grey, 90.0), grey);
    }

    #[test]
    fn test_round_trip_preserves_color() {
        for c in [
            Rgb::new(12, 200, 77),
            Rgb::new(250, 250, 3),
            Rgb::new(90, 10, 160),
        ] {
            assert_eq!(Rgb::from(Hsl::from(c)), c);
        }
    }

    #[test]
    fn test_hsl_of_primaries() {
        let hsl = Hsl::from(Rgb::new(0, 0, 255));
        assert!((hsl.h - 240.0).abs() < 1e-9);
        assert!((hsl.s - 1.0).abs() < 1e-9);
        assert!((hsl.l - 0.5).abs() < 1e-9);
    }
}
