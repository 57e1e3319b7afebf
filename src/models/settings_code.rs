//! Compact binary settings code.
//!
//! The whole [`RenderConfig`] packs into `11 + 3 * stops` bytes, shipped as
//! URL-safe base64 without padding.
//!
//! ```text
//! byte  field            encoding
//! 0     brightness       value + 100
//! 1     contrast         value + 128
//! 2     gamma            value * 10
//! 3     blur             value * 10
//! 4     cell size        value - 5
//! 5     dot scale        value * 10
//! 6     dither mode      DitherMode index
//! 7     invert           0 / 1
//! 8     hue              (value + 180) / 360 * 255
//! 9     color mode       ColorMode index
//! 10    stop count       0..=5
//! 11..  per stop         position (0..=100), RGB565 big-endian (2 bytes)
//! ```
//!
//! A gradient with more than five stops is capped when encoding (see
//! [`capped_stops`]). The hue byte that hue 0 encodes to decodes back to
//! exactly 0.
//!
//! Every numeric field is rounded to its byte. Colors keep 5/6/5 bits per
//! channel: encoding truncates, decoding replicates the high bits into the
//! low ones so pure black and white survive exactly.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use halftone_core::{
    ColorMode, DitherMode, Gradient, GradientStop, RenderConfig, Rgb,
};
use thiserror::Error;

/// Fixed header size in bytes.
pub const HEADER_LEN: usize = 11;
/// Bytes per gradient stop.
pub const STOP_LEN: usize = 3;
/// Largest number of stops a code can carry.
pub const MAX_STOPS: usize = 5;

#[derive(Debug, Error)]
pub enum SettingsCodeError {
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Settings code too short: {len} bytes (need at least {HEADER_LEN})")]
    TooShort { len: usize },

    #[error("Too many gradient stops: {count} (max {MAX_STOPS})")]
    TooManyStops { count: usize },

    #[error("Settings code length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    Invalid(String),
}

/// Serialize a configuration to its settings code.
///
/// Gradients with more than [`MAX_STOPS`] stops are capped, see
/// [`capped_stops`].
pub fn encode(config: &RenderConfig) -> String {
    URL_SAFE_NO_PAD.encode(to_bytes(config))
}

/// Parse a settings code back into a configuration.
///
/// Standard base64 (`+`, `/`) and padded input are accepted as well.
/// Out-of-range enum indices fall back to `None` / `gradientX`; all
/// numeric fields go through the clamping [`RenderConfig`] setters.
pub fn decode(code: &str) -> Result<RenderConfig, SettingsCodeError> {
    let normalized: String = code
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();
    let padded = format!("{normalized:=<width$}", width = normalized.len().div_ceil(4) * 4);
    let bytes = URL_SAFE.decode(padded.as_bytes())?;
    from_bytes(&bytes)
}

/// Raw binary form of [`encode`].
pub fn to_bytes(config: &RenderConfig) -> Vec<u8> {
    let stops = capped_stops(&config.gradient);

    let mut bytes = Vec::with_capacity(HEADER_LEN + STOP_LEN * stops.len());
    bytes.push(to_byte(config.brightness + 100.0));
    bytes.push(to_byte(config.contrast + 128.0));
    bytes.push(to_byte(config.gamma * 10.0));
    bytes.push(to_byte(config.blur * 10.0));
    bytes.push(config.cell_size.saturating_sub(5).min(255) as u8);
    bytes.push(to_byte(config.dot_scale * 10.0));
    bytes.push(config.dither.index());
    bytes.push(u8::from(config.invert));
    bytes.push(hue_to_byte(config.hue));
    bytes.push(config.color_mode.index());
    bytes.push(stops.len() as u8);

    for stop in &stops {
        bytes.push(to_byte(stop.position));
        bytes.extend_from_slice(&pack_565(stop.color).to_be_bytes());
    }
    bytes
}

/// The stops that fit into a code, in position order.
///
/// Up to [`MAX_STOPS`] stops are kept as they are. Past that, the lowest
/// and highest stops survive together with the interior stops closest to
/// the middle of the ramp (position 50); ties go to the lower position.
pub fn capped_stops(gradient: &Gradient) -> Vec<GradientStop> {
    let sorted = gradient.stops();
    if sorted.len() <= MAX_STOPS {
        return sorted;
    }

    let last = sorted.len() - 1;
    let mut interior: Vec<usize> = (1..last).collect();
    interior.sort_by(|&a, &b| {
        let da = (sorted[a].position - 50.0).abs();
        let db = (sorted[b].position - 50.0).abs();
        da.total_cmp(&db).then(a.cmp(&b))
    });
    interior.truncate(MAX_STOPS - 2);
    interior.sort_unstable();

    tracing::debug!(count = sorted.len(), kept = MAX_STOPS, "Capping gradient stops");
    std::iter::once(0)
        .chain(interior)
        .chain(std::iter::once(last))
        .map(|i| sorted[i])
        .collect()
}

/// Raw binary form of [`decode`].
pub fn from_bytes(bytes: &[u8]) -> Result<RenderConfig, SettingsCodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(SettingsCodeError::TooShort { len: bytes.len() });
    }
    let count = bytes[10] as usize;
    if count > MAX_STOPS {
        return Err(SettingsCodeError::TooManyStops { count });
    }
    let expected = HEADER_LEN + STOP_LEN * count;
    if bytes.len() != expected {
        return Err(SettingsCodeError::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let dither = DitherMode::from_index(bytes[6]).unwrap_or_else(|| {
        tracing::debug!(index = bytes[6], "Unknown dither index, using none");
        DitherMode::None
    });
    let color_mode = ColorMode::from_index(bytes[9]).unwrap_or_else(|| {
        tracing::debug!(index = bytes[9], "Unknown color mode index, using gradientX");
        ColorMode::GradientX
    });

    let stops: Vec<GradientStop> = bytes[HEADER_LEN..]
        .chunks_exact(STOP_LEN)
        .map(|chunk| {
            GradientStop::new(
                chunk[0] as f32,
                unpack_565(u16::from_be_bytes([chunk[1], chunk[2]])),
            )
        })
        .collect();
    let gradient = Gradient::new(stops).unwrap_or_default();

    Ok(RenderConfig::new()
        .brightness(bytes[0] as f32 - 100.0)
        .contrast(bytes[1] as f32 - 128.0)
        .gamma(bytes[2] as f32 / 10.0)
        .blur(bytes[3] as f32 / 10.0)
        .cell_size(bytes[4] as usize + 5)
        .dot_scale(bytes[5] as f32 / 10.0)
        .dither(dither)
        .invert(bytes[7] != 0)
        .hue(hue_from_byte(bytes[8]))
        .color_mode(color_mode)
        .gradient(gradient))
}

#[inline]
fn to_byte(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

fn hue_to_byte(hue: f32) -> u8 {
    to_byte((hue + 180.0) / 360.0 * 255.0)
}

/// The byte hue 0 encodes to decodes back to exactly 0.
fn hue_from_byte(byte: u8) -> f32 {
    if byte == hue_to_byte(0.0) {
        0.0
    } else {
        byte as f32 / 255.0 * 360.0 - 180.0
    }
}

/// Pack to RGB565, truncating the dropped low bits.
pub fn pack_565(color: Rgb) -> u16 {
    ((color.r as u16 >> 3) << 11) | ((color.g as u16 >> 2) << 5) | (color.b as u16 >> 3)
}

/// Unpack RGB565, replicating high bits into the vacated low bits.
pub fn unpack_565(packed: u16) -> Rgb {
    let r5 = ((packed >> 11) & 0x1f) as u8;
    let g6 = ((packed >> 5) & 0x3f) as u8;
    let b5 = (packed & 0x1f) as u8;
    Rgb::new(
        (r5 << 3) | (r5 >> 2),
        (g6 << 2) | (g6 >> 4),
        (b5 << 3) | (b5 >> 2),
    )
}
