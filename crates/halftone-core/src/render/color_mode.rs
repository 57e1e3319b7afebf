//! Fill color strategies.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownModeError;

/// How each dot's base color is chosen.
///
/// The discriminant order is part of the settings code format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// Gradient sampled left to right across the output.
    GradientX,
    /// Gradient sampled top to bottom.
    GradientY,
    /// Gradient sampled by the cell's filtered luminance.
    #[default]
    LumFromSource,
    /// Gradient sampled by the secondary source's luminance.
    LumFromSecondary,
    /// The secondary source's own pixel color.
    SecondaryImageColor,
    /// Gradient sampled at a random position fixed per cell.
    Noise,
    /// First and last gradient colors in a checkerboard.
    Checkered,
}

impl ColorMode {
    /// All modes in settings-code index order.
    pub const ALL: [ColorMode; 7] = [
        ColorMode::GradientX,
        ColorMode::GradientY,
        ColorMode::LumFromSource,
        ColorMode::LumFromSecondary,
        ColorMode::SecondaryImageColor,
        ColorMode::Noise,
        ColorMode::Checkered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::GradientX => "gradientX",
            ColorMode::GradientY => "gradientY",
            ColorMode::LumFromSource => "lumFromSource",
            ColorMode::LumFromSecondary => "lumFromSecondary",
            ColorMode::SecondaryImageColor => "secondaryImageColor",
            ColorMode::Noise => "noise",
            ColorMode::Checkered => "checkered",
        }
    }

    pub fn index(self) -> u8 {
        Self::ALL
            .iter()
            .position(|&m| m == self)
            .map_or(0, |i| i as u8)
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = UnknownModeError;

    /// Case-insensitive match on [`ColorMode::as_str`] names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownModeError {
                kind: "color mode",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_declaration_order() {
        for (i, mode) in ColorMode::ALL.into_iter().enumerate() {
            assert_eq!(mode.index() as usize, i);
            assert_eq!(ColorMode::from_index(i as u8), Some(mode));
        }
        assert_eq!(ColorMode::from_index(7), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("CHECKERED".parse::<ColorMode>().unwrap(), ColorMode::Checkered);
        assert_eq!(
            "lumfromsecondary".parse::<ColorMode>().unwrap(),
            ColorMode::LumFromSecondary
        );
        assert!("rainbow".parse::<ColorMode>().is_err());
    }
}
