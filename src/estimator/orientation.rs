use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::warn;

/// Compass direction the PV array faces.
///
/// Text forms are kebab-case English names (`south-east`); the legacy short
/// keys (`sued`, `suedost`, `suedwest`, `ost`, `west`, `nord`) parse as well.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum Orientation {
    #[default]
    #[serde(alias = "sued")]
    #[strum(to_string = "south", serialize = "sued")]
    South,
    #[serde(alias = "suedost")]
    #[strum(to_string = "south-east", serialize = "suedost")]
    SouthEast,
    #[serde(alias = "suedwest")]
    #[strum(to_string = "south-west", serialize = "suedwest")]
    SouthWest,
    #[serde(alias = "ost")]
    #[strum(to_string = "east", serialize = "ost")]
    East,
    #[strum(to_string = "west")]
    West,
    #[serde(alias = "nord")]
    #[strum(to_string = "north", serialize = "nord")]
    North,
}

/// Slider positions, sweeping from east over south to west, north last.
pub const SLIDER_ORDER: [Orientation; 6] = [
    Orientation::East,
    Orientation::SouthEast,
    Orientation::South,
    Orientation::SouthWest,
    Orientation::West,
    Orientation::North,
];

impl Orientation {
    /// Yearly yield multiplier relative to an ideal array.
    pub fn factor(self) -> f64 {
        match self {
            Self::South => 0.93,
            Self::SouthEast | Self::SouthWest => 0.89,
            Self::East | Self::West => 0.85,
            Self::North => 0.65,
        }
    }

    /// Resolves free text to an orientation, falling back to south.
    ///
    /// Unrecognized text is not an error: the estimate proceeds with the
    /// south multiplier.
    pub fn lookup(name: &str) -> Self {
        name.trim().parse().unwrap_or_else(|_| {
            warn!(orientation = name, "unknown orientation, using south");
            Self::South
        })
    }

    /// Position of this orientation on the orientation slider.
    pub fn slider_index(self) -> usize {
        SLIDER_ORDER
            .iter()
            .position(|&o| o == self)
            .unwrap_or_default()
    }

    /// Orientation at a slider position; positions past the end clamp to the last entry.
    pub fn from_slider_index(index: usize) -> Self {
        SLIDER_ORDER[index.min(SLIDER_ORDER.len() - 1)]
    }

    /// Next orientation in slider order, wrapping around.
    pub fn cycle(self) -> Self {
        Self::from_slider_index((self.slider_index() + 1) % SLIDER_ORDER.len())
    }

    /// Comma-separated list of accepted names, for help and error text.
    pub fn names() -> String {
        Self::iter().map(|o| o.to_string()).collect::<Vec<_>>().join(", ")
    }
}
