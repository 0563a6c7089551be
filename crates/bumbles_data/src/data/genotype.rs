use serde::{Deserialize, Serialize};

/// Body coloration in HSB space.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Hue in degrees, always within `[0, 360)`.
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

/// The heritable trait vector of a bumble.
///
/// Values are fixed at birth with one exception: eating a golden berry can
/// permanently raise `intelligence`. Every scalar trait lives inside its own
/// clamp range; see `bumbles_core::genetics::TraitRange`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Genetics {
    pub size: f64,
    pub speed: f64,
    pub fertility: f64,
    pub longevity: f64,
    pub aggression: f64,
    /// Courtship ornament, zero for females.
    pub antenna_size: f64,
    pub eye_size: f64,
    pub intelligence: f64,
    pub immunity: f64,
    pub heat_resistance: f64,
    pub metabolism: f64,
    pub sociability: f64,
    pub camouflage: f64,
    pub is_vampire: bool,
    pub vampire_strength: f64,
    pub color: Color,
}

impl Default for Genetics {
    /// Population-mean genetics; also the baseline reported by empty statistics.
    fn default() -> Self {
        Self {
            size: 1.0,
            speed: 1.0,
            fertility: 0.5,
            longevity: 1.0,
            aggression: 0.3,
            antenna_size: 0.5,
            eye_size: 0.7,
            intelligence: 0.8,
            immunity: 0.7,
            heat_resistance: 0.6,
            metabolism: 1.0,
            sociability: 0.5,
            camouflage: 0.4,
            is_vampire: false,
            vampire_strength: 0.0,
            color: Color {
                hue: 50.0,
                saturation: 0.7,
                brightness: 0.7,
            },
        }
    }
}
