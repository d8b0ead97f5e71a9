//! The generated world configuration
//!
//! A `Theme` is immutable for the lifetime of a run. The generator service
//! returns it as JSON; field names here mirror that payload exactly, so the
//! serde derives are the schema.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the player must react to an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvoidKind {
    /// Low barrier, cleared by jumping over it
    Jump,
    /// Overhead bar, cleared by sliding under it
    Slide,
    /// Tall wall; only lane choice avoids it
    Dodge,
}

/// Movement tag carried by the generator schema.
///
/// Descriptive metadata only; spawn motion never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    Static,
    Moving,
}

/// Four-color palette, each value a `#rrggbb` CSS string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub accent: String,
}

/// Append an alpha byte to a `#rrggbb` color, yielding `#rrggbbaa`
#[inline]
pub fn with_alpha(color: &str, alpha: u8) -> String {
    format!("{color}{alpha:02x}")
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(rename = "emoji")]
    pub glyph: String,
    pub description: String,
}

/// One obstacle archetype; live obstacles reference these by index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleArchetype {
    pub name: String,
    #[serde(rename = "emoji")]
    pub glyph: String,
    pub behavior: Behavior,
    #[serde(rename = "type")]
    pub kind: AvoidKind,
}

/// One collectible archetype
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleArchetype {
    pub name: String,
    #[serde(rename = "emoji")]
    pub glyph: String,
    pub points: f32,
}

/// A complete generated world
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub world_name: String,
    pub description: String,
    pub colors: Palette,
    pub character: Character,
    pub obstacles: Vec<ObstacleArchetype>,
    pub collectibles: Vec<CollectibleArchetype>,
}

/// Schema-level rejection of an otherwise well-formed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    EmptyObstacles,
    EmptyCollectibles,
    BadColor(String),
    BlankGlyph(String),
    BadPoints(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::EmptyObstacles => write!(f, "theme has no obstacle archetypes"),
            ThemeError::EmptyCollectibles => write!(f, "theme has no collectible archetypes"),
            ThemeError::BadColor(c) => write!(f, "palette color {c:?} is not #rrggbb"),
            ThemeError::BlankGlyph(who) => write!(f, "{who} has an empty glyph"),
            ThemeError::BadPoints(name) => {
                write!(f, "collectible {name:?} has a negative or non-finite point value")
            }
        }
    }
}

impl std::error::Error for ThemeError {}

fn check_color(color: &str) -> Result<(), ThemeError> {
    let ok = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if ok {
        Ok(())
    } else {
        Err(ThemeError::BadColor(color.to_string()))
    }
}

impl Theme {
    /// Enforce the provider contract on a parsed payload.
    ///
    /// The engine indexes archetype lists by random index and feeds colors
    /// straight to the canvas, so everything is checked here, once, and
    /// assumed valid afterwards.
    pub fn validate(&self) -> Result<(), ThemeError> {
        if self.obstacles.is_empty() {
            return Err(ThemeError::EmptyObstacles);
        }
        if self.collectibles.is_empty() {
            return Err(ThemeError::EmptyCollectibles);
        }
        for color in [
            &self.colors.primary,
            &self.colors.secondary,
            &self.colors.background,
            &self.colors.accent,
        ] {
            check_color(color)?;
        }
        if self.character.glyph.trim().is_empty() {
            return Err(ThemeError::BlankGlyph("character".into()));
        }
        for o in &self.obstacles {
            if o.glyph.trim().is_empty() {
                return Err(ThemeError::BlankGlyph(format!("obstacle {:?}", o.name)));
            }
        }
        for c in &self.collectibles {
            if c.glyph.trim().is_empty() {
                return Err(ThemeError::BlankGlyph(format!("collectible {:?}", c.name)));
            }
            if !c.points.is_finite() || c.points < 0.0 {
                return Err(ThemeError::BadPoints(c.name.clone()));
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::desert_theme;
    use super::*;

    #[test]
    fn round_trips_through_the_wire_names() {
        let theme = desert_theme();
        let json = serde_json::to_string(&theme).unwrap();
        assert!(json.contains("\"worldName\""));
        assert!(json.contains("\"emoji\""));
        assert!(json.contains("\"type\":\"jump\""));
        assert!(json.contains("\"behavior\":\"static\""));

        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(back.world_name, theme.world_name);
        assert_eq!(back.obstacles[0].kind, AvoidKind::Jump);
    }

    #[test]
    fn valid_theme_passes() {
        assert!(desert_theme().validate().is_ok());
    }

    #[test]
    fn empty_archetype_lists_are_rejected() {
        let mut theme = desert_theme();
        theme.obstacles.clear();
        assert_eq!(theme.validate(), Err(ThemeError::EmptyObstacles));

        let mut theme = desert_theme();
        theme.collectibles.clear();
        assert_eq!(theme.validate(), Err(ThemeError::EmptyCollectibles));
    }

    #[test]
    fn malformed_colors_are_rejected() {
        let mut theme = desert_theme();
        theme.colors.accent = "blue".into();
        assert!(matches!(theme.validate(), Err(ThemeError::BadColor(_))));

        let mut theme = desert_theme();
        theme.colors.background = "#12345g".into();
        assert!(matches!(theme.validate(), Err(ThemeError::BadColor(_))));
    }

    #[test]
    fn negative_points_are_rejected() {
        let mut theme = desert_theme();
        theme.collectibles[0].points = -1.0;
        assert!(matches!(theme.validate(), Err(ThemeError::BadPoints(_))));
    }

    #[test]
    fn alpha_suffix_formats_as_hex() {
        assert_eq!(with_alpha("#2b6cc2", 0x22), "#2b6cc222");
        assert_eq!(with_alpha("#ffffff", 0x04), "#ffffff04");
    }
}
