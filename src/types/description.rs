//! Cabinet description types.
//!
//! A `CabinetDescription` is the structured form of a cabinet's
//! `description.yaml`:
//!
//! ```yaml
//! name: galaga
//! year: 1981
//! model:
//!   style: galaga
//! crt:
//!   orientation: vertical
//! parts:
//!   - name: marquee
//!     type: marquee
//!     art:
//!       file: marquee.png
//!   - name: left
//!     color:
//!       r: 200
//!       g: 30
//!       b: 30
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Parsed cabinet description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CabinetDescription {
    /// Cabinet name. Empty when the file has no `name:`; the loader
    /// substitutes the folder name.
    pub name: String,
    pub year: Option<String>,
    pub rom: Option<String>,
    pub style: Option<String>,
    pub material: Option<String>,
    pub model: Option<ModelSpec>,
    pub video: Option<VideoSpec>,
    pub crt: Option<CrtSpec>,
    pub coinslot: Option<String>,
    /// Parts in source order, unique by name.
    pub parts: Vec<CabinetPart>,
}

impl CabinetDescription {
    /// Create an empty description with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up a part by name.
    pub fn part(&self, name: &str) -> Option<&CabinetPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Iterate over part names in source order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// The model file, if one is configured.
    pub fn model_file(&self) -> Option<&str> {
        self.model.as_ref().and_then(|m| m.file.as_deref())
    }

    /// The video file, if one is configured.
    pub fn video_file(&self) -> Option<&str> {
        self.video.as_ref().and_then(|v| v.file.as_deref())
    }
}

/// The `model:` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub file: Option<String>,
    pub style: Option<String>,
}

/// The `video:` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoSpec {
    pub file: Option<String>,
    pub invert_x: bool,
    pub invert_y: bool,
}

/// The `crt:` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrtSpec {
    pub orientation: Orientation,
}

/// Monitor orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// `"horizontal"` in any case is horizontal; everything else is vertical.
    pub fn from_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("horizontal") {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// One artwork surface on the cabinet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinetPart {
    /// Part name (unique within a description).
    pub name: String,
    #[serde(rename = "type")]
    pub part_type: PartType,
    pub art: Option<ArtSpec>,
    pub material: Option<String>,
    pub color: Option<ColorSpec>,
}

impl CabinetPart {
    /// Create a part with no art, material or colour.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            part_type: PartType::Default,
            art: None,
            material: None,
            color: None,
        }
    }

    /// The art file, if the part has an art block with a file.
    pub fn art_file(&self) -> Option<&str> {
        self.art.as_ref().and_then(|a| a.file.as_deref())
    }
}

/// Kind of surface a part represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
    Marquee,
    Bezel,
    #[default]
    Default,
}

impl PartType {
    /// `marquee` and `bezel` (any case) are recognised; anything else is default.
    pub fn from_value(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "marquee" => PartType::Marquee,
            "bezel" => PartType::Bezel,
            _ => PartType::Default,
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartType::Marquee => write!(f, "marquee"),
            PartType::Bezel => write!(f, "bezel"),
            PartType::Default => write!(f, "default"),
        }
    }
}

/// A part's `art:` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtSpec {
    pub file: Option<String>,
    pub invert_x: bool,
    pub invert_y: bool,
    /// Rotation in degrees.
    pub rotate: i32,
}

impl ArtSpec {
    pub fn with_file(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Default::default()
        }
    }
}

/// A part's `color:` block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Expected in `0.0..=1.0`; not clamped at decode time.
    pub intensity: f32,
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            intensity: 1.0,
        }
    }
}

impl ColorSpec {
    pub fn intensity_in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_type_from_value() {
        assert_eq!(PartType::from_value("marquee"), PartType::Marquee);
        assert_eq!(PartType::from_value("Bezel"), PartType::Bezel);
        assert_eq!(PartType::from_value("side"), PartType::Default);
        assert_eq!(PartType::from_value(""), PartType::Default);
    }

    #[test]
    fn test_orientation_from_value() {
        assert_eq!(Orientation::from_value("HORIZONTAL"), Orientation::Horizontal);
        assert_eq!(Orientation::from_value("vertical"), Orientation::Vertical);
        assert_eq!(Orientation::from_value("sideways"), Orientation::Vertical);
    }

    #[test]
    fn test_lookup_helpers() {
        let mut desc = CabinetDescription::new("galaga");
        let mut bezel = CabinetPart::new("bezel");
        bezel.art = Some(ArtSpec::with_file("bezel.png"));
        desc.parts.push(bezel);
        desc.parts.push(CabinetPart::new("left"));
        desc.video = Some(VideoSpec {
            file: Some("attract.mp4".to_string()),
            ..Default::default()
        });

        assert_eq!(desc.part("bezel").and_then(|p| p.art_file()), Some("bezel.png"));
        assert!(desc.part("left").unwrap().art_file().is_none());
        assert!(desc.part("right").is_none());
        assert_eq!(desc.part_names().collect::<Vec<_>>(), vec!["bezel", "left"]);
        assert_eq!(desc.video_file(), Some("attract.mp4"));
        assert_eq!(desc.model_file(), None);
    }

    #[test]
    fn test_color_intensity_range() {
        let mut color = ColorSpec::default();
        assert!(color.intensity_in_range());
        color.intensity = 1.5;
        assert!(!color.intensity_in_range());
    }
}
