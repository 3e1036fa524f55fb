//! Cabinet templates.
//!
//! A template is one of the stock 3D cabinet models a cabinet can be
//! converted onto. Each template exposes a fixed set of named surfaces that
//! artwork can be mapped to.

use std::fmt;

use serde::Serialize;

/// A stock cabinet model and the parts it provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub parts: &'static [&'static str],
}

const CABINET: Template = Template {
    name: "cabinet",
    description: "Classic upright cabinet",
    parts: &[
        "left",
        "right",
        "front-kick",
        "back",
        "top",
        "bottom",
        "marquee",
        "marquee-box",
        "bezel",
        "cp-shell",
        "joystick",
        "coin-door",
        "speaker",
        "t-molding",
        "screen",
    ],
};

const COCKTAIL: Template = Template {
    name: "cocktail",
    description: "Sit-down table with a horizontal screen under glass",
    parts: &[
        "left",
        "right",
        "front",
        "back",
        "top",
        "bottom",
        "bezel",
        "coin-door",
        "speaker",
        "joystick",
        "joystick-2",
        "marquee",
        "t-molding",
        "screen",
    ],
};

const DRIVING: Template = Template {
    name: "driving",
    description: "Sit-down driving cabinet with wheel, pedals and seat",
    parts: &[
        "left",
        "right",
        "front-kick",
        "back",
        "top",
        "bottom",
        "marquee",
        "marquee-box",
        "bezel",
        "dashboard",
        "steering-wheel",
        "steering-column",
        "gear-shifter",
        "gas-pedal",
        "brake-pedal",
        "seat",
        "coin-door",
        "speaker",
        "t-molding",
        "screen",
    ],
};

const LIGHTGUN: Template = Template {
    name: "lightgun",
    description: "Wide-screen cabinet with mounted light guns",
    parts: &[
        "left",
        "right",
        "front",
        "front-lower",
        "back",
        "top",
        "bottom",
        "marquee",
        "marquee-box",
        "bezel",
        "gun-shelf",
        "gun",
        "gun2",
        "pedal",
        "coin-door",
        "speaker",
        "t-molding",
        "screen",
    ],
};

static ALL: [Template; 4] = [CABINET, COCKTAIL, DRIVING, LIGHTGUN];

impl Template {
    /// All stock templates.
    pub fn all() -> &'static [Template] {
        &ALL
    }

    /// Find a template by name (case-insensitive).
    pub fn find(name: &str) -> Option<&'static Template> {
        ALL.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Whether the template provides a part with this name.
    pub fn has_part(&self, part: &str) -> bool {
        self.parts.iter().any(|p| p.eq_ignore_ascii_case(part))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_template() {
        assert_eq!(Template::find("Cocktail").map(|t| t.name), Some("cocktail"));
        assert!(Template::find("pinball").is_none());
        assert_eq!(Template::all().len(), 4);
    }

    #[test]
    fn test_every_template_has_core_parts() {
        for template in Template::all() {
            for part in ["left", "right", "marquee", "bezel", "screen", "t-molding"] {
                assert!(template.has_part(part), "{} lacks {}", template, part);
            }
        }
    }

    #[test]
    fn test_template_specific_parts() {
        let driving = Template::find("driving").unwrap();
        assert!(driving.has_part("steering-wheel"));
        assert!(!driving.has_part("gun"));

        let lightgun = Template::find("lightgun").unwrap();
        assert!(lightgun.has_part("gun2"));
        assert!(!lightgun.has_part("cp-shell"));
    }
}
