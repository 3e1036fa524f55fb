//! Decoder for `description.yaml`.
//!
//! The description dialect is a fixed two-level grammar, not general YAML:
//! top-level scalars, three nested sections (`model`, `video`, `crt`) and a
//! `parts` sequence whose items may carry `art` and `color` blocks. Decoding
//! is lenient: unknown keys and malformed lines are dropped and numeric
//! fields fall back to defaults, so it never fails.

use crate::types::{
    ArtSpec, CabinetDescription, CabinetPart, ColorSpec, CrtSpec, ModelSpec, Orientation,
    PartType, VideoSpec,
};

use super::token::{tokenize, Token};

/// Decode a description. Never fails; an empty name stays empty.
pub fn decode(source: &str) -> CabinetDescription {
    let mut decoder = Decoder::new();
    for token in tokenize(source) {
        decoder.feed(&token);
    }
    decoder.finish()
}

/// Decode a description, using `default_name` when it has no `name:`.
pub fn decode_named(source: &str, default_name: &str) -> CabinetDescription {
    let mut description = decode(source);
    if description.name.is_empty() {
        description.name = default_name.to_string();
    }
    description
}

/// The section the decoder is currently filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Top,
    Parts,
    Model,
    Video,
    Crt,
}

/// Sub-block of the open part. Carries the indent of the line that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartBlock {
    None,
    Art { indent: usize },
    Color { indent: usize },
}

/// A part under construction. Fields stay `None` until the source sets them
/// so duplicates can be merged field by field.
#[derive(Debug, Default)]
struct PartBuilder {
    name: String,
    part_type: Option<PartType>,
    art: Option<ArtSpec>,
    material: Option<String>,
    color: Option<ColorSpec>,
}

impl PartBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    fn build(self) -> CabinetPart {
        CabinetPart {
            name: self.name,
            part_type: self.part_type.unwrap_or_default(),
            art: self.art,
            material: self.material,
            color: self.color,
        }
    }

    /// Overwrite the fields this builder set; keep the rest.
    fn merge_into(self, existing: &mut CabinetPart) {
        if let Some(part_type) = self.part_type {
            existing.part_type = part_type;
        }
        if self.art.is_some() {
            existing.art = self.art;
        }
        if self.material.is_some() {
            existing.material = self.material;
        }
        if self.color.is_some() {
            existing.color = self.color;
        }
    }
}

/// Single-pass state machine over description tokens.
#[derive(Debug)]
pub struct Decoder {
    description: CabinetDescription,
    section: Section,
    block: PartBlock,
    open_part: Option<PartBuilder>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            description: CabinetDescription::default(),
            section: Section::Top,
            block: PartBlock::None,
            open_part: None,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn block(&self) -> PartBlock {
        self.block
    }

    /// Feed the next token.
    pub fn feed(&mut self, token: &Token) {
        if token.is_top_level() {
            self.enter_top(token);
            return;
        }

        match self.section {
            Section::Top => {
                log::trace!("line {}: '{}' outside any section", token.line, token.key);
            }
            Section::Parts => self.feed_part(token),
            Section::Model => self.feed_model(token),
            Section::Video => self.feed_video(token),
            Section::Crt => self.feed_crt(token),
        }
    }

    /// Close any open part and return the description.
    pub fn finish(mut self) -> CabinetDescription {
        self.close_part();
        self.description
    }

    fn enter_top(&mut self, token: &Token) {
        self.close_part();
        self.block = PartBlock::None;
        self.section = Section::Top;

        let desc = &mut self.description;
        match token.key.as_str() {
            "name" => desc.name = token.value.clone(),
            "year" => desc.year = non_empty(&token.value),
            "rom" => desc.rom = non_empty(&token.value),
            "style" => desc.style = non_empty(&token.value),
            "material" => desc.material = non_empty(&token.value),
            "coinslot" => desc.coinslot = non_empty(&token.value),
            "model" => {
                desc.model = Some(ModelSpec::default());
                self.section = Section::Model;
            }
            "video" => {
                desc.video = Some(VideoSpec::default());
                self.section = Section::Video;
            }
            "crt" => {
                desc.crt = Some(CrtSpec::default());
                self.section = Section::Crt;
            }
            "parts" => self.section = Section::Parts,
            other => log::debug!("line {}: ignoring unknown key '{}'", token.line, other),
        }
    }

    fn feed_part(&mut self, token: &Token) {
        if token.is_array_item() {
            if token.key == "name" {
                self.close_part();
                self.block = PartBlock::None;
                self.open_part = Some(PartBuilder::new(token.value.clone()));
            } else {
                log::debug!(
                    "line {}: part items must start with '- name:', got '{}'",
                    token.line,
                    token.key
                );
            }
            return;
        }

        let Some(part) = self.open_part.as_mut() else {
            log::trace!("line {}: '{}' before the first part", token.line, token.key);
            return;
        };

        if let PartBlock::Art { indent } | PartBlock::Color { indent } = self.block {
            if token.indent <= indent {
                self.block = PartBlock::None;
            }
        }

        let value = token.value.as_str();
        match self.block {
            PartBlock::Art { .. } => {
                let art = part.art.get_or_insert_with(ArtSpec::default);
                match token.key.as_str() {
                    "file" => art.file = non_empty(value),
                    "invertx" => art.invert_x = parse_bool(value),
                    "inverty" => art.invert_y = parse_bool(value),
                    "rotate" => art.rotate = value.parse().unwrap_or(0),
                    _ => {}
                }
            }
            PartBlock::Color { .. } => {
                let color = part.color.get_or_insert_with(ColorSpec::default);
                match token.key.as_str() {
                    "r" => color.r = parse_channel(value),
                    "g" => color.g = parse_channel(value),
                    "b" => color.b = parse_channel(value),
                    "intensity" => color.intensity = value.parse().unwrap_or(1.0),
                    _ => {}
                }
            }
            PartBlock::None => match token.key.as_str() {
                "type" => part.part_type = Some(PartType::from_value(value)),
                "material" => part.material = non_empty(value),
                "art" => {
                    part.art = Some(ArtSpec::default());
                    self.block = PartBlock::Art {
                        indent: token.indent,
                    };
                }
                "color" => {
                    part.color = Some(ColorSpec::default());
                    self.block = PartBlock::Color {
                        indent: token.indent,
                    };
                }
                _ => {}
            },
        }
    }

    fn feed_model(&mut self, token: &Token) {
        if token.is_array_item() {
            return;
        }
        let model = self.description.model.get_or_insert_with(ModelSpec::default);
        match token.key.as_str() {
            "file" => model.file = non_empty(&token.value),
            "style" => model.style = non_empty(&token.value),
            _ => {}
        }
    }

    fn feed_video(&mut self, token: &Token) {
        if token.is_array_item() {
            return;
        }
        let video = self.description.video.get_or_insert_with(VideoSpec::default);
        match token.key.as_str() {
            "file" => video.file = non_empty(&token.value),
            "invertx" => video.invert_x = parse_bool(&token.value),
            "inverty" => video.invert_y = parse_bool(&token.value),
            _ => {}
        }
    }

    fn feed_crt(&mut self, token: &Token) {
        if token.is_array_item() {
            return;
        }
        if token.key == "orientation" {
            let crt = self.description.crt.get_or_insert_with(CrtSpec::default);
            crt.orientation = Orientation::from_value(&token.value);
        }
    }

    fn close_part(&mut self) {
        let Some(builder) = self.open_part.take() else {
            return;
        };
        if builder.name.is_empty() {
            log::debug!("dropping part with an empty name");
            return;
        }

        let parts = &mut self.description.parts;
        match parts.iter_mut().find(|p| p.name == builder.name) {
            Some(existing) => {
                log::debug!("part '{}' defined twice, merging", builder.name);
                builder.merge_into(existing);
            }
            None => parts.push(builder.build()),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn parse_channel(value: &str) -> u8 {
    value.parse().unwrap_or(255)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GALAGA: &str = "name: galaga\nparts:\n  - name: bezel\n    art:\n      file: bezel.png\n";

    #[test]
    fn test_decode_minimal_cabinet() {
        let desc = decode(GALAGA);

        assert_eq!(desc.name, "galaga");
        assert_eq!(desc.parts.len(), 1);
        assert_eq!(desc.parts[0].name, "bezel");
        assert_eq!(desc.parts[0].art_file(), Some("bezel.png"));
        assert_eq!(desc.parts[0].part_type, PartType::Default);
    }

    #[test]
    fn test_decode_with_byte_order_mark() {
        let desc = decode_named(&format!("\u{feff}{}", GALAGA), "folder");

        assert_eq!(desc.name, "galaga");
        assert_eq!(desc.parts.len(), 1);
    }

    #[test]
    fn test_decode_full_description() {
        let source = r#"
# Galaga upright
name: "galaga"
year: 1981
rom: galaga
style: galaga
material: black
coinslot: coin-slot-small
model:
  file: cabinet.glb
  style: upright
video:
  file: galaga.mp4
  invertx: true
  inverty: FALSE
crt:
  orientation: horizontal
parts:
  - name: marquee
    type: marquee
    art:
      file: 'marquee.png'
      rotate: 90
      invertx: True
  - name: left
    material: wood
    color:
      r: 200
      g: 30
      b: 10
      intensity: 0.5
"#;
        let desc = decode(source);

        assert_eq!(desc.name, "galaga");
        assert_eq!(desc.year.as_deref(), Some("1981"));
        assert_eq!(desc.rom.as_deref(), Some("galaga"));
        assert_eq!(desc.style.as_deref(), Some("galaga"));
        assert_eq!(desc.material.as_deref(), Some("black"));
        assert_eq!(desc.coinslot.as_deref(), Some("coin-slot-small"));
        assert_eq!(
            desc.model,
            Some(ModelSpec {
                file: Some("cabinet.glb".to_string()),
                style: Some("upright".to_string()),
            })
        );
        assert_eq!(
            desc.video,
            Some(VideoSpec {
                file: Some("galaga.mp4".to_string()),
                invert_x: true,
                invert_y: false,
            })
        );
        assert_eq!(
            desc.crt.as_ref().map(|c| c.orientation),
            Some(Orientation::Horizontal)
        );

        let marquee = desc.part("marquee").unwrap();
        assert_eq!(marquee.part_type, PartType::Marquee);
        assert_eq!(
            marquee.art,
            Some(ArtSpec {
                file: Some("marquee.png".to_string()),
                invert_x: true,
                invert_y: false,
                rotate: 90,
            })
        );

        let left = desc.part("left").unwrap();
        assert_eq!(left.material.as_deref(), Some("wood"));
        assert!(left.art.is_none());
        assert_eq!(
            left.color,
            Some(ColorSpec {
                r: 200,
                g: 30,
                b: 10,
                intensity: 0.5,
            })
        );
    }

    #[test]
    fn test_parts_in_source_order() {
        let names = ["left", "right", "marquee", "bezel", "cp-shell"];
        let mut source = String::from("name: test\nparts:\n");
        for name in names {
            source.push_str(&format!("  - name: {}\n    type: default\n", name));
        }

        let desc = decode(&source);
        assert_eq!(desc.part_names().collect::<Vec<_>>(), names.to_vec());
    }

    #[test]
    fn test_decode_is_deterministic() {
        assert_eq!(decode(GALAGA), decode(GALAGA));
    }

    #[test]
    fn test_unknown_top_level_key_ignored() {
        let with_unknown = format!("foo: bar\n{}", GALAGA);
        assert_eq!(decode(&with_unknown), decode(GALAGA));

        let trailing = format!("{}foo: bar\n", GALAGA);
        assert_eq!(decode(&trailing), decode(GALAGA));
    }

    #[test]
    fn test_unknown_section_contents_ignored() {
        let source = "name: x\nextras:\n  file: ignored.png\n  - name: not-a-part\n";
        let desc = decode(source);

        assert_eq!(desc, CabinetDescription::new("x"));
    }

    #[test]
    fn test_numeric_fallbacks() {
        let source = "parts:\n  - name: side\n    art:\n      rotate: ninety\n    color:\n      r: 300\n      g: -1\n      b: 12\n      intensity: bright\n";
        let desc = decode(source);
        let side = desc.part("side").unwrap();

        assert_eq!(side.art.as_ref().unwrap().rotate, 0);
        assert_eq!(
            side.color,
            Some(ColorSpec {
                r: 255,
                g: 255,
                b: 12,
                intensity: 1.0,
            })
        );
    }

    #[test]
    fn test_sub_keys_only_inside_their_block() {
        let source = "parts:\n  - name: side\n    file: stray.png\n    r: 10\n    art:\n      file: side.png\n      r: 10\n";
        let desc = decode(source);
        let side = desc.part("side").unwrap();

        assert_eq!(side.art_file(), Some("side.png"));
        assert!(side.color.is_none());
    }

    #[test]
    fn test_block_closes_on_dedent() {
        let source = "parts:\n  - name: side\n    art:\n      file: side.png\n    material: chrome\n    color:\n      g: 5\n    file: other.png\n";
        let desc = decode(source);
        let side = desc.part("side").unwrap();

        assert_eq!(side.art_file(), Some("side.png"));
        assert_eq!(side.material.as_deref(), Some("chrome"));
        assert_eq!(side.color.unwrap().g, 5);
    }

    #[test]
    fn test_unindented_sequence() {
        let source = "name: x\nparts:\n- name: left\n  art:\n    file: left.png\n- name: right\n";
        let desc = decode(source);

        assert_eq!(desc.part_names().collect::<Vec<_>>(), vec!["left", "right"]);
        assert_eq!(desc.part("left").unwrap().art_file(), Some("left.png"));
    }

    #[test]
    fn test_only_name_items_start_parts() {
        let source = "parts:\n  - type: marquee\n  - name: marquee\n    type: marquee\n";
        let desc = decode(source);

        assert_eq!(desc.parts.len(), 1);
        assert_eq!(desc.parts[0].part_type, PartType::Marquee);
    }

    #[test]
    fn test_duplicate_parts_merge_last_write_wins() {
        let source = "parts:\n  - name: left\n    type: bezel\n    material: wood\n  - name: right\n  - name: left\n    material: metal\n";
        let desc = decode(source);

        assert_eq!(desc.part_names().collect::<Vec<_>>(), vec!["left", "right"]);
        let left = desc.part("left").unwrap();
        assert_eq!(left.part_type, PartType::Bezel);
        assert_eq!(left.material.as_deref(), Some("metal"));
    }

    #[test]
    fn test_top_level_key_closes_parts() {
        let source = "parts:\n  - name: left\nyear: 1982\n  - name: ghost\n";
        let desc = decode(source);

        assert_eq!(desc.part_names().collect::<Vec<_>>(), vec!["left"]);
        assert_eq!(desc.year.as_deref(), Some("1982"));
    }

    #[test]
    fn test_reentering_section_resets_record() {
        let source = "video:\n  file: a.mp4\n  invertx: true\nvideo:\n  file: b.mp4\n";
        let desc = decode(source);

        assert_eq!(
            desc.video,
            Some(VideoSpec {
                file: Some("b.mp4".to_string()),
                invert_x: false,
                invert_y: false,
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode(""), CabinetDescription::default());
        assert_eq!(decode("# only a comment\n\n"), CabinetDescription::default());
    }

    #[test]
    fn test_decode_named_defaults() {
        assert_eq!(decode_named("year: 1980", "pacman").name, "pacman");
        assert_eq!(decode_named(GALAGA, "folder").name, "galaga");
    }

    #[test]
    fn test_decoder_state_transitions() {
        let mut decoder = Decoder::new();
        let tokens = tokenize("parts:\n  - name: a\n    art:\n      file: a.png\nmodel:\n");

        decoder.feed(&tokens[0]);
        assert_eq!(decoder.section(), Section::Parts);
        decoder.feed(&tokens[1]);
        decoder.feed(&tokens[2]);
        assert_eq!(decoder.block(), PartBlock::Art { indent: 4 });
        decoder.feed(&tokens[3]);
        decoder.feed(&tokens[4]);
        assert_eq!(decoder.section(), Section::Model);
        assert_eq!(decoder.block(), PartBlock::None);

        let desc = decoder.finish();
        assert_eq!(desc.parts.len(), 1);
        assert_eq!(desc.model, Some(ModelSpec::default()));
    }
}
