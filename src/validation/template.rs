//! Template part checks.
//!
//! When a cabinet is converted onto a stock template, every template part
//! the description leaves out is a candidate for artwork lying unused in
//! the folder. These checks pair such parts with likely files.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{CabinetDescription, FileInventory, FileType, Template};

use super::status::ValidationStatus;

/// A template part the description does not declare, with a likely file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSuggestion {
    pub part: String,
    pub status: ValidationStatus,
}

/// Suggest unassigned images for template parts missing from `description`.
///
/// Parts without a plausible file are left out. A file is suggested for at
/// most one part, in template order.
pub fn check_template(
    description: &CabinetDescription,
    inventory: &FileInventory,
    template: &Template,
) -> Vec<TemplateSuggestion> {
    let declared: HashSet<String> = description
        .part_names()
        .map(|n| n.to_ascii_lowercase())
        .collect();
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut suggestions = Vec::new();

    for part in template.parts {
        if declared.contains(&part.to_ascii_lowercase()) {
            continue;
        }

        let mut best: Option<(f32, &str)> = None;
        for entry in inventory.unassigned().filter(|e| e.file_type == FileType::Image) {
            if claimed.contains(entry.filename.as_str()) {
                continue;
            }
            let Some(confidence) = match_confidence(part, entry.stem()) else {
                continue;
            };
            if best.map_or(true, |(c, _)| confidence > c) {
                best = Some((confidence, entry.filename.as_str()));
            }
        }

        if let Some((confidence, filename)) = best {
            claimed.insert(filename);
            suggestions.push(TemplateSuggestion {
                part: part.to_string(),
                status: ValidationStatus::suggestion(filename, confidence),
            });
        }
    }

    suggestions
}

/// How well a file stem names a part, or `None` for no resemblance.
///
/// Exact stems score 1.0, stems equal once separators are ignored 0.9,
/// and stems containing (or contained in) the part name 0.6.
pub fn match_confidence(part: &str, stem: &str) -> Option<f32> {
    let part = part.to_lowercase();
    let stem = stem.to_lowercase();

    if stem == part {
        return Some(1.0);
    }

    let squash = |s: &str| -> String {
        s.chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '.'))
            .collect()
    };
    let (part_flat, stem_flat) = (squash(&part), squash(&stem));
    if part_flat.is_empty() || stem_flat.is_empty() {
        return None;
    }
    if stem_flat == part_flat {
        return Some(0.9);
    }

    // Short stems like "l" or "cp" would match too much.
    if stem_flat.len() >= 3 && (stem_flat.contains(&part_flat) || part_flat.contains(&stem_flat)) {
        return Some(0.6);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CabinetPart, FileEntry};

    fn inventory(names: &[&str]) -> FileInventory {
        FileInventory::from_entries(
            names
                .iter()
                .map(|n| FileEntry::new(*n, format!("/cab/{}", n)))
                .collect(),
        )
    }

    #[test]
    fn test_match_confidence() {
        assert_eq!(match_confidence("left", "left"), Some(1.0));
        assert_eq!(match_confidence("left", "LEFT"), Some(1.0));
        assert_eq!(match_confidence("coin-door", "coin_door"), Some(0.9));
        assert_eq!(match_confidence("left", "left-side-art"), Some(0.6));
        assert_eq!(match_confidence("marquee-box", "marquee"), Some(0.6));
        assert_eq!(match_confidence("left", "right"), None);
        assert_eq!(match_confidence("cp-shell", "cp"), None);
    }

    #[test]
    fn test_suggests_best_file_for_missing_parts() {
        let mut desc = CabinetDescription::new("galaga");
        desc.parts.push(CabinetPart::new("bezel"));
        let files = inventory(&["left-side.png", "left.png", "right.jpg", "bezel.png", "notes.txt"]);
        let template = Template::find("cabinet").unwrap();

        let suggestions = check_template(&desc, &files, template);

        let found: Vec<(&str, &ValidationStatus)> =
            suggestions.iter().map(|s| (s.part.as_str(), &s.status)).collect();
        assert_eq!(
            found,
            vec![
                ("left", &ValidationStatus::suggestion("left.png", 1.0)),
                ("right", &ValidationStatus::suggestion("right.jpg", 1.0)),
            ]
        );
    }

    #[test]
    fn test_files_suggested_once() {
        let desc = CabinetDescription::new("galaga");
        let files = inventory(&["marquee.png"]);
        let template = Template::find("cabinet").unwrap();

        let suggestions = check_template(&desc, &files, template);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].part, "marquee");
    }

    #[test]
    fn test_assigned_files_not_suggested() {
        let desc = CabinetDescription::new("galaga");
        let mut files = inventory(&["left.png"]);
        files.get_mut("left.png").unwrap().assign("side");
        let template = Template::find("cabinet").unwrap();

        assert!(check_template(&desc, &files, template).is_empty());
    }
}
