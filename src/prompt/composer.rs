//! Deterministic prompt composition.
//!
//! Turns a free-text description plus one selected option per modifier
//! category into the single final prompt string sent to the model. Pure and
//! infallible: neutral, unknown, and blank-fragment selections are skipped.
use serde::{Deserialize, Serialize};

use crate::prompt::catalog::{ModifierCatalog, ModifierCategory};

/// One selected option id per modifier category. Missing fields deserialize
/// to the category's neutral id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierSelections {
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_other")]
    pub framing: String,
    #[serde(default = "default_other")]
    pub angle: String,
    #[serde(default = "default_other")]
    pub lighting: String,
    #[serde(default = "default_other")]
    pub color: String,
    #[serde(default = "default_other")]
    pub texture: String,
}

fn default_style() -> String {
    ModifierCategory::Style.neutral_id().to_string()
}

fn default_other() -> String {
    "default".to_string()
}

impl Default for ModifierSelections {
    fn default() -> Self {
        ModifierSelections {
            style: default_style(),
            framing: default_other(),
            angle: default_other(),
            lighting: default_other(),
            color: default_other(),
            texture: default_other(),
        }
    }
}

impl ModifierSelections {
    pub fn get(&self, category: ModifierCategory) -> &str {
        match category {
            ModifierCategory::Style => &self.style,
            ModifierCategory::Framing => &self.framing,
            ModifierCategory::Angle => &self.angle,
            ModifierCategory::Lighting => &self.lighting,
            ModifierCategory::Color => &self.color,
            ModifierCategory::Texture => &self.texture,
        }
    }

    pub fn set(&mut self, category: ModifierCategory, id: impl Into<String>) {
        let id = id.into();
        match category {
            ModifierCategory::Style => self.style = id,
            ModifierCategory::Framing => self.framing = id,
            ModifierCategory::Angle => self.angle = id,
            ModifierCategory::Lighting => self.lighting = id,
            ModifierCategory::Color => self.color = id,
            ModifierCategory::Texture => self.texture = id,
        }
    }
}

/// Compose the final prompt from the trimmed base description and the
/// selected modifier fragments, in fixed category order.
///
/// With no contributing fragments the trimmed description is returned
/// unchanged; otherwise the result is `"{base}. {f1, f2, ...}."`.
pub fn compose(base_description: &str, selections: &ModifierSelections, catalog: &ModifierCatalog) -> String {
    let trimmed = base_description.trim();

    let mut fragments: Vec<&str> = Vec::new();
    for category in ModifierCategory::ORDERED {
        let selected = selections.get(category);
        if catalog.is_neutral(category, selected) {
            continue;
        }
        let option = catalog.resolve(category, selected);
        if option.prompt_fragment.trim().is_empty() {
            continue;
        }
        fragments.push(option.prompt_fragment);
    }

    if fragments.is_empty() {
        trimmed.to_string()
    } else {
        format!("{}. {}.", trimmed, fragments.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ModifierCatalog {
        ModifierCatalog::new()
    }

    #[test]
    fn test_neutral_selections_return_trimmed_base_unchanged() {
        let selections = ModifierSelections::default();
        let out = compose("  a red fox in the snow  ", &selections, &catalog());
        assert_eq!(out, "a red fox in the snow");
    }

    #[test]
    fn test_fragments_joined_in_fixed_category_order() {
        let mut selections = ModifierSelections::default();
        // Deliberately set in reverse order; output order must not change.
        selections.texture = "film-grain".to_string();
        selections.lighting = "golden".to_string();
        selections.framing = "wide".to_string();
        let out = compose("a lighthouse", &selections, &catalog());
        assert_eq!(
            out,
            "a lighthouse. wide angle lens, 16mm, expansive view, \
             golden hour, warm sunset light, sun flares, soft backlight, \
             film grain, noise, textured, analog feel."
        );
    }

    #[test]
    fn test_neutral_fragment_never_emitted_even_when_non_empty() {
        // The neutral angle option carries "eye level shot" in the table and
        // the neutral style option carries a full fragment; neither may leak.
        let selections = ModifierSelections::default();
        let out = compose("portrait of a sailor", &selections, &catalog());
        assert_eq!(out, "portrait of a sailor");
        assert!(!out.contains("eye level shot"));
        assert!(!out.contains("photorealistic"));
    }

    #[test]
    fn test_unknown_ids_degrade_to_skipped_categories() {
        let mut selections = ModifierSelections::default();
        selections.style = "vaporwave".to_string();
        selections.color = "bw".to_string();
        let out = compose("an old harbor", &selections, &catalog());
        assert_eq!(out, "an old harbor. black and white photography, film noir, high contrast, monochrome.");
    }

    #[test]
    fn test_single_fragment_shape() {
        let mut selections = ModifierSelections::default();
        selections.style = "anime".to_string();
        let out = compose("two cranes at dawn", &selections, &catalog());
        assert!(out.starts_with("two cranes at dawn. high quality anime style"));
        assert!(out.ends_with("cel shaded."));
    }

    #[test]
    fn test_empty_base_still_composes_for_edit_mode() {
        let mut selections = ModifierSelections::default();
        selections.framing = "closeup".to_string();
        let out = compose("   ", &selections, &catalog());
        assert_eq!(out, ". close-up shot, detailed face, emotion.");
    }

    #[test]
    fn test_selections_deserialize_with_defaults() {
        let selections: ModifierSelections = serde_json::from_str(r#"{"style":"cinematic"}"#).unwrap();
        assert_eq!(selections.style, "cinematic");
        assert_eq!(selections.framing, "default");
        assert_eq!(selections.texture, "default");
    }
}
