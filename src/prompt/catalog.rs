//! Static tables of visual modifiers and the lookup catalog built from them.
//!
//! Each category has a fixed, ordered option list and one neutral id whose
//! fragment never reaches the final prompt. Unknown ids resolve to the
//! neutral option so a stale or mistyped selection degrades to "no modifier"
//! instead of failing the request.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One independent axis of visual customization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierCategory {
    Style,
    Framing,
    Angle,
    Lighting,
    Color,
    Texture,
}

impl ModifierCategory {
    /// Composition order: subject modifiers first, then composition,
    /// lighting, color/atmosphere, and technique last. Generative models
    /// weight earlier tokens more, so this order is fixed.
    pub const ORDERED: [ModifierCategory; 6] = [
        ModifierCategory::Style,
        ModifierCategory::Framing,
        ModifierCategory::Angle,
        ModifierCategory::Lighting,
        ModifierCategory::Color,
        ModifierCategory::Texture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierCategory::Style => "style",
            ModifierCategory::Framing => "framing",
            ModifierCategory::Angle => "angle",
            ModifierCategory::Lighting => "lighting",
            ModifierCategory::Color => "color",
            ModifierCategory::Texture => "texture",
        }
    }

    pub fn parse(name: &str) -> Option<ModifierCategory> {
        Self::ORDERED.iter().copied().find(|c| c.as_str() == name)
    }

    /// The no-op option id within this category.
    pub fn neutral_id(&self) -> &'static str {
        match self {
            ModifierCategory::Style => "none",
            _ => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModifierOption {
    pub id: &'static str,
    pub label: &'static str,
    pub prompt_fragment: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AspectRatioOption {
    pub id: &'static str,
    pub label: &'static str,
    pub ratio_value: &'static str,
}

pub const STYLE_OPTIONS: &[ModifierOption] = &[
    // The neutral style carries a fragment in the table for display purposes
    // but is still suppressed during composition.
    ModifierOption { id: "none", label: "Realistic (Standard)", prompt_fragment: "photorealistic, 8k, highly detailed, sharp focus, raw photo" },
    ModifierOption { id: "cinematic", label: "Modern Cinema", prompt_fragment: "cinematic movie scene, anamorphic lens, teal and orange grading, depth of field, motion picture look, atmospheric" },
    ModifierOption { id: "cyberpunk", label: "Cyberpunk / Neon", prompt_fragment: "cyberpunk aesthetic, neon lights, rain-slicked streets, futuristic, high contrast, vibrant magenta and cyan, blade runner style" },
    ModifierOption { id: "analog", label: "Retro Analog", prompt_fragment: "analog photography, 35mm film, vintage kodak portra 400, film grain, light leaks, nostalgic, soft colors" },
    ModifierOption { id: "studio-portrait", label: "Studio Portrait", prompt_fragment: "professional studio photography, grey background, rim lighting, softbox, high fashion, vogue style, sharp details" },
    ModifierOption { id: "architectural", label: "Architecture", prompt_fragment: "architectural photography, wide angle, straight lines, interior design magazine style, modern, minimalist, bright" },
    ModifierOption { id: "fantasy-art", label: "Fantasy Art", prompt_fragment: "digital fantasy art, ethereal, magical atmosphere, detailed environment, rpg style, concept art, masterpiece" },
    ModifierOption { id: "anime", label: "Premium Anime", prompt_fragment: "high quality anime style, makoto shinkai vibe, detailed background, vibrant clouds, 2D animation, cel shaded" },
    ModifierOption { id: "3d-clay", label: "3D Clay", prompt_fragment: "3d clay render, plasticine texture, cute, soft lighting, diorama look, stop motion style, playful" },
    ModifierOption { id: "isometric", label: "Isometric World", prompt_fragment: "isometric view, 3d render, low poly, cute, miniature world, clean edges, unreal engine 5" },
    ModifierOption { id: "watercolor", label: "Soft Watercolor", prompt_fragment: "watercolor painting, soft brush strokes, pastel colors, artistic, paper texture, wet on wet technique" },
    ModifierOption { id: "sketch", label: "Pencil Sketch", prompt_fragment: "pencil sketch, charcoal drawing, rough lines, graphite texture, monochrome, artistic draft" },
];

pub const FRAMING_OPTIONS: &[ModifierOption] = &[
    ModifierOption { id: "default", label: "Automatic", prompt_fragment: "" },
    ModifierOption { id: "wide", label: "Wide Angle", prompt_fragment: "wide angle lens, 16mm, expansive view" },
    ModifierOption { id: "medium", label: "Medium Shot", prompt_fragment: "medium shot, waist up, 50mm lens" },
    ModifierOption { id: "closeup", label: "Close-Up", prompt_fragment: "close-up shot, detailed face, emotion" },
    ModifierOption { id: "macro", label: "Macro (Detail)", prompt_fragment: "macro photography, 100mm lens, microscopic details, extreme close-up" },
    ModifierOption { id: "overhead", label: "Overhead (Flat Lay)", prompt_fragment: "flat lay, overhead view, top-down shot, 90 degree angle" },
];

pub const ANGLE_OPTIONS: &[ModifierOption] = &[
    ModifierOption { id: "default", label: "Eye Level", prompt_fragment: "eye level shot" },
    ModifierOption { id: "low", label: "Low Angle (Hero)", prompt_fragment: "low angle shot, looking up, imposing, heroic" },
    ModifierOption { id: "high", label: "High Angle", prompt_fragment: "high angle shot, looking down, vulnerable" },
    ModifierOption { id: "dutch", label: "Dutch Angle (Tilted)", prompt_fragment: "dutch angle, tilted frame, dynamic, uneasy" },
    ModifierOption { id: "drone", label: "Aerial / Drone", prompt_fragment: "aerial photography, drone shot, bird's eye view" },
];

pub const LIGHTING_OPTIONS: &[ModifierOption] = &[
    ModifierOption { id: "default", label: "Natural / Balanced", prompt_fragment: "natural lighting, balanced exposure" },
    ModifierOption { id: "golden", label: "Golden Hour", prompt_fragment: "golden hour, warm sunset light, sun flares, soft backlight" },
    ModifierOption { id: "studio", label: "Studio Softbox", prompt_fragment: "professional studio lighting, softbox, three-point lighting" },
    ModifierOption { id: "rembrandt", label: "Rembrandt (Dramatic)", prompt_fragment: "rembrandt lighting, moody, chiaroscuro, artistic shadows" },
    ModifierOption { id: "neon", label: "Cyberpunk Neon", prompt_fragment: "neon lighting, pink and blue rim lights, dark environment" },
    ModifierOption { id: "volumetric", label: "Volumetric (Rays)", prompt_fragment: "volumetric lighting, god rays, atmospheric haze, dusty beams" },
    ModifierOption { id: "flat", label: "Flat (Shadowless)", prompt_fragment: "flat lighting, even illumination, low contrast" },
];

pub const COLOR_OPTIONS: &[ModifierOption] = &[
    ModifierOption { id: "default", label: "Natural", prompt_fragment: "" },
    ModifierOption { id: "bw", label: "Black & White Noir", prompt_fragment: "black and white photography, film noir, high contrast, monochrome" },
    ModifierOption { id: "vibrant", label: "Vibrant / Saturated", prompt_fragment: "vibrant colors, high saturation, colorful, pop" },
    ModifierOption { id: "pastel", label: "Pastel / Soft", prompt_fragment: "pastel color palette, desaturated, soft tones, dreamy" },
    ModifierOption { id: "teal-orange", label: "Teal & Orange (Cinema)", prompt_fragment: "teal and orange color grading, cinematic colors, complementary colors" },
    ModifierOption { id: "vintage", label: "Sepia / Vintage", prompt_fragment: "sepia tone, vintage colors, faded look, warm wash" },
    ModifierOption { id: "muted", label: "Muted / Moody", prompt_fragment: "muted colors, desaturated, melancholic, cool tones" },
];

pub const TEXTURE_OPTIONS: &[ModifierOption] = &[
    ModifierOption { id: "default", label: "Clean Digital", prompt_fragment: "clean digital sensor, no grain, sharp" },
    ModifierOption { id: "film-grain", label: "Film Grain", prompt_fragment: "film grain, noise, textured, analog feel" },
    ModifierOption { id: "polaroid", label: "Instant Polaroid", prompt_fragment: "polaroid aesthetic, soft focus, vintage instant film" },
    ModifierOption { id: "vhs", label: "VHS / Glitch", prompt_fragment: "vhs aesthetic, glitch art, chromatic aberration, scanlines" },
    ModifierOption { id: "matte", label: "Matte Finish", prompt_fragment: "matte finish, soft texture, low contrast" },
];

pub const ASPECT_RATIO_OPTIONS: &[AspectRatioOption] = &[
    AspectRatioOption { id: "1:1", label: "Square", ratio_value: "1:1" },
    AspectRatioOption { id: "3:4", label: "Portrait (3:4)", ratio_value: "3:4" },
    AspectRatioOption { id: "4:3", label: "Landscape (4:3)", ratio_value: "4:3" },
    AspectRatioOption { id: "9:16", label: "Story (9:16)", ratio_value: "9:16" },
    AspectRatioOption { id: "16:9", label: "Cinema (16:9)", ratio_value: "16:9" },
];

pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// Lookup over all modifier tables, built once at startup.
pub struct ModifierCatalog {
    by_category: HashMap<ModifierCategory, HashMap<&'static str, ModifierOption>>,
}

impl ModifierCatalog {
    pub fn new() -> Self {
        let mut by_category = HashMap::new();
        for category in ModifierCategory::ORDERED {
            let table = Self::table(category);
            let mut by_id = HashMap::new();
            for option in table {
                by_id.insert(option.id, *option);
            }
            by_category.insert(category, by_id);
        }
        ModifierCatalog { by_category }
    }

    /// The ordered option table for one category, as declared above.
    pub fn table(category: ModifierCategory) -> &'static [ModifierOption] {
        match category {
            ModifierCategory::Style => STYLE_OPTIONS,
            ModifierCategory::Framing => FRAMING_OPTIONS,
            ModifierCategory::Angle => ANGLE_OPTIONS,
            ModifierCategory::Lighting => LIGHTING_OPTIONS,
            ModifierCategory::Color => COLOR_OPTIONS,
            ModifierCategory::Texture => TEXTURE_OPTIONS,
        }
    }

    /// Resolve an option id within a category. Unknown ids resolve to the
    /// neutral option.
    pub fn resolve(&self, category: ModifierCategory, id: &str) -> &ModifierOption {
        let by_id = &self.by_category[&category];
        by_id.get(id).unwrap_or_else(|| &by_id[category.neutral_id()])
    }

    pub fn is_neutral(&self, category: ModifierCategory, id: &str) -> bool {
        self.resolve(category, id).id == category.neutral_id()
    }

    /// Resolve an aspect-ratio id to the value sent to the API. Unknown ids
    /// fall back to the square default.
    pub fn aspect_ratio_value(&self, id: &str) -> &'static str {
        ASPECT_RATIO_OPTIONS
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.ratio_value)
            .unwrap_or(DEFAULT_ASPECT_RATIO)
    }
}

impl Default for ModifierCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_its_neutral_option() {
        let catalog = ModifierCatalog::new();
        for category in ModifierCategory::ORDERED {
            let neutral = catalog.resolve(category, category.neutral_id());
            assert_eq!(neutral.id, category.neutral_id());
        }
    }

    #[test]
    fn test_unknown_id_resolves_to_neutral() {
        let catalog = ModifierCatalog::new();
        let resolved = catalog.resolve(ModifierCategory::Framing, "no-such-option");
        assert_eq!(resolved.id, "default");
        assert!(catalog.is_neutral(ModifierCategory::Framing, "no-such-option"));
    }

    #[test]
    fn test_option_ids_unique_within_category() {
        for category in ModifierCategory::ORDERED {
            let table = ModifierCatalog::table(category);
            let mut seen = std::collections::HashSet::new();
            for option in table {
                assert!(seen.insert(option.id), "duplicate id {} in {}", option.id, category.as_str());
            }
        }
    }

    #[test]
    fn test_aspect_ratio_lookup_and_fallback() {
        let catalog = ModifierCatalog::new();
        assert_eq!(catalog.aspect_ratio_value("16:9"), "16:9");
        assert_eq!(catalog.aspect_ratio_value("21:9"), "1:1");
    }

    #[test]
    fn test_category_parse_round_trip() {
        for category in ModifierCategory::ORDERED {
            assert_eq!(ModifierCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(ModifierCategory::parse("flavor"), None);
    }
}
