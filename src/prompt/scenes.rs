//! Product scene templates keyed by style.
//!
//! Each style owns exactly six templates in a fixed order (hero, lifestyle,
//! context, detail, seasonal, premium-ish). Templates carry a `{{product}}`
//! placeholder that is replaced with a product-context phrase.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::generation::models::PromptJob;

pub const SCENES_PER_STYLE: usize = 6;

const PLACEHOLDER: &str = "{{product}}";
const GENERIC_PRODUCT: &str = "The uploaded product";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SceneStyle {
    #[default]
    Professional,
    Lifestyle,
    Creative,
    Minimalist,
}

impl SceneStyle {
    pub const ALL: [SceneStyle; 4] = [
        SceneStyle::Professional,
        SceneStyle::Lifestyle,
        SceneStyle::Creative,
        SceneStyle::Minimalist,
    ];

    /// Unknown keys fall back to `Professional`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "lifestyle" => SceneStyle::Lifestyle,
            "creative" => SceneStyle::Creative,
            "minimalist" => SceneStyle::Minimalist,
            _ => SceneStyle::Professional,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SceneStyle::Professional => "professional",
            SceneStyle::Lifestyle => "lifestyle",
            SceneStyle::Creative => "creative",
            SceneStyle::Minimalist => "minimalist",
        }
    }

    fn templates(self) -> &'static [&'static str; SCENES_PER_STYLE] {
        match self {
            SceneStyle::Professional => &PROFESSIONAL,
            SceneStyle::Lifestyle => &LIFESTYLE,
            SceneStyle::Creative => &CREATIVE,
            SceneStyle::Minimalist => &MINIMALIST,
        }
    }
}

impl From<String> for SceneStyle {
    fn from(key: String) -> Self {
        SceneStyle::from_key(&key)
    }
}

impl fmt::Display for SceneStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PROFESSIONAL: [&str; SCENES_PER_STYLE] = [
    "Hero product shot - {{product}} with dramatic studio lighting, clean white background, professional commercial style, product centered and clearly visible, high-end presentation, commercial grade photography",
    "Professional lifestyle shot - {{product}} placed in an elegant home setting with natural lighting, minimalist interior design, luxury atmosphere, professional photography, clean background, maintaining the original product appearance",
    "Product in use context - {{product}} being used in a real-life situation, lifestyle photography, authentic moment, natural environment, storytelling approach, relatable scene while keeping the product recognizable",
    "Detail close-up - {{product}} with macro photography style, extreme close-up of product details, texture and material focus, professional studio setup, commercial photography quality, preserving product identity",
    "Seasonal theme - {{product}} styled with seasonal elements, festive atmosphere, creative composition, lifestyle photography, seasonal color palette, engaging visual story, product remains the focal point",
    "Premium presentation - {{product}} in a luxury showcase, high-end environment, premium materials, sophisticated lighting, editorial photography style, aspirational lifestyle, maintaining product integrity",
];

const LIFESTYLE: [&str; SCENES_PER_STYLE] = [
    "Lifestyle product photography - {{product}} in a natural environment, authentic lifestyle setting, warm lighting, relatable scene, casual atmosphere, everyday use context",
    "Home lifestyle setting - {{product}} in a cozy home environment, warm domestic lighting, comfortable atmosphere, family-friendly scene, residential setting",
    "Outdoor lifestyle scene - {{product}} in a natural outdoor environment, sunlight, casual outdoor setting, recreational context, nature background",
    "Social lifestyle moment - people using {{product}}, social interaction, candid photography, real-life moment, authentic emotion, social context",
    "Modern lifestyle aesthetic - {{product}} in a contemporary living space, modern design elements, trendy atmosphere, current lifestyle trends, fashionable setting",
    "Casual lifestyle setting - {{product}} in a relaxed environment, informal atmosphere, everyday life, natural lighting, comfortable setting",
];

const CREATIVE: [&str; SCENES_PER_STYLE] = [
    "Creative artistic composition - {{product}} with artistic lighting, creative angles, unique perspective, artistic photography, imaginative presentation",
    "Surreal product concept - {{product}} in an imaginative setting, creative concept, artistic interpretation, surreal elements, conceptual art",
    "Dynamic action shot - {{product}} in motion, action photography, dynamic composition, energetic lighting, motion blur effects",
    "Artistic color palette - {{product}} with a creative color scheme, artistic color grading, unique color composition, creative visual style",
    "Abstract product art - {{product}} in an abstract composition, artistic interpretation, creative abstraction, conceptual presentation",
    "Experimental photography - {{product}} shot with experimental techniques, innovative composition, artistic experimentation, creative photography style",
];

const MINIMALIST: [&str; SCENES_PER_STYLE] = [
    "Minimalist clean design - {{product}} in a simple composition, clean lines, minimal elements, minimalist aesthetic, simple background",
    "Scandinavian minimalism - {{product}} in a clean Nordic setting, light colors, minimalist furniture, clean aesthetic, Scandinavian style",
    "Monochrome minimalism - {{product}} in a black and white composition, simple tones, minimal color palette, clean monochrome",
    "Geometric minimalism - {{product}} among clean geometric shapes, simple forms, geometric composition, clean lines",
    "Negative space design - {{product}} surrounded by generous white space, minimal composition, clean negative space, clean layout",
    "Simple product focus - {{product}} in a clean presentation, simple composition, minimal distractions, product-centered design",
];

fn product_context(product_description: &str) -> String {
    let description = product_description.trim();
    if description.is_empty() {
        GENERIC_PRODUCT.to_string()
    } else {
        format!("{} ({})", GENERIC_PRODUCT, description)
    }
}

/// The six templates for `style` with the product phrase filled in.
pub fn scene_prompts_for(style: SceneStyle, product_description: &str) -> Vec<String> {
    let context = product_context(product_description);
    style
        .templates()
        .iter()
        .map(|template| template.replace(PLACEHOLDER, &context))
        .collect()
}

/// Same as [`scene_prompts_for`] but keyed by a free-form style string.
pub fn scene_prompts(style: &str, product_description: &str) -> Vec<String> {
    scene_prompts_for(SceneStyle::from_key(style), product_description)
}

/// Scene jobs titled `Scene <n>`, truncated to `count` when given.
pub fn scene_jobs(style: SceneStyle, product_description: &str, count: Option<usize>) -> Vec<PromptJob> {
    scene_prompts_for(style, product_description)
        .into_iter()
        .take(count.unwrap_or(SCENES_PER_STYLE))
        .enumerate()
        .map(|(index, prompt)| {
            PromptJob::new(prompt.clone(), index).with_details(format!("Scene {}", index + 1), prompt)
        })
        .collect()
}

/// Jobs for a product-scene request: a non-blank custom prompt becomes the
/// single job, otherwise the style templates are used.
pub fn product_scene_jobs(
    custom_prompt: Option<&str>,
    style: SceneStyle,
    product_description: &str,
    count: Option<usize>,
) -> Vec<PromptJob> {
    match custom_prompt.map(str::trim).filter(|p| !p.is_empty()) {
        Some(custom) => vec![PromptJob::new(custom, 0).with_details("Scene 1", custom)],
        None => scene_jobs(style, product_description, count),
    }
}
