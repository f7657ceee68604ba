//! Prompt sources: free-form text parsing, style-driven scene templates and
//! the static series catalog.
pub mod catalog;
pub mod parser;
pub mod scenes;

pub use parser::{parse_jobs, parse_prompts, parse_sections, ParseMode, PromptSection};
pub use scenes::{product_scene_jobs, scene_jobs, scene_prompts, scene_prompts_for, SceneStyle};
