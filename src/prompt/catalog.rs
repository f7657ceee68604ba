//! Built-in series prompts and the demo images substituted in demo mode.

/// Fixed five-image series served by `/api/prompts` and `/api/generate-series`.
pub const SERIES_PROMPTS: [&str; 5] = [
    "Robot in a Parisian apartment - Humanoid robot Rosaia, sleek pink chrome design, reclining elegantly on a Haussmann-style luxury Parisian sofa, high ceilings, golden light from tall windows, minimal futuristic interior touches, cinematic wide shot 21:9",
    "Technical exploded view - Exploded technical render of humanoid robot Rosaia in glossy pink and chrome, mechanical joints, servos, electronic boards visible, labeled engineering illustration, cinematic lighting, hyper-detailed, blueprint style",
    "Rosaia with people - Rosaia humanoid robot, pink chrome, offering a glass of champagne in a Parisian penthouse at night, Eiffel Tower glowing through the window, elegant dinner party atmosphere, futuristic luxury, cinematic 21:9",
    "Artistic moodboard - Collage style moodboard for Rosaia brand, combining Parisian luxury interior design (Haussmann, marble, gold), futuristic humanoid robot in pink chrome, fashion photography aesthetic, Vogue meets sci-fi, soft cinematic film grain",
    "Logo - Minimalist luxury logo design for Rosaia, futuristic serif typography, rose-gold metallic gradient, sophisticated brand identity, clean geometric elements, premium feel",
];

/// Stock images returned by position in demo mode and on failures.
pub const DEMO_IMAGES: [&str; 5] = [
    "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?w=1920&h=1080&fit=crop&crop=center",
    "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=1920&h=1080&fit=crop&crop=center",
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=1920&h=1080&fit=crop&crop=center",
    "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?w=1920&h=1080&fit=crop&crop=center",
    "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=1920&h=1080&fit=crop&crop=center",
];

pub fn series_prompts() -> Vec<String> {
    SERIES_PROMPTS.iter().map(|s| s.to_string()).collect()
}
