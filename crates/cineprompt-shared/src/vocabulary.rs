//! Fixed option vocabularies offered by the prompt composer.
//!
//! The first entry of each required list doubles as the fallback value when a
//! field cannot be recovered from a prompt string.

use rand::seq::SliceRandom;
use rand::Rng;

pub const STYLES: &[&str] = &[
    "Filmic Ultra-Real Vision",
    "Studio-Cinematic Hybrid Reality",
    "Cine-Portrait Perfection",
    "Archival Frame of a Forgotten Film",
    "Reality-Defining Photograph",
    "Dolby Depth Perception",
    "Human-Lens Resonance",
    "The Unreal Photograph of Reality",
    "Timeless Frame Capture",
    "Beyond-Reality Optics",
];

pub const CAMERAS: &[&str] = &[
    "ARRI Alexa 65",
    "ARRI Alexa Mini LF",
    "RED Komodo 6K",
    "RED Monstro 8K VV",
    "Sony Venice",
    "Canon C300 Mark III",
    "Blackmagic URSA Mini Pro 12K",
    "IMAX Digital Camera",
    "Panavision Millennium DXL2",
    "Hasselblad H6D-400c",
];

pub const LENSES: &[&str] = &[
    "Leica Summilux-C 35mm",
    "Leica Summilux-C 50mm",
    "Zeiss Master Prime 35mm",
    "Zeiss Master Prime 50mm",
    "Canon CN-E 24mm",
    "Canon CN-E 50mm",
    "Panavision Primo 35mm",
    "Panavision Primo 50mm",
    "Cooke S4/i 25mm",
    "Cooke S4/i 50mm",
    "Fujinon Cabrio 19-90mm",
    "Angenieux Optimo 24-290mm",
];

pub const LIGHTING: &[&str] = &[
    "Volumetric Light",
    "Soft Rim Light",
    "Hard Key Light",
    "Soft Fill Light",
    "Backlight",
    "Practical Light",
    "Neon Light",
    "Cinematic Spotlight",
    "HDRI Lighting",
    "Golden Hour Sunlight",
    "Blue Hour Ambient",
    "Fluorescent Indoor Light",
];

pub const POST_PRODUCTION: &[&str] = &[
    "Dolby Vision HDR",
    "Company 3 Color Grading",
    "DaVinci Resolve Color Grade",
    "FilmConvert Film Emulation",
    "ACES Color Workflow",
    "Lightroom Color Correction",
    "LUT Cinematic Look",
    "Tone Mapping HDR",
    "VFX Compositing",
    "Motion Blur Enhancement",
    "Depth of Field Enhancement",
    "Noise Reduction",
];

// Optional selectors; an empty selection means "none".  Parsed prompts
// keep an angle or effect only when it is listed here.
pub const CAMERA_ANGLES: &[&str] = &[
    "Eye-Level Angle",
    "High Angle",
    "Low Angle",
    "Bird’s Eye View",
    "Worm’s Eye View",
    "Dutch Angle",
    "Close-Up",
    "Extreme Close-Up",
    "Medium Shot",
    "Full Shot",
    "Cowboy Shot",
    "Wide Shot",
    "Extreme Wide Shot",
    "POV Shot",
    "Over-The-Shoulder Shot",
    "Profile Shot",
    "Three-Quarter Angle",
    "Back Shot",
    "Reverse Angle",
    "Aerial Shot",
];

pub const EFFECTS: &[&str] = &[
    "Optical Effect: Bokeh",
    "Optical Effect: Lens Flare",
    "Optical Effect: Chromatic Aberration",
    "Optical Effect: Bloom",
    "Optical Effect: Vignetting",
    "Optical Effect: Soft Focus",
    "Film Effect: Film Grain",
    "Film Effect: Dust and Scratches",
    "Film Effect: Retro Color Fade",
    "Film Effect: Kodak Color Profile",
    "Film Effect: Fuji Color Profile",
    "Atmospheric Effect: Fog",
    "Atmospheric Effect: Haze",
    "Atmospheric Effect: Rain",
    "Atmospheric Effect: God Rays",
    "Lighting Effect: Rembrandt Lighting",
    "Lighting Effect: Rim Light",
    "Reflection Effect: Wet Surface Reflection",
    "Digital Effect: Neon Glare",
];

/// Pick a random entry from a vocabulary list.
pub fn pick<R: Rng + ?Sized>(options: &[&'static str], rng: &mut R) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}
