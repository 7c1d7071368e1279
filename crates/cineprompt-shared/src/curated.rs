//! Built-in content shipped with the app: example presets for the generator
//! and the curated images that always appear in the community gallery.

/// Creator email stamped on every curated gallery image.
pub const CURATED_CREATOR_EMAIL: &str = "system@cinematic.ai";

/// Creator nickname stamped on every curated gallery image.
pub const CURATED_CREATOR_NICKNAME: &str = "CinematicAI";

/// A ready-made set of selector values shown as an example card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub title: &'static str,
    pub scene: &'static str,
    pub style: &'static str,
    pub camera: &'static str,
    pub lens: &'static str,
    pub light: &'static str,
    pub post_prod: &'static str,
    pub camera_angle: Option<&'static str>,
    pub camera_settings: Option<&'static str>,
    pub effect: Option<&'static str>,
}

pub const EXAMPLES: &[Example] = &[
    Example {
        title: "Cyberpunk Alley",
        scene: "A lone detective in a trench coat stands in a rain-soaked neon alley, smoke rising from a sewer grate.",
        style: "Filmic Ultra-Real Vision",
        camera: "RED Komodo 6K",
        lens: "Canon CN-E 24mm",
        light: "Neon Light",
        post_prod: "Company 3 Color Grading",
        camera_angle: Some("Low Angle"),
        camera_settings: Some("Aperture Priority: f/1.4"),
        effect: Some("Digital Effect: Neon Glare"),
    },
    Example {
        title: "Enchanted Forest",
        scene: "A mystical deer with glowing antlers drinks from a shimmering pond in an ancient, enchanted forest.",
        style: "Beyond-Reality Optics",
        camera: "Sony Venice",
        lens: "Cooke S4/i 50mm",
        light: "Volumetric Light",
        post_prod: "LUT Cinematic Look",
        camera_angle: Some("Eye-Level Angle"),
        camera_settings: Some("Shutter Priority: 1/60"),
        effect: Some("Atmospheric Effect: God Rays"),
    },
    Example {
        title: "Historical Portrait",
        scene: "A regal queen from the 18th century, adorned in lavish silk and jewels, poses for a portrait in her opulent throne room.",
        style: "Cine-Portrait Perfection",
        camera: "Hasselblad H6D-400c",
        lens: "Zeiss Master Prime 50mm",
        light: "Soft Fill Light",
        post_prod: "FilmConvert Film Emulation",
        camera_angle: Some("Medium Shot"),
        camera_settings: Some("ISO Priority: 100"),
        effect: Some("Optical Effect: Soft Focus"),
    },
    Example {
        title: "Desert Wanderer",
        scene: "A solitary wanderer treks across a vast, sun-scorched desert, with dramatic sand dunes stretching to the horizon.",
        style: "Reality-Defining Photograph",
        camera: "ARRI Alexa Mini LF",
        lens: "Panavision Primo 50mm",
        light: "Golden Hour Sunlight",
        post_prod: "DaVinci Resolve Color Grade",
        camera_angle: Some("Extreme Wide Shot"),
        camera_settings: Some("Full Auto Exposure: ISO 100–800"),
        effect: Some("Atmospheric Effect: Haze"),
    },
    Example {
        title: "Noir Detective's Office",
        scene: "A gritty 1940s private detective's office, shadows cast by Venetian blinds on a smoky room, a single desk lamp illuminating a mysterious file.",
        style: "Archival Frame of a Forgotten Film",
        camera: "Canon C300 Mark III",
        lens: "Leica Summilux-C 50mm",
        light: "Cinematic Spotlight",
        post_prod: "FilmConvert Film Emulation",
        camera_angle: Some("Dutch Angle"),
        camera_settings: Some("Log Mode: S-Log3"),
        effect: Some("Film Effect: Film Grain"),
    },
];

/// A gallery image that ships with the app rather than being published by a
/// user.  It carries no votes of its own until someone votes on its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuratedImage {
    pub id: &'static str,
    pub image_url: &'static str,
    pub prompt: &'static str,
}

pub const CURATED_GALLERY: &[CuratedImage] = &[
    CuratedImage {
        id: "static-1",
        image_url: "https://images.pexels.com/photos/3225517/pexels-photo-3225517.jpeg?auto=compress&cs=tinysrgb&w=600&h=800&dpr=1",
        prompt: "A breathtaking aerial shot of a winding road through a dense, foggy forest during autumn. Style: Dolby Depth Perception. Shot on: ARRI Alexa 65. Lighting: Golden Hour Sunlight.",
    },
    CuratedImage {
        id: "static-2",
        image_url: "https://images.pexels.com/photos/167699/pexels-photo-167699.jpeg?auto=compress&cs=tinysrgb&w=600&h=800&dpr=1",
        prompt: "A solitary wooden cabin by a calm, misty lake, with snow-capped mountains in the background. Style: Archival Frame of a Forgotten Film. Shot on: Sony Venice. Lighting: Blue Hour Ambient.",
    },
    CuratedImage {
        id: "static-3",
        image_url: "https://images.pexels.com/photos/2387873/pexels-photo-2387873.jpeg?auto=compress&cs=tinysrgb&w=600&h=800&dpr=1",
        prompt: "A lone astronaut standing on a desolate alien planet, gazing at two suns setting on the horizon. Style: Beyond-Reality Optics. Shot on: RED Monstro 8K VV. Lighting: Volumetric Light.",
    },
    CuratedImage {
        id: "static-4",
        image_url: "https://images.pexels.com/photos/1528640/pexels-photo-1528640.jpeg?auto=compress&cs=tinysrgb&w=600&h=800&dpr=1",
        prompt: "A figure stands silhouetted in the entrance of a massive ice cave, glowing with an ethereal blue light. Style: Cine-Portrait Perfection. Shot on: Panavision Millennium DXL2. Lighting: Soft Rim Light.",
    },
    CuratedImage {
        id: "static-5",
        image_url: "https://images.pexels.com/photos/36717/amazing-animal-beautiful-beautifull.jpg?auto=compress&cs=tinysrgb&w=600&h=800&dpr=1",
        prompt: "An ancient, mystical tree with glowing leaves in the heart of an enchanted forest at night. Style: Timeless Frame Capture. Shot on: Canon C300 Mark III. Lighting: Practical Light.",
    },
    CuratedImage {
        id: "static-6",
        image_url: "https://images.pexels.com/photos/2662116/pexels-photo-2662116.jpeg?auto=compress&cs=tinysrgb&w=600&h=800&dpr=1",
        prompt: "An impossible, majestic mountain peak reflected perfectly in a mirror-like turquoise lake. Style: Reality-Defining Photograph. Shot on: Hasselblad H6D-400c. Lighting: HDRI Lighting.",
    },
    CuratedImage {
        id: "static-7",
        image_url: "https://images.pexels.com/photos/775201/pexels-photo-775201.jpeg?auto=compress&cs=tinysrgb&w=600&h=800&dpr=1",
        prompt: "A lone adventurer crossing a precarious rope bridge suspended high above a lush jungle canyon. Style: Human-Lens Resonance. Shot on: Blackmagic URSA Mini Pro 12K. Lighting: Hard Key Light.",
    },
    CuratedImage {
        id: "static-8",
        image_url: "https://images.pexels.com/photos/147411/italy-mountains-dawn-dusk-147411.jpeg?auto=compress&cs=tinysrgb&w=600&h=800&dpr=1",
        prompt: "The jagged peaks of the Dolomites mountains piercing through a sea of clouds at sunrise. Style: Filmic Ultra-Real Vision. Shot on: ARRI Alexa Mini LF. Lighting: Golden Hour Sunlight.",
    },
];

/// Look up a curated image by id.
pub fn curated_image(id: &str) -> Option<&'static CuratedImage> {
    CURATED_GALLERY.iter().find(|item| item.id == id)
}
