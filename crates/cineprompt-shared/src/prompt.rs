//! Cinematic prompt template.
//!
//! [`PromptFields::assemble`] renders the structured selector values into the
//! prompt text sent to the generator, and [`PromptFields::parse`] recovers
//! those values from a prompt someone else published.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::curated::Example;
use crate::error::PromptError;
use crate::vocabulary::{
    self, CAMERAS, CAMERA_ANGLES, EFFECTS, LENSES, LIGHTING, POST_PRODUCTION, STYLES,
};

const LEAD_IN: &str = "A hyper-realistic, ultra-detailed cinematic shot of ";
const QUALITY_TAIL: &str = "8k, masterpiece, photorealistic, high quality.";
const CAMERA_LENS_JOINER: &str = " with a ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Style,
    ShotOn,
    Lighting,
    PostProduction,
    CameraAngle,
    CameraSettings,
    Effect,
}

impl Section {
    const ALL: [Section; 7] = [
        Section::Style,
        Section::ShotOn,
        Section::Lighting,
        Section::PostProduction,
        Section::CameraAngle,
        Section::CameraSettings,
        Section::Effect,
    ];

    fn label(self) -> &'static str {
        match self {
            Section::Style => "Style: ",
            Section::ShotOn => "Shot on: ",
            Section::Lighting => "Lighting: ",
            Section::PostProduction => "Post-production: ",
            Section::CameraAngle => "Camera angle: ",
            Section::CameraSettings => "Camera settings: ",
            Section::Effect => "Effect: ",
        }
    }
}

/// Structured selector values behind a generated prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFields {
    pub scene: String,
    pub style: String,
    pub camera: String,
    pub lens: String,
    pub light: String,
    pub post_prod: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_angle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_settings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

impl PromptFields {
    /// Fields pre-filled with the first entry of every vocabulary.
    pub fn with_defaults(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            style: STYLES[0].to_string(),
            camera: CAMERAS[0].to_string(),
            lens: LENSES[0].to_string(),
            light: LIGHTING[0].to_string(),
            post_prod: POST_PRODUCTION[0].to_string(),
            camera_angle: None,
            camera_settings: None,
            effect: None,
        }
    }

    /// Load an example card: its scene and five selectors.  The example's
    /// angle, settings and effect are display-only and stay unset.
    pub fn from_example(example: &Example) -> Self {
        Self {
            scene: example.scene.to_string(),
            style: example.style.to_string(),
            camera: example.camera.to_string(),
            lens: example.lens.to_string(),
            light: example.light.to_string(),
            post_prod: example.post_prod.to_string(),
            camera_angle: None,
            camera_settings: None,
            effect: None,
        }
    }

    /// Render the prompt text.  Fails when the scene is blank.
    pub fn assemble(&self) -> Result<String, PromptError> {
        let scene = self.scene.trim();
        if scene.is_empty() {
            return Err(PromptError::EmptyScene);
        }

        let mut lines = vec![
            format!("{LEAD_IN}{scene}."),
            format!("Style: {}.", self.style),
            format!("Shot on: {}{CAMERA_LENS_JOINER}{}.", self.camera, self.lens),
            format!("Lighting: {}.", self.light),
            format!("Post-production: {}.", self.post_prod),
        ];
        let optional = [
            (Section::CameraAngle, &self.camera_angle),
            (Section::CameraSettings, &self.camera_settings),
            (Section::Effect, &self.effect),
        ];
        for (section, value) in optional {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                lines.push(format!("{}{value}.", section.label()));
            }
        }
        lines.push(QUALITY_TAIL.to_string());

        Ok(lines.join("\n"))
    }

    /// Recover the structured fields from a prompt built by [`assemble`].
    ///
    /// Sections that cannot be found fall back to the first vocabulary entry
    /// (the lens falls back to empty).  An angle or effect that is not one of
    /// the selector options is dropped.  Text without any label is treated as
    /// the scene.
    ///
    /// [`assemble`]: PromptFields::assemble
    pub fn parse(text: &str) -> Self {
        let normalized = text.replace('\n', ". ");

        // Byte offset of the ". " that precedes each label found.
        let markers: Vec<(Section, usize)> = Section::ALL
            .iter()
            .filter_map(|&section| {
                let needle = format!(". {}", section.label());
                normalized.find(&needle).map(|pos| (section, pos))
            })
            .collect();
        let tail = normalized.find(QUALITY_TAIL).unwrap_or(normalized.len());

        let section_value = |section: Section| -> Option<String> {
            let &(_, pos) = markers.iter().find(|(s, _)| *s == section)?;
            let start = pos + 2 + section.label().len();
            let end = markers
                .iter()
                .map(|&(_, p)| p)
                .filter(|&p| p >= start)
                .chain(std::iter::once(tail.max(start)))
                .min()
                .unwrap_or(normalized.len());
            let value = clean(&normalized[start..end]);
            (!value.is_empty()).then_some(value)
        };

        let scene_end = markers
            .iter()
            .map(|&(_, p)| p)
            .chain(std::iter::once(tail))
            .min()
            .unwrap_or(normalized.len());
        let raw_scene = normalized[..scene_end].trim();
        let scene = clean(raw_scene.strip_prefix(LEAD_IN.trim_end()).unwrap_or(raw_scene));

        let (camera, lens) = match section_value(Section::ShotOn) {
            Some(shot_on) => match shot_on.split_once(CAMERA_LENS_JOINER) {
                Some((camera, lens)) => (camera.trim().to_string(), lens.trim().to_string()),
                None => (shot_on, String::new()),
            },
            None => (CAMERAS[0].to_string(), String::new()),
        };

        Self {
            scene,
            style: section_value(Section::Style).unwrap_or_else(|| STYLES[0].to_string()),
            camera,
            lens,
            light: section_value(Section::Lighting).unwrap_or_else(|| LIGHTING[0].to_string()),
            post_prod: section_value(Section::PostProduction)
                .unwrap_or_else(|| POST_PRODUCTION[0].to_string()),
            camera_angle: section_value(Section::CameraAngle)
                .filter(|v| CAMERA_ANGLES.contains(&v.as_str())),
            camera_settings: section_value(Section::CameraSettings),
            effect: section_value(Section::Effect).filter(|v| EFFECTS.contains(&v.as_str())),
        }
    }

    /// Shuffle the five required selectors, keeping the scene and extras.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.style = vocabulary::pick(STYLES, rng).to_string();
        self.camera = vocabulary::pick(CAMERAS, rng).to_string();
        self.lens = vocabulary::pick(LENSES, rng).to_string();
        self.light = vocabulary::pick(LIGHTING, rng).to_string();
        self.post_prod = vocabulary::pick(POST_PRODUCTION, rng).to_string();
    }
}

fn clean(raw: &str) -> String {
    raw.trim().trim_end_matches('.').trim().to_string()
}
