//! The prompt and image generation workflow.
//!
//! Each step checks the session and credits against the store, calls the
//! [`ImageService`] when needed, and records the outcome in the user's
//! history only after the service has succeeded.

use cineprompt_shared::{Example, PromptFields};
use cineprompt_store::{ImageHistoryItem, PromptHistoryItem, PublishedImage};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::GenerateError;
use crate::service::{GenerationRequest, ImageService, SceneService, ServiceError};
use crate::state::AppState;

/// Result of asking for a new prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The prompt was assembled, recorded and paid for.
    Ready(PromptHistoryItem),
    /// The user is out of credits and must subscribe first.  Nothing changed.
    SubscriptionRequired,
}

/// Result of asking the text model for a scene idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspirationOutcome {
    /// A fresh scene with randomly chosen selectors.  Nothing was recorded.
    Ready(PromptFields),
    /// Inspiration is reserved for subscribers.  The service was not called.
    SubscriptionRequired,
}

/// Follow-up edits applied to an already generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Refinement {
    Enhance2x,
    Enhance4x,
    Upscale2x,
    Upscale4x,
}

impl Refinement {
    /// Instruction sent to the service alongside the source image.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Enhance2x => {
                "Enhance this image: sharpen fine detail, refine textures and lighting, \
                 keep the composition unchanged."
            }
            Self::Enhance4x => {
                "Strongly enhance this image: maximise fine detail, micro-contrast and \
                 texture fidelity, keep the composition unchanged."
            }
            Self::Upscale2x => "Upscale this image to twice its resolution without altering content.",
            Self::Upscale4x => "Upscale this image to four times its resolution without altering content.",
        }
    }
}

/// Assemble a prompt from `fields`, record it and spend one credit.
pub fn generate_prompt(
    state: &mut AppState,
    fields: PromptFields,
) -> Result<PromptOutcome, GenerateError> {
    let prompt = fields.assemble()?;
    if state.store.current_user().is_none() {
        return Err(GenerateError::NotLoggedIn);
    }
    if !state.store.has_credits() {
        info!("out of prompt credits, subscription required");
        return Ok(PromptOutcome::SubscriptionRequired);
    }

    let item = PromptHistoryItem::new(prompt, fields);
    state.store.add_prompt_history(item.clone());
    state.store.consume_credit();

    info!(id = %item.id, "prompt generated");
    Ok(PromptOutcome::Ready(item))
}

/// Render `prompt` and add the image to the user's history.
///
/// On failure the store is left untouched.
pub async fn generate_image<S>(
    state: &mut AppState,
    service: &S,
    prompt: &str,
) -> Result<ImageHistoryItem, GenerateError>
where
    S: ImageService + ?Sized,
{
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(GenerateError::EmptyPrompt);
    }
    render(state, service, GenerationRequest::from_prompt(prompt), prompt).await
}

/// Send `source` back through the service with a refinement instruction.
/// The new image keeps the prompt of its source.
pub async fn refine_image<S>(
    state: &mut AppState,
    service: &S,
    source: &ImageHistoryItem,
    refinement: Refinement,
) -> Result<ImageHistoryItem, GenerateError>
where
    S: ImageService + ?Sized,
{
    let request = GenerationRequest {
        prompt: refinement.instruction().to_string(),
        source_image: Some(source.image_url.clone()),
    };
    render(state, service, request, &source.prompt).await
}

/// Load an example card into the generator.
pub fn use_example(example: &Example) -> PromptFields {
    PromptFields::from_example(example)
}

/// Instruction sent to the text model.  No subjects asks for a random topic,
/// one subject for a scene about it, two or more for a scene combining the
/// first two.
pub fn inspiration_instruction(subjects: &[&str]) -> String {
    const RULES: &str = "Reply with a single vivid, cinematic scene description in one or two \
                         sentences, without any preamble.";
    match subjects {
        [] => format!("Invent an original, surprising subject for a film still. {RULES}"),
        [one] => format!("Write a film still featuring {one}. {RULES}"),
        [one, two, ..] => format!("Write a film still combining {one} and {two}. {RULES}"),
    }
}

/// Ask `service` for a scene about `subjects` and pair it with random
/// selectors.  Subscribers only; credits are not spent.
pub async fn inspire<S>(
    state: &AppState,
    service: &S,
    subjects: &[&str],
) -> Result<InspirationOutcome, GenerateError>
where
    S: SceneService + ?Sized,
{
    let Some(user) = state.store.current_user() else {
        return Err(GenerateError::NotLoggedIn);
    };
    if !user.is_subscribed {
        info!("inspiration requested without a subscription");
        return Ok(InspirationOutcome::SubscriptionRequired);
    }

    let scene = service
        .describe_scene(&inspiration_instruction(subjects))
        .await
        .map_err(|e| {
            warn!(error = %e, "scene inspiration failed");
            e
        })?;
    let scene = scene.trim();
    if scene.is_empty() {
        warn!("scene inspiration came back empty");
        return Err(ServiceError::NoText.into());
    }

    let mut fields = PromptFields::with_defaults(scene);
    fields.randomize(&mut rand::thread_rng());
    info!("scene inspiration ready");
    Ok(InspirationOutcome::Ready(fields))
}

/// Fields of a community image's prompt, for loading into the generator.
pub fn use_community_prompt(image: &PublishedImage) -> PromptFields {
    PromptFields::parse(&image.image.prompt)
}

async fn render<S>(
    state: &mut AppState,
    service: &S,
    request: GenerationRequest,
    recorded_prompt: &str,
) -> Result<ImageHistoryItem, GenerateError>
where
    S: ImageService + ?Sized,
{
    if state.store.current_user().is_none() {
        return Err(GenerateError::NotLoggedIn);
    }

    let media = service.generate_image(&request).await.map_err(|e| {
        warn!(error = %e, "image generation failed");
        e
    })?;

    let item = ImageHistoryItem::new(media.url, recorded_prompt);
    state.store.add_image_history(item.clone());
    info!(id = %item.id, "image generated");
    Ok(item)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use cineprompt_store::{LocalStore, NewUser};

    use super::*;
    use crate::service::GeneratedMedia;

    /// Answers every call with the same result and remembers the requests.
    struct MockService {
        result: Result<GeneratedMedia, ServiceError>,
        calls: AtomicUsize,
        last: Mutex<Option<GenerationRequest>>,
    }

    impl MockService {
        fn ok(url: &str) -> Self {
            Self::with(Ok(GeneratedMedia { url: url.into() }))
        }

        fn failing() -> Self {
            Self::with(Err(ServiceError::Failed("quota exceeded".into())))
        }

        fn with(result: Result<GeneratedMedia, ServiceError>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }
    }

    /// Text model stub that always answers `reply`.
    struct MockWriter {
        reply: Result<String, ServiceError>,
        calls: AtomicUsize,
        last: Mutex<Option<String>>,
    }

    impl MockWriter {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.into()),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl SceneService for MockWriter {
        async fn describe_scene(&self, instruction: &str) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(instruction.to_string());
            self.reply.clone()
        }
    }

    #[async_trait]
    impl ImageService for MockService {
        async fn generate_image(
            &self,
            request: &GenerationRequest,
        ) -> Result<GeneratedMedia, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            self.result.clone()
        }
    }

    fn logged_in_state() -> AppState {
        let mut store = LocalStore::detached();
        store
            .sign_up(NewUser {
                email: "mara@example.com".into(),
                password: "pw".into(),
                nickname: "mara".into(),
                first_name: "Mara".into(),
                last_name: "Vance".into(),
            })
            .unwrap();
        store.login("mara@example.com", "pw").unwrap();
        AppState::new(store)
    }

    #[test]
    fn blank_scene_is_rejected_before_anything_else() {
        let mut state = logged_in_state();
        let result = generate_prompt(&mut state, PromptFields::with_defaults("   "));
        assert_eq!(result, Err(GenerateError::EmptyScene));
        assert!(state.store.prompt_history().is_empty());
        assert_eq!(state.store.current_user().unwrap().prompt_credits, 2);
    }

    #[test]
    fn prompt_needs_a_session() {
        let mut state = AppState::default();
        let result = generate_prompt(&mut state, PromptFields::with_defaults("a rooftop"));
        assert_eq!(result, Err(GenerateError::NotLoggedIn));
    }

    #[test]
    fn third_prompt_asks_for_a_subscription() {
        let mut state = logged_in_state();

        for scene in ["a rooftop", "a subway car"] {
            let outcome = generate_prompt(&mut state, PromptFields::with_defaults(scene)).unwrap();
            assert!(matches!(outcome, PromptOutcome::Ready(_)));
        }
        assert_eq!(state.store.current_user().unwrap().prompt_credits, 0);

        let outcome =
            generate_prompt(&mut state, PromptFields::with_defaults("a lighthouse")).unwrap();
        assert_eq!(outcome, PromptOutcome::SubscriptionRequired);
        assert_eq!(state.store.prompt_history().len(), 2);
        assert_eq!(state.store.current_user().unwrap().prompt_credits, 0);
    }

    #[test]
    fn ready_prompt_is_recorded_newest_first() {
        let mut state = logged_in_state();
        let PromptOutcome::Ready(item) =
            generate_prompt(&mut state, PromptFields::with_defaults("a night market")).unwrap()
        else {
            panic!("expected a prompt");
        };

        assert!(item.prompt.contains("cinematic shot of a night market."));
        assert_eq!(state.store.prompt_history()[0], item);
    }

    #[tokio::test]
    async fn successful_render_adds_exactly_one_image() {
        let mut state = logged_in_state();
        let service = MockService::ok("data:image/png;base64,AAAA");

        let item = generate_image(&mut state, &service, "a prompt").await.unwrap();

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(item.image_url, "data:image/png;base64,AAAA");
        assert_eq!(item.prompt, "a prompt");
        assert_eq!(state.store.image_history(), &[item]);
    }

    #[tokio::test]
    async fn failed_render_leaves_store_untouched() {
        let mut state = logged_in_state();
        let service = MockService::failing();

        let err = generate_image(&mut state, &service, "a prompt")
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::Service(ServiceError::Failed(_))));
        assert!(state.store.image_history().is_empty());
    }

    #[tokio::test]
    async fn render_without_session_never_calls_the_service() {
        let mut state = AppState::default();
        let service = MockService::ok("data:,x");

        let err = generate_image(&mut state, &service, "a prompt")
            .await
            .unwrap_err();

        assert_eq!(err, GenerateError::NotLoggedIn);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected() {
        let mut state = logged_in_state();
        let service = MockService::ok("data:,x");

        let err = generate_image(&mut state, &service, "  ").await.unwrap_err();
        assert_eq!(err, GenerateError::EmptyPrompt);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn refinement_sends_source_and_keeps_its_prompt() {
        let mut state = logged_in_state();
        let service = MockService::ok("data:image/png;base64,BBBB");
        let source = ImageHistoryItem::new("data:image/png;base64,AAAA", "original prompt");

        let refined = refine_image(&mut state, &service, &source, Refinement::Upscale2x)
            .await
            .unwrap();

        let request = service.last.lock().unwrap().clone().unwrap();
        assert_eq!(request.source_image.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(request.prompt, Refinement::Upscale2x.instruction());
        assert_eq!(refined.prompt, "original prompt");
        assert_ne!(refined.id, source.id);
    }

    #[test]
    fn community_prompt_round_trips_into_fields() {
        let mut fields = PromptFields::with_defaults("two dancers on a frozen lake");
        fields.camera_angle = Some("Low Angle".into());
        let published = PublishedImage {
            image: ImageHistoryItem::new("data:,x", fields.assemble().unwrap()),
            creator_email: "mara@example.com".into(),
            creator_nickname: "mara".into(),
        };

        assert_eq!(use_community_prompt(&published), fields);
    }

    #[test]
    fn example_loads_into_generator_and_assembles() {
        let example = &cineprompt_shared::curated::EXAMPLES[4];
        let fields = use_example(example);
        assert_eq!(fields.lens, "Leica Summilux-C 50mm");

        let mut state = logged_in_state();
        let PromptOutcome::Ready(item) = generate_prompt(&mut state, fields).unwrap() else {
            panic!("expected a prompt");
        };
        assert!(item.prompt.contains("Venetian blinds"));
        assert_eq!(item.fields.camera_angle, None);
    }

    #[tokio::test]
    async fn inspiration_is_for_subscribers_only() {
        let state = logged_in_state();
        let writer = MockWriter::replying("a lighthouse keeper feeding gulls");

        let outcome = inspire(&state, &writer, &[]).await.unwrap();

        assert_eq!(outcome, InspirationOutcome::SubscriptionRequired);
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn inspiration_needs_a_session() {
        let state = AppState::default();
        let writer = MockWriter::replying("a scene");

        let err = inspire(&state, &writer, &[]).await.unwrap_err();
        assert_eq!(err, GenerateError::NotLoggedIn);
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn subscriber_gets_scene_with_random_selectors() {
        let mut state = logged_in_state();
        state.store.subscribe();
        let writer = MockWriter::replying("  a lighthouse keeper feeding gulls at dawn\n");

        let InspirationOutcome::Ready(fields) =
            inspire(&state, &writer, &["a lighthouse keeper", "gulls"]).await.unwrap()
        else {
            panic!("expected an idea");
        };

        assert_eq!(fields.scene, "a lighthouse keeper feeding gulls at dawn");
        assert!(cineprompt_shared::vocabulary::STYLES.contains(&fields.style.as_str()));
        assert!(cineprompt_shared::vocabulary::CAMERAS.contains(&fields.camera.as_str()));
        let instruction = writer.last.lock().unwrap().clone().unwrap();
        assert!(instruction.contains("combining a lighthouse keeper and gulls"));
        assert!(state.store.prompt_history().is_empty());
    }

    #[tokio::test]
    async fn blank_inspiration_is_an_error() {
        let mut state = logged_in_state();
        state.store.subscribe();
        let writer = MockWriter::replying("   ");

        let err = inspire(&state, &writer, &["a fox"]).await.unwrap_err();
        assert_eq!(err, GenerateError::Service(ServiceError::NoText));
    }

    #[test]
    fn instruction_depends_on_subject_count() {
        assert!(inspiration_instruction(&[]).contains("Invent an original"));
        assert!(inspiration_instruction(&["a fox"]).contains("featuring a fox"));
        assert!(inspiration_instruction(&["a fox", "snow", "wolves"]).contains("a fox and snow"));
    }
}
