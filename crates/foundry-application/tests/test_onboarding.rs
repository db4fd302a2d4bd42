//! Integration tests for the onboarding use case: seeding, the guarded
//! send boundary, the annotate-revise loop, avatar finalize, and the
//! publication handoff.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, oneshot};

use foundry_application::{OnboardingSession, Publisher};
use foundry_core::annotation::Segment;
use foundry_core::conversation::TurnRole;
use foundry_core::document::{Document, IdentitySeed};
use foundry_core::error::Result;
use foundry_interaction::{Agent, AgentError, Payload};
use foundry_media::CropParams;
use image::{ImageFormat, Rgba, RgbaImage};

#[derive(Clone)]
struct FixedAgent {
    response: String,
}

impl FixedAgent {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl Agent for FixedAgent {
    type Output = String;

    fn expertise(&self) -> &str {
        "Fixed test agent"
    }

    async fn execute(&self, _payload: Payload) -> std::result::Result<String, AgentError> {
        Ok(self.response.clone())
    }
}

/// Holds every call until the test releases it.
#[derive(Clone)]
struct GatedAgent {
    gate: Arc<Mutex<Option<oneshot::Receiver<String>>>>,
}

impl GatedAgent {
    fn new() -> (Self, oneshot::Sender<String>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                gate: Arc::new(Mutex::new(Some(rx))),
            },
            tx,
        )
    }
}

#[async_trait]
impl Agent for GatedAgent {
    type Output = String;

    fn expertise(&self) -> &str {
        "Gated test agent"
    }

    async fn execute(&self, _payload: Payload) -> std::result::Result<String, AgentError> {
        let gate = self
            .gate
            .lock()
            .await
            .take()
            .ok_or_else(|| AgentError::ExecutionFailed("gate already used".into()))?;
        gate.await
            .map_err(|_| AgentError::ExecutionFailed("gate dropped".into()))
    }
}

#[derive(Clone, Default)]
struct RecordingPublisher {
    published: Arc<Mutex<Vec<Document>>>,
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, document: &Document) -> Result<()> {
        self.published.lock().await.push(document.clone());
        Ok(())
    }
}

fn seed() -> IdentitySeed {
    IdentitySeed {
        name: "Alex Chen".to_string(),
        avatar: "data:image/svg+xml;seed".to_string(),
        bio: "Building the future of work.".to_string(),
    }
}

fn png_bytes() -> Vec<u8> {
    let img = RgbaImage::from_pixel(16, 16, Rgba([200, 40, 40, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn profile_session_opens_greeted_and_seeded() {
    let session = OnboardingSession::profile(FixedAgent::new("{}"), Some(seed()));

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].role, TurnRole::Agent);
    assert!(transcript[0].text.contains("Alex Chen"));

    let document = session.document().await;
    assert_eq!(document.field_text("name").as_deref(), Some("Alex Chen"));
    assert_eq!(
        document.field_text("bio").as_deref(),
        Some("Building the future of work.")
    );
    assert_eq!(
        document.field_text("avatar").as_deref(),
        Some("data:image/svg+xml;seed")
    );
}

#[tokio::test]
async fn annotate_render_revise_loop() {
    let agent = FixedAgent::new(
        r#"{"reply": "Noted.", "updates": {"vision": "We want to empower educators globally."}}"#,
    );
    let mut session = OnboardingSession::project(agent, None);

    session.send("our vision is education", None).await.unwrap();

    let request = session
        .begin_selection("vision", "empower educators")
        .unwrap();
    let annotation = session
        .commit_annotation(request, "Be more specific")
        .await
        .unwrap();
    assert_eq!(session.annotations().badge_of(&annotation.id), Some(1));

    let segments = session.render_field("vision").await;
    assert_eq!(
        segments,
        vec![
            Segment::Plain("We want to ".to_string()),
            Segment::Highlight {
                text: "empower educators".to_string(),
                badge: 1,
                comment: "Be more specific".to_string(),
            },
            Segment::Plain(" globally.".to_string()),
        ]
    );

    // the revision turn carries the compiled feedback verbatim
    session.request_revision().await.unwrap();
    let transcript = session.transcript().await;
    let revision_turn = &transcript[transcript.len() - 2];
    assert_eq!(revision_turn.role, TurnRole::Operator);
    assert_eq!(
        revision_turn.text,
        "Feedback based on annotations:\n1. In vision (empower educators): Be more specific"
    );

    // annotations are retained after submission
    assert_eq!(session.annotations().len(), 1);
}

#[tokio::test]
async fn revision_without_annotations_is_rejected_before_any_call() {
    let session = OnboardingSession::project(FixedAgent::new("{}"), None);
    let err = session.request_revision().await.unwrap_err();
    assert!(err.is_precondition());
    // greeting only: no operator turn was appended
    assert_eq!(session.transcript().await.len(), 1);
}

#[tokio::test]
async fn send_rejects_while_a_turn_is_in_flight() {
    let (agent, release) = GatedAgent::new();
    let session = Arc::new(OnboardingSession::project(agent, None));

    let worker = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.send("first", None).await })
    };
    while !session.is_busy().await {
        tokio::task::yield_now().await;
    }

    let err = session.send("second", None).await.unwrap_err();
    assert!(err.is_precondition());
    // the rejected turn appended nothing: greeting + first operator turn
    assert_eq!(session.transcript().await.len(), 2);

    release
        .send(r#"{"reply": "done", "updates": {}}"#.to_string())
        .unwrap();
    worker.await.unwrap().unwrap();
}

#[tokio::test]
async fn avatar_finalize_writes_a_jpeg_data_url() {
    let session = OnboardingSession::profile(FixedAgent::new("{}"), None);
    session
        .set_avatar(&png_bytes(), &CropParams::default())
        .await
        .unwrap();

    let avatar = session.document().await.field_text("avatar").unwrap();
    assert!(avatar.starts_with("data:image/jpeg;base64,"));
    // nothing entered the transcript
    assert_eq!(session.transcript().await.len(), 1);
}

#[tokio::test]
async fn avatar_finalize_is_rejected_for_projects() {
    let session = OnboardingSession::project(FixedAgent::new("{}"), None);
    let err = session
        .set_avatar(&png_bytes(), &CropParams::default())
        .await
        .unwrap_err();
    assert!(err.is_precondition());
}

#[tokio::test]
async fn publish_hands_the_document_to_the_collaborator() {
    let agent = FixedAgent::new(r#"{"reply": "Done.", "updates": {"name": "Nebula AI"}}"#);
    let session = OnboardingSession::project(agent, None);
    session.send("we are Nebula AI", None).await.unwrap();

    let publisher = RecordingPublisher::default();
    let published = session.publish(&publisher).await.unwrap();

    let seen = publisher.published.lock().await;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], published);
    assert_eq!(published.field_text("name").as_deref(), Some("Nebula AI"));
}
