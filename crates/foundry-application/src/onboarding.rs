//! Onboarding session use case.
//!
//! Ties the three engines together for one co-authoring session: the
//! extraction engine for turns, the annotation engine for inline
//! feedback, and the crop rasterizer for the avatar. This is the layer
//! the UI talks to; it also enforces the single-flight contract at the
//! boundary instead of letting callers race the engine.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde_json::Value;

use foundry_core::annotation::{
    Annotation, AnnotationSet, Segment, SelectionRequest, compile_feedback,
    render_with_highlights,
};
use foundry_core::conversation::ConversationTurn;
use foundry_core::document::{Document, DocumentKind, IdentitySeed, PartialUpdate, ProfileField};
use foundry_core::error::{FoundryError, Result};
use foundry_core::persona::Persona;
use foundry_interaction::agent::{Agent, Attachment};
use foundry_interaction::session::{CoauthorSession, TurnOutcome};
use foundry_media::CropParams;

use crate::publisher::Publisher;

/// One user-facing co-authoring session over a project manifest or a
/// talent profile.
pub struct OnboardingSession<A: Agent<Output = String>> {
    session: CoauthorSession<A>,
    annotations: AnnotationSet,
}

impl<A: Agent<Output = String>> OnboardingSession<A> {
    /// Starts a project-manifest session.
    pub fn project(agent: A, seed: Option<IdentitySeed>) -> Self {
        Self::start(agent, DocumentKind::Project, seed)
    }

    /// Starts a talent-profile session, seeded with the authenticated
    /// user's identity fields when available.
    pub fn profile(agent: A, seed: Option<IdentitySeed>) -> Self {
        Self::start(agent, DocumentKind::Profile, seed)
    }

    fn start(agent: A, kind: DocumentKind, seed: Option<IdentitySeed>) -> Self {
        let persona = Persona::for_kind(kind);
        let seed = seed.unwrap_or_default();
        let greeting = persona.greeting(&seed.name);
        let document = Document::seeded(kind, &seed);
        Self {
            session: CoauthorSession::new(agent, persona, document, Some(greeting)),
            annotations: AnnotationSet::new(),
        }
    }

    pub fn persona(&self) -> &Persona {
        self.session.persona()
    }

    pub async fn is_busy(&self) -> bool {
        self.session.is_busy().await
    }

    pub async fn document(&self) -> Document {
        self.session.document().await
    }

    pub async fn transcript(&self) -> Vec<ConversationTurn> {
        self.session.transcript().await
    }

    /// Submits one turn, rejecting instead of racing while a prior turn
    /// is still in flight.
    pub async fn send(
        &self,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Result<TurnOutcome> {
        if self.session.is_busy().await {
            return Err(FoundryError::precondition(
                "a turn is already in flight; wait for it to settle",
            ));
        }
        self.session.submit_turn(text, attachment).await
    }

    /// Captures a text selection as a pending annotation request.
    ///
    /// The request is resolved by [`commit_annotation`](Self::commit_annotation)
    /// or cancelled by dropping it.
    pub fn begin_selection(&self, field: &str, selected_text: &str) -> Result<SelectionRequest> {
        SelectionRequest::new(field, selected_text)
    }

    /// Resolves a pending selection into an annotation against the
    /// field's current text.
    pub async fn commit_annotation(
        &mut self,
        request: SelectionRequest,
        comment: &str,
    ) -> Result<Annotation> {
        let document = self.session.document().await;
        let field_text = document.field_text(request.field()).ok_or_else(|| {
            FoundryError::precondition(format!(
                "field '{}' has no annotatable text",
                request.field()
            ))
        })?;
        self.annotations.commit(request, comment, &field_text)
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// Renders a field's current text as highlight segments.
    pub async fn render_field(&self, field: &str) -> Vec<Segment> {
        let document = self.session.document().await;
        match document.field_text(field) {
            Some(text) => render_with_highlights(field, &text, &self.annotations),
            None => Vec::new(),
        }
    }

    /// Compiles all annotations and submits them as a revision turn.
    ///
    /// Fails before any engine call when there are no annotations.
    /// Annotations are retained afterwards: a second call resubmits the
    /// same feedback, including lines the agent already addressed.
    pub async fn request_revision(&self) -> Result<TurnOutcome> {
        let feedback = compile_feedback(&self.annotations)?;
        self.send(&feedback, None).await
    }

    /// Finalizes an avatar edit: decodes the selected image, rasterizes
    /// the crop, and writes the result into the profile's avatar field
    /// as a JPEG data URL.
    pub async fn set_avatar(&self, image_bytes: &[u8], params: &CropParams) -> Result<()> {
        if self.session.persona().kind() != DocumentKind::Profile {
            return Err(FoundryError::precondition(
                "only profile sessions carry an avatar",
            ));
        }
        let source = foundry_media::decode(image_bytes)?;
        let jpeg = foundry_media::rasterize(&source, params)?;
        let data_url = format!("data:image/jpeg;base64,{}", BASE64_STANDARD.encode(jpeg));

        let mut update = PartialUpdate::new();
        update.insert(ProfileField::Avatar.wire_name(), Value::String(data_url));
        self.session.apply_update(&update).await
    }

    /// Hands the finished document to the publication boundary and
    /// returns the published value.
    pub async fn publish(&self, publisher: &dyn Publisher) -> Result<Document> {
        let document = self.session.document().await;
        publisher.publish(&document).await?;
        Ok(document)
    }
}
