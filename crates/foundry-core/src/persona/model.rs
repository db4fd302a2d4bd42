//! Persona configuration.
//!
//! A persona fixes the agent's instruction set for the lifetime of one
//! document session: the fields the model may populate, the tone
//! directive, and the language-mirroring directive. It is read-only
//! configuration, resolved once at session start.

use minijinja::context;

use crate::document::{DocumentKind, ProfileField, ProjectField};
use crate::error::Result;

use super::template::system_instruction_template;

/// The fixed conversational configuration for one document kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    kind: DocumentKind,
    display_name: &'static str,
    identity: &'static str,
    mission: &'static str,
    tone: &'static str,
    priority_fields: &'static [&'static str],
    attachment_label: &'static str,
    greeting_body: &'static str,
}

/// Detail fields the project persona is instructed to extract
/// aggressively, with their interview glosses.
const PROJECT_PRIORITY_FIELDS: &[&str] = &[
    "productHighlights (What is the product?)",
    "targetAudience (Who is it for?)",
    "businessModel (How does it make money?)",
    "differentiation (Unfair advantage)",
    "marketSize (TAM/SAM/SOM)",
    "teamMembers (Current team)",
    "whyNow (Why is this the right time?)",
    "longTermMoat (Defensibility)",
    "roadmapFinance (Funding & Timeline)",
    "others (Any important information that does not fit into the above specific fields, organized clearly)",
];

impl Persona {
    /// The co-founder interviewer persona for project manifests.
    pub fn project() -> Self {
        Self {
            kind: DocumentKind::Project,
            display_name: "Co-founder Agent",
            identity: "a seasoned Startup Co-founder and Interviewer",
            mission: "Help a founder articulate their project vision.",
            tone: "Intellectual, trustworthy, reminiscent of Paul Graham.",
            priority_fields: PROJECT_PRIORITY_FIELDS,
            attachment_label: "File",
            greeting_body: "我是你的 AI 联合创始人助手。为了高效帮你生成项目档案，请告诉我你的项目名称、愿景和目前遇到的核心问题，或者直接上传 BP。",
        }
    }

    /// The career-coach persona for talent profiles.
    pub fn profile() -> Self {
        Self {
            kind: DocumentKind::Profile,
            display_name: "Career Agent",
            identity: "a top-tier Talent Agent and Career Coach",
            mission: "Help a talent articulate their unique value proposition.",
            tone: "Encouraging, sharp, focused on highlighting strengths.",
            priority_fields: &[],
            attachment_label: "Resume",
            greeting_body: "我是你的职业经纪人。请告诉我你的职业背景、核心技能以及你正在寻找什么样的机会。如果有简历（PDF），请直接上传，我会帮你提取亮点。",
        }
    }

    /// Resolves the persona for a document kind.
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Project => Self::project(),
            DocumentKind::Profile => Self::profile(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Wire names of the fields this persona may populate.
    ///
    /// The profile persona excludes `avatar`: that field is written by
    /// the crop rasterizer path, never by the model.
    pub fn permitted_fields(&self) -> Vec<&'static str> {
        match self.kind {
            DocumentKind::Project => ProjectField::all_wire_names(),
            DocumentKind::Profile => ProfileField::all_wire_names()
                .into_iter()
                .filter(|name| *name != ProfileField::Avatar.wire_name())
                .collect(),
        }
    }

    /// The file-reference marker prefixed to an operator turn that
    /// carried an attachment, e.g. `[Resume: cv.pdf]`.
    pub fn attachment_marker(&self, file_name: &str) -> String {
        format!("[{}: {}]", self.attachment_label, file_name)
    }

    /// The scripted opening turn of a session.
    pub fn greeting(&self, user_name: &str) -> String {
        format!("你好 {}！{}", user_name, self.greeting_body)
    }

    /// Renders the system instruction sent with every upstream request,
    /// including the JSON response-format directive and the
    /// language-mirroring directive.
    pub fn system_instruction(&self) -> Result<String> {
        let rendered = system_instruction_template()?.render(context! {
            identity => self.identity,
            mission => self.mission,
            fields => self.permitted_fields(),
            priority_fields => self.priority_fields,
            tone => self.tone,
        })?;
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_persona_permits_every_project_field() {
        let persona = Persona::project();
        let fields = persona.permitted_fields();
        assert!(fields.contains(&"oneLiner"));
        assert!(fields.contains(&"talentNeeds"));
        assert_eq!(fields.len(), 19);
    }

    #[test]
    fn profile_persona_never_permits_avatar() {
        let persona = Persona::profile();
        let fields = persona.permitted_fields();
        assert!(fields.contains(&"superpower"));
        assert!(!fields.contains(&"avatar"));
    }

    #[test]
    fn attachment_markers_differ_by_kind() {
        assert_eq!(Persona::project().attachment_marker("bp.pdf"), "[File: bp.pdf]");
        assert_eq!(Persona::profile().attachment_marker("cv.pdf"), "[Resume: cv.pdf]");
    }

    #[test]
    fn greeting_names_the_user() {
        let greeting = Persona::profile().greeting("Alex Chen");
        assert!(greeting.starts_with("你好 Alex Chen！"));
    }

    #[test]
    fn system_instruction_carries_format_and_language_directives() {
        let instruction = Persona::project().system_instruction().unwrap();
        assert!(instruction.contains(r#"{ "reply": "string", "updates":"#));
        assert!(instruction.contains("oneLiner"));
        assert!(instruction.contains("productHighlights (What is the product?)"));
        assert!(instruction.contains("LANGUAGE INSTRUCTION"));
        assert!(instruction.contains("Paul Graham"));
    }

    #[test]
    fn profile_instruction_omits_priority_block() {
        let instruction = Persona::profile().system_instruction().unwrap();
        assert!(!instruction.contains("CRITICAL"));
        assert!(instruction.contains("superpower"));
    }
}
