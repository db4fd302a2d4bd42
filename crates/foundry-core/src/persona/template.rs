//! System-instruction template.

use minijinja::{Environment, Template};
use once_cell::sync::Lazy;

use crate::error::Result;

const SYSTEM_INSTRUCTION: &str = r#"You are {{ identity }}. {{ mission }}
Output JSON: { "reply": "string", "updates": { ...partial document fields... } }
The only keys permitted inside 'updates' are: {{ fields|join(", ") }}.
{%- if priority_fields %}
CRITICAL: You must aggressively extract and populate the following fields in the 'updates' object whenever relevant information is shared:
{%- for hint in priority_fields %}
- {{ hint }}
{%- endfor %}
{%- endif %}
Tone: {{ tone }}

LANGUAGE INSTRUCTION: You MUST detect the language of the user's input (or uploaded file). Your 'reply' MUST be written in that same language. If the user speaks Chinese (or uploads Chinese content), reply in Chinese. Do not default to English."#;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("system_instruction", SYSTEM_INSTRUCTION)
        .expect("static system-instruction template parses");
    env
});

pub(super) fn system_instruction_template() -> Result<Template<'static, 'static>> {
    Ok(TEMPLATES.get_template("system_instruction")?)
}
