//! Interactive terminal front end for one co-authoring session.
//!
//! Plain input is sent to the agent as a conversation turn; slash
//! commands drive annotation, revision, the avatar editor, and
//! publication.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use foundry_application::{LogPublisher, OnboardingSession};
use foundry_core::annotation::{Segment, SelectionRequest};
use foundry_core::document::IdentitySeed;
use foundry_interaction::{Agent, Attachment, GeminiApiAgent};
use foundry_media::CropParams;

const COMMANDS: &[&str] = &[
    "/annotate", "/comment", "/cancel", "/revise", "/attach", "/avatar", "/show", "/publish",
    "/quit",
];

/// CLI helper for rustyline that provides completion and highlighting
/// for slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;
}

impl Validator for CliHelper {}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    /// Co-author a startup-project manifest
    Project,
    /// Co-author a personal talent profile
    Profile,
}

#[derive(Parser)]
#[command(name = "foundry")]
#[command(about = "Foundry - co-author a startup manifest or talent profile with an AI agent", long_about = None)]
struct Cli {
    /// Document kind to co-author
    #[arg(value_enum, default_value = "project")]
    kind: Kind,

    /// Override the Gemini model name
    #[arg(long)]
    model: Option<String>,

    /// Display name used to seed and greet the session
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut agent = GeminiApiAgent::try_from_env()?.with_json_response();
    if let Some(model) = &cli.model {
        agent = agent.with_model(model.clone());
    }

    let seed = cli.name.map(|name| IdentitySeed {
        name,
        ..IdentitySeed::default()
    });
    let mut session = match cli.kind {
        Kind::Project => OnboardingSession::project(agent, seed),
        Kind::Profile => OnboardingSession::profile(agent, seed),
    };

    println!("{}", format!("[{}]", session.persona().display_name()).bright_magenta());
    if let Some(greeting) = session.transcript().await.first() {
        println!("{}", greeting.text.bright_blue());
    }
    println!("{}", "Type to chat; /show renders the document; /quit exits.".bright_black());

    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    let mut pending: Option<SelectionRequest> = None;

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        if let Some(command) = line.strip_prefix('/') {
            let (name, rest) = match command.split_once(' ') {
                Some((name, rest)) => (name, rest.trim()),
                None => (command, ""),
            };
            match name {
                "quit" => break,
                "show" => show_document(&session).await?,
                "annotate" => match rest.split_once(' ') {
                    Some((field, text)) => match session.begin_selection(field, text) {
                        Ok(request) => {
                            pending = Some(request);
                            println!(
                                "{}",
                                "Selection captured; add a note with /comment <text> or drop it with /cancel."
                                    .bright_black()
                            );
                        }
                        Err(err) => print_error(&err),
                    },
                    None => print_usage("/annotate <field> <selected text>"),
                },
                "comment" => match (pending.take(), rest) {
                    (None, _) => print_usage("no pending selection; start with /annotate"),
                    (Some(request), "") => {
                        pending = Some(request);
                        print_usage("/comment <text>");
                    }
                    (Some(request), comment) => {
                        match session.commit_annotation(request, comment).await {
                            Ok(annotation) => {
                                let badge =
                                    session.annotations().badge_of(&annotation.id).unwrap_or(0);
                                println!(
                                    "{}",
                                    format!("Annotation [{badge}] added on '{}'.", annotation.field)
                                        .green()
                                );
                            }
                            Err(err) => print_error(&err),
                        }
                    }
                },
                "cancel" => {
                    pending = None;
                    println!("{}", "Selection discarded.".bright_black());
                }
                "revise" => match session.request_revision().await {
                    Ok(outcome) => print_outcome(&outcome.reply, &outcome.updated_fields),
                    Err(err) => print_error(&err),
                },
                "attach" => {
                    let (path, text) = match rest.split_once(' ') {
                        Some((path, text)) => (path, text.trim()),
                        None => (rest, ""),
                    };
                    if path.is_empty() {
                        print_usage("/attach <path> [message]");
                        continue;
                    }
                    match read_attachment(path) {
                        Ok(attachment) => match session.send(text, Some(attachment)).await {
                            Ok(outcome) => print_outcome(&outcome.reply, &outcome.updated_fields),
                            Err(err) => print_error(&err),
                        },
                        Err(err) => eprintln!("{}", err.to_string().red()),
                    }
                }
                "avatar" => {
                    if rest.is_empty() {
                        print_usage("/avatar <path>");
                        continue;
                    }
                    match std::fs::read(rest) {
                        Ok(bytes) => {
                            match session.set_avatar(&bytes, &CropParams::default()).await {
                                Ok(()) => println!("{}", "Avatar updated.".green()),
                                Err(err) => print_error(&err),
                            }
                        }
                        Err(err) => eprintln!("{}", err.to_string().red()),
                    }
                }
                "publish" => {
                    match session.publish(&LogPublisher).await {
                        Ok(_) => {
                            println!("{}", "Document published. Good luck out there!".green());
                            break;
                        }
                        Err(err) => print_error(&err),
                    }
                }
                _ => println!("{}", "Unknown command".bright_black()),
            }
            continue;
        }

        match session.send(&line, None).await {
            Ok(outcome) => print_outcome(&outcome.reply, &outcome.updated_fields),
            Err(err) => print_error(&err),
        }
    }

    Ok(())
}

fn print_outcome(reply: &str, updated_fields: &[String]) {
    for line in reply.lines() {
        println!("{}", line.bright_blue());
    }
    if !updated_fields.is_empty() {
        println!("{}", format!("updated: {}", updated_fields.join(", ")).green());
    }
}

fn print_error(err: &foundry_core::FoundryError) {
    eprintln!("{}", err.to_string().red());
}

fn print_usage(usage: &str) {
    println!("{}", usage.yellow());
}

/// Renders every non-empty document field, with highlight badges for
/// annotated spans.
async fn show_document<A: Agent<Output = String>>(session: &OnboardingSession<A>) -> Result<()> {
    let document = session.document().await;
    let Value::Object(fields) = serde_json::to_value(&document)? else {
        return Ok(());
    };

    println!(
        "{}",
        format!("--- {} annotations ---", session.annotations().len()).bright_black()
    );
    for (field, value) in &fields {
        match value {
            Value::String(text) if !text.is_empty() => {
                print!("{} ", format!("{field}:").bold());
                for segment in session.render_field(field).await {
                    match segment {
                        Segment::Plain(text) => print!("{text}"),
                        Segment::Highlight { text, badge, .. } => {
                            print!("{}{}", text.on_yellow(), format!("[{badge}]").red())
                        }
                    }
                }
                println!();
            }
            Value::Array(items) => {
                let joined: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                if !joined.is_empty() {
                    println!("{} {}", format!("{field}:").bold(), joined.join(", "));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn read_attachment(path: &str) -> Result<Attachment> {
    let bytes = std::fs::read(path)?;
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(Attachment::in_memory(name, mime_for_path(path), bytes))
}

fn mime_for_path(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}
