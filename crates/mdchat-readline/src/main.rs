mod helper;
mod input;
mod logging;
mod menu;
mod session;

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;

use mdchat_core::agent::CompletionAgent;
use mdchat_core::config::AppConfig;
use mdchat_core::conversation::Conversation;
use mdchat_infrastructure::storage::ConfigStorage;
use mdchat_infrastructure::{ChatDirectory, ConversationDocument, load_conversation};
use mdchat_interaction::OpenAIApiAgent;

use crate::input::EditorReader;
use crate::menu::Selection;
use crate::session::ChatSession;

/// The main entry point for the mdchat REPL.
///
/// 1. Loads config.toml and API credentials
/// 2. Lets the user pick an existing conversation or start a new one
/// 3. Replays the picked document as history and appends every new turn to it
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _log_guard = logging::init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "mdchat aborted");
            eprintln!("{}", format!("Error: {err:#}").red());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // ===== Setup =====
    let config = load_config()?;
    let agent = OpenAIApiAgent::try_from_env()
        .context("Failed to configure the OpenAI client")?
        .with_endpoint(&config.openai);

    let directory = ChatDirectory::open(&config.chats_dir).with_context(|| {
        format!(
            "Failed to create chats directory {}",
            config.chats_dir.display()
        )
    })?;
    let documents = directory
        .list_documents()
        .context("Failed to list conversations")?;

    let mut reader = EditorReader::new()?;
    let Some(selection) = menu::prompt_selection(&mut reader, &documents)? else {
        println!("{}", "No conversation selected.".bright_black());
        return Ok(());
    };

    let (document, conversation) = open_selection(&directory, selection)?;
    tracing::info!(
        document = %document.path().display(),
        turns = conversation.len(),
        model = %agent.model(),
        "session started"
    );

    // ===== Chat Loop =====
    println!("{}", "-----------------------------------".bright_black());
    println!("{}", "=== mdchat ===".bright_magenta().bold());
    println!(
        "{}",
        "Send a message with a line containing a single space.".bright_black()
    );
    println!(
        "{}",
        "To quit, type \"exit\" and then the single-space line.".bright_black()
    );
    println!("{}", "-----------------------------------".bright_black());

    let mut session = ChatSession::new(document, conversation, agent);
    let outcome = session::run_loop(&mut reader, &mut session).await;
    let closed = session.finish();

    outcome?;
    let conversation = closed?;
    tracing::info!(turns = conversation.len(), "session ended");
    Ok(())
}

fn load_config() -> Result<AppConfig> {
    match ConfigStorage::new() {
        Ok(storage) => storage
            .load()
            .with_context(|| format!("Failed to load {}", storage.path().display())),
        Err(err) => {
            tracing::warn!(error = %err, "config directory unavailable, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn open_selection(
    directory: &ChatDirectory,
    selection: Selection,
) -> Result<(ConversationDocument, Conversation)> {
    match selection {
        Selection::New => {
            let (name, document) = directory
                .create_document()
                .context("Failed to create a new conversation file")?;
            println!("Created new conversation '{}'", name.green());
            Ok((document, Conversation::new()))
        }
        Selection::Existing(name) => {
            let path = directory.document_path(&name);
            let conversation = load_conversation(&path)
                .with_context(|| format!("Failed to read conversation '{name}'"))?;
            let document = ConversationDocument::open(&path)
                .with_context(|| format!("Failed to open conversation '{name}'"))?;
            println!(
                "Loaded '{}' ({} turns)",
                name.green(),
                conversation.len()
            );
            Ok((document, conversation))
        }
    }
}
