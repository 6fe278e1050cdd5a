//! Interactive chat session over one conversation document.

use anyhow::{Context, Result};
use colored::Colorize;

use mdchat_core::agent::{CompletionAgent, CompletionError};
use mdchat_core::conversation::{Conversation, Turn};
use mdchat_infrastructure::ConversationDocument;

use crate::input::{LineReader, MessageInput, read_message};

/// Result of sending one message.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The assistant answered; the reply has been recorded.
    Replied(Turn),
    /// The completion call failed; nothing was recorded for the reply.
    Failed(CompletionError),
}

/// Owns the open document, the in-memory history and the agent for one run.
pub struct ChatSession<A: CompletionAgent> {
    document: ConversationDocument,
    conversation: Conversation,
    agent: A,
}

impl<A: CompletionAgent> ChatSession<A> {
    pub fn new(document: ConversationDocument, conversation: Conversation, agent: A) -> Self {
        Self {
            document,
            conversation,
            agent,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Records the user message, asks the agent, and records the reply.
    ///
    /// The user turn is written before the remote call. A failed call leaves
    /// it unanswered and is reported as [`TurnOutcome::Failed`]; only write
    /// failures are returned as errors.
    pub async fn send(&mut self, text: String) -> Result<TurnOutcome> {
        let user_turn = Turn::user(text);
        self.document
            .append_turn(&user_turn)
            .context("Failed to write message to conversation document")?;
        self.conversation.push(user_turn);

        match self.agent.complete(self.conversation.turns()).await {
            Ok(reply) => {
                self.document
                    .append_turn(&reply)
                    .context("Failed to write reply to conversation document")?;
                self.conversation.push(reply.clone());
                tracing::info!(turns = self.conversation.len(), "recorded assistant reply");
                Ok(TurnOutcome::Replied(reply))
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    status = ?err.status_code(),
                    retryable = err.is_retryable(),
                    model = %self.agent.model(),
                    "completion failed"
                );
                Ok(TurnOutcome::Failed(err))
            }
        }
    }

    /// Closes the document and returns the final history.
    pub fn finish(self) -> Result<Conversation> {
        self.document
            .close()
            .context("Failed to close conversation document")?;
        Ok(self.conversation)
    }
}

/// Reads messages and exchanges them with the agent until `exit` or end of input.
pub async fn run_loop<R, A>(reader: &mut R, session: &mut ChatSession<A>) -> Result<()>
where
    R: LineReader,
    A: CompletionAgent,
{
    loop {
        println!("{}", "---------".bright_black());
        println!(
            "{}",
            "Enter your message (send with a line containing a single space):".bright_black()
        );

        let input = read_message(reader)?;
        println!("{}", "---------".bright_black());

        match input {
            MessageInput::Message(text) => exchange(session, text).await?,
            MessageInput::Empty => continue,
            MessageInput::Discarded => {
                println!("{}", "CTRL-C detected. Message discarded; type 'exit' to quit.".yellow());
            }
            MessageInput::Exit => {
                println!("{}", "Ending the chat.".bright_green());
                return Ok(());
            }
            MessageInput::Eof(pending) => {
                if let Some(text) = pending {
                    exchange(session, text).await?;
                }
                println!("{}", "CTRL-D detected. Ending the chat.".bright_green());
                return Ok(());
            }
        }
    }
}

async fn exchange<A: CompletionAgent>(session: &mut ChatSession<A>, text: String) -> Result<()> {
    match session.send(text).await? {
        TurnOutcome::Replied(reply) => {
            for line in reply.content.lines() {
                println!("{}", line.bright_blue());
            }
        }
        TurnOutcome::Failed(err) => {
            eprintln!("{}", format!("Error: {err}").red());
        }
    }
    Ok(())
}
