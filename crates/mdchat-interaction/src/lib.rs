//! Completion backends for mdchat.

pub mod openai_api_agent;

pub use openai_api_agent::OpenAIApiAgent;
