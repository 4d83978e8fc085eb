//! Command routing
//!
//! A [`Plugin`] is the set of `!commands` a service exposes to one room.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{ChatMessage, TextMessage};

/// Prefix marking a message body as a command.
pub const COMMAND_PREFIX: char = '!';

/// Handler invoked when a command matches.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Run the command with the words following its path.
    async fn run(&self, room_id: &str, user_id: &str, args: &[String]) -> Result<ChatMessage>;
}

/// A command and the words that trigger it.
#[derive(Clone)]
pub struct Command {
    /// Words after the `!` that select this command, e.g. `["guggy"]`.
    pub path: Vec<String>,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    /// Create a new command.
    pub fn new<I, S>(path: I, handler: Arc<dyn CommandHandler>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            handler,
        }
    }

    /// Number of leading `words` matched by this command's path, if all of it matches.
    fn matches(&self, words: &[&str]) -> Option<usize> {
        if self.path.is_empty() || words.len() < self.path.len() {
            return None;
        }
        self.path
            .iter()
            .zip(words)
            .all(|(p, w)| p.eq_ignore_ascii_case(w))
            .then_some(self.path.len())
    }
}

/// Commands a service exposes.
#[derive(Clone, Default)]
pub struct Plugin {
    /// Registered commands.
    pub commands: Vec<Command>,
}

impl Plugin {
    /// Create a plugin from a list of commands.
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Find the command for `body` and the arguments that follow its path.
    ///
    /// When several paths match, the longest one wins.
    pub fn match_command(&self, body: &str) -> Option<(&Command, Vec<String>)> {
        let rest = body.trim_start().strip_prefix(COMMAND_PREFIX)?;
        let words: Vec<&str> = rest.split_whitespace().collect();

        self.commands
            .iter()
            .filter_map(|cmd| cmd.matches(&words).map(|len| (cmd, len)))
            .max_by_key(|(_, len)| *len)
            .map(|(cmd, len)| {
                let args = words[len..].iter().map(|w| w.to_string()).collect();
                (cmd, args)
            })
    }

    /// Run the command addressed by `body`, if any.
    ///
    /// Command errors are reported back into the room as a notice.
    pub async fn on_message(
        &self,
        room_id: &str,
        user_id: &str,
        body: &str,
    ) -> Option<ChatMessage> {
        let (command, args) = self.match_command(body)?;
        debug!(room_id, user_id, path = ?command.path, "Running command");

        match command.handler.run(room_id, user_id, &args).await {
            Ok(message) => Some(message),
            Err(e) => {
                warn!(room_id, user_id, error = %e, "Command failed");
                Some(TextMessage::notice(format!("Failed to complete command: {}", e)).into())
            }
        }
    }
}
