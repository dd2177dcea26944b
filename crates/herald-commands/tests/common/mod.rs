//! Shared helpers for integration tests.
//!
//! Each integration test file compiles common/ as its own module, so not
//! every helper is used in every file.
#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use herald_gateway::{GatewayError, Interaction, ReplyMessage, ReplyState};

/// Write a well-formed command manifest into `<root>/<group>/<file>.toml`.
pub fn write_manifest(root: &Path, group: &str, file: &str, name: &str, executor: &str) {
    let dir = root.join(group);
    std::fs::create_dir_all(&dir).unwrap();
    let manifest = format!(
        r#"
executor = "{executor}"

[descriptor]
name = "{name}"
description = "The {name} command"
"#
    );
    std::fs::write(dir.join(format!("{file}.toml")), manifest).unwrap();
}

/// Interaction double recording all reply traffic.
pub struct RecordingInteraction {
    name: String,
    state: Mutex<ReplyState>,
    replies: Mutex<Vec<ReplyMessage>>,
    follow_ups: Mutex<Vec<ReplyMessage>>,
}

impl RecordingInteraction {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            state: Mutex::new(ReplyState::None),
            replies: Mutex::new(Vec::new()),
            follow_ups: Mutex::new(Vec::new()),
        })
    }

    pub fn replies(&self) -> Vec<ReplyMessage> {
        self.replies.lock().unwrap().clone()
    }

    pub fn follow_ups(&self) -> Vec<ReplyMessage> {
        self.follow_ups.lock().unwrap().clone()
    }

    pub fn reply_contents(&self) -> Vec<String> {
        self.replies()
            .into_iter()
            .map(|message| message.content)
            .collect()
    }
}

#[async_trait]
impl Interaction for RecordingInteraction {
    fn command_name(&self) -> &str {
        &self.name
    }

    fn reply_state(&self) -> ReplyState {
        *self.state.lock().unwrap()
    }

    async fn reply(&self, message: ReplyMessage) -> Result<(), GatewayError> {
        if self.reply_state().acknowledged() {
            return Err(GatewayError::AlreadyAcknowledged);
        }
        self.replies.lock().unwrap().push(message);
        *self.state.lock().unwrap() = ReplyState::Replied;
        Ok(())
    }

    async fn defer(&self, _ephemeral: bool) -> Result<(), GatewayError> {
        if self.reply_state().acknowledged() {
            return Err(GatewayError::AlreadyAcknowledged);
        }
        *self.state.lock().unwrap() = ReplyState::Deferred;
        Ok(())
    }

    async fn follow_up(&self, message: ReplyMessage) -> Result<(), GatewayError> {
        if !self.reply_state().acknowledged() {
            return Err(GatewayError::NotAcknowledged);
        }
        self.follow_ups.lock().unwrap().push(message);
        Ok(())
    }
}
