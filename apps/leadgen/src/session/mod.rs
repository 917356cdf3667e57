//! Session/chat state — an append-only log of user and assistant turns that
//! lives exactly as long as the interactive session.

pub mod handlers;
pub mod store;

use crate::models::chat::{ChatRole, ChatTurn};

#[derive(Debug, Default)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// The most recent user turn, however many assistant turns follow it.
    pub fn latest_user_turn(&self) -> Option<&ChatTurn> {
        self.turns.iter().rev().find(|t| t.role == ChatRole::User)
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }
}
