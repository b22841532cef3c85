//! Ordered mock-interview conversation log.

use rescreen_models::{ConversationTurn, MockInterviewRequest};

use crate::api::ApiClient;
use crate::error::ClientResult;

/// Append-only transcript of a mock interview.
///
/// Turns alternate user/AI in the order they happened; the log never
/// shrinks. A failed exchange keeps the user's turn so the transcript
/// reflects what was actually said.
#[derive(Debug, Default)]
pub struct ConversationLog {
    job_context: String,
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new(job_context: impl Into<String>) -> Self {
        Self {
            job_context: job_context.into(),
            turns: Vec::new(),
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn::user(text));
    }

    pub fn push_ai(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn::ai(text));
    }

    /// One round trip: record the user's message, ask the interviewer for a
    /// reply over the prior history, record the reply.
    ///
    /// The request carries the history before this message; the message
    /// itself travels in its own field.
    pub async fn exchange(
        &mut self,
        client: &ApiClient,
        message: &str,
        token: Option<&str>,
    ) -> ClientResult<String> {
        let request = MockInterviewRequest {
            history: self.turns.clone(),
            message: message.to_string(),
            job_context: self.job_context.clone(),
        };
        self.push_user(message);

        let reply = client.mock_interview(&request, token).await?;
        self.push_ai(reply.response.clone());
        Ok(reply.response)
    }
}
