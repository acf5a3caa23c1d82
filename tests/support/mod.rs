#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use feedback_triage::llm::TextGenerator;

/// Scripted text-generation backend: hands out canned payloads (or canned
/// failures) in order and counts how often it is called. Calls past the end
/// of the script repeat the last entry.
pub struct ScriptedGenerator {
    replies: Vec<Result<String, String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, String>>) -> Arc<Self> {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Arc::new(Self {
            replies,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn always_ok(payload: impl Into<String>) -> Arc<Self> {
        Self::new(vec![Ok(payload.into())])
    }

    pub fn always_err(message: impl Into<String>) -> Arc<Self> {
        Self::new(vec![Err(message.into())])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate_json<'a>(
        &'a self,
        _prompt: &'a str,
        _model: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies[call.min(self.replies.len() - 1)].clone();
        Box::pin(async move { reply.map_err(|message| anyhow::anyhow!(message)) })
    }
}

/// A well-formed analysis payload, as the model would return it.
pub fn payload(user_response: &str, summary: &str, actions: &str) -> String {
    serde_json::json!({
        "user_response": user_response,
        "summary": summary,
        "actions": actions,
    })
    .to_string()
}
