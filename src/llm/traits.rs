use std::future::Future;
use std::pin::Pin;

/// A text-generation backend able to produce one machine-parseable
/// completion per call.
///
/// Dyn-compatible so the analyzer can hold an `Arc<dyn TextGenerator>` and
/// tests can substitute a scripted stub for the hosted service.
pub trait TextGenerator: Send + Sync {
    /// Provider identifier (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send `prompt` to `model`, requesting that the output be constrained
    /// to a JSON object rather than free prose, and return the raw payload
    /// text. Transport errors, service errors and empty completions are all
    /// `Err`.
    fn generate_json<'a>(
        &'a self,
        prompt: &'a str,
        model: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}
