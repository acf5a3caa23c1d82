use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the feedback pipeline.
///
/// Each subsystem defines its own error variant. Callers can match on these
/// to decide recovery strategy; provider internals continue to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum TriageError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Storage ─────────────────────────────────────────────────────────
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    // ── Submission ──────────────────────────────────────────────────────
    #[error("submit: {0}")]
    Submit(#[from] SubmitError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error(
        "Gemini API key not found. Options:\n\
         1. Set GEMINI_API_KEY (or GOOGLE_API_KEY) in the environment\n\
         2. Add api_key to ~/.feedback-triage/config.toml\n\
         3. Get an API key from https://aistudio.google.com/app/apikey"
    )]
    MissingApiKey,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Storage errors ─────────────────────────────────────────────────────────

/// Failures of the backing review table. A failed write never corrupts the
/// previously persisted records.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("table: {0}")]
    Table(#[from] csv::Error),
}

// ─── Submission errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected before any external call; nothing is persisted.
    #[error("review text is empty")]
    EmptyReview,

    #[error("rating {rating} is outside 1..=5")]
    RatingOutOfRange { rating: u8 },

    /// The record could not be persisted. Surfaced to the user as an
    /// explicit submission failure rather than a false confirmation.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, TriageError>;
