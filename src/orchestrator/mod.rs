//! Wires validated user input through the analyzer and into the store.

use chrono::Local;

use crate::analyzer::FeedbackAnalyzer;
use crate::error::{StorageError, SubmitError};
use crate::store::{FeedbackRecord, ReviewStore};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct SubmissionOrchestrator {
    analyzer: FeedbackAnalyzer,
    store: ReviewStore,
}

impl SubmissionOrchestrator {
    pub fn new(analyzer: FeedbackAnalyzer, store: ReviewStore) -> Self {
        Self { analyzer, store }
    }

    /// Run one submission end to end: validate, triage, stamp, persist.
    ///
    /// Validation happens before any external call; a storage failure is
    /// surfaced rather than masked, so the caller never shows a false
    /// confirmation.
    pub async fn submit(
        &mut self,
        review_text: &str,
        rating: u8,
    ) -> Result<FeedbackRecord, SubmitError> {
        if review_text.trim().is_empty() {
            return Err(SubmitError::EmptyReview);
        }
        if !(1..=5).contains(&rating) {
            return Err(SubmitError::RatingOutOfRange { rating });
        }

        let analysis = self.analyzer.analyze(review_text, rating).await;

        let record = FeedbackRecord {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            user_rating: rating,
            review_text: review_text.to_string(),
            ai_response_user: analysis.user_response,
            ai_summary: analysis.summary,
            ai_actions: analysis.actions,
        };

        self.store.append(record.clone())?;
        tracing::info!(rating, summary = %record.ai_summary, "feedback recorded");

        Ok(record)
    }

    /// All persisted records in submission order.
    pub fn list_all(&self) -> Result<Vec<FeedbackRecord>, StorageError> {
        self.store.load()
    }
}

/// Read-side metrics, derived on each render and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackStats {
    pub total: usize,
    /// Arithmetic mean of the ratings; `None` when there are no records.
    pub average_rating: Option<f64>,
    /// Records rated 4 or above.
    pub positive: usize,
    pub critical: usize,
}

impl FeedbackStats {
    pub fn from_records(records: &[FeedbackRecord]) -> Self {
        let total = records.len();
        let positive = records.iter().filter(|r| r.user_rating >= 4).count();
        let average_rating = if total == 0 {
            None
        } else {
            let sum: f64 = records.iter().map(|r| f64::from(r.user_rating)).sum();
            Some(sum / total as f64)
        };

        Self {
            total,
            average_rating,
            positive,
            critical: total - positive,
        }
    }
}
