//! Command handlers: gather input, run the pipeline, render output.

use std::sync::Arc;
use std::time::Duration;

use console::style;
use dialoguer::{Input, Select};

use crate::analyzer::FeedbackAnalyzer;
use crate::config::Config;
use crate::error::{Result, SubmitError};
use crate::llm::GeminiClient;
use crate::orchestrator::{FeedbackStats, SubmissionOrchestrator};
use crate::store::{ReviewStore, render_csv};

use super::{Cli, Commands};

pub async fn handle(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Submit { rating, review } => submit(&config, rating, review).await,
        Commands::Dashboard { raw } => dashboard(&config, raw),
    }
}

async fn submit(config: &Config, rating: Option<u8>, review: Option<String>) -> Result<()> {
    let review_text = match review {
        Some(text) => text,
        None => prompt_review()?,
    };

    // Checked before the rating prompt and before any external call.
    if review_text.trim().is_empty() {
        println!(
            "{}",
            style("Please write a review before submitting.").yellow()
        );
        return Ok(());
    }

    let rating = match rating {
        Some(value) => value,
        None => prompt_rating()?,
    };

    let api_key = config.require_api_key()?;
    let provider = Arc::new(GeminiClient::new(
        api_key,
        Duration::from_secs(config.request_timeout_secs),
    ));
    let analyzer = FeedbackAnalyzer::new(provider, &config.model);
    let store = ReviewStore::new(&config.data_file);
    let mut orchestrator = SubmissionOrchestrator::new(analyzer, store);

    println!("{}", style("Analyzing your feedback...").dim());

    match orchestrator.submit(&review_text, rating).await {
        Ok(record) => {
            println!("{}", style("Feedback Submitted!").green().bold());
            println!("Automated Response: {}", record.ai_response_user);
            Ok(())
        }
        Err(SubmitError::EmptyReview) => {
            println!(
                "{}",
                style("Please write a review before submitting.").yellow()
            );
            Ok(())
        }
        Err(error) => {
            eprintln!("{} {error}", style("Submission failed:").red().bold());
            Err(error.into())
        }
    }
}

fn dashboard(config: &Config, raw: bool) -> Result<()> {
    let store = ReviewStore::new(&config.data_file);
    let records = store.load()?;

    if records.is_empty() {
        println!("No reviews submitted yet.");
        return Ok(());
    }

    let stats = FeedbackStats::from_records(&records);
    let average = stats
        .average_rating
        .map_or_else(String::new, |a| format!("{a:.2}"));

    println!("{}", style("Feedback Analytics & Insights").bold());
    println!();
    println!("Total Reviews:     {}", stats.total);
    println!("Avg Rating:        {average}");
    println!("Positive Feedback: {}", stats.positive);
    println!("Critical Feedback: {}", stats.critical);
    println!();
    println!("{}", style("Live Feed").bold());

    // Most recent first.
    for record in records.iter().rev() {
        println!();
        println!(
            "{}",
            style(format!(
                "{} | Rating: {}/5 | {}",
                record.timestamp, record.user_rating, record.ai_summary
            ))
            .cyan()
        );
        println!("  Review:  {}", record.review_text);
        println!("  Actions: {}", record.ai_actions);
        println!(
            "  {}",
            style(format!("Auto-reply sent: {}", record.ai_response_user)).dim()
        );
    }

    if raw {
        println!();
        println!("{}", style("Raw Data").bold());
        print!("{}", render_csv(&records)?);
    }

    Ok(())
}

fn prompt_review() -> Result<String> {
    let text: String = Input::new()
        .with_prompt("Your review")
        .allow_empty(true)
        .interact_text()
        .map_err(anyhow::Error::from)?;
    Ok(text)
}

fn prompt_rating() -> Result<u8> {
    let choice = Select::new()
        .with_prompt("Rating")
        .items(&["1 - Poor", "2", "3", "4", "5 - Excellent"])
        .default(4)
        .interact()
        .map_err(anyhow::Error::from)?;
    Ok(choice as u8 + 1)
}
