//! Question-answer orchestration.
//!
//! Ties retrieval, synthesis, and history logging together into the
//! flag-plus-message result the CLI and HTTP server both return. Data-quality
//! outcomes ("no documents", "nothing extractable") are structured results;
//! only storage failures propagate as errors.

use anyhow::{bail, Result};
use sqlx::SqlitePool;

use crate::answer::synthesize;
use crate::config::Config;
use crate::db;
use crate::history;
use crate::models::QaResponse;
use crate::retrieve::retrieve;

/// Guidance message for the "no relevant documents" outcome.
pub const NO_DOCUMENTS_MESSAGE: &str = "I couldn't find any relevant SDS documents to answer \
    your question. Please try uploading relevant SDS files first.";

/// Answers a question against the document store.
///
/// Returns `success: false` only when retrieval finds no candidates;
/// candidates that contribute nothing still produce a successful response
/// with a fixed low confidence. Each answered question is appended to the
/// QA history log.
pub async fn answer_question(
    pool: &SqlitePool,
    question: &str,
    location_id: Option<i64>,
    session: Option<&str>,
) -> Result<QaResponse> {
    let candidates = retrieve(pool, question, location_id).await?;

    if candidates.is_empty() {
        return Ok(QaResponse {
            success: false,
            answer: NO_DOCUMENTS_MESSAGE.to_string(),
            confidence: 0.0,
            sources: Vec::new(),
        });
    }

    let answer = synthesize(question, &candidates);

    let top_document_id = candidates.first().map(|c| c.document_id.as_str());
    history::append(
        pool,
        question,
        &answer.text,
        top_document_id,
        location_id,
        session,
        answer.confidence,
    )
    .await?;

    Ok(QaResponse {
        success: true,
        answer: answer.text,
        confidence: answer.confidence,
        sources: answer.sources,
    })
}

/// CLI entry point: answer the question and print the result.
pub async fn run_ask(
    config: &Config,
    question: &str,
    location_id: Option<i64>,
    session: Option<String>,
) -> Result<()> {
    if question.trim().is_empty() {
        bail!("question must not be empty");
    }

    let pool = db::connect(&config.db.path).await?;
    let response = answer_question(&pool, question, location_id, session.as_deref()).await?;
    pool.close().await;

    if !response.success {
        println!("{}", response.answer);
        return Ok(());
    }

    println!("{}", response.answer);
    println!();
    println!("confidence: {:.1}", response.confidence);
    for source in &response.sources {
        println!("  source: {} ({})", source.product_name, source.location);
        println!("          id: {}", source.document_id);
    }

    Ok(())
}
