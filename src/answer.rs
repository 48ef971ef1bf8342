//! Answer synthesis over retrieved candidate documents.
//!
//! Classifies the question once, picks a passage per candidate (stored
//! excerpt when present, best-sentence fallback otherwise), and folds the
//! contributing passages into a ranked, truncated answer with a confidence
//! estimate and source list.

use crate::classify::{classify, Topic};
use crate::models::{Answer, AnswerSource, DocumentCandidate};
use crate::passage::select_passage;

/// Maximum number of answer blocks and sources in the final answer,
/// independent of how many candidates were examined.
pub const MAX_ANSWER_BLOCKS: usize = 3;

/// Confidence contributed by each document that yields a usable passage.
const CONFIDENCE_PER_SOURCE: f64 = 0.3;

/// Fixed confidence when candidates exist but none contributes a passage.
const FALLBACK_CONFIDENCE: f64 = 0.1;

/// Guidance message for the "found documents but nothing extractable" state.
const FALLBACK_MESSAGE: &str = "I found relevant documents but couldn't extract specific \
    information to answer your question. Please check the documents directly or rephrase \
    your question.";

/// Synthesizes an answer from candidates, in retrieval order.
///
/// Candidates that yield no usable passage are skipped, never errors.
/// Zero contributors is a valid terminal state with a fixed low confidence.
pub fn synthesize(question: &str, candidates: &[DocumentCandidate]) -> Answer {
    let topic = classify(question);

    let mut blocks: Vec<String> = Vec::new();
    let mut sources: Vec<AnswerSource> = Vec::new();
    let mut confidence = 0.0f64;

    for candidate in candidates {
        let passage = passage_for(topic, question, candidate);
        if passage.is_empty() {
            continue;
        }

        blocks.push(format!("**{}**: {}", candidate.product_name, passage));
        sources.push(AnswerSource {
            product_name: candidate.product_name.clone(),
            location: format_location(candidate),
            document_id: candidate.document_id.clone(),
        });
        confidence += CONFIDENCE_PER_SOURCE;
    }

    if blocks.is_empty() {
        return Answer {
            text: FALLBACK_MESSAGE.to_string(),
            confidence: FALLBACK_CONFIDENCE,
            sources: Vec::new(),
        };
    }

    blocks.truncate(MAX_ANSWER_BLOCKS);
    sources.truncate(MAX_ANSWER_BLOCKS);

    Answer {
        text: blocks.join("\n\n"),
        confidence: confidence.min(1.0),
        sources,
    }
}

/// Stored excerpt for the topic when present and non-empty; otherwise the
/// best-sentence fallback over the candidate's full text.
fn passage_for(topic: Topic, question: &str, candidate: &DocumentCandidate) -> String {
    let stored = match topic {
        Topic::FirstAid => candidate.first_aid.as_str(),
        Topic::FireFighting => candidate.fire_fighting.as_str(),
        Topic::Handling => candidate.handling_storage.as_str(),
        Topic::Exposure => candidate.exposure_controls.as_str(),
        Topic::Hazards | Topic::Physical | Topic::General => "",
    };

    if !stored.is_empty() {
        stored.to_string()
    } else {
        select_passage(question, &candidate.full_text)
    }
}

fn format_location(candidate: &DocumentCandidate) -> String {
    match (&candidate.department, &candidate.city, &candidate.state) {
        (Some(dept), Some(city), Some(state)) if !dept.is_empty() => {
            format!("{}, {}, {}", dept, city, state)
        }
        _ => "Unknown location".to_string(),
    }
}
