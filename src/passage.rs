//! Best-sentence passage selection over full document text.
//!
//! Used when a candidate document has no stored excerpt for the question's
//! topic. Sentences are split on the literal period character — a known
//! naive heuristic (it breaks on abbreviations and decimals) that is kept
//! verbatim because confidence scores and tie-breaks are defined against
//! this exact splitting behavior.

/// Maximum passage length in characters before the trailing ellipsis.
pub const MAX_PASSAGE_CHARS: usize = 500;

/// Question words at or below this length are ignored as keywords.
const MIN_KEYWORD_LEN: usize = 3;

/// Trimmed sentences at or below this length never qualify, regardless of score.
const MIN_SENTENCE_LEN: usize = 20;

/// Selects the best-scoring local context window for a question.
///
/// Scores each sentence by how many question keywords (lower-cased words
/// longer than three characters) it contains, keeps the first sentence
/// achieving the strict maximum, expands it by one sentence either side,
/// and truncates the rejoined window to [`MAX_PASSAGE_CHARS`] with a
/// trailing "..." marker. Returns an empty string when no sentence scores
/// above zero.
pub fn select_passage(question: &str, full_text: &str) -> String {
    let keywords: Vec<String> = question
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() > MIN_KEYWORD_LEN)
        .collect();

    let sentences: Vec<&str> = full_text.split('.').collect();

    let mut best_index: Option<usize> = None;
    let mut best_score = 0usize;

    for (i, sentence) in sentences.iter().enumerate() {
        let sentence_lower = sentence.to_lowercase();
        let score = keywords
            .iter()
            .filter(|kw| sentence_lower.contains(kw.as_str()))
            .count();

        // Strict improvement only: ties keep the earliest sentence.
        if score > best_score && sentence.trim().chars().count() > MIN_SENTENCE_LEN {
            best_score = score;
            best_index = Some(i);
        }
    }

    let Some(index) = best_index else {
        return String::new();
    };

    // One sentence of context either side, clamped to document bounds.
    let start = index.saturating_sub(1);
    let end = (index + 2).min(sentences.len());
    let context = sentences[start..end].join(". ").trim().to_string();

    if context.chars().count() > MAX_PASSAGE_CHARS {
        let truncated: String = context.chars().take(MAX_PASSAGE_CHARS).collect();
        format!("{}...", truncated)
    } else {
        context
    }
}
