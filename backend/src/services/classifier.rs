//! Query routing heuristics
//!
//! Keyword checks that pick a domain for a query and recognize short
//! follow-up requests. These are surface heuristics; their false
//! positives and negatives are part of the behavior.

use crate::models::Domain;
use crate::services::conversation::ConversationMemory;

const THIRUKKURAL_KEYWORDS: &[&str] = &["thirukkural", "kural", "tamil", "aram", "porul", "inbam"];

const GITA_KEYWORDS: &[&str] = &["bhagavad gita", "gita", "krishna", "arjuna", "yoga", "dharma"];

const FOLLOW_UP_KEYWORDS: &[&str] =
    &["thirukkural", "kural", "bhagavad gita", "gita", "similar", "same"];

const FOLLOW_UP_MAX_WORDS: usize = 5;

/// Exact (case-insensitive) inputs answered with the canned greeting
const GREETINGS: &[&str] = &["hi", "hello", "hey", "hi there", "hello there"];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Thirukkural keywords are checked first; unmatched queries default to
/// Thirukkural as well.
pub fn classify(query: &str) -> Domain {
    let query_lower = query.to_lowercase();

    if contains_any(&query_lower, THIRUKKURAL_KEYWORDS) {
        Domain::Thirukkural
    } else if contains_any(&query_lower, GITA_KEYWORDS) {
        Domain::BhagavadGita
    } else {
        Domain::Thirukkural
    }
}

pub fn is_follow_up(query: &str) -> bool {
    let query_lower = query.to_lowercase();
    query_lower.split_whitespace().count() <= FOLLOW_UP_MAX_WORDS
        && contains_any(&query_lower, FOLLOW_UP_KEYWORDS)
}

pub fn is_greeting(query: &str) -> bool {
    let query_lower = query.to_lowercase();
    GREETINGS.contains(&query_lower.as_str())
}

/// Rewrite a follow-up query into `"<seed> (in <Domain>)"`.
///
/// The seed is the second-to-last turn of the *other* domain's log
/// (Thirukkural follow-ups read the Gita log and vice versa), or empty
/// when that log holds fewer than two turns.
pub fn resolve_follow_up(query: &str, memory: &ConversationMemory) -> (Domain, String) {
    let query_lower = query.to_lowercase();
    let (domain, source) = if query_lower.contains("thirukkural") || query_lower.contains("kural")
    {
        (Domain::Thirukkural, Domain::BhagavadGita)
    } else {
        (Domain::BhagavadGita, Domain::Thirukkural)
    };

    let seed = memory.with_log(source, |log| {
        log.nth_from_end(2).map(|turn| turn.text().to_string()).unwrap_or_default()
    });

    (domain, format!("{} (in {})", seed, domain.title()))
}
