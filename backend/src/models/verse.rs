use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

/// Locales every reply is relayed into, in the order they are translated
pub const SUPPORTED_LANGUAGES: [&str; 10] =
    ["ta", "hi", "ml", "te", "bn", "gu", "kn", "mr", "pa", "ur"];

/// Stored in every field of a locale whose translation failed
pub const TRANSLATION_FAILED: &str = "Translation failed.";

pub fn supported_languages() -> Vec<String> {
    SUPPORTED_LANGUAGES.iter().map(|l| l.to_string()).collect()
}

/// The two canonical texts the chatbot can answer from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Thirukkural,
    BhagavadGita,
}

impl Domain {
    /// Human-readable title, used when rewriting follow-up queries
    pub fn title(&self) -> &'static str {
        match self {
            Domain::Thirukkural => "Thirukkural",
            Domain::BhagavadGita => "Bhagavad Gita",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ThirukkuralReply {
    /// The original Thirukkural verse in Tamil
    pub verse: String,
    /// English translation of the Thirukkural
    pub translation: String,
    /// The section name the Thirukkural belongs to (Aram, Porul, or Inbam)
    pub section: String,
    /// Detailed explanation of the Thirukkural's meaning and significance
    pub explanation: String,
    /// A short story or anecdote that illustrates the meaning of this Thirukkural
    pub story: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GitaReply {
    /// The original Bhagavad Gita verse in Sanskrit
    pub verse: String,
    /// English translation of the verse
    pub translation: String,
    /// The chapter and verse number
    pub chapter: String,
    /// Detailed explanation of the verse's meaning and significance
    pub explanation: String,
    /// A short story or anecdote that illustrates the meaning of this verse
    pub story: String,
}

/// A parsed model reply. Serializes as the flat object of whichever
/// variant it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum StructuredReply {
    Thirukkural(ThirukkuralReply),
    Gita(GitaReply),
}

impl StructuredReply {
    pub fn translation(&self) -> &str {
        match self {
            Self::Thirukkural(r) => &r.translation,
            Self::Gita(r) => &r.translation,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Self::Thirukkural(r) => &r.explanation,
            Self::Gita(r) => &r.explanation,
        }
    }

    pub fn story(&self) -> &str {
        match self {
            Self::Thirukkural(r) => &r.story,
            Self::Gita(r) => &r.story,
        }
    }

    /// One-line summary recorded as the assistant turn of the conversation
    pub fn summary_line(&self) -> String {
        match self {
            Self::Thirukkural(r) => format!(
                "Thirukkural about {} - Translation: {}",
                r.section.to_lowercase(),
                r.translation
            ),
            Self::Gita(r) => {
                format!("Bhagavad Gita {} - Translation: {}", r.chapter, r.translation)
            },
        }
    }

    /// Canned reply for introductory greetings; no backend is consulted.
    pub fn greeting() -> Self {
        Self::Thirukkural(ThirukkuralReply {
            verse: "Greeting".to_string(),
            translation: "Hello! I'm a sacred text chatbot. How can I assist you today?"
                .to_string(),
            section: "Greeting".to_string(),
            explanation: "This is a friendly greeting to start the conversation.".to_string(),
            story: "No story here, just a warm welcome!".to_string(),
        })
    }

    /// Success-shaped payload returned when generation fails.
    pub fn failure(message: impl fmt::Display) -> Self {
        Self::Thirukkural(ThirukkuralReply {
            verse: "Error".to_string(),
            translation: "Error".to_string(),
            section: "Error".to_string(),
            explanation: format!("An error occurred: {}", message),
            story: "Unable to generate a story at this time.".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranslatedFields {
    pub translation: String,
    pub explanation: String,
    pub story: String,
}

impl TranslatedFields {
    pub fn failed() -> Self {
        Self {
            translation: TRANSLATION_FAILED.to_string(),
            explanation: TRANSLATION_FAILED.to_string(),
            story: TRANSLATION_FAILED.to_string(),
        }
    }
}

/// Locale code to translated fields
pub type TranslationBundle = BTreeMap<String, TranslatedFields>;

#[cfg(test)]
mod tests {
    use super::*;

    fn gita() -> StructuredReply {
        StructuredReply::Gita(GitaReply {
            verse: "karmaṇy evādhikāras te".to_string(),
            translation: "You have a right to your actions alone".to_string(),
            chapter: "2.47".to_string(),
            explanation: "Act without attachment to results".to_string(),
            story: "Once upon a time".to_string(),
        })
    }

    #[test]
    fn test_gita_serializes_flat_with_chapter() {
        let value = serde_json::to_value(gita()).unwrap();
        assert_eq!(value["chapter"], "2.47");
        assert!(value.get("section").is_none());
        assert_eq!(value.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_summary_lines() {
        assert_eq!(
            gita().summary_line(),
            "Bhagavad Gita 2.47 - Translation: You have a right to your actions alone"
        );

        let kural = StructuredReply::Thirukkural(ThirukkuralReply {
            verse: "அகர முதல".to_string(),
            translation: "A is the first of letters".to_string(),
            section: "Aram".to_string(),
            explanation: String::new(),
            story: String::new(),
        });
        assert_eq!(
            kural.summary_line(),
            "Thirukkural about aram - Translation: A is the first of letters"
        );
    }

    #[test]
    fn test_failure_embeds_message() {
        let value = serde_json::to_value(StructuredReply::failure("boom")).unwrap();
        assert_eq!(value["verse"], "Error");
        assert_eq!(value["translation"], "Error");
        assert_eq!(value["section"], "Error");
        assert_eq!(value["explanation"], "An error occurred: boom");
        assert_eq!(value["story"], "Unable to generate a story at this time.");
    }

    #[test]
    fn test_failed_fields_use_sentinel() {
        let failed = TranslatedFields::failed();
        assert_eq!(failed.translation, "Translation failed.");
        assert_eq!(failed.explanation, "Translation failed.");
        assert_eq!(failed.story, "Translation failed.");
    }
}
