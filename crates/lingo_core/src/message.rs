use std::fmt;

/// Only messages detected as this language may be summarized.
pub const SUMMARY_LANGUAGE: &str = "en";
/// Messages must be strictly longer than this (in chars) to be summarized.
pub const SUMMARY_MIN_CHARS: usize = 150;

/// Eligibility rule for the summarize action. Unknown language is never eligible.
pub fn is_eligible_for_summary(detected_language: Option<&str>, text: &str) -> bool {
    detected_language == Some(SUMMARY_LANGUAGE) && text.chars().count() > SUMMARY_MIN_CHARS
}

/// One submitted chat entry plus whatever the capabilities produced for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    text: String,
    detected_language: Option<String>,
    summary: String,
    translation: String,
    eligible_for_summary: bool,
}

impl ChatMessage {
    /// Creates a fresh message; eligibility is decided here and never again.
    pub fn new(text: impl Into<String>, detected_language: Option<String>) -> Self {
        let text = text.into();
        let eligible_for_summary = is_eligible_for_summary(detected_language.as_deref(), &text);
        Self {
            text,
            detected_language,
            summary: String::new(),
            translation: String::new(),
            eligible_for_summary,
        }
    }

    /// Rebuilds a message from persisted fields, keeping the stored eligibility.
    pub fn restore(
        text: String,
        detected_language: Option<String>,
        summary: String,
        translation: String,
        eligible_for_summary: bool,
    ) -> Self {
        Self {
            text,
            detected_language,
            summary,
            translation,
            eligible_for_summary,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn detected_language(&self) -> Option<&str> {
        self.detected_language.as_deref()
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn eligible_for_summary(&self) -> bool {
        self.eligible_for_summary
    }

    pub(crate) fn set_summary(&mut self, summary: String) {
        self.summary = summary;
    }

    pub(crate) fn set_translation(&mut self, translation: String) {
        self.translation = translation;
    }
}

/// Kind of capability call occupying the single loading slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Summarizing,
    Translating,
}

/// Identifies one started summarize/translate action. Results carry it back
/// so a result from a superseded action never matches a newer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u64);

/// The action currently in flight, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub id: ActionId,
    pub index: usize,
    pub kind: ActionKind,
}

/// Translation targets offered in the language picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetLanguage {
    #[default]
    English,
    Portuguese,
    Spanish,
    Russian,
    Turkish,
    French,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 6] = [
        TargetLanguage::English,
        TargetLanguage::Portuguese,
        TargetLanguage::Spanish,
        TargetLanguage::Russian,
        TargetLanguage::Turkish,
        TargetLanguage::French,
    ];

    /// BCP 47 code handed to the translator.
    pub fn code(self) -> &'static str {
        match self {
            TargetLanguage::English => "en",
            TargetLanguage::Portuguese => "pt",
            TargetLanguage::Spanish => "es",
            TargetLanguage::Russian => "ru",
            TargetLanguage::Turkish => "tr",
            TargetLanguage::French => "fr",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Portuguese => "Portuguese",
            TargetLanguage::Spanish => "Spanish",
            TargetLanguage::Russian => "Russian",
            TargetLanguage::Turkish => "Turkish",
            TargetLanguage::French => "French",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.code())
    }
}
