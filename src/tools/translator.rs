//! translator tool - static phrase table

use std::collections::HashMap;

use super::{Tool, required_str};
use crate::domain::{ToolArgs, ToolId};
use crate::error::Result;

const TRANSLATIONS: &[(&str, &str, &str, &str)] = &[
    ("hello", "english", "spanish", "hola"),
    ("hello", "english", "french", "bonjour"),
    ("hello", "english", "german", "hallo"),
    ("hello", "english", "italian", "ciao"),
    ("goodbye", "english", "spanish", "adiós"),
    ("goodbye", "english", "french", "au revoir"),
    ("goodbye", "english", "german", "auf wiedersehen"),
    ("thank you", "english", "spanish", "gracias"),
    ("thank you", "english", "french", "merci"),
    ("thank you", "english", "german", "danke"),
    ("good morning", "english", "spanish", "buenos días"),
    ("good morning", "english", "french", "bonjour"),
    ("good morning", "english", "german", "guten morgen"),
    ("how are you", "english", "spanish", "¿cómo estás?"),
    ("how are you", "english", "french", "comment allez-vous?"),
    ("how are you", "english", "german", "wie geht es ihnen?"),
];

const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("en", "english"),
    ("eng", "english"),
    ("es", "spanish"),
    ("spa", "spanish"),
    ("fr", "french"),
    ("fra", "french"),
    ("de", "german"),
    ("ger", "german"),
    ("it", "italian"),
    ("ita", "italian"),
];

const SUPPORTED_LANGUAGES: &[&str] = &["english", "spanish", "french", "german", "italian"];

type PhraseKey = (String, String, String);

#[derive(Debug, Clone)]
pub struct TranslatorTool {
    translations: HashMap<PhraseKey, String>,
}

impl TranslatorTool {
    pub fn new() -> Self {
        Self {
            translations: TRANSLATIONS
                .iter()
                .map(|(text, from, to, translated)| {
                    ((text.to_string(), from.to_string(), to.to_string()), translated.to_string())
                })
                .collect(),
        }
    }

    /// Map a language code or name to its full lowercase name
    pub fn normalize_language(lang: &str) -> String {
        let lang = lang.trim().to_lowercase();
        LANGUAGE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lang)
            .map(|(_, name)| name.to_string())
            .unwrap_or(lang)
    }

    fn normalize_text(text: &str) -> String {
        text.trim()
            .trim_end_matches(['?', '!', '.'])
            .trim()
            .to_lowercase()
    }

    pub fn translate(&self, text: &str, from: &str, to: &str) -> String {
        let from = Self::normalize_language(from);
        let to = Self::normalize_language(to);
        if from == to {
            return text.to_string();
        }

        let key = (Self::normalize_text(text), from, to);
        match self.translations.get(&key) {
            Some(translated) => translated.clone(),
            None => format!("{} [{}]", text, key.2),
        }
    }

    pub fn supported_languages(&self) -> &'static [&'static str] {
        SUPPORTED_LANGUAGES
    }

    /// Add or replace a phrase translation
    pub fn add_translation(&mut self, text: &str, from: &str, to: &str, translation: impl Into<String>) {
        let key = (
            Self::normalize_text(text),
            Self::normalize_language(from),
            Self::normalize_language(to),
        );
        self.translations.insert(key, translation.into());
    }
}

impl Default for TranslatorTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for TranslatorTool {
    fn id(&self) -> ToolId {
        ToolId::Translation
    }

    fn description(&self) -> &'static str {
        "Translates text between languages"
    }

    fn execute(&self, args: &ToolArgs) -> Result<String> {
        let text = required_str(args, "text")?;
        let from = required_str(args, "from_lang")?;
        let to = required_str(args, "to_lang")?;
        Ok(self.translate(text, from, to))
    }
}
