//! Translated UI strings
//!
//! Lookups follow the language stored in the local preferences, fall back
//! to English and finally to the key itself.

mod de;
mod en;

use crate::providers::LocalConfigProvider;

pub const FALLBACK_LANGUAGE: &str = "en";

/// A selectable UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageMetadata {
    pub code: &'static str,
    pub name: &'static str,
}

pub const LANGUAGES: [LanguageMetadata; 2] = [
    LanguageMetadata {
        code: "en",
        name: "English",
    },
    LanguageMetadata {
        code: "de",
        name: "Deutsch",
    },
];

fn table(code: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match code {
        "en" => Some(en::TRANSLATIONS),
        "de" => Some(de::TRANSLATIONS),
        _ => None,
    }
}

fn lookup(code: &str, key: &str) -> Option<&'static str> {
    table(code)?
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, value)| *value)
}

/// Key based string lookup bound to the user's language preference
#[derive(Clone)]
pub struct Translator {
    local_config: LocalConfigProvider,
}

impl Translator {
    pub fn new(local_config: &LocalConfigProvider) -> Self {
        Self {
            local_config: local_config.clone(),
        }
    }

    pub fn language(&self) -> String {
        self.local_config.language()
    }

    /// Switch language; unknown codes are ignored
    pub fn change_language(&self, code: &str) -> bool {
        if table(code).is_none() {
            return false;
        }
        self.local_config.set_language(code);
        true
    }

    pub fn t(&self, key: &str) -> String {
        lookup(&self.language(), key)
            .or_else(|| lookup(FALLBACK_LANGUAGE, key))
            .unwrap_or(key)
            .to_string()
    }

    /// Translate and substitute `{{name}}` placeholders
    pub fn t_with(&self, key: &str, vars: &[(&str, String)]) -> String {
        let mut result = self.t(key);
        for (name, value) in vars {
            let placeholder = format!("{{{{{}}}}}", name);
            result = result.replace(&placeholder, value);
        }
        result
    }
}
