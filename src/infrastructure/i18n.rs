//! Localized message catalog
//!
//! Maps dot-separated message keys to human-readable strings for the
//! configured locale. Unknown keys echo back the key itself, so a
//! missing translation degrades to something greppable instead of a
//! panic or an empty message.

use std::collections::HashMap;

const DEFAULT_LOCALE: &str = "en";

/// Per-locale message tables
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: String,
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl MessageCatalog {
    /// Build the catalog for a locale; unknown or empty locales fall
    /// back to English
    pub fn new(locale: impl Into<String>) -> Self {
        let messages = builtin_messages();
        let mut locale = locale.into();

        if !messages.contains_key(locale.as_str()) {
            locale = DEFAULT_LOCALE.to_string();
        }

        Self { locale, messages }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Resolve a message key for the current locale
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages
            .get(self.locale.as_str())
            .and_then(|table| table.get(key))
            .copied()
            .unwrap_or(key)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

fn builtin_messages() -> HashMap<&'static str, HashMap<&'static str, &'static str>> {
    let mut en = HashMap::new();
    en.insert("signup.email.used", "Email already in use");
    en.insert("signup.email.invalid", "Email address is not valid");
    en.insert("signin.account.disabled", "This account has been disabled");

    let mut es = HashMap::new();
    es.insert("signup.email.used", "El correo electrónico ya está en uso");
    es.insert("signup.email.invalid", "El correo electrónico no es válido");
    es.insert("signin.account.disabled", "Esta cuenta ha sido deshabilitada");

    let mut messages = HashMap::new();
    messages.insert("en", en);
    messages.insert("es", es);
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_key() {
        let catalog = MessageCatalog::new("en");
        assert_eq!(catalog.lookup("signup.email.used"), "Email already in use");
    }

    #[test]
    fn test_lookup_in_spanish() {
        let catalog = MessageCatalog::new("es");
        assert_eq!(
            catalog.lookup("signup.email.used"),
            "El correo electrónico ya está en uso"
        );
    }

    #[test]
    fn test_unknown_key_echoes_key() {
        let catalog = MessageCatalog::new("en");
        assert_eq!(catalog.lookup("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        let catalog = MessageCatalog::new("tlh");
        assert_eq!(catalog.locale(), "en");
        assert_eq!(catalog.lookup("signup.email.used"), "Email already in use");
    }

    #[test]
    fn test_empty_locale_falls_back_to_english() {
        let catalog = MessageCatalog::new("");
        assert_eq!(catalog.locale(), "en");
    }
}
