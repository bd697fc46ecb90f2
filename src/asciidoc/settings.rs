//! Lookup of process-wide settings consulted during conversion.

use std::collections::HashMap;

/// Key of the global output destination setting.
pub const DESTINATION_KEY: &str = "destination";

/// Source of string-valued global settings.
///
/// Missing keys read as the empty string.
pub trait SettingsProvider: Send + Sync {
    fn get_string(&self, key: &str) -> String;
}

impl SettingsProvider for HashMap<String, String> {
    fn get_string(&self, key: &str) -> String {
        self.get(key).cloned().unwrap_or_default()
    }
}

/// Settings with nothing configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettings;

impl SettingsProvider for NoSettings {
    fn get_string(&self, _key: &str) -> String {
        String::new()
    }
}
