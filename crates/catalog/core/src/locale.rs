//! Language-tag lookup over the provider's localized entry sets.
use crate::document::{FlavorTextEntry, LocalizedName};

/// Language used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "fr";

/// An entry tagged with a provider language name (`"fr"`, `"en"`, `"ja-Hrkt"`, ...).
pub trait Localized {
    fn language(&self) -> &str;
    fn text(&self) -> &str;
}

impl Localized for LocalizedName {
    fn language(&self) -> &str {
        &self.language.name
    }

    fn text(&self) -> &str {
        &self.name
    }
}

impl Localized for FlavorTextEntry {
    fn language(&self) -> &str {
        &self.language.name
    }

    fn text(&self) -> &str {
        &self.flavor_text
    }
}

/// First entry whose language tag equals `locale` exactly.
///
/// A miss is not an error; callers fall back to the provider's own field.
pub fn lookup<'a, E: Localized>(entries: &'a [E], locale: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.language() == locale)
        .map(Localized::text)
}

/// Localized text, or `fallback` when no entry matches.
pub fn localize_or<E: Localized>(entries: &[E], locale: &str, fallback: &str) -> String {
    lookup(entries, locale).unwrap_or(fallback).to_string()
}

/// Collapses the layout control characters embedded in flavor text.
///
/// Game text carries form feeds and hard line breaks from the cartridge
/// layout, which become single spaces. Soft hyphens mark a word split across
/// lines and are removed together with the break that follows them.
pub fn normalize_flavor_text(raw: &str) -> String {
    raw.replace("\u{00ad}\n", "")
        .replace('\u{00ad}', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
