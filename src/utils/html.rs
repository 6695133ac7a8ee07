// src/utils/html.rs

use ammonia;

/// Clean user-supplied text using the ammonia library before it is written
/// to the shared store.
///
/// This employs a whitelist-based sanitization strategy: it preserves safe
/// tags (like <b>, <p>) while stripping dangerous tags (like <script>,
/// <iframe>) and malicious attributes (like onclick). Every client reading
/// the collection renders this content, so it is sanitized at the write
/// boundary rather than trusting each reader to escape it.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
