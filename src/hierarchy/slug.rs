// Copyright (c) 2025 - Cowboy AI, Inc.
//! Slug normalization for hierarchy path keys

/// Normalize free text into a slug segment
///
/// # Invariants
/// - Output contains only lowercase ASCII alphanumerics and single hyphens
/// - Every run of other characters collapses to one hyphen
/// - No leading or trailing hyphen
///
/// An input without any ASCII alphanumeric character yields an empty string;
/// callers decide the fallback.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
