// ABOUTME: HTML entity encoding for text accepted from public forms
// ABOUTME: Stored submissions are safe to drop into the admin dashboard markup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

/// Trim and HTML-encode untrusted text.
///
/// Encodes `&`, `<`, `>`, `"`, `'` and `/` so a stored value can never open a
/// tag, close an attribute or terminate a script path.
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    html_escape::encode_safe(input.trim()).into_owned()
}

/// [`sanitize_text`] for optional fields; blank input becomes `None`
#[must_use]
pub fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(sanitize_text)
}
