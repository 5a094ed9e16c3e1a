use unicode_normalization::UnicodeNormalization;

/// Width of the zero-padded ratchet suffix in a slug.
pub const SUFFIX_WIDTH: usize = 3;

/// URL-safe ASCII slug: compatibility-decomposes `value` and drops what is
/// left outside ASCII, lower-cases, keeps letters, digits, underscores,
/// hyphens and whitespace, turns each run of hyphens/whitespace into a single
/// hyphen, then strips hyphens and underscores from both ends.
pub fn slugify(value: &str) -> String {
    let kept: String = value
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_ascii_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_separator = false;
    for c in kept.chars() {
        if c == '-' || c.is_ascii_whitespace() {
            if !in_separator {
                slug.push('-');
                in_separator = true;
            }
        } else {
            slug.push(c);
            in_separator = false;
        }
    }
    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// `"{base}-{suffix:03}"`. Suffixes wider than three digits are kept whole.
pub fn with_suffix(base: &str, suffix: u32) -> String {
    format!("{}-{:0width$}", base, suffix, width = SUFFIX_WIDTH)
}

/// Slug for an already slugified ratchet key, e.g. `("ravi-varma", 2)` ->
/// `"ravi-varma-002"`. An empty key yields the bare suffix.
pub fn ratcheted_slug(key: &str, suffix: u32) -> String {
    if key.is_empty() {
        format!("{:0width$}", suffix, width = SUFFIX_WIDTH)
    } else {
        with_suffix(key, suffix)
    }
}
