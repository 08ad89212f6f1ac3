//! Input scrubbing and output whitespace normalization.

use std::sync::LazyLock;

use regex::Regex;

static STRIP_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[,:;'`\-_\u{201c}^"(){}/\\*]"#).unwrap());
static AMP_ENTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&amp;").unwrap());
static SPACE_BEFORE_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ([.,?!%])").unwrap());

/// Strip HTML `&amp;` entities and a fixed punctuation character set from
/// text before tokenizing. `None` passes through unchanged.
pub fn filter_input(text: Option<&str>) -> Option<String> {
    let text = text?;
    let without_amp = AMP_ENTITY.replace_all(text, "");
    Some(STRIP_CHARS.replace_all(&without_amp, "").into_owned())
}

/// Remove any space immediately preceding `. , ? ! %`. `None` passes
/// through unchanged.
pub fn smooth_output(text: Option<&str>) -> Option<String> {
    let text = text?;
    Some(SPACE_BEFORE_PUNCT.replace_all(text, "$1").into_owned())
}
