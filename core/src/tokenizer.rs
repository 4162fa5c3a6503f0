use lazy_static::lazy_static;
use regex::Regex;
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").expect("valid regex");
    static ref WORD_RE: Regex = Regex::new(r"(?i)[a-záéíóúüñ0-9]+").expect("valid regex");
}

/// Unicode general category `C*` (control, format, surrogate, private use, unassigned).
fn is_other_category(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
    )
}

/// Clean raw text for indexing: decode HTML entities as HTML5 text does (legacy
/// entities may omit the `;`), replace tags with a space, apply NFKC, blank out control characters (tab, newline and space survive) and lowercase.
pub fn normalize(raw: &str) -> String {
    let unescaped = htmlize::unescape(raw);
    let untagged = TAG_RE.replace_all(&unescaped, " ");
    untagged
        .nfkc()
        .map(|ch| if is_other_category(ch) && !matches!(ch, '\n' | '\t' | ' ') { ' ' } else { ch })
        .collect::<String>()
        .to_lowercase()
}

/// Split text into maximal runs of `[a-z áéíóú ü ñ 0-9]`; everything else separates tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// `tokenize(normalize(raw))`, the pipeline shared by indexing and query lexing.
pub fn analyze(raw: &str) -> Vec<String> {
    tokenize(&normalize(raw))
}
