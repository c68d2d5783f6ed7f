//! Alt-text synthesis from image filenames

use crate::utils::string_utils::{collapse_whitespace, safe_truncate_chars};

pub const ALT_TEXT_MAX_CHARS: usize = 100;

/// Suggest alt text for an image on a page titled `page_title`.
///
/// `hero-banner_2024.webp` on "Acme Tools" becomes
/// `"hero banner 2024 - Acme Tools"`. When no usable filename can be read from
/// `src` (data URIs, bare directories) a placeholder built from the title is
/// returned instead. The result never exceeds 100 characters.
#[must_use]
pub fn recommend_alt(src: &str, page_title: &str) -> String {
    let title = page_title.trim();
    let alt = match filename_words(src) {
        Some(words) if title.is_empty() => words,
        Some(words) => format!("{words} - {title}"),
        None if title.is_empty() => "Descriptive image".to_string(),
        None => format!("Image on {title}"),
    };
    safe_truncate_chars(&alt, ALT_TEXT_MAX_CHARS).trim_end().to_string()
}

fn filename_words(src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }

    let path = src.split(['?', '#']).next()?;
    let file = path.rsplit('/').next()?;
    let stem = match file.rfind('.') {
        Some(idx) if idx > 0 => &file[..idx],
        _ => file,
    };

    let spaced: String = stem
        .replace("%20", " ")
        .chars()
        .map(|c| if matches!(c, '-' | '_' | '.' | '+') { ' ' } else { c })
        .collect();
    let words = collapse_whitespace(&spaced).to_lowercase();

    if words.is_empty() { None } else { Some(words) }
}
