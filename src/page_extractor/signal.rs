//! Normalization of raw render output into a [`PageSignal`]

use std::collections::HashSet;
use url::Url;

use super::schema::{Headings, ImageSignal, PageSignal, RawPageFacts};
use crate::utils::string_utils::collapse_whitespace;
use crate::utils::{DEFAULT_MAX_INTERNAL_LINKS, DEFAULT_SUBSTANTIAL_CONTENT_WORDS, same_origin};

/// Limits applied while normalizing a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorSettings {
    pub max_internal_links: usize,
    pub substantial_content_words: u64,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            max_internal_links: DEFAULT_MAX_INTERNAL_LINKS,
            substantial_content_words: DEFAULT_SUBSTANTIAL_CONTENT_WORDS,
        }
    }
}

/// Build the canonical signal record for `page_url`.
///
/// * text fields are whitespace-collapsed, empty headings are dropped
/// * blank alt attributes count as missing
/// * image sources are resolved against the page URL when possible
/// * links are resolved, stripped of fragments, restricted to the seed's
///   origin, deduplicated in document order and capped
///
/// Malformed hrefs and non-http schemes are dropped without error.
#[must_use]
pub fn extract_page_signal(
    page_url: &Url,
    seed: &Url,
    facts: RawPageFacts,
    settings: &ExtractorSettings,
) -> PageSignal {
    let RawPageFacts {
        title,
        meta_description,
        headings,
        images,
        word_count,
        links,
    } = facts;

    let images = images
        .into_iter()
        .filter(|img| !img.src.trim().is_empty())
        .map(|img| ImageSignal {
            src: page_url
                .join(img.src.trim())
                .map(|u| u.to_string())
                .unwrap_or_else(|_| img.src.trim().to_string()),
            current_alt: img
                .alt
                .map(|alt| collapse_whitespace(&alt))
                .filter(|alt| !alt.is_empty()),
        })
        .collect();

    PageSignal {
        url: page_url.to_string(),
        title: title.map(|t| collapse_whitespace(&t)).unwrap_or_default(),
        meta_description: meta_description
            .map(|d| collapse_whitespace(&d))
            .unwrap_or_default(),
        headings: Headings {
            h1: clean_headings(headings.h1),
            h2: clean_headings(headings.h2),
            h3: clean_headings(headings.h3),
        },
        images,
        word_count,
        has_substantial_content: word_count >= settings.substantial_content_words,
        internal_links: internal_links(page_url, seed, &links, settings.max_internal_links),
    }
}

fn clean_headings(raw: Vec<String>) -> Vec<String> {
    raw.iter()
        .map(|h| collapse_whitespace(h))
        .filter(|h| !h.is_empty())
        .collect()
}

fn internal_links(page_url: &Url, seed: &Url, hrefs: &[String], cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let page_key = without_fragment(page_url);

    for href in hrefs {
        if out.len() >= cap {
            break;
        }
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }
        let Ok(mut resolved) = page_url.join(href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") || !same_origin(&resolved, seed) {
            continue;
        }
        resolved.set_fragment(None);
        let key = resolved.to_string();
        if key == page_key {
            continue;
        }
        if seen.insert(key.clone()) {
            out.push(key);
        }
    }

    out
}

fn without_fragment(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}
