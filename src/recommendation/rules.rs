//! Deterministic SEO rule set
//!
//! Title window [30, 60], description window [120, 160], all lengths in
//! characters. Scoring weights:
//!
//! | defect                                  | points |
//! |-----------------------------------------|--------|
//! | title outside its window                | 2      |
//! | description outside its window          | 2      |
//! | no substantial content                  | 3      |
//! | no H1                                   | 1      |
//! | image without alt (per image, max 2)    | 1      |
//!
//! `score >= 5` is high priority, `score >= 2` medium, anything else low.

use std::ops::RangeInclusive;

use super::Priority;
use crate::page_extractor::PageSignal;
use crate::utils::string_utils::{char_len, safe_truncate_chars, truncate_with_ellipsis};

pub const TITLE_WINDOW: RangeInclusive<usize> = 30..=60;
pub const TITLE_TRUNCATE_AT: usize = 57;
pub const TITLE_H1_CHARS: usize = 50;

pub const DESCRIPTION_WINDOW: RangeInclusive<usize> = 120..=160;
pub const DESCRIPTION_TRUNCATE_AT: usize = 157;

pub const DESCRIPTION_FILLER: &str = "Learn more about our products, services and latest updates, and find everything you need to get started with us today.";

pub const TITLE_WEIGHT: u8 = 2;
pub const DESCRIPTION_WEIGHT: u8 = 2;
pub const THIN_CONTENT_WEIGHT: u8 = 3;
pub const MISSING_H1_WEIGHT: u8 = 1;
pub const MISSING_ALT_CAP: u8 = 2;

pub const HIGH_PRIORITY_SCORE: u8 = 5;
pub const MEDIUM_PRIORITY_SCORE: u8 = 2;

#[must_use]
pub fn title_in_window(title: &str) -> bool {
    TITLE_WINDOW.contains(&char_len(title))
}

#[must_use]
pub fn description_in_window(description: &str) -> bool {
    DESCRIPTION_WINDOW.contains(&char_len(description))
}

fn cap_title(title: String) -> String {
    if char_len(&title) > *TITLE_WINDOW.end() {
        truncate_with_ellipsis(&title, TITLE_TRUNCATE_AT)
    } else {
        title
    }
}

pub fn optimize_title(signal: &PageSignal, brand: &str) -> String {
    if title_in_window(&signal.title) {
        return signal.title.clone();
    }
    if char_len(&signal.title) > *TITLE_WINDOW.end() {
        return truncate_with_ellipsis(&signal.title, TITLE_TRUNCATE_AT);
    }

    let synthesized = match signal.first_h1() {
        Some(h1) => format!("{} | {brand}", safe_truncate_chars(h1, TITLE_H1_CHARS).trim_end()),
        None => format!("{brand} | Official Site"),
    };
    cap_title(synthesized)
}

pub fn optimize_description(signal: &PageSignal, brand: &str) -> String {
    let current = &signal.meta_description;
    if description_in_window(current) {
        return current.clone();
    }
    if char_len(current) > *DESCRIPTION_WINDOW.end() {
        return truncate_with_ellipsis(current, DESCRIPTION_TRUNCATE_AT);
    }

    let subject = signal
        .first_h1()
        .filter(|h| !h.is_empty())
        .or_else(|| Some(signal.title.as_str()).filter(|t| !t.is_empty()))
        .unwrap_or(brand);
    let subject = subject.trim_end_matches(['.', '!', '?', ' ']);

    let synthesized = format!("{subject}. {DESCRIPTION_FILLER}");
    if char_len(&synthesized) > *DESCRIPTION_WINDOW.end() {
        truncate_with_ellipsis(&synthesized, DESCRIPTION_TRUNCATE_AT)
    } else {
        synthesized
    }
}

/// Weighted defect score of a page
#[must_use]
pub fn score(signal: &PageSignal) -> u8 {
    let mut score = 0u8;
    if !title_in_window(&signal.title) {
        score += TITLE_WEIGHT;
    }
    if !description_in_window(&signal.meta_description) {
        score += DESCRIPTION_WEIGHT;
    }
    if !signal.has_substantial_content {
        score += THIN_CONTENT_WEIGHT;
    }
    if signal.first_h1().is_none() {
        score += MISSING_H1_WEIGHT;
    }
    let missing_alt = signal.images_missing_alt().count();
    score + u8::try_from(missing_alt).unwrap_or(u8::MAX).min(MISSING_ALT_CAP)
}

#[must_use]
pub fn priority_for(score: u8) -> Priority {
    if score >= HIGH_PRIORITY_SCORE {
        Priority::High
    } else if score >= MEDIUM_PRIORITY_SCORE {
        Priority::Medium
    } else {
        Priority::Low
    }
}
