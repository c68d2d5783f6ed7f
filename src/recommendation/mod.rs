//! Recommendation engine
//!
//! A pure function from a [`PageSignal`] to a [`Recommendation`]: optimized
//! title and description, a priority derived from a weighted defect score, and
//! an alt-text suggestion for every image on the page.

pub mod alt_text;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::config::CrawlConfig;
use crate::page_extractor::PageSignal;
use crate::utils::brand_from_url;

pub use alt_text::recommend_alt;

/// Brand used when neither configuration nor the page URL yields one
const FALLBACK_BRAND: &str = "Our Site";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecommendation {
    pub src: String,
    pub current_alt: Option<String>,
    pub recommended_alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub optimized_title: String,
    pub optimized_description: String,
    pub priority: Priority,
    pub score: u8,
    pub images: Vec<ImageRecommendation>,
}

/// Stateless apart from the configured brand suffix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationEngine {
    brand: Option<String>,
}

impl RecommendationEngine {
    #[must_use]
    pub fn new(brand: Option<String>) -> Self {
        Self { brand }
    }

    #[must_use]
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self::new(config.brand().map(str::to_string))
    }

    fn brand_for(&self, signal: &PageSignal) -> String {
        self.brand
            .clone()
            .or_else(|| brand_from_url(&signal.url))
            .unwrap_or_else(|| FALLBACK_BRAND.to_string())
    }

    #[must_use]
    pub fn recommend(&self, signal: &PageSignal) -> Recommendation {
        let brand = self.brand_for(signal);
        let score = rules::score(signal);

        Recommendation {
            optimized_title: rules::optimize_title(signal, &brand),
            optimized_description: rules::optimize_description(signal, &brand),
            priority: rules::priority_for(score),
            score,
            images: signal
                .images
                .iter()
                .map(|img| ImageRecommendation {
                    src: img.src.clone(),
                    current_alt: img.current_alt.clone(),
                    recommended_alt: recommend_alt(&img.src, &signal.title),
                })
                .collect(),
        }
    }
}
