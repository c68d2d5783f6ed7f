use serde::{Deserialize, Serialize};

/// Heading text grouped by level, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    #[serde(default)]
    pub h1: Vec<String>,
    #[serde(default)]
    pub h2: Vec<String>,
    #[serde(default)]
    pub h3: Vec<String>,
}

/// Image as reported by the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Unnormalized DOM facts returned by a render backend.
///
/// Links are raw `href` attribute values; resolving, origin filtering and
/// deduplication happen in the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageFacts {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub headings: Headings,
    #[serde(default)]
    pub images: Vec<RawImage>,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSignal {
    pub src: String,
    pub current_alt: Option<String>,
}

impl ImageSignal {
    #[must_use]
    pub fn has_alt(&self) -> bool {
        self.current_alt.is_some()
    }
}

/// Canonical on-page signal record for one visited URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSignal {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub headings: Headings,
    pub images: Vec<ImageSignal>,
    pub word_count: u64,
    pub has_substantial_content: bool,
    pub internal_links: Vec<String>,
}

impl PageSignal {
    #[must_use]
    pub fn first_h1(&self) -> Option<&str> {
        self.headings.h1.first().map(String::as_str)
    }

    pub fn images_missing_alt(&self) -> impl Iterator<Item = &ImageSignal> {
        self.images.iter().filter(|img| !img.has_alt())
    }
}
