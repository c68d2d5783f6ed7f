//! JavaScript evaluation scripts
//!
//! This module contains the JavaScript code evaluated in the rendered page to
//! collect the raw SEO facts. The returned object deserializes into
//! [`RawPageFacts`](super::schema::RawPageFacts).

/// Collects title, meta description, h1-h3, images, visible word count and raw hrefs
pub const SEO_FACTS_SCRIPT: &str = r#"
    (() => {
        const text = el => (el.textContent || '').trim();
        const headings = tag => Array.from(document.querySelectorAll(tag)).map(text);

        const meta = document.querySelector('meta[name="description" i]')
            || document.querySelector('meta[property="og:description"]');

        const images = Array.from(document.getElementsByTagName('img'))
            .map(img => ({
                src: img.getAttribute('src') || img.getAttribute('data-src') || '',
                alt: img.hasAttribute('alt') ? img.getAttribute('alt') : null
            }));

        const body = document.body ? (document.body.innerText || '') : '';
        const words = body.split(/\s+/).filter(w => w.length > 0);

        const links = Array.from(document.querySelectorAll('a[href]'))
            .map(a => a.getAttribute('href'))
            .filter(href => href !== null);

        return {
            title: document.title || null,
            metaDescription: meta ? meta.getAttribute('content') : null,
            headings: { h1: headings('h1'), h2: headings('h2'), h3: headings('h3') },
            images: images,
            wordCount: words.length,
            links: links
        };
    })()
"#;
