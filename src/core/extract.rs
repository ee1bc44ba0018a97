//! Image URL discovery inside the HTML blob of a feed entry.
//!
//! Three patterns are tried in order and the first that matches wins:
//! preview-host images (rewritten to a 1080px rendition), direct-host images
//! (taken verbatim) and finally the `src` of the first `<img>` tag.

use crate::utils::error::Result;
use crate::utils::validation::is_absolute_http_url;
use regex::Regex;
use url::Url;

pub const PREVIEW_RENDITION_QUERY: &str = "?width=1080&format=png&auto=webp";

const PREVIEW_IMAGE_PATTERN: &str = r#"(https://preview\.redd\.it/[^\s?&"]+\.(?:jpg|jpeg|png|webp))"#;
const DIRECT_IMAGE_PATTERN: &str = r#"(https://i\.redd\.it/[^\s?&"]+\.(?:jpg|jpeg|png|webp))"#;
const IMG_TAG_PATTERN: &str = r#"<img[^>]+src="([^"]+)""#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    PreviewHost,
    DirectHost,
    ImgTag,
}

#[derive(Debug, Clone)]
pub struct ImageExtractor {
    preview: Regex,
    direct: Regex,
    img_tag: Regex,
}

impl ImageExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            preview: Regex::new(PREVIEW_IMAGE_PATTERN)?,
            direct: Regex::new(DIRECT_IMAGE_PATTERN)?,
            img_tag: Regex::new(IMG_TAG_PATTERN)?,
        })
    }

    /// Returns the image URL for `content`, or `None` when nothing usable is found.
    ///
    /// `base` is used to resolve a relative `<img src>`; without it a relative
    /// source counts as a miss.
    pub fn extract(&self, content: &str, base: Option<&Url>) -> Option<String> {
        self.extract_with_stage(content, base).map(|(url, _)| url)
    }

    pub fn extract_with_stage(
        &self,
        content: &str,
        base: Option<&Url>,
    ) -> Option<(String, MatchStage)> {
        if let Some(m) = self.preview.find(content) {
            return Some((
                format!("{}{}", m.as_str(), PREVIEW_RENDITION_QUERY),
                MatchStage::PreviewHost,
            ));
        }

        if let Some(m) = self.direct.find(content) {
            return Some((m.as_str().to_string(), MatchStage::DirectHost));
        }

        let src = self.img_tag.captures(content)?.get(1)?.as_str();
        let resolved = match base {
            Some(base) => base.join(src).ok()?.to_string(),
            None => src.to_string(),
        };

        is_absolute_http_url(&resolved).then_some((resolved, MatchStage::ImgTag))
    }
}
