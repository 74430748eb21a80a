//! Résolution du chemin de lecture d'une vidéo

use smilcatalog::VideoRecord;

pub const DEFAULT_MEDIA_ROOT: &str = "/home/streaming";
pub const DEFAULT_LEGACY_URL_PREFIX: &str = "streaming/";

/// Derives the path a video is played from, relative to the media root.
///
/// Precedence:
/// 1. a storage path containing the media root, with the root removed
/// 2. the URL, without its legacy prefix
/// 3. `{login}/default/{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    media_root_prefix: String,
    legacy_url_prefix: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_ROOT, DEFAULT_LEGACY_URL_PREFIX)
    }
}

impl PathResolver {
    /// `media_root` is matched with a trailing `/`, added when missing
    pub fn new(media_root: &str, legacy_url_prefix: &str) -> Self {
        let mut media_root_prefix = media_root.to_string();
        if !media_root_prefix.ends_with('/') {
            media_root_prefix.push('/');
        }
        Self {
            media_root_prefix,
            legacy_url_prefix: legacy_url_prefix.to_string(),
        }
    }

    pub fn media_root_prefix(&self) -> &str {
        &self.media_root_prefix
    }

    pub fn resolve(&self, video: &VideoRecord, login: &str) -> String {
        if let Some(path) = non_empty(&video.path) {
            if path.contains(&self.media_root_prefix) {
                return path.replacen(&self.media_root_prefix, "", 1);
            }
        }

        if let Some(url) = non_empty(&video.url) {
            return url
                .strip_prefix(&self.legacy_url_prefix)
                .unwrap_or(url)
                .to_string();
        }

        format!(
            "{}/default/{}",
            login,
            video.name.as_deref().unwrap_or_default()
        )
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
