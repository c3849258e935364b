use crate::resolver;
use regex::{Regex, RegexBuilder};

/// Default video file extensions recognized on anchor targets
pub fn default_video_extensions() -> Vec<String> {
    vec!["mp4".to_string(), "webm".to_string(), "ogg".to_string()]
}

/// Decides whether a link points at a video file, based on the extension of
/// its path component
#[derive(Debug, Clone)]
pub struct VideoLinkFilter {
    pattern: Option<Regex>,
}

impl Default for VideoLinkFilter {
    fn default() -> Self {
        Self::new(&default_video_extensions()).expect("Default video extensions should be valid")
    }
}

impl VideoLinkFilter {
    /// Create a filter for the given extensions (without the leading dot).
    ///
    /// An empty list yields a filter that matches nothing.
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = extensions
            .iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = RegexBuilder::new(&format!(r"\.({})$", alternatives.join("|")))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Check a (resolved or raw) reference; query and fragment are ignored
    pub fn is_video_link(&self, reference: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(&resolver::reference_path(reference)),
            None => false,
        }
    }
}
