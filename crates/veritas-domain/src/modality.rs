//! Modality module - the kinds of content that can be analyzed

/// Kind of content submitted for analysis
///
/// Each modality maps to its own remote route, except video which is
/// never sent anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modality {
    /// Free-form text (claims, articles, posts)
    #[default]
    Text,

    /// A web address to be fetched and judged by the service
    Url,

    /// An uploaded image
    Image,

    /// An uploaded video (not supported by the service)
    Video,
}

impl Modality {
    /// All modalities, in tab order
    pub const ALL: [Modality; 4] = [
        Modality::Text,
        Modality::Image,
        Modality::Video,
        Modality::Url,
    ];

    /// Get the modality name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Url => "url",
            Modality::Image => "image",
            Modality::Video => "video",
        }
    }

    /// Capitalised name used in headings and messages
    pub fn title(&self) -> &'static str {
        match self {
            Modality::Text => "Text",
            Modality::Url => "URL",
            Modality::Image => "Image",
            Modality::Video => "Video",
        }
    }

    /// Parse a modality from a string
    ///
    /// `news` is accepted as text: the service labels text verdicts that way.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "news" => Some(Modality::Text),
            "url" => Some(Modality::Url),
            "image" => Some(Modality::Image),
            "video" => Some(Modality::Video),
            _ => None,
        }
    }

    /// Whether requests of this modality are ever sent to the service
    pub fn is_remote(&self) -> bool {
        !matches!(self, Modality::Video)
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid modality: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modality_parse() {
        assert_eq!(Modality::parse("text"), Some(Modality::Text));
        assert_eq!(Modality::parse("URL"), Some(Modality::Url));
        assert_eq!(Modality::parse(" image "), Some(Modality::Image));
        assert_eq!(Modality::parse("video"), Some(Modality::Video));
        assert_eq!(Modality::parse("audio"), None);
    }

    #[test]
    fn test_news_is_text() {
        assert_eq!(Modality::parse("news"), Some(Modality::Text));
    }

    #[test]
    fn test_round_trip_names() {
        for modality in Modality::ALL {
            assert_eq!(Modality::parse(modality.as_str()), Some(modality));
        }
    }

    #[test]
    fn test_video_is_local_only() {
        assert!(!Modality::Video.is_remote());
        assert!(Modality::Text.is_remote());
    }
}
