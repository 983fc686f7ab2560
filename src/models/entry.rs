/// Kind of media an entry is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    SingleMedia,
    ImageSequence,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleMedia => "single-media",
            Self::ImageSequence => "image-sequence",
        }
    }
}

/// Media reference(s) of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// One video URL
    Video(String),
    /// Ordered image URLs shown as slides
    Slides(Vec<String>),
}

impl MediaSource {
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Video(_) => EntryKind::SingleMedia,
            Self::Slides(_) => EntryKind::ImageSequence,
        }
    }

    /// Number of slides; 0 for single-media entries.
    pub fn slide_count(&self) -> usize {
        match self {
            Self::Video(_) => 0,
            Self::Slides(images) => images.len(),
        }
    }
}

/// Small metadata badge shown under an entry's description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub icon: String,
    pub text: String,
}

impl Badge {
    pub fn new(icon: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            text: text.into(),
        }
    }
}

/// One static item displayable in the overlay (a demo or a learning).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub status: String,
    pub description: String,
    pub badges: Vec<Badge>,
    pub attribution: String,
    pub media: MediaSource,
}

impl CatalogEntry {
    /// Create an entry with just the identifier and media; text fields start empty
    pub fn new(id: impl Into<String>, media: MediaSource) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            status: String::new(),
            description: String::new(),
            badges: Vec::new(),
            attribution: String::new(),
            media,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_badge(mut self, icon: impl Into<String>, text: impl Into<String>) -> Self {
        self.badges.push(Badge::new(icon, text));
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    pub fn kind(&self) -> EntryKind {
        self.media.kind()
    }

    /// Check if this entry plays a single video
    pub fn is_video(&self) -> bool {
        self.kind() == EntryKind::SingleMedia
    }

    pub fn slide_count(&self) -> usize {
        self.media.slide_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_count_by_kind() {
        let video = CatalogEntry::new("a", MediaSource::Video("videos/a.mp4".into()));
        assert!(video.is_video());
        assert_eq!(video.slide_count(), 0);

        let slides = CatalogEntry::new(
            "b",
            MediaSource::Slides(vec!["1.png".into(), "2.png".into(), "3.png".into()]),
        );
        assert_eq!(slides.kind(), EntryKind::ImageSequence);
        assert_eq!(slides.slide_count(), 3);
    }

    #[test]
    fn test_builder_keeps_badge_order() {
        let entry = CatalogEntry::new("a", MediaSource::Video("a.mp4".into()))
            .with_badge("clock", "2 weeks")
            .with_badge("code", "Rust");
        assert_eq!(entry.badges[0].text, "2 weeks");
        assert_eq!(entry.badges[1].icon, "code");
    }
}
