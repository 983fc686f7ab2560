//! Detail overlay controller.
//!
//! Owns the open/closed state of the overlay, the active catalog entry and the
//! active slide of image-sequence entries. Every operation is infallible: bad
//! ids, out-of-range indices and empty collections leave the state untouched.

use std::sync::Arc;

use tracing::debug;

use crate::keybindings::{
    action_for_key, action_for_pointer, Key, KeyPolicy, OverlayAction, PointerTarget,
};
use crate::models::{Catalog, CatalogEntry, MediaSource};
use crate::render::{MediaView, RenderPort};

/// Transient presentation state of the overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayState {
    pub is_open: bool,
    pub active_entry: Option<String>,
    /// Kept at 0 when `slide_count == 0`
    pub active_slide: usize,
    pub slide_count: usize,
    /// True only while an open video entry was accepted for playback
    pub media_playing: bool,
}

pub struct OverlayController<R: RenderPort> {
    catalog: Arc<Catalog>,
    port: R,
    policy: KeyPolicy,
    autoplay: bool,
    state: OverlayState,
}

impl<R: RenderPort> OverlayController<R> {
    pub fn new(catalog: Arc<Catalog>, port: R) -> Self {
        Self {
            catalog,
            port,
            policy: KeyPolicy::default(),
            autoplay: true,
            state: OverlayState::default(),
        }
    }

    pub fn with_policy(mut self, policy: KeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn policy(&self) -> KeyPolicy {
        self.policy
    }

    pub fn port(&self) -> &R {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut R {
        &mut self.port
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn active_entry(&self) -> Option<&CatalogEntry> {
        self.state
            .active_entry
            .as_deref()
            .and_then(|id| self.catalog.get(id))
    }

    /// Show the entry `id`. Unknown ids are ignored.
    pub fn open(&mut self, id: &str) {
        let catalog = Arc::clone(&self.catalog);
        let Some(entry) = catalog.get(id) else {
            debug!("overlay: ignoring open of unknown entry {:?}", id);
            return;
        };

        let was_open = self.state.is_open;
        if was_open {
            self.release_media();
        }

        self.state.is_open = true;
        self.state.active_entry = Some(entry.id.clone());
        self.state.slide_count = entry.slide_count();
        self.state.active_slide = 0;

        self.port.set_title(&entry.title);
        self.port.set_status(&entry.status);
        self.port.set_description(&entry.description);
        self.port.set_badges(&entry.badges);
        self.port.set_attribution(&entry.attribution);
        match &entry.media {
            MediaSource::Video(src) => {
                self.port.set_media(MediaView::Video { src: src.as_str() })
            }
            MediaSource::Slides(images) => self.port.set_media(MediaView::Slides {
                images: images.as_slice(),
                active: 0,
            }),
        }
        self.port.set_slide_position(0, self.state.slide_count);
        self.port.set_visible(true);
        if !was_open {
            self.port.set_scroll_locked(true);
        }

        if entry.is_video() && self.autoplay {
            match self.port.play() {
                Ok(()) => self.state.media_playing = true,
                // Playback is best effort; the overlay stays usable without it.
                Err(err) => debug!("overlay: playback of {:?} not started: {}", entry.id, err),
            }
        }

        debug!(
            "overlay: opened {:?} kind={} slides={}",
            entry.id,
            entry.kind().as_str(),
            self.state.slide_count
        );
    }

    /// Hide the overlay and release media. No-op when already closed.
    pub fn close(&mut self) {
        if !self.state.is_open {
            return;
        }
        self.release_media();
        self.port.set_media(MediaView::Empty);
        self.port.set_visible(false);
        self.port.set_scroll_locked(false);

        debug!("overlay: closed {:?}", self.state.active_entry);
        self.state = OverlayState::default();
    }

    pub fn next_entry(&mut self) {
        self.step_entry(1);
    }

    pub fn previous_entry(&mut self) {
        self.step_entry(-1);
    }

    pub fn next_slide(&mut self) {
        self.step_slide(1);
    }

    pub fn previous_slide(&mut self) {
        self.step_slide(-1);
    }

    /// Jump to `index`. Negative input lands on the last slide and input past
    /// the end lands on the first.
    pub fn go_to_slide(&mut self, index: i64) {
        let count = self.state.slide_count;
        if !self.state.is_open || count == 0 {
            return;
        }
        let target = if index < 0 {
            count - 1
        } else {
            match usize::try_from(index) {
                Ok(i) if i < count => i,
                _ => 0,
            }
        };
        self.show_slide(target);
    }

    /// Apply a resolved input action
    pub fn apply(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::Open(id) => self.open(&id),
            OverlayAction::Close => self.close(),
            OverlayAction::NextEntry => self.next_entry(),
            OverlayAction::PreviousEntry => self.previous_entry(),
            OverlayAction::NextSlide => self.next_slide(),
            OverlayAction::PreviousSlide => self.previous_slide(),
            OverlayAction::GoToSlide(index) => self.go_to_slide(index),
        }
    }

    /// Handle a key press. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match action_for_key(self.policy, key, self.state.is_open, self.state.slide_count) {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    /// Handle a pointer activation. Returns true when the click was consumed.
    pub fn handle_pointer(&mut self, target: &PointerTarget) -> bool {
        let consumed = match target {
            PointerTarget::Card(id) => self.catalog.contains(id),
            _ => self.state.is_open,
        };
        if let Some(action) = action_for_pointer(target) {
            self.apply(action);
        }
        consumed
    }

    fn step_entry(&mut self, offset: isize) {
        if !self.state.is_open {
            return;
        }
        let catalog = Arc::clone(&self.catalog);
        let next = self
            .state
            .active_entry
            .as_deref()
            .and_then(|id| catalog.neighbor(id, offset));
        if let Some(id) = next {
            self.open(id);
        }
    }

    fn step_slide(&mut self, offset: isize) {
        let count = self.state.slide_count;
        if !self.state.is_open || count <= 1 {
            return;
        }
        let next =
            (self.state.active_slide as isize + offset).rem_euclid(count as isize) as usize;
        self.show_slide(next);
    }

    fn show_slide(&mut self, index: usize) {
        let catalog = Arc::clone(&self.catalog);
        let Some(MediaSource::Slides(images)) = self.active_media(&catalog) else {
            return;
        };
        self.state.active_slide = index;
        self.port.set_media(MediaView::Slides {
            images: images.as_slice(),
            active: index,
        });
        self.port.set_slide_position(index, self.state.slide_count);
        debug!("overlay: slide {}/{}", index + 1, self.state.slide_count);
    }

    fn active_media<'c>(&self, catalog: &'c Catalog) -> Option<&'c MediaSource> {
        let id = self.state.active_entry.as_deref()?;
        catalog.get(id).map(|entry| &entry.media)
    }

    fn release_media(&mut self) {
        let is_video = self
            .active_entry()
            .map(CatalogEntry::is_video)
            .unwrap_or(false);
        if is_video {
            self.port.stop_media();
        }
        self.state.media_playing = false;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::Badge;
    use crate::render::{MediaView, PlaybackError, RenderPort};

    /// One recorded render call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Title(String),
        Status(String),
        Description(String),
        Attribution(String),
        Badges(usize),
        MediaEmpty,
        Video(String),
        Slide(String, usize),
        Position(usize, usize),
        Visible(bool),
        ScrollLocked(bool),
        Play,
        Stop,
    }

    /// Render port that records every call and mirrors host state
    #[derive(Debug, Default)]
    pub struct RecordingPort {
        pub calls: Vec<Call>,
        pub scroll_locked: bool,
        pub playing: bool,
        pub block_playback: bool,
    }

    impl RecordingPort {
        pub fn blocking() -> Self {
            Self {
                block_playback: true,
                ..Self::default()
            }
        }
    }

    impl RenderPort for RecordingPort {
        fn set_title(&mut self, title: &str) {
            self.calls.push(Call::Title(title.to_string()));
        }

        fn set_status(&mut self, status: &str) {
            self.calls.push(Call::Status(status.to_string()));
        }

        fn set_description(&mut self, description: &str) {
            self.calls.push(Call::Description(description.to_string()));
        }

        fn set_attribution(&mut self, attribution: &str) {
            self.calls.push(Call::Attribution(attribution.to_string()));
        }

        fn set_badges(&mut self, badges: &[Badge]) {
            self.calls.push(Call::Badges(badges.len()));
        }

        fn set_media(&mut self, media: MediaView<'_>) {
            self.calls.push(match media {
                MediaView::Empty => Call::MediaEmpty,
                MediaView::Video { src } => Call::Video(src.to_string()),
                MediaView::Slides { images, active } => {
                    Call::Slide(images.get(active).cloned().unwrap_or_default(), active)
                }
            });
        }

        fn set_slide_position(&mut self, active: usize, count: usize) {
            self.calls.push(Call::Position(active, count));
        }

        fn set_visible(&mut self, visible: bool) {
            self.calls.push(Call::Visible(visible));
        }

        fn set_scroll_locked(&mut self, locked: bool) {
            self.scroll_locked = locked;
            self.calls.push(Call::ScrollLocked(locked));
        }

        fn play(&mut self) -> Result<(), PlaybackError> {
            self.calls.push(Call::Play);
            if self.block_playback {
                return Err(PlaybackError::Blocked("autoplay denied".to_string()));
            }
            self.playing = true;
            Ok(())
        }

        fn stop_media(&mut self) {
            self.playing = false;
            self.calls.push(Call::Stop);
        }
    }
}
