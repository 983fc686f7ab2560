// Detail overlay view for the showcase window
// Features:
// - Backdrop plus centered dialog layered over the card grid
// - Video player for demo entries, picture carousel with dots for learnings
// - Every clickable affordance is reported as a `PointerTarget`

use gtk4::prelude::*;
use gtk4::{
    Align, Box as GtkBox, Button, GestureClick, Label, MediaFile, MediaStream, Orientation,
    Overlay, Picture, ScrolledWindow, Stack, StackTransitionType, Video, Widget,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::keybindings::PointerTarget;
use crate::models::Badge;
use crate::render::{MediaView, PlaybackError, RenderPort};

type PointerCallback = Rc<dyn Fn(PointerTarget)>;

#[derive(Clone, Default)]
struct PointerSink(Rc<RefCell<Option<PointerCallback>>>);

impl PointerSink {
    fn emit(&self, target: PointerTarget) {
        // Clone out so the callback may replace itself without a live borrow
        let callback = self.0.borrow().clone();
        if let Some(callback) = callback {
            callback(target);
        }
    }

    fn button(&self, button: &Button, target: PointerTarget) {
        let sink = self.clone();
        button.connect_clicked(move |_| sink.emit(target.clone()));
    }

    fn gesture(&self, widget: &impl IsA<Widget>, target: PointerTarget) {
        let gesture = GestureClick::new();
        let sink = self.clone();
        gesture.connect_released(move |gesture, _, _, _| {
            gesture.set_state(gtk4::EventSequenceState::Claimed);
            sink.emit(target.clone());
        });
        widget.add_controller(gesture);
    }
}

/// GTK implementation of the overlay render port
pub struct OverlayView {
    backdrop: GtkBox,
    dialog: GtkBox,
    title: Label,
    status: Label,
    description: Label,
    attribution: Label,
    badges: GtkBox,
    media_stack: Stack,
    video: Video,
    stream: Option<MediaFile>,
    loaded_video: Option<PathBuf>,
    picture: Picture,
    slide_prev: Button,
    slide_next: Button,
    dots: GtkBox,
    dot_buttons: Vec<Button>,
    page: ScrolledWindow,
    asset_dir: PathBuf,
    pointer: PointerSink,
}

impl OverlayView {
    /// Build the overlay layers on top of `layers`, whose main child is `page`
    pub fn new(layers: &Overlay, page: &ScrolledWindow, asset_dir: &Path) -> Self {
        let pointer = PointerSink::default();

        let backdrop = GtkBox::new(Orientation::Vertical, 0);
        backdrop.set_hexpand(true);
        backdrop.set_vexpand(true);
        backdrop.add_css_class("modal-backdrop");
        backdrop.set_visible(false);
        pointer.gesture(&backdrop, PointerTarget::Backdrop);

        let dialog = GtkBox::new(Orientation::Vertical, 12);
        dialog.set_halign(Align::Center);
        dialog.set_valign(Align::Center);
        dialog.set_size_request(720, -1);
        dialog.add_css_class("modal-content");
        dialog.set_visible(false);
        pointer.gesture(&dialog, PointerTarget::Content);

        // Header: entry navigation and close
        let header = GtkBox::new(Orientation::Horizontal, 8);
        let prev_entry = Button::with_label("[<] PREV");
        prev_entry.set_tooltip_text(Some("Previous entry"));
        let next_entry = Button::with_label("NEXT [>]");
        next_entry.set_tooltip_text(Some("Next entry"));
        let close_btn = Button::with_label("[X] CLOSE");
        close_btn.add_css_class("btn-primary");
        close_btn.set_tooltip_text(Some("Close (Escape)"));
        let spacer = GtkBox::new(Orientation::Horizontal, 0);
        spacer.set_hexpand(true);
        header.append(&prev_entry);
        header.append(&next_entry);
        header.append(&spacer);
        header.append(&close_btn);
        pointer.button(&prev_entry, PointerTarget::PreviousEntry);
        pointer.button(&next_entry, PointerTarget::NextEntry);
        pointer.button(&close_btn, PointerTarget::Close);

        // Media area: video or slides
        let video = Video::new();
        video.set_autoplay(false);
        video.set_loop(false);
        video.set_hexpand(true);
        video.set_vexpand(true);

        let picture = Picture::new();
        picture.set_can_shrink(true);
        picture.set_content_fit(gtk4::ContentFit::Contain);
        picture.set_hexpand(true);
        picture.set_vexpand(true);

        let slide_prev = Button::with_label("<");
        slide_prev.set_valign(Align::Center);
        slide_prev.set_tooltip_text(Some("Previous slide"));
        let slide_next = Button::with_label(">");
        slide_next.set_valign(Align::Center);
        slide_next.set_tooltip_text(Some("Next slide"));
        pointer.button(&slide_prev, PointerTarget::PreviousSlide);
        pointer.button(&slide_next, PointerTarget::NextSlide);

        let carousel = GtkBox::new(Orientation::Horizontal, 8);
        carousel.append(&slide_prev);
        carousel.append(&picture);
        carousel.append(&slide_next);

        let media_stack = Stack::new();
        media_stack.set_transition_type(StackTransitionType::Crossfade);
        media_stack.set_size_request(-1, 400);
        media_stack.add_named(&video, Some("video"));
        media_stack.add_named(&carousel, Some("slides"));

        let dots = GtkBox::new(Orientation::Horizontal, 4);
        dots.set_halign(Align::Center);
        dots.add_css_class("slide-dots");

        // Text block
        let status = Label::new(None);
        status.set_halign(Align::Start);
        status.add_css_class("status-tag");
        let title = Label::new(None);
        title.set_halign(Align::Start);
        title.add_css_class("modal-title");
        let description = Label::new(None);
        description.set_halign(Align::Start);
        description.set_wrap(true);
        description.set_xalign(0.0);
        let badges = GtkBox::new(Orientation::Horizontal, 8);
        badges.set_halign(Align::Start);
        let attribution = Label::new(None);
        attribution.set_halign(Align::Start);
        attribution.add_css_class("muted");

        dialog.append(&header);
        dialog.append(&media_stack);
        dialog.append(&dots);
        dialog.append(&status);
        dialog.append(&title);
        dialog.append(&description);
        dialog.append(&badges);
        dialog.append(&attribution);

        layers.add_overlay(&backdrop);
        layers.add_overlay(&dialog);

        Self {
            backdrop,
            dialog,
            title,
            status,
            description,
            attribution,
            badges,
            media_stack,
            video,
            stream: None,
            loaded_video: None,
            picture,
            slide_prev,
            slide_next,
            dots,
            dot_buttons: Vec::new(),
            page: page.clone(),
            asset_dir: asset_dir.to_path_buf(),
            pointer,
        }
    }

    /// Set callback for clicks on any overlay affordance
    pub fn connect_pointer<F>(&self, callback: F)
    where
        F: Fn(PointerTarget) + 'static,
    {
        *self.pointer.0.borrow_mut() = Some(Rc::new(callback));
    }

    /// Attach a paused stream for `path` to the video widget
    fn load_video(&mut self, path: PathBuf) {
        self.detach_stream();
        if path.exists() {
            let stream = MediaFile::for_filename(&path);
            self.video.set_media_stream(Some(&stream));
            self.stream = Some(stream);
        }
        self.loaded_video = Some(path);
    }

    fn detach_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.pause();
            stream.clear();
        }
        self.video.set_media_stream(Option::<&MediaStream>::None);
        self.loaded_video = None;
    }

    fn rebuild_dots(&mut self, count: usize) {
        for button in self.dot_buttons.drain(..) {
            self.dots.remove(&button);
        }
        for index in 0..count {
            let dot = Button::with_label("o");
            dot.add_css_class("slide-dot");
            dot.set_tooltip_text(Some(&format!("Slide {}", index + 1)));
            self.pointer.button(&dot, PointerTarget::SlideDot(index));
            self.dots.append(&dot);
            self.dot_buttons.push(dot);
        }
    }
}

impl RenderPort for OverlayView {
    fn set_title(&mut self, title: &str) {
        self.title.set_text(title);
    }

    fn set_status(&mut self, status: &str) {
        self.status.set_text(&status.to_uppercase());
    }

    fn set_description(&mut self, description: &str) {
        self.description.set_text(description);
    }

    fn set_attribution(&mut self, attribution: &str) {
        self.attribution.set_text(attribution);
        self.attribution.set_visible(!attribution.is_empty());
    }

    fn set_badges(&mut self, badges: &[Badge]) {
        while let Some(child) = self.badges.first_child() {
            self.badges.remove(&child);
        }
        for badge in badges {
            let label = Label::new(Some(&format!("[{}] {}", badge.icon, badge.text)));
            label.add_css_class("badge");
            self.badges.append(&label);
        }
    }

    fn set_media(&mut self, media: MediaView<'_>) {
        match media {
            MediaView::Empty => {
                self.detach_stream();
                self.picture.set_filename(Option::<&Path>::None);
            }
            MediaView::Video { src } => {
                let path = self.asset_dir.join(src);
                self.load_video(path);
                self.media_stack.set_visible_child_name("video");
            }
            MediaView::Slides { images, active } => {
                self.detach_stream();
                let path = images.get(active).map(|image| self.asset_dir.join(image));
                self.picture.set_filename(path.as_deref());
                let multi = images.len() > 1;
                self.slide_prev.set_visible(multi);
                self.slide_next.set_visible(multi);
                self.media_stack.set_visible_child_name("slides");
            }
        }
    }

    fn set_slide_position(&mut self, active: usize, count: usize) {
        if self.dot_buttons.len() != count {
            self.rebuild_dots(count);
        }
        for (index, dot) in self.dot_buttons.iter().enumerate() {
            if index == active {
                dot.add_css_class("active");
            } else {
                dot.remove_css_class("active");
            }
        }
        self.dots.set_visible(count > 1);
    }

    fn set_visible(&mut self, visible: bool) {
        self.backdrop.set_visible(visible);
        self.dialog.set_visible(visible);
        if visible {
            self.dialog.grab_focus();
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.page.set_sensitive(!locked);
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let Some(stream) = &self.stream else {
            return Err(match &self.loaded_video {
                Some(path) => PlaybackError::MissingSource(path.clone()),
                None => PlaybackError::NoMedia,
            });
        };
        stream.play();
        match stream.error() {
            Some(err) => Err(PlaybackError::Blocked(err.to_string())),
            None => Ok(()),
        }
    }

    fn stop_media(&mut self) {
        self.detach_stream();
    }
}
