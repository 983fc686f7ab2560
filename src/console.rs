//! Line-driven console host for the overlay controller.
//!
//! Reads one command per line, applies it, and prints every render call the
//! controller made as a `name: value` line.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::debug;

use crate::keybindings::{Key, ParseKeyError, PointerTarget};
use crate::models::Badge;
use crate::overlay::OverlayController;
use crate::render::{MediaView, PlaybackError, RenderPort};

const HELP: &str = "commands: list | state | open <id> | close | next | prev | slide+ | slide- \
                    | goto <n> | key <name> | click <target> | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    State,
    Open(String),
    Close,
    NextEntry,
    PreviousEntry,
    NextSlide,
    PreviousSlide,
    GoToSlide(i64),
    Key(Key),
    Click(PointerTarget),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("not a slide index: {0}")]
    InvalidIndex(String),
    #[error("unknown click target: {0}")]
    UnknownTarget(String),
    #[error(transparent)]
    Key(#[from] ParseKeyError),
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let command = match name {
        "list" | "ls" => Command::List,
        "state" => Command::State,
        "open" => Command::Open(
            arg.ok_or(CommandError::MissingArgument("entry id"))?
                .to_string(),
        ),
        "close" => Command::Close,
        "next" => Command::NextEntry,
        "prev" => Command::PreviousEntry,
        "slide+" => Command::NextSlide,
        "slide-" => Command::PreviousSlide,
        "goto" => Command::GoToSlide(parse_index(arg)?),
        "key" => Command::Key(arg.ok_or(CommandError::MissingArgument("key name"))?.parse()?),
        "click" => Command::Click(parse_target(
            arg.ok_or(CommandError::MissingArgument("click target"))?,
            parts.next(),
        )?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_index(arg: Option<&str>) -> Result<i64, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument("slide index"))?;
    arg.parse::<i64>()
        .map_err(|_| CommandError::InvalidIndex(arg.to_string()))
}

fn parse_target(name: &str, arg: Option<&str>) -> Result<PointerTarget, CommandError> {
    let target = match name {
        "card" => PointerTarget::Card(
            arg.ok_or(CommandError::MissingArgument("entry id"))?
                .to_string(),
        ),
        "prev" => PointerTarget::PreviousEntry,
        "next" => PointerTarget::NextEntry,
        "slide-prev" => PointerTarget::PreviousSlide,
        "slide-next" => PointerTarget::NextSlide,
        "dot" => {
            let index = parse_index(arg)?;
            let index = usize::try_from(index)
                .map_err(|_| CommandError::InvalidIndex(index.to_string()))?;
            PointerTarget::SlideDot(index)
        }
        "close" => PointerTarget::Close,
        "backdrop" => PointerTarget::Backdrop,
        "content" => PointerTarget::Content,
        other => return Err(CommandError::UnknownTarget(other.to_string())),
    };
    Ok(target)
}

/// Render port that turns every render call into an output line
#[derive(Debug)]
pub struct TextPort {
    asset_dir: PathBuf,
    loaded_video: Option<String>,
    lines: Vec<String>,
}

impl TextPort {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            loaded_video: None,
            lines: Vec::new(),
        }
    }

    /// Take the lines produced since the last call
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

impl RenderPort for TextPort {
    fn set_title(&mut self, title: &str) {
        self.push(format!("title: {title}"));
    }

    fn set_status(&mut self, status: &str) {
        self.push(format!("status: [{status}]"));
    }

    fn set_description(&mut self, description: &str) {
        self.push(format!("description: {description}"));
    }

    fn set_attribution(&mut self, attribution: &str) {
        self.push(format!("attribution: {attribution}"));
    }

    fn set_badges(&mut self, badges: &[Badge]) {
        let text = badges
            .iter()
            .map(|b| format!("<{}> {}", b.icon, b.text))
            .collect::<Vec<_>>()
            .join(", ");
        self.push(format!("badges: {text}"));
    }

    fn set_media(&mut self, media: MediaView<'_>) {
        match media {
            MediaView::Empty => {
                self.loaded_video = None;
                self.push("media: none".to_string());
            }
            MediaView::Video { src } => {
                self.loaded_video = Some(src.to_string());
                self.push(format!("media: video {src}"));
            }
            MediaView::Slides { images, active } => {
                self.loaded_video = None;
                match images.get(active) {
                    Some(image) => self.push(format!("media: image {image}")),
                    None => self.push("media: no images".to_string()),
                }
            }
        }
    }

    fn set_slide_position(&mut self, active: usize, count: usize) {
        if count > 0 {
            let dots: String = (0..count)
                .map(|i| if i == active { '●' } else { '○' })
                .collect();
            self.push(format!("slide: {}/{} {}", active + 1, count, dots));
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.push(format!("overlay: {}", if visible { "shown" } else { "hidden" }));
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.push(format!("scroll: {}", if locked { "locked" } else { "restored" }));
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let src = self.loaded_video.as_deref().ok_or(PlaybackError::NoMedia)?;
        let path = self.asset_dir.join(src);
        if !path.exists() {
            return Err(PlaybackError::MissingSource(path));
        }
        self.push(format!("playback: started {}", path.display()));
        Ok(())
    }

    fn stop_media(&mut self) {
        if self.loaded_video.take().is_some() {
            self.push("playback: stopped".to_string());
        }
    }
}

/// Run commands from `input` until end of input or `quit`.
pub fn run<I, W>(controller: &mut OverlayController<TextPort>, input: I, mut out: W) -> Result<()>
where
    I: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {err}").context("Failed to write output")?;
                continue;
            }
        };
        debug!("console: {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}").context("Failed to write output")?,
            Command::List => {
                for entry in controller.catalog().iter() {
                    let kind = entry.kind().as_str();
                    writeln!(out, "{:<16} {:<15} {}", entry.id, kind, entry.title)
                        .context("Failed to write output")?;
                }
            }
            Command::State => {
                let state = controller.state();
                writeln!(
                    out,
                    "open={} entry={} slide={}/{} playing={}",
                    state.is_open,
                    state.active_entry.as_deref().unwrap_or("-"),
                    state.active_slide,
                    state.slide_count,
                    state.media_playing
                )
                .context("Failed to write output")?;
            }
            Command::Open(id) => controller.open(&id),
            Command::Close => controller.close(),
            Command::NextEntry => controller.next_entry(),
            Command::PreviousEntry => controller.previous_entry(),
            Command::NextSlide => controller.next_slide(),
            Command::PreviousSlide => controller.previous_slide(),
            Command::GoToSlide(index) => controller.go_to_slide(index),
            Command::Key(key) => {
                if !controller.handle_key(key) {
                    writeln!(out, "key: ignored").context("Failed to write output")?;
                }
            }
            Command::Click(target) => {
                if !controller.handle_pointer(&target) {
                    writeln!(out, "click: ignored").context("Failed to write output")?;
                }
            }
        }

        for rendered in controller.port_mut().drain() {
            writeln!(out, "{rendered}").context("Failed to write output")?;
        }
    }
    out.flush().context("Failed to flush output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, CatalogEntry, MediaSource};
    use std::sync::Arc;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(parse_command("# comment"), Ok(None));
        assert_eq!(
            parse_command("open field-agent"),
            Ok(Some(Command::Open("field-agent".into())))
        );
        assert_eq!(parse_command("goto -3"), Ok(Some(Command::GoToSlide(-3))));
        assert_eq!(parse_command("key Escape"), Ok(Some(Command::Key(Key::Escape))));
        assert_eq!(
            parse_command("click dot 2"),
            Ok(Some(Command::Click(PointerTarget::SlideDot(2))))
        );
        assert_eq!(
            parse_command("click card b"),
            Ok(Some(Command::Click(PointerTarget::Card("b".into()))))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_command("open"), Err(CommandError::MissingArgument("entry id")));
        assert_eq!(parse_command("goto x"), Err(CommandError::InvalidIndex("x".into())));
        assert_eq!(parse_command("click dot -1"), Err(CommandError::InvalidIndex("-1".into())));
        assert_eq!(
            parse_command("click window"),
            Err(CommandError::UnknownTarget("window".into()))
        );
        assert_eq!(parse_command("dance"), Err(CommandError::Unknown("dance".into())));
        assert!(matches!(parse_command("key shift"), Err(CommandError::Key(_))));
    }

    fn run_script(script: &str) -> String {
        let catalog = Catalog::new(vec![
            CatalogEntry::new("demo", MediaSource::Video("videos/demo.mp4".into()))
                .with_title("Demo"),
            CatalogEntry::new(
                "deck",
                MediaSource::Slides(vec!["1.png".into(), "2.png".into(), "3.png".into()]),
            )
            .with_title("Deck"),
        ])
        .unwrap();
        let port = TextPort::new("/nonexistent");
        let mut controller = OverlayController::new(Arc::new(catalog), port);
        let mut out = Vec::new();
        run(&mut controller, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_run_script() {
        let out = run_script("open deck\nkey left\nstate\nclick backdrop\nstate\n");
        assert!(out.contains("title: Deck"));
        assert!(out.contains("slide: 3/3 ○○●"));
        assert!(out.contains("open=true entry=deck slide=2/3 playing=false"));
        assert!(out.contains("scroll: restored"));
        assert!(out.contains("open=false entry=- slide=0/0 playing=false"));
    }

    #[test]
    fn test_missing_video_is_swallowed() {
        let out = run_script("open demo\nstate\nnext\nstate\nquit\nstate\n");
        assert!(out.contains("media: video videos/demo.mp4"));
        assert!(!out.contains("playback: started"));
        assert!(out.contains("open=true entry=demo slide=0/0 playing=false"));
        assert!(out.contains("open=true entry=deck slide=0/3 playing=false"));
        // Nothing after quit runs
        assert_eq!(out.matches("open=").count(), 2);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failures_carry_context() {
        let demo = CatalogEntry::new("demo", MediaSource::Video("videos/demo.mp4".into()));
        let catalog = Arc::new(Catalog::new(vec![demo]).unwrap());
        for script in ["help\n", "list\n", "state\n", "key right\n", "open demo\n"] {
            let port = TextPort::new("/nonexistent");
            let mut controller = OverlayController::new(Arc::clone(&catalog), port);
            let err = run(&mut controller, script.as_bytes(), ClosedPipe).unwrap_err();
            assert_eq!(err.to_string(), "Failed to write output", "script {script:?}");
        }
    }

    #[test]
    fn test_errors_do_not_stop_the_script() {
        let out = run_script("bogus\nopen nope\nkey right\nopen deck\n");
        assert!(out.contains("error: unknown command: bogus"));
        assert!(out.contains("key: ignored"));
        assert!(out.contains("title: Deck"));
    }
}
