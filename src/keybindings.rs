// Keybindings for the detail overlay
// Maps host key and pointer events onto overlay actions
//
// Keybindings (only while the overlay is open):
// - Escape: Close the overlay
// - Arrow keys / hjkl: Navigate slides or entries, see `KeyPolicy`
//
// Pointer affordances:
// - Card: Open the entry behind the card
// - Previous/next entry buttons, slide arrows, slide dots
// - Close button and backdrop: Close the overlay

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Navigation direction of a directional key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Right and Down move forward, Left and Up move backward
    pub fn step(&self) -> isize {
        match self {
            Direction::Right | Direction::Down => 1,
            Direction::Left | Direction::Up => -1,
        }
    }

    fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Host-independent key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Left,
    Right,
    Up,
    Down,
    Char(char),
    Other,
}

impl Key {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            // Arrow keys
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            // Vim-style keys (hjkl)
            Key::Char('h') => Some(Direction::Left),
            Key::Char('j') => Some(Direction::Down),
            Key::Char('k') => Some(Direction::Up),
            Key::Char('l') => Some(Direction::Right),
            _ => None,
        }
    }
}

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "escape" | "esc" => Key::Escape,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(ParseKeyError(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown key name: {0:?}")]
pub struct ParseKeyError(String);

/// Which navigation axis directional keys drive while the overlay is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Left/Right move through slides when the entry has more than one slide,
    /// entries otherwise. Up/Down always move through entries.
    #[default]
    SlidesFirst,
    /// Left/Right always move through entries. Up/Down move through slides
    /// when the entry has more than one slide, entries otherwise.
    EntriesFirst,
}

impl fmt::Display for KeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyPolicy::SlidesFirst => "slides",
            KeyPolicy::EntriesFirst => "entries",
        })
    }
}

impl FromStr for KeyPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slides" | "slides-first" => Ok(KeyPolicy::SlidesFirst),
            "entries" | "entries-first" => Ok(KeyPolicy::EntriesFirst),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown key policy {0:?} (expected \"slides\" or \"entries\")")]
pub struct ParsePolicyError(String);

/// Navigation axis a directional key resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Entries,
    Slides,
}

impl KeyPolicy {
    /// Resolve a direction to exactly one axis for the current slide count
    pub fn axis(&self, direction: Direction, slide_count: usize) -> Axis {
        let multi_slide = slide_count > 1;
        match self {
            KeyPolicy::SlidesFirst if multi_slide && direction.is_horizontal() => Axis::Slides,
            KeyPolicy::EntriesFirst if multi_slide && !direction.is_horizontal() => Axis::Slides,
            _ => Axis::Entries,
        }
    }
}

/// Clickable regions of the page and the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    Card(String),
    PreviousEntry,
    NextEntry,
    PreviousSlide,
    NextSlide,
    SlideDot(usize),
    Close,
    Backdrop,
    /// Click inside the dialog body; swallowed so it never reaches the backdrop
    Content,
}

/// Transition requested by an input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayAction {
    Open(String),
    Close,
    NextEntry,
    PreviousEntry,
    NextSlide,
    PreviousSlide,
    GoToSlide(i64),
}

/// Map a key press to an action. Keys are only bound while the overlay is open.
pub fn action_for_key(
    policy: KeyPolicy,
    key: Key,
    is_open: bool,
    slide_count: usize,
) -> Option<OverlayAction> {
    if !is_open {
        return None;
    }

    if key == Key::Escape {
        return Some(OverlayAction::Close);
    }

    let direction = key.direction()?;
    let forward = direction.step() > 0;
    let action = match (policy.axis(direction, slide_count), forward) {
        (Axis::Slides, true) => OverlayAction::NextSlide,
        (Axis::Slides, false) => OverlayAction::PreviousSlide,
        (Axis::Entries, true) => OverlayAction::NextEntry,
        (Axis::Entries, false) => OverlayAction::PreviousEntry,
    };
    Some(action)
}

/// Map a pointer activation to an action; `Content` maps to none.
pub fn action_for_pointer(target: &PointerTarget) -> Option<OverlayAction> {
    match target {
        PointerTarget::Card(id) => Some(OverlayAction::Open(id.clone())),
        PointerTarget::PreviousEntry => Some(OverlayAction::PreviousEntry),
        PointerTarget::NextEntry => Some(OverlayAction::NextEntry),
        PointerTarget::PreviousSlide => Some(OverlayAction::PreviousSlide),
        PointerTarget::NextSlide => Some(OverlayAction::NextSlide),
        PointerTarget::SlideDot(index) => {
            Some(OverlayAction::GoToSlide(i64::try_from(*index).unwrap_or(i64::MAX)))
        }
        PointerTarget::Close | PointerTarget::Backdrop => Some(OverlayAction::Close),
        PointerTarget::Content => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTIONAL: [Key; 8] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Char('h'),
        Key::Char('j'),
        Key::Char('k'),
        Key::Char('l'),
    ];

    #[test]
    fn test_keys_unbound_while_closed() {
        for key in DIRECTIONAL.iter().chain([Key::Escape].iter()) {
            assert_eq!(action_for_key(KeyPolicy::SlidesFirst, *key, false, 5), None);
        }
    }

    #[test]
    fn test_escape_closes() {
        assert_eq!(
            action_for_key(KeyPolicy::EntriesFirst, Key::Escape, true, 0),
            Some(OverlayAction::Close)
        );
    }

    #[test]
    fn test_every_direction_resolves_to_one_axis() {
        for policy in [KeyPolicy::SlidesFirst, KeyPolicy::EntriesFirst] {
            for slide_count in [0, 1, 2, 5] {
                for key in DIRECTIONAL {
                    let action = action_for_key(policy, key, true, slide_count);
                    assert!(
                        matches!(
                            action,
                            Some(
                                OverlayAction::NextEntry
                                    | OverlayAction::PreviousEntry
                                    | OverlayAction::NextSlide
                                    | OverlayAction::PreviousSlide
                            )
                        ),
                        "{policy} {key:?} {slide_count} -> {action:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_slides_first_policy() {
        let p = KeyPolicy::SlidesFirst;
        assert_eq!(action_for_key(p, Key::Right, true, 3), Some(OverlayAction::NextSlide));
        assert_eq!(
            action_for_key(p, Key::Char('h'), true, 3),
            Some(OverlayAction::PreviousSlide)
        );
        assert_eq!(action_for_key(p, Key::Down, true, 3), Some(OverlayAction::NextEntry));
        // Single slide or video falls back to entries
        assert_eq!(action_for_key(p, Key::Right, true, 1), Some(OverlayAction::NextEntry));
        assert_eq!(action_for_key(p, Key::Left, true, 0), Some(OverlayAction::PreviousEntry));
    }

    #[test]
    fn test_entries_first_policy() {
        let p = KeyPolicy::EntriesFirst;
        assert_eq!(action_for_key(p, Key::Right, true, 3), Some(OverlayAction::NextEntry));
        assert_eq!(action_for_key(p, Key::Up, true, 3), Some(OverlayAction::PreviousSlide));
        assert_eq!(action_for_key(p, Key::Char('j'), true, 3), Some(OverlayAction::NextSlide));
        assert_eq!(action_for_key(p, Key::Down, true, 0), Some(OverlayAction::NextEntry));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(action_for_key(KeyPolicy::SlidesFirst, Key::Char('x'), true, 3), None);
        assert_eq!(action_for_key(KeyPolicy::SlidesFirst, Key::Other, true, 3), None);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("slides".parse::<KeyPolicy>(), Ok(KeyPolicy::SlidesFirst));
        assert_eq!(" Entries ".parse::<KeyPolicy>(), Ok(KeyPolicy::EntriesFirst));
        assert!("both".parse::<KeyPolicy>().is_err());
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!("ArrowLeft".parse::<Key>(), Ok(Key::Left));
        assert_eq!("esc".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("l".parse::<Key>(), Ok(Key::Char('l')));
        assert!("shift".parse::<Key>().is_err());
    }

    #[test]
    fn test_pointer_actions() {
        assert_eq!(
            action_for_pointer(&PointerTarget::Card("a".into())),
            Some(OverlayAction::Open("a".into()))
        );
        assert_eq!(action_for_pointer(&PointerTarget::Backdrop), Some(OverlayAction::Close));
        assert_eq!(
            action_for_pointer(&PointerTarget::SlideDot(2)),
            Some(OverlayAction::GoToSlide(2))
        );
        assert_eq!(action_for_pointer(&PointerTarget::Content), None);
    }
}
