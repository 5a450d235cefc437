use crate::layout::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
}

impl NavKey {
    /// Maps a DOM-style key name; other keys are not navigation keys.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            _ => None,
        }
    }
}

/// Roving focus over the date-ordered cards. Moves clamp at both ends and
/// never wrap. Exactly one card (the active one) is in the tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusCursor {
    active: usize,
    len: usize,
}

impl FocusCursor {
    pub fn new(len: usize) -> Self {
        Self { active: 0, len }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Back to the first card, e.g. after the event set changed.
    pub fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    pub fn tab_index(&self, index: usize) -> i32 {
        if index == self.active { 0 } else { -1 }
    }

    /// Moves from `from` (the card holding focus) and returns the new index
    /// when focus should change. Arrow keys only act along the axis of
    /// `mode`: left/right in horizontal mode, up/down otherwise.
    pub fn handle_key(&mut self, key: NavKey, from: usize, mode: Mode) -> Option<usize> {
        if self.len == 0 || from >= self.len {
            return None;
        }
        let last = self.len - 1;
        let horizontal = mode == Mode::Horizontal;
        let target = match key {
            NavKey::ArrowRight if horizontal => (from + 1).min(last),
            NavKey::ArrowLeft if horizontal => from.saturating_sub(1),
            NavKey::ArrowDown if !horizontal => (from + 1).min(last),
            NavKey::ArrowUp if !horizontal => from.saturating_sub(1),
            NavKey::Home => 0,
            NavKey::End => last,
            _ => from,
        };
        if target == from {
            return None;
        }
        self.active = target;
        Some(target)
    }
}
