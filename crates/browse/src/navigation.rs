//! Keyboard navigation over the suggestion list.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Highlight moved to this index
    Moved(usize),
    /// Enter on a highlighted suggestion
    Commit(usize),
    /// Enter with nothing highlighted: search for the typed text
    Submit,
    Close,
    Ignored,
}

/// Map a key press to an outcome given the current highlight.
///
/// Arrow keys clamp at both ends; from no highlight either arrow selects
/// the first entry.
pub fn navigate(key: NavKey, selected: Option<usize>, len: usize) -> NavOutcome {
    match key {
        NavKey::ArrowDown | NavKey::ArrowUp if len == 0 => NavOutcome::Ignored,
        NavKey::ArrowDown => {
            let next = selected.map_or(0, |i| i.saturating_add(1));
            NavOutcome::Moved(next.min(len - 1))
        }
        NavKey::ArrowUp => {
            let prev = selected.map_or(0, |i| i.saturating_sub(1));
            NavOutcome::Moved(prev.min(len - 1))
        }
        NavKey::Enter => match selected {
            Some(i) if i < len => NavOutcome::Commit(i),
            _ => NavOutcome::Submit,
        },
        NavKey::Escape => NavOutcome::Close,
    }
}
