//! # Module: TUI Event Handling
//!
//! ## Responsibility
//! Polls crossterm events and translates keyboard input into app state
//! mutations. Search submissions come back out as [`Command`]s for the event
//! loop to dispatch.
//!
//! ## Guarantees
//! - Non-blocking event polling with configurable timeout
//! - No panics on any key combination
//! - Ctrl+C always triggers quit, even while editing

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Command, Route};

/// Result of polling for a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit (q, Esc, or Ctrl+C).
    Quit,
    /// Toggle the help overlay.
    Help,
    /// Jump to a page.
    Navigate(Route),
    /// Move to the next page in the header.
    NextRoute,
    /// Start editing the search input.
    EditSearch,
    /// Stop editing without submitting.
    CancelEdit,
    /// Character typed into the search input.
    Char(char),
    /// Delete the last input character.
    Backspace,
    /// Submit the search input.
    Submit,
    /// Flip between dark and light.
    ToggleTheme,
    /// Toggle table/cards, grid/list, or the activity tab.
    ToggleView,
    /// A terminal resize occurred.
    Resize(u16, u16),
    /// No actionable event within the poll window.
    None,
}

/// Polls for a single input event with the given timeout.
///
/// `editing` selects the key map: while editing, printable keys are text.
///
/// # Errors
/// Returns `InputEvent::None` on any crossterm polling error (never panics).
pub fn poll_event(timeout: Duration, editing: bool) -> InputEvent {
    let available = match event::poll(timeout) {
        Ok(v) => v,
        Err(_) => return InputEvent::None,
    };
    if !available {
        return InputEvent::None;
    }

    match event::read() {
        Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => translate_key(key, editing),
        Ok(Event::Resize(w, h)) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

/// Applies an input event to the app state.
///
/// Returns a [`Command`] when the event submits a remote search.
pub fn apply_event(app: &mut App, event: InputEvent) -> Option<Command> {
    if app.show_help && !matches!(event, InputEvent::None | InputEvent::Resize(_, _)) {
        app.show_help = false;
        app.should_quit = event == InputEvent::Quit;
        return None;
    }

    match event {
        InputEvent::Quit => app.should_quit = true,
        InputEvent::Help => app.show_help = true,
        InputEvent::Navigate(route) => app.navigate(route),
        InputEvent::NextRoute => app.navigate(app.route.next()),
        InputEvent::EditSearch => {
            if app.route.search_placeholder().is_some() {
                app.editing = true;
            }
        }
        InputEvent::CancelEdit => app.editing = false,
        InputEvent::Char(c) => app.push_input(c),
        InputEvent::Backspace => app.pop_input(),
        InputEvent::Submit => return app.submit(),
        InputEvent::ToggleTheme => app.toggle_theme(),
        InputEvent::ToggleView => app.toggle_view(),
        InputEvent::Resize(_, _) | InputEvent::None => {}
    }
    None
}

/// Translates a crossterm key event to an `InputEvent`.
pub fn translate_key(key: KeyEvent, editing: bool) -> InputEvent {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputEvent::Quit;
    }

    if editing {
        return match key.code {
            KeyCode::Enter => InputEvent::Submit,
            KeyCode::Esc => InputEvent::CancelEdit,
            KeyCode::Backspace => InputEvent::Backspace,
            KeyCode::Char(c) => InputEvent::Char(c),
            _ => InputEvent::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => InputEvent::Help,
        KeyCode::Char('1') => InputEvent::Navigate(Route::Dashboard),
        KeyCode::Char('2') => InputEvent::Navigate(Route::Codeforces),
        KeyCode::Char('3') => InputEvent::Navigate(Route::GitHub),
        KeyCode::Char('4') => InputEvent::Navigate(Route::MockData),
        KeyCode::Tab => InputEvent::NextRoute,
        KeyCode::Char('/') => InputEvent::EditSearch,
        KeyCode::Enter => InputEvent::Submit,
        KeyCode::Char('t') | KeyCode::Char('T') => InputEvent::ToggleTheme,
        KeyCode::Char('v') | KeyCode::Char('V') => InputEvent::ToggleView,
        _ => InputEvent::None,
    }
}
