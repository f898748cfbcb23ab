use chrono::NaiveDate;

use crate::error::ChompError;
use crate::error::ErrorKind;

/// Terminal-independent key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Calories,
    Weight,
    Settings,
    Import,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Menu,
        Screen::Calories,
        Screen::Weight,
        Screen::Settings,
        Screen::Import,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Menu => "Main menu",
            Self::Calories => "Calories",
            Self::Weight => "Weight",
            Self::Settings => "Settings",
            Self::Import => "Import data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ChompError> for ErrorBanner {
    fn from(err: &ChompError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<ChompError> for ErrorBanner {
    fn from(err: ChompError) -> Self {
        Self::from(&err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellAction {
    User(Key),
    Runtime(RuntimeAction),
}

/// Follow-up commands. Screens emit these; the controller applies them.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeAction {
    Navigate(Screen),
    ShowInfo(String),
    ShowError(ErrorBanner),
    ClearError,
    RefreshStats,
    SetToday(NaiveDate),
    Quit,
}

impl RuntimeAction {
    pub fn error(err: impl Into<ChompError>) -> Self {
        Self::ShowError(ErrorBanner::from(err.into()))
    }
}
