use chrono::NaiveDate;
use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::Services;
pub(super) use super::Session;
pub(super) use crate::actions::Key;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::Screen;
pub(super) use crate::actions::ShellAction;
pub(super) use crate::error::ErrorKind;
pub(super) use crate::import::CalorieRecord;
pub(super) use crate::import::ImportBatch;
pub(super) use crate::import::WeightRecord;
pub(super) use crate::state::SessionState;
pub(super) use crate::store::RecordStore;
pub(super) use crate::testing::day;
pub(super) use crate::testing::CannedImport;
pub(super) use crate::testing::MemoryStore;

mod navigation;
mod render_order;
mod weight_screen;

fn today() -> NaiveDate {
    day(2024, 3, 15)
}

fn session() -> Session {
    session_with(MemoryStore::default(), CannedImport::default())
}

fn session_with(store: MemoryStore, importer: CannedImport) -> Session {
    Session::new(Box::new(store), Box::new(importer), today())
}

fn open(session: &mut Session, screen: Screen) {
    session.dispatch(ShellAction::Runtime(RuntimeAction::Navigate(screen)));
    assert_eq!(session.state().active, screen);
}

/// Moves the cursor to `index` from wherever it is, then presses enter.
fn choose(session: &mut Session, index: usize) {
    for _ in 0..8 {
        session.press(Key::Up);
    }
    for _ in 0..index {
        session.press(Key::Down);
    }
    session.press(Key::Enter);
}

fn type_text(session: &mut Session, text: &str) {
    for c in text.chars() {
        session.press(Key::Char(c));
    }
}

fn error_kind(session: &Session) -> Option<ErrorKind> {
    session.state().error.as_ref().map(|banner| banner.kind)
}

fn assert_dates_in_sync(state: &SessionState) {
    for date in state.screens.dates() {
        assert_eq!(date, state.date);
    }
}
