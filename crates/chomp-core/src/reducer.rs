use std::collections::VecDeque;

use chrono::NaiveDate;
use log::debug;
use log::info;
use log::warn;

use super::actions::ErrorBanner;
use super::actions::Key;
use super::actions::RuntimeAction;
use super::actions::ShellAction;
use super::analytics::stats_report;
use super::calendar::format_date;
use super::calendar::next_day_not_after;
use super::calendar::previous_day;
use super::error::ChompError;
use super::import::ImportSource;
use super::state::SessionState;
use super::store::RecordStore;
use super::view::SessionView;

/// Collaborators a dispatch may touch. Borrowed for one action at a time.
pub struct Services<'a> {
    pub store: &'a mut dyn RecordStore,
    pub importer: &'a dyn ImportSource,
}

pub fn reduce(
    state: &mut SessionState,
    services: &mut Services<'_>,
    action: ShellAction,
) -> Vec<RuntimeAction> {
    match action {
        ShellAction::User(key) => reduce_user(state, services, key),
        ShellAction::Runtime(runtime) => reduce_runtime(state, services, runtime),
    }
}

fn reduce_user(
    state: &mut SessionState,
    services: &mut Services<'_>,
    key: Key,
) -> Vec<RuntimeAction> {
    match key {
        Key::Left => shift_date(state, previous_day(state.date)),
        Key::Right => shift_date(state, next_day_not_after(state.date, state.today)),
        _ => state.screens.get_mut(state.active).handle_input(key, services),
    }
}

fn shift_date(state: &mut SessionState, next: Option<NaiveDate>) -> Vec<RuntimeAction> {
    let Some(next) = next else {
        debug!(
            "event=date_shift module=reducer status=rejected date={} today={}",
            format_date(state.date),
            format_date(state.today)
        );
        return Vec::new();
    };
    state.date = next;
    state.screens.set_date(next);
    debug!(
        "event=date_shift module=reducer status=ok date={}",
        format_date(next)
    );
    vec![RuntimeAction::RefreshStats]
}

fn reduce_runtime(
    state: &mut SessionState,
    services: &mut Services<'_>,
    action: RuntimeAction,
) -> Vec<RuntimeAction> {
    match action {
        RuntimeAction::Navigate(screen) => {
            state.info = None;
            state.error = None;
            state.active = screen;
            debug!(
                "event=navigate module=reducer status=ok screen={}",
                screen.label()
            );
        }
        RuntimeAction::ShowInfo(text) => {
            state.info = Some(text);
        }
        RuntimeAction::ShowError(banner) => {
            warn!(
                "event=error_banner module=reducer status=shown kind={} message={}",
                banner.kind.label(),
                banner.message
            );
            state.error = Some(banner);
        }
        RuntimeAction::ClearError => {
            state.error = None;
        }
        RuntimeAction::RefreshStats => match stats_report(&*services.store, state.date) {
            Ok(report) => {
                state.stats = Some(report);
                state.error = None;
            }
            Err(err) => {
                // previous stats stay on screen
                let banner = ErrorBanner::from(ChompError::from(err));
                warn!(
                    "event=stats_refresh module=reducer status=failed date={} message={}",
                    format_date(state.date),
                    banner.message
                );
                state.error = Some(banner);
            }
        },
        RuntimeAction::SetToday(today) => {
            if today != state.today {
                info!(
                    "event=set_today module=reducer status=ok today={}",
                    format_date(today)
                );
            }
            state.today = today;
        }
        RuntimeAction::Quit => {
            state.should_quit = true;
        }
    }
    Vec::new()
}

/// A running session: the state plus the collaborators it was started with.
pub struct Session {
    state: SessionState,
    store: Box<dyn RecordStore>,
    importer: Box<dyn ImportSource>,
}

impl Session {
    pub fn new(
        store: Box<dyn RecordStore>,
        importer: Box<dyn ImportSource>,
        today: NaiveDate,
    ) -> Self {
        Self::at(store, importer, today, today)
    }

    /// Starts on `date` and computes the first stats block.
    pub fn at(
        store: Box<dyn RecordStore>,
        importer: Box<dyn ImportSource>,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        let mut session = Self {
            state: SessionState::at(date, today),
            store,
            importer,
        };
        session.dispatch(ShellAction::Runtime(RuntimeAction::RefreshStats));
        session
    }

    /// Processes `action` and every follow-up it produces, in order.
    pub fn dispatch(&mut self, action: ShellAction) {
        let mut queue = VecDeque::from([action]);
        while let Some(next) = queue.pop_front() {
            let mut services = Services {
                store: self.store.as_mut(),
                importer: self.importer.as_ref(),
            };
            let follow_ups = reduce(&mut self.state, &mut services, next);
            queue.extend(follow_ups.into_iter().map(ShellAction::Runtime));
        }
    }

    pub fn press(&mut self, key: Key) {
        self.dispatch(ShellAction::User(key));
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn view(&self) -> SessionView {
        self.state.view()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }
}

#[cfg(test)]
mod tests;
