use chrono::NaiveDate;

use crate::actions::ErrorBanner;
use crate::actions::Screen;
use crate::analytics::StatsReport;
use crate::screen::CaloriesScreen;
use crate::screen::ImportScreen;
use crate::screen::MenuScreen;
use crate::screen::ScreenModel;
use crate::screen::SettingsScreen;
use crate::screen::WeightScreen;
use crate::view::SessionView;

/// One model per screen, kept alive for the whole session so cursors and
/// half-typed forms survive navigation.
#[derive(Debug, Clone)]
pub struct Screens {
    pub menu: MenuScreen,
    pub calories: CaloriesScreen,
    pub weight: WeightScreen,
    pub settings: SettingsScreen,
    pub import: ImportScreen,
}

impl Screens {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            menu: MenuScreen::new(date),
            calories: CaloriesScreen::new(date),
            weight: WeightScreen::new(date),
            settings: SettingsScreen::new(date),
            import: ImportScreen::new(date),
        }
    }

    pub fn get(&self, screen: Screen) -> &dyn ScreenModel {
        match screen {
            Screen::Menu => &self.menu,
            Screen::Calories => &self.calories,
            Screen::Weight => &self.weight,
            Screen::Settings => &self.settings,
            Screen::Import => &self.import,
        }
    }

    pub fn get_mut(&mut self, screen: Screen) -> &mut dyn ScreenModel {
        match screen {
            Screen::Menu => &mut self.menu,
            Screen::Calories => &mut self.calories,
            Screen::Weight => &mut self.weight,
            Screen::Settings => &mut self.settings,
            Screen::Import => &mut self.import,
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        for screen in Screen::ALL {
            self.get_mut(screen).set_date(date);
        }
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        Screen::ALL.into_iter().map(|screen| self.get(screen).date())
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub active: Screen,
    /// Selected day. Every screen carries a copy that the reducer keeps equal.
    pub date: NaiveDate,
    /// Upper bound for forward date shifts.
    pub today: NaiveDate,
    pub info: Option<String>,
    pub error: Option<ErrorBanner>,
    /// Last successfully computed stats; kept when a refresh fails.
    pub stats: Option<StatsReport>,
    pub screens: Screens,
    pub should_quit: bool,
}

impl SessionState {
    pub fn new(today: NaiveDate) -> Self {
        Self::at(today, today)
    }

    /// A session looking at `date`, which is clamped to `today`.
    pub fn at(date: NaiveDate, today: NaiveDate) -> Self {
        let date = date.min(today);
        Self {
            active: Screen::Menu,
            date,
            today,
            info: None,
            error: None,
            stats: None,
            screens: Screens::new(date),
            should_quit: false,
        }
    }

    pub fn active_screen(&self) -> &dyn ScreenModel {
        self.screens.get(self.active)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            screen: self.active_screen().render(),
            info: self.info.clone(),
            error: self.error.clone(),
            date: self.date,
            stats: self.stats.clone(),
        }
    }
}
