//! Screen Models. Each screen browses a fixed option list and owns at most
//! one form; while the form is active, input goes to the form.

use std::path::Path;

use chrono::NaiveDate;
use log::debug;

use crate::actions::Key;
use crate::actions::RuntimeAction;
use crate::actions::Screen;
use crate::error::ChompError;
use crate::form::parse_decimal;
use crate::form::parse_integer;
use crate::form::parse_integer_list;
use crate::form::Form;
use crate::form::InputCharset;
use crate::import::reconcile;
use crate::reducer::Services;
use crate::store::FillOutcome;
use crate::view::ScreenView;

pub trait ScreenModel {
    fn handle_input(&mut self, key: Key, services: &mut Services<'_>) -> Vec<RuntimeAction>;
    fn render(&self) -> ScreenView;
    /// Only the controller calls this, on startup and on every date shift.
    fn set_date(&mut self, date: NaiveDate);
    fn date(&self) -> NaiveDate;
}

/// Cursor over a fixed list; clamps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionCursor {
    index: usize,
    len: usize,
}

impl OptionCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.index + 1 < self.len {
            self.index += 1;
        }
    }
}

/// What a key means to a screen, after form routing.
enum Intent {
    /// The key was consumed by the form or ignored.
    Handled,
    Cancelled,
    Submit,
    Back,
    Select(usize),
}

fn route_key(form: &mut Form, cursor: &mut OptionCursor, key: Key) -> Intent {
    if form.is_active() {
        return match key {
            Key::Enter => Intent::Submit,
            Key::Esc => {
                form.reset();
                Intent::Cancelled
            }
            Key::Backspace => {
                form.pop();
                Intent::Handled
            }
            Key::Char(c) => {
                form.push(c);
                Intent::Handled
            }
            _ => Intent::Handled,
        };
    }
    match key {
        Key::Up => cursor.up(),
        Key::Down => cursor.down(),
        Key::Esc => return Intent::Back,
        Key::Enter => return Intent::Select(cursor.index()),
        _ => {}
    }
    Intent::Handled
}

/// Shared tail for every mutation: refresh on success, banner on failure.
fn refresh_or_error(result: Result<(), ChompError>) -> Vec<RuntimeAction> {
    match result {
        Ok(()) => vec![RuntimeAction::RefreshStats],
        Err(err) => vec![RuntimeAction::error(err)],
    }
}

/// Submits `form` through `apply`. The form keeps its buffer on failure.
fn submit_form(
    form: &mut Form,
    apply: impl FnOnce(&str) -> Result<(), ChompError>,
) -> Vec<RuntimeAction> {
    match apply(form.value()) {
        Ok(()) => {
            form.reset();
            vec![RuntimeAction::RefreshStats]
        }
        Err(err) => vec![RuntimeAction::error(err)],
    }
}

fn cancel() -> Vec<RuntimeAction> {
    vec![RuntimeAction::ClearError]
}

fn back_to_menu() -> Vec<RuntimeAction> {
    vec![RuntimeAction::Navigate(Screen::Menu)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Calories,
    Weight,
    Settings,
    ImportData,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::Calories,
        MenuOption::Weight,
        MenuOption::Settings,
        MenuOption::ImportData,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Weight => "weight",
            Self::Settings => "settings",
            Self::ImportData => "import data",
        }
    }

    pub fn target(self) -> Screen {
        match self {
            Self::Calories => Screen::Calories,
            Self::Weight => Screen::Weight,
            Self::Settings => Screen::Settings,
            Self::ImportData => Screen::Import,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuScreen {
    date: NaiveDate,
    cursor: OptionCursor,
}

impl MenuScreen {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            cursor: OptionCursor::new(MenuOption::ALL.len()),
        }
    }
}

impl ScreenModel for MenuScreen {
    fn handle_input(&mut self, key: Key, _services: &mut Services<'_>) -> Vec<RuntimeAction> {
        match key {
            Key::Up => self.cursor.up(),
            Key::Down => self.cursor.down(),
            Key::Esc => return vec![RuntimeAction::Quit],
            Key::Enter => {
                let option = MenuOption::ALL[self.cursor.index()];
                return vec![RuntimeAction::Navigate(option.target())];
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&self) -> ScreenView {
        let labels = MenuOption::ALL.map(MenuOption::label);
        ScreenView::browse(Screen::Menu.label(), &labels, self.cursor.index())
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaloriesOption {
    Add,
    Clear,
    Pop,
    Fill,
}

impl CaloriesOption {
    pub const ALL: [CaloriesOption; 4] = [
        CaloriesOption::Add,
        CaloriesOption::Clear,
        CaloriesOption::Pop,
        CaloriesOption::Fill,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Clear => "clear",
            Self::Pop => "pop",
            Self::Fill => "fill",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaloriesScreen {
    date: NaiveDate,
    cursor: OptionCursor,
    add_form: Form,
}

impl CaloriesScreen {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            cursor: OptionCursor::new(CaloriesOption::ALL.len()),
            add_form: Form::new(
                "Add calories",
                "provide list of calories, you can provide multiple by separating them with space or ,",
                InputCharset::IntegerList,
            ),
        }
    }

    fn fill(&self, services: &mut Services<'_>) -> Result<(), ChompError> {
        let target = services.store.settings().target_calories()?;
        match services.store.calories_mut().fill(self.date, target)? {
            FillOutcome::Appended(delta) => {
                debug!(
                    "event=calories_fill module=screen status=appended date={} delta={delta}",
                    self.date
                );
            }
            FillOutcome::AlreadyAtTarget => {
                debug!(
                    "event=calories_fill module=screen status=noop date={}",
                    self.date
                );
            }
        }
        Ok(())
    }
}

impl ScreenModel for CaloriesScreen {
    fn handle_input(&mut self, key: Key, services: &mut Services<'_>) -> Vec<RuntimeAction> {
        let date = self.date;
        match route_key(&mut self.add_form, &mut self.cursor, key) {
            Intent::Handled => Vec::new(),
            Intent::Cancelled => cancel(),
            Intent::Back => back_to_menu(),
            Intent::Submit => submit_form(&mut self.add_form, |raw| {
                let values = parse_integer_list(raw)?;
                services.store.calories_mut().create_or_append(date, &values)?;
                Ok(())
            }),
            Intent::Select(idx) => match CaloriesOption::ALL[idx] {
                CaloriesOption::Add => {
                    self.add_form.activate();
                    Vec::new()
                }
                CaloriesOption::Clear => {
                    refresh_or_error(services.store.calories_mut().delete(date).map_err(Into::into))
                }
                CaloriesOption::Pop => {
                    refresh_or_error(services.store.calories_mut().pop(date).map_err(Into::into))
                }
                CaloriesOption::Fill => refresh_or_error(self.fill(services)),
            },
        }
    }

    fn render(&self) -> ScreenView {
        let labels = CaloriesOption::ALL.map(CaloriesOption::label);
        ScreenView::new(
            Screen::Calories.label(),
            &self.add_form,
            &labels,
            self.cursor.index(),
        )
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightOption {
    Set,
    Clear,
}

impl WeightOption {
    pub const ALL: [WeightOption; 2] = [WeightOption::Set, WeightOption::Clear];

    pub fn label(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeightScreen {
    date: NaiveDate,
    cursor: OptionCursor,
    set_form: Form,
}

impl WeightScreen {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            cursor: OptionCursor::new(WeightOption::ALL.len()),
            set_form: Form::new(
                "Set weight",
                "provide weight for current day eg. 123.4",
                InputCharset::Decimal,
            ),
        }
    }
}

impl ScreenModel for WeightScreen {
    fn handle_input(&mut self, key: Key, services: &mut Services<'_>) -> Vec<RuntimeAction> {
        let date = self.date;
        match route_key(&mut self.set_form, &mut self.cursor, key) {
            Intent::Handled => Vec::new(),
            Intent::Cancelled => cancel(),
            Intent::Back => back_to_menu(),
            Intent::Submit => submit_form(&mut self.set_form, |raw| {
                let value = parse_decimal(raw)?;
                services.store.weights_mut().create_or_update(date, value)?;
                Ok(())
            }),
            Intent::Select(idx) => match WeightOption::ALL[idx] {
                WeightOption::Set => {
                    self.set_form.activate();
                    Vec::new()
                }
                WeightOption::Clear => {
                    refresh_or_error(services.store.weights_mut().delete(date).map_err(Into::into))
                }
            },
        }
    }

    fn render(&self) -> ScreenView {
        let labels = WeightOption::ALL.map(WeightOption::label);
        ScreenView::new(
            Screen::Weight.label(),
            &self.set_form,
            &labels,
            self.cursor.index(),
        )
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

const SETTINGS_OPTIONS: [&str; 1] = ["set target calories"];

#[derive(Debug, Clone)]
pub struct SettingsScreen {
    date: NaiveDate,
    cursor: OptionCursor,
    target_form: Form,
}

impl SettingsScreen {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            cursor: OptionCursor::new(SETTINGS_OPTIONS.len()),
            target_form: Form::new(
                "Target calories",
                "provide your new target for daily calorie intake",
                InputCharset::Digits,
            ),
        }
    }
}

impl ScreenModel for SettingsScreen {
    fn handle_input(&mut self, key: Key, services: &mut Services<'_>) -> Vec<RuntimeAction> {
        match route_key(&mut self.target_form, &mut self.cursor, key) {
            Intent::Handled => Vec::new(),
            Intent::Cancelled => cancel(),
            Intent::Back => back_to_menu(),
            Intent::Submit => submit_form(&mut self.target_form, |raw| {
                let target = parse_integer(raw)?;
                services.store.settings_mut().set_target_calories(target)?;
                Ok(())
            }),
            Intent::Select(_) => {
                self.target_form.activate();
                Vec::new()
            }
        }
    }

    fn render(&self) -> ScreenView {
        ScreenView::new(
            Screen::Settings.label(),
            &self.target_form,
            &SETTINGS_OPTIONS,
            self.cursor.index(),
        )
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

const IMPORT_OPTIONS: [&str; 1] = ["import fitnotes data"];

#[derive(Debug, Clone)]
pub struct ImportScreen {
    date: NaiveDate,
    cursor: OptionCursor,
    path_form: Form,
}

impl ImportScreen {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            cursor: OptionCursor::new(IMPORT_OPTIONS.len()),
            path_form: Form::new(
                "Fitnotes path",
                "provide absolute path to the file exported from fitnotes",
                InputCharset::Any,
            ),
        }
    }
}

impl ScreenModel for ImportScreen {
    fn handle_input(&mut self, key: Key, services: &mut Services<'_>) -> Vec<RuntimeAction> {
        match route_key(&mut self.path_form, &mut self.cursor, key) {
            Intent::Handled => Vec::new(),
            Intent::Cancelled => cancel(),
            Intent::Back => back_to_menu(),
            Intent::Submit => {
                let path = self.path_form.value().trim().to_string();
                let batch = match services.importer.load(Path::new(&path)) {
                    Ok(batch) => batch,
                    Err(err) => return vec![RuntimeAction::error(err)],
                };
                match reconcile(&mut *services.store, &batch) {
                    Ok(summary) => {
                        self.path_form.reset();
                        vec![
                            RuntimeAction::RefreshStats,
                            RuntimeAction::ShowInfo(summary.to_string()),
                        ]
                    }
                    Err(err) => vec![RuntimeAction::error(err)],
                }
            }
            Intent::Select(_) => {
                self.path_form.activate();
                Vec::new()
            }
        }
    }

    fn render(&self) -> ScreenView {
        ScreenView::new(
            Screen::Import.label(),
            &self.path_form,
            &IMPORT_OPTIONS,
            self.cursor.index(),
        )
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}
