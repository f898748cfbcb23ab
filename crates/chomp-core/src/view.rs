use std::fmt;

use chrono::NaiveDate;

use crate::actions::ErrorBanner;
use crate::analytics::StatsReport;
use crate::calendar::format_date;
use crate::form::Form;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub description: &'static str,
    pub value: String,
}

impl FormView {
    pub fn of(form: &Form) -> Option<Self> {
        form.is_active().then(|| Self {
            title: form.title(),
            description: form.description(),
            value: form.value().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub title: &'static str,
    pub form: Option<FormView>,
    pub options: Vec<OptionView>,
}

impl ScreenView {
    /// The cursor is only marked while browsing.
    pub fn new(title: &'static str, form: &Form, labels: &[&'static str], cursor: usize) -> Self {
        let browsing = !form.is_active();
        Self {
            title,
            form: FormView::of(form),
            options: labels
                .iter()
                .enumerate()
                .map(|(idx, label)| OptionView {
                    label,
                    selected: browsing && idx == cursor,
                })
                .collect(),
        }
    }

    /// A screen without a form.
    pub fn browse(title: &'static str, labels: &[&'static str], cursor: usize) -> Self {
        Self {
            title,
            form: None,
            options: labels
                .iter()
                .enumerate()
                .map(|(idx, label)| OptionView {
                    label,
                    selected: idx == cursor,
                })
                .collect(),
        }
    }
}

/// Everything the terminal draws, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub screen: ScreenView,
    pub info: Option<String>,
    pub error: Option<ErrorBanner>,
    pub date: NaiveDate,
    pub stats: Option<StatsReport>,
}

impl fmt::Display for SessionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.screen.title)?;
        writeln!(f)?;
        if let Some(form) = &self.screen.form {
            writeln!(f, "{} ({})", form.title, form.description)?;
            writeln!(f, "> {}", form.value)?;
            writeln!(f)?;
        }
        for option in &self.screen.options {
            let marker = if option.selected { "|" } else { " " };
            writeln!(f, "{marker}{}", option.label)?;
        }
        writeln!(f)?;
        if let Some(info) = &self.info {
            writeln!(f, "Info")?;
            writeln!(f, "{info}")?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "Error")?;
            writeln!(f, "{}", error.message)?;
        }
        writeln!(f, "Date")?;
        writeln!(f, "{}", format_date(self.date))?;
        if let Some(stats) = &self.stats {
            write!(f, "{stats}")?;
        }
        Ok(())
    }
}
