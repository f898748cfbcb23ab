use std::io;
use std::time::Duration;

use chomp_core::calendar::format_date;
use chomp_core::view::SessionView;
use chomp_core::Key;
use chomp_core::RuntimeAction;
use chomp_core::Session;
use chomp_core::ShellAction;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::info;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;

const TICK: Duration = Duration::from_millis(250);

/// Runs `restore` on drop, so every exit path after raw mode leaves the
/// terminal usable.
struct TuiGuard {
    restore: fn(),
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
}

/// The guard exists as soon as `raw_mode` succeeds; a failing `setup` drops it.
fn enter_terminal(
    raw_mode: impl FnOnce() -> io::Result<()>,
    setup: impl FnOnce() -> io::Result<()>,
    restore: fn(),
) -> io::Result<TuiGuard> {
    raw_mode()?;
    let guard = TuiGuard { restore };
    setup()?;
    Ok(guard)
}

pub fn run(mut session: Session) -> anyhow::Result<()> {
    let _guard = enter_terminal(
        enable_raw_mode,
        || execute!(io::stdout(), EnterAlternateScreen, crossterm::cursor::Hide),
        restore_terminal,
    )?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    run_app(&mut terminal, &mut session)?;
    info!("event=tui_exit module=ui status=ok");
    Ok(())
}

#[derive(Clone, Copy)]
struct UiPalette {
    primary: Color,
    accent: Color,
    text: Color,
    danger: Color,
    muted: Color,
}

fn palette() -> UiPalette {
    UiPalette {
        primary: Color::Rgb(0x85, 0x64, 0xfc),
        accent: Color::Rgb(0xa9, 0x92, 0xfc),
        text: Color::Rgb(0xc6, 0xd0, 0xf5),
        danger: Color::Rgb(0xc4, 0x0f, 0x30),
        muted: Color::DarkGray,
    }
}

/// Terminal keys the session understands; everything else is dropped.
fn map_key(key: KeyEvent) -> Option<Key> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let mapped = match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Key::Char(c),
        _ => return None,
    };
    Some(mapped)
}

fn is_interrupt(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, session: &mut Session) -> io::Result<()> {
    loop {
        let today = Local::now().date_naive();
        if today != session.state().today {
            session.dispatch(ShellAction::Runtime(RuntimeAction::SetToday(today)));
        }

        let view = session.view();
        terminal.draw(|f| ui(f, &view))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if is_interrupt(key) {
                return Ok(());
            }
            if let Some(key) = map_key(key) {
                session.press(key);
            }
        }
        if session.should_quit() {
            return Ok(());
        }
    }
}

fn ui(f: &mut ratatui::Frame, view: &SessionView) {
    let p = palette();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(f.area());

    let body = Paragraph::new(build_lines(view, p))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.primary))
                .title(Span::styled(
                    " chomp ",
                    Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(body, chunks[0]);
    render_key_bar(f, chunks[1], p);
}

/// The session view in drawing order: screen, info, error, date, stats.
fn build_lines(view: &SessionView, p: UiPalette) -> Vec<Line<'static>> {
    let title = Style::default().fg(p.accent).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(p.text);
    let selected = Style::default().fg(p.primary);

    let mut lines = vec![Line::from(Span::styled(view.screen.title, title)), Line::default()];

    if let Some(form) = &view.screen.form {
        lines.push(Line::from(vec![
            Span::styled("│ ", selected),
            Span::styled(
                format!("{} ", form.title),
                selected.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("({})", form.description), selected),
        ]));
        lines.push(Line::from(vec![
            Span::styled("│ ", selected),
            Span::styled(format!("> {}", form.value), selected),
        ]));
        lines.push(Line::default());
    }

    for option in &view.screen.options {
        let line = if option.selected {
            Line::from(vec![Span::styled("│", selected), Span::styled(option.label, selected)])
        } else {
            Line::from(Span::styled(format!(" {}", option.label), text))
        };
        lines.push(line);
    }
    lines.push(Line::default());

    if let Some(info) = &view.info {
        lines.push(Line::from(Span::styled("Info", title)));
        lines.extend(info.lines().map(|l| Line::from(Span::styled(l.to_string(), text))));
    }
    if let Some(error) = &view.error {
        lines.push(Line::from(Span::styled("Error", title)));
        lines.push(Line::from(Span::styled(
            error.message.clone(),
            Style::default().fg(p.danger),
        )));
    }

    lines.push(Line::from(Span::styled("Date", title)));
    lines.push(Line::from(Span::styled(format_date(view.date), text)));

    if let Some(stats) = &view.stats {
        for raw in stats.to_string().lines() {
            let style = if raw == "Calories" || raw == "Weight" {
                title
            } else {
                text
            };
            lines.push(Line::from(Span::styled(raw.to_string(), style)));
        }
    }
    lines
}

fn render_key_bar(f: &mut ratatui::Frame, area: Rect, p: UiPalette) {
    let key = Style::default().fg(p.accent);
    let label = Style::default().fg(p.muted);
    let text = Line::from(vec![
        Span::styled("↑↓", key),
        Span::styled(" select ", label),
        Span::styled("enter", key),
        Span::styled(" confirm ", label),
        Span::styled("esc", key),
        Span::styled(" back ", label),
        Span::styled("←→", key),
        Span::styled(" change day ", label),
        Span::styled("ctrl+c", Style::default().fg(p.danger)),
        Span::styled(" quit", label),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.muted));
    f.render_widget(Paragraph::new(text).block(block), area);
}
