use super::*;
use pretty_assertions::assert_eq;

#[test]
fn session_starts_on_menu_with_stats_for_today() {
    let session = session();
    let state = session.state();
    assert_eq!(state.active, Screen::Menu);
    assert_eq!(state.date, today());
    assert!(state.error.is_none());
    let stats = state.stats.as_ref().expect("initial stats");
    assert_eq!(stats.date, today());
    assert_dates_in_sync(state);
}

#[test]
fn menu_enter_opens_the_selected_screen() {
    let mut session = session();
    session.press(Key::Down);
    session.press(Key::Down);
    session.press(Key::Enter);
    assert_eq!(session.state().active, Screen::Settings);

    session.press(Key::Esc);
    assert_eq!(session.state().active, Screen::Menu);

    session.press(Key::Down);
    session.press(Key::Enter);
    assert_eq!(session.state().active, Screen::Import);
}

#[test]
fn menu_cursor_clamps_at_bounds() {
    let mut session = session();
    session.press(Key::Up);
    session.press(Key::Enter);
    assert_eq!(session.state().active, Screen::Calories);

    open(&mut session, Screen::Menu);
    for _ in 0..10 {
        session.press(Key::Down);
    }
    session.press(Key::Enter);
    assert_eq!(session.state().active, Screen::Import);
}

#[test]
fn esc_on_menu_requests_quit() {
    let mut session = session();
    assert!(!session.should_quit());
    session.press(Key::Esc);
    assert!(session.should_quit());
}

#[test]
fn navigate_clears_both_banners() {
    let mut session = session();
    session.dispatch(ShellAction::Runtime(RuntimeAction::ShowInfo(
        "saved".to_string(),
    )));
    session.dispatch(ShellAction::Runtime(RuntimeAction::error(
        crate::error::ValidationError::Empty,
    )));
    assert!(session.state().info.is_some());
    assert!(session.state().error.is_some());

    open(&mut session, Screen::Weight);
    assert_eq!(session.state().info, None);
    assert_eq!(session.state().error, None);
}

#[test]
fn clear_error_leaves_info_alone() {
    let mut session = session();
    session.dispatch(ShellAction::Runtime(RuntimeAction::ShowInfo(
        "imported".to_string(),
    )));
    session.dispatch(ShellAction::Runtime(RuntimeAction::error(
        crate::error::ValidationError::Empty,
    )));
    session.dispatch(ShellAction::Runtime(RuntimeAction::ClearError));
    assert_eq!(session.state().info.as_deref(), Some("imported"));
    assert_eq!(session.state().error, None);
}

#[test]
fn up_and_down_are_ignored_while_editing() {
    let mut session = session();
    open(&mut session, Screen::Calories);
    choose(&mut session, 0);
    session.press(Key::Down);
    type_text(&mut session, "100");
    session.press(Key::Enter);

    let date = session.state().date;
    assert_eq!(
        session.store().calories().read(date).expect("read"),
        Some(vec![100])
    );
}

#[test]
fn screens_keep_their_cursor_across_navigation() {
    let mut session = session();
    open(&mut session, Screen::Weight);
    session.press(Key::Down);
    open(&mut session, Screen::Menu);
    open(&mut session, Screen::Weight);

    let view = session.view();
    let selected: Vec<&str> = view
        .screen
        .options
        .iter()
        .filter(|option| option.selected)
        .map(|option| option.label)
        .collect();
    assert_eq!(selected, vec!["clear"]);
}
