use super::*;
use pretty_assertions::assert_eq;

fn weight_line(session: &Session) -> String {
    session
        .state()
        .stats
        .as_ref()
        .expect("stats")
        .weight
        .to_string()
}

#[test]
fn amount_placeholder_until_weight_is_set() {
    let mut session = session();
    assert!(weight_line(&session).starts_with("amount: -\n"));

    open(&mut session, Screen::Weight);
    choose(&mut session, 0);
    type_text(&mut session, "70.0");
    session.press(Key::Enter);

    assert!(weight_line(&session).starts_with("amount: 70.0\n"));
    assert_eq!(
        session.store().weights().read(today()).expect("read"),
        Some(70.0)
    );
}

#[test]
fn set_overwrites_the_previous_sample() {
    let mut session = session();
    open(&mut session, Screen::Weight);
    for value in ["80.2", "79.9"] {
        choose(&mut session, 0);
        type_text(&mut session, value);
        session.press(Key::Enter);
    }
    assert_eq!(
        session.store().weights().read(today()).expect("read"),
        Some(79.9)
    );
}

#[test]
fn malformed_decimal_is_a_validation_error() {
    let mut session = session();
    open(&mut session, Screen::Weight);
    choose(&mut session, 0);
    type_text(&mut session, "7..1");
    session.press(Key::Enter);

    assert_eq!(error_kind(&session), Some(ErrorKind::Validation));
    assert_eq!(session.view().screen.form.expect("form").value, "7..1");
    assert_eq!(session.store().weights().read(today()).expect("read"), None);
}

#[test]
fn clear_removes_the_sample() {
    let mut store = MemoryStore::default();
    store.weights_mut().create(today(), 75.0).expect("seed");
    let mut session = session_with(store, CannedImport::default());
    open(&mut session, Screen::Weight);
    choose(&mut session, 1);

    assert_eq!(session.store().weights().read(today()).expect("read"), None);
    assert!(weight_line(&session).starts_with("amount: -\n"));
}

#[test]
fn weekly_change_appears_once_both_windows_have_samples() {
    let mut store = MemoryStore::default();
    store.weights_mut().create(day(2024, 3, 14), 80.0).expect("seed");
    store.weights_mut().create(day(2024, 3, 7), 81.0).expect("seed");
    let session = session_with(store, CannedImport::default());

    assert_eq!(
        weight_line(&session),
        "amount: -\nweekly change: -1.0kg w/w"
    );
}
