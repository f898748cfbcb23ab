use super::*;
use pretty_assertions::assert_eq;

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} missing from:\n{haystack}"))
}

#[test]
fn view_is_screen_info_error_date_stats() {
    let mut session = session_with(
        MemoryStore::default(),
        CannedImport {
            path: "/exports/fitnotes.csv".to_string(),
            batch: ImportBatch::default(),
        },
    );
    open(&mut session, Screen::Import);
    choose(&mut session, 0);
    type_text(&mut session, "/exports/fitnotes.csv");
    session.press(Key::Enter);
    // second attempt with an empty path fails and leaves the summary up
    choose(&mut session, 0);
    session.press(Key::Enter);

    let rendered = session.view().to_string();
    assert!(rendered.starts_with("Import data\n"));
    let info = position(&rendered, "calories records added: 0");
    let error = position(&rendered, "failed to read");
    let date = position(&rendered, "Date\n2024-03-15\n");
    let stats = position(&rendered, "Calories\nlist: []");
    assert!(info < error);
    assert!(error < date);
    assert!(date < stats);
}

#[test]
fn menu_view_without_banners() {
    let session = session();
    assert_eq!(
        session.view().to_string(),
        "Main menu\n\n\
         |calories\n weight\n settings\n import data\n\n\
         Date\n2024-03-15\n\
         Calories\nlist: []\nsum: 0\nleft: 0 (target: 0)\n\
         Weight\namount: -\nweekly change: - (not enough data to calculate)\n"
    );
}

#[test]
fn open_form_is_drawn_above_the_options_without_a_cursor() {
    let mut session = session();
    open(&mut session, Screen::Weight);
    choose(&mut session, 0);
    type_text(&mut session, "72.4");

    let view = session.view();
    assert!(view.screen.options.iter().all(|option| !option.selected));
    let rendered = view.to_string();
    assert!(rendered.starts_with(
        "Weight\n\nSet weight (provide weight for current day eg. 123.4)\n> 72.4\n\n set\n clear\n"
    ));
}
