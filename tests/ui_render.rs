use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use marquee::api::{BackendReply, MovieRecord};
use marquee::app::App;
use marquee::cards::CARD_PLACEHOLDER;
use marquee::input::handle_mouse_event;
use marquee::storage::LocalStorage;
use marquee::tasks::{AsyncAction, Task};
use marquee::ui;
use marquee::watchlist::WatchList;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── Helpers ───────────────────────────────────────────────────────────────────

/// App plus its storage dir, removed on drop
struct TestApp {
    app: App,
    dir: PathBuf,
}

impl Deref for TestApp {
    type Target = App;
    fn deref(&self) -> &App {
        &self.app
    }
}

impl DerefMut for TestApp {
    fn deref_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn make_app(tag: &str) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!("marquee-ui-{tag}-{nanos}"));
    let app = App::new(WatchList::load(LocalStorage::in_dir(&dir)));
    TestApp { app, dir }
}

fn click(x: u16, y: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: x,
        row: y,
        modifiers: KeyModifiers::NONE,
    }
}

fn make_movie(id: u64, title: &str, poster: Option<&str>) -> MovieRecord {
    MovieRecord {
        movie_id: id,
        title: Some(title.to_string()),
        overview: Some(format!("Overview of {}", title)),
        runtime: Some(120.0),
        vote_average: Some(6.5),
        poster_path: poster.map(str::to_string),
        ..Default::default()
    }
}

/// Renders one frame and returns the screen as text, one line per row.
fn render(app: &mut App) -> String {
    render_sized(app, 140, 40)
}

fn render_sized(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::ui(f, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn first_frame_shows_search_and_genres() {
    let mut app = make_app("first");
    app.startup("Action");
    let screen = render(&mut app);
    assert!(screen.contains("Movie Search"));
    assert!(screen.contains("Science Fiction"));
    assert!(screen.contains("Loading..."));
    assert!(screen.contains("Select a movie to see its details."));
    assert!(app.genre_hitboxes.len() > 1);
}

#[test]
fn results_show_titles_and_placeholder_poster() {
    let mut app = make_app("results");
    app.apply(AsyncAction::MoviesLoaded(BackendReply::Movies(vec![
        make_movie(1, "Arrival", Some("/arrival.jpg")),
        make_movie(2, "Sicario", None),
    ])));
    let screen = render(&mut app);
    assert!(screen.contains("Arrival"));
    assert!(screen.contains("Sicario"));
    assert!(screen.contains(CARD_PLACEHOLDER));
}

#[test]
fn hero_panel_reflects_featured_movie() {
    let mut app = make_app("hero");
    app.display_movies(vec![make_movie(1, "Arrival", None)]);
    app.show_movie_details(0);
    let screen = render(&mut app);
    assert!(screen.contains("120 min"));
    assert!(screen.contains("6.5/10"));
    assert!(screen.contains("Overview of Arrival"));
}

#[test]
fn dropdown_is_drawn_and_recorded() {
    let mut app = make_app("dropdown");
    app.apply(AsyncAction::CatalogLoaded(vec!["Arrival".into(), "Arrival II".into()]));
    app.type_char('a');
    app.type_char('r');
    let screen = render(&mut app);
    assert!(screen.contains("Suggestions"));
    assert_eq!(app.area_dropdown.height, 4);
    assert_eq!(app.area_dropdown.y, app.area_search.y + app.area_search.height);
}

#[test]
fn alert_popup_renders_over_everything() {
    let mut app = make_app("alert");
    app.add_to_list();
    let screen = render(&mut app);
    assert!(screen.contains("Please select a movie first."));
    assert!(screen.contains("Press any key"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut app = make_app("tiny");
    app.display_movies(vec![make_movie(1, "Arrival", None)]);
    app.show_movie_details(0);
    app.alert = Some("hello".into());
    let backend = TestBackend::new(20, 6);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::ui(f, &mut app)).unwrap();
}

#[test]
fn clicks_below_the_last_drawn_card_select_nothing() {
    let mut app = make_app("hidden-card");
    let movies: Vec<_> = (1..=10).map(|i| make_movie(i, &format!("Movie {i}"), None)).collect();
    app.display_movies(movies);
    render_sized(&mut app, 80, 14);

    let area = app.area_results;
    let now = Instant::now();
    // bottom border, then the blank row left under the last whole card
    assert_eq!(handle_mouse_event(&mut app, click(area.x + 5, area.bottom() - 1), now), None);
    assert_eq!(handle_mouse_event(&mut app, click(area.x + 5, area.bottom() - 2), now), None);
    assert_eq!(app.featured, None);

    // second card starts on the third inner row
    handle_mouse_event(&mut app, click(area.x + 5, area.y + 3), now);
    assert_eq!(app.featured.as_ref().map(|m| m.movie_id), Some(2));
}

#[test]
fn clipped_dropdown_click_follows_scroll() {
    let mut app = make_app("clipped-dropdown");
    app.apply(AsyncAction::CatalogLoaded((0..10).map(|i| format!("Saw {i}")).collect()));
    app.type_char('s');
    for _ in 0..6 {
        app.autocomplete.next();
    }
    // three suggestion rows fit, so the list scrolls to keep "Saw 5" in view
    render_sized(&mut app, 80, 8);
    assert_eq!(app.area_dropdown.height, 5);

    let top_row = app.area_dropdown.y + 1;
    let task = handle_mouse_event(&mut app, click(4, top_row), Instant::now());
    assert_eq!(task, Some(Task::Recommend("Saw 3".into())));
}
