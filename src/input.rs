use crate::app::{App, Focus};
use crate::tasks::Task;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// Lines each result card takes in the list.
pub const CARD_HEIGHT: u16 = 2;
pub const DOUBLE_CLICK: Duration = Duration::from_millis(400);

fn hit(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.right() && y >= area.y && y < area.bottom()
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Task> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }
    // An open alert swallows the next key
    if app.dismiss_alert() {
        return None;
    }

    match app.focus {
        Focus::Search => match key.code {
            KeyCode::Char(c) => {
                app.type_char(c);
                None
            }
            KeyCode::Backspace => {
                app.backspace();
                None
            }
            KeyCode::Down => {
                app.autocomplete.next();
                None
            }
            KeyCode::Up => {
                app.autocomplete.previous();
                None
            }
            KeyCode::Enter => {
                if let Some(title) = app.autocomplete.highlighted().map(str::to_string) {
                    return app.pick_suggestion(&title);
                }
                app.autocomplete.hide();
                app.get_recommendations()
            }
            KeyCode::Tab => {
                app.autocomplete.hide();
                app.focus = Focus::Genres;
                None
            }
            KeyCode::BackTab => {
                app.autocomplete.hide();
                app.focus = Focus::Results;
                None
            }
            KeyCode::Esc => {
                if app.autocomplete.visible {
                    app.autocomplete.hide();
                } else {
                    app.should_quit = true;
                }
                None
            }
            _ => None,
        },
        Focus::Genres => match key.code {
            KeyCode::Left => {
                app.previous_genre();
                None
            }
            KeyCode::Right => {
                app.next_genre();
                None
            }
            KeyCode::Enter => {
                let genre = app.selected_genre();
                Some(app.get_movies_by_genre(genre))
            }
            KeyCode::Tab => {
                app.focus = Focus::Results;
                None
            }
            KeyCode::BackTab | KeyCode::Esc => {
                app.focus = Focus::Search;
                None
            }
            code => handle_shortcut(app, code),
        },
        Focus::Results => match key.code {
            KeyCode::Up => {
                if !app.cards.is_empty() {
                    let i = match app.results_state.selected() {
                        Some(0) => app.cards.len() - 1,
                        Some(i) => i - 1,
                        None => 0,
                    };
                    app.results_state.select(Some(i));
                }
                None
            }
            KeyCode::Down => {
                if !app.cards.is_empty() {
                    let i = match app.results_state.selected() {
                        Some(i) if i + 1 < app.cards.len() => i + 1,
                        _ => 0,
                    };
                    app.results_state.select(Some(i));
                }
                None
            }
            KeyCode::Enter => {
                if let Some(i) = app.results_state.selected() {
                    app.show_movie_details(i);
                }
                None
            }
            KeyCode::Char('t') => app.results_state.selected().and_then(|i| app.play_trailer(i)),
            KeyCode::Tab | KeyCode::Esc => {
                app.focus = Focus::Search;
                None
            }
            KeyCode::BackTab => {
                app.focus = Focus::Genres;
                None
            }
            code => handle_shortcut(app, code),
        },
    }
}

// Letter commands, available whenever the search box isn't taking text.
fn handle_shortcut(app: &mut App, code: KeyCode) -> Option<Task> {
    match code {
        KeyCode::Char('p') => app.play_featured(),
        KeyCode::Char('a') => {
            app.add_to_list();
            None
        }
        KeyCode::Char('w') => {
            app.show_watch_list();
            app.focus = Focus::Results;
            None
        }
        KeyCode::Char('/') => {
            app.focus = Focus::Search;
            None
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        _ => None,
    }
}

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, now: Instant) -> Option<Task> {
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return None;
    };
    if app.dismiss_alert() {
        return None;
    }
    let (x, y) = (mouse.column, mouse.row);

    if app.autocomplete.visible && hit(app.area_dropdown, x, y) {
        let inner_top = app.area_dropdown.y + 1;
        let inner_bottom = app.area_dropdown.bottom().saturating_sub(1);
        if y >= inner_top && y < inner_bottom {
            let row = app.autocomplete.list_state.offset() + (y - inner_top) as usize;
            if let Some(title) = app.autocomplete.suggestions().get(row).cloned() {
                return app.pick_suggestion(&title);
            }
        }
        return None;
    }

    // Anything outside the search box and dropdown closes the dropdown
    if !hit(app.area_search, x, y) {
        app.autocomplete.hide();
    }

    if hit(app.area_search, x, y) {
        app.focus = Focus::Search;
        return None;
    }

    if hit(app.area_genres, x, y) {
        app.focus = Focus::Genres;
        let picked = app
            .genre_hitboxes
            .iter()
            .position(|&(start, end)| x >= start && x < end);
        if let Some(i) = picked {
            app.genre_index = i;
            let genre = app.selected_genre();
            return Some(app.get_movies_by_genre(genre));
        }
        return None;
    }

    if hit(app.area_results, x, y) {
        app.focus = Focus::Results;
        let area = app.area_results;
        let inner_top = area.y + 1;
        let inner_bottom = area.bottom().saturating_sub(1);
        let on_border = x == area.x || x + 1 >= area.right();
        if on_border || y < inner_top || y >= inner_bottom || app.cards.is_empty() {
            return None;
        }

        // Only whole cards are drawn; the rows under the last one are blank
        let visible = ((inner_bottom - inner_top) / CARD_HEIGHT) as usize;
        let row = ((y - inner_top) / CARD_HEIGHT) as usize;
        if row >= visible {
            return None;
        }
        let index = app.results_state.offset() + row;
        if index >= app.cards.len() {
            return None;
        }

        let is_double = matches!(
            app.last_click,
            Some((last, at)) if last == index && now.duration_since(at) <= DOUBLE_CLICK
        );
        if is_double {
            app.last_click = None;
            return app.play_trailer(index);
        }
        app.last_click = Some((index, now));
        app.show_movie_details(index);
    }
    None
}
