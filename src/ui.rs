use crate::app::{App, Focus, GENRES, ResultsView};
use crate::input::CARD_HEIGHT;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn border_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Search box
                Constraint::Length(3), // Genre bar
                Constraint::Min(1),    // Hero + results
                Constraint::Length(1), // Status bar
            ]
            .as_ref(),
        )
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
        .split(chunks[2]);

    app.area_search = chunks[0];
    app.area_genres = chunks[1];
    app.area_results = body[1];

    draw_search(f, app, chunks[0]);
    draw_genres(f, app, chunks[1]);
    draw_hero(f, app, body[0]);
    draw_results(f, app, body[1]);

    let status =
        Paragraph::new(app.status_message.as_str()).style(Style::default().fg(Color::Gray));
    f.render_widget(status, chunks[3]);

    // Overlays last so they sit on top
    draw_dropdown(f, app, chunks[0]);
    if let Some(message) = app.alert.clone() {
        draw_alert(f, &message);
    }
}

fn draw_search(f: &mut Frame, app: &App, area: Rect) {
    let search_text = format!("Search: {}", app.search_query);
    let search_block = Paragraph::new(search_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(app.focus == Focus::Search))
            .title("Movie Search"),
    );
    f.render_widget(search_block, area);

    if app.focus == Focus::Search && app.alert.is_none() {
        let typed = u16::try_from(app.search_query.chars().count()).unwrap_or(u16::MAX);
        let cursor_x = area.x.saturating_add(1 + "Search: ".len() as u16).saturating_add(typed);
        f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_genres(f: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = Vec::with_capacity(GENRES.len() * 2);
    let mut hitboxes = Vec::with_capacity(GENRES.len());
    let mut x = area.x + 1;

    for (i, genre) in GENRES.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            x += 1;
        }
        let label = format!(" {} ", genre);
        let width = label.chars().count() as u16;
        let style = if i == app.genre_index {
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        hitboxes.push((x, x + width));
        x += width;
        spans.push(Span::styled(label, style));
    }
    app.genre_hitboxes = hitboxes;

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(app.focus == Focus::Genres))
            .title("Genres"),
    );
    f.render_widget(bar, area);
}

fn draw_hero(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Featured");

    let Some(hero) = &app.hero else {
        let empty = Paragraph::new("Select a movie to see its details.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            hero.title.clone(),
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow),
        )),
        Line::from(format!("{}   {}", hero.duration, hero.rating)),
    ];
    if let Some(genres) = &hero.genres {
        lines.push(Line::from(vec![Span::styled("Genres: ", label), Span::raw(genres.clone())]));
    }
    if let Some(cast) = &hero.cast {
        lines.push(Line::from(vec![Span::styled("Cast: ", label), Span::raw(cast.clone())]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(hero.overview.clone()));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Poster: ", label),
        Span::raw(hero.poster_url.clone()),
    ]));
    if let Some(backdrop) = &hero.backdrop_url {
        lines.push(Line::from(vec![
            Span::styled("Backdrop: ", label),
            Span::raw(backdrop.clone()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("p trailer · a add to watch list · w watch list", label)));

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(panel, area);
}

fn draw_results(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app.focus == Focus::Results))
        .title(app.results_title.clone());

    match &app.results_view {
        ResultsView::Loading => {
            let frame = SPINNER[app.tick % SPINNER.len()];
            let loading = Paragraph::new(format!("{} Loading...", frame)).block(block);
            f.render_widget(loading, area);
        }
        ResultsView::Message(message) => {
            let message = Paragraph::new(message.as_str()).wrap(Wrap { trim: true }).block(block);
            f.render_widget(message, area);
        }
        ResultsView::Movies => {
            let items: Vec<ListItem> = app
                .cards
                .iter()
                .map(|card| {
                    let mut title = vec![Span::raw(card.title.clone())];
                    if let Some(score) = card.match_percent {
                        title.push(Span::styled(
                            format!("  {:.0}% match", score),
                            Style::default().fg(Color::Green),
                        ));
                    }
                    let mut lines = vec![
                        Line::from(title),
                        Line::from(Span::styled(
                            format!("   {}", card.poster_url),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ];
                    lines.truncate(CARD_HEIGHT as usize);
                    ListItem::new(lines)
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, area, &mut app.results_state);
        }
    }
}

fn draw_dropdown(f: &mut Frame, app: &mut App, search_area: Rect) {
    if !app.autocomplete.visible {
        app.area_dropdown = Rect::default();
        return;
    }

    let frame_area = f.area();
    let below = search_area.y + search_area.height;
    let wanted = app.autocomplete.suggestions().len() as u16 + 2;
    let height = wanted.min(frame_area.height.saturating_sub(below));
    let area = Rect::new(search_area.x, below, search_area.width, height);
    app.area_dropdown = area;

    let items: Vec<ListItem> = app
        .autocomplete
        .suggestions()
        .iter()
        .map(|title| ListItem::new(title.clone()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Suggestions"))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut app.autocomplete.list_state);
}

fn draw_alert(f: &mut Frame, message: &str) {
    let area = centered_rect(60, 7, f.area());
    let popup = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press any key", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title("Notice"),
    );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let width = (u32::from(r.width) * u32::from(percent_x) / 100) as u16;
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}
