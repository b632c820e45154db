use crate::api::{BackendReply, MovieRecord};
use crate::autocomplete::Autocomplete;
use crate::cards::{MovieCard, build_cards};
use crate::hero::Hero;
use crate::tasks::{AsyncAction, Task};
use crate::watchlist::{AddOutcome, WatchList};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::Instant;
use tracing::{debug, error, info};

pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Drama",
    "Fantasy",
    "Horror",
    "Romance",
    "Science Fiction",
    "Thriller",
];

pub const MSG_ENTER_TITLE: &str = "Please enter a movie title.";
pub const MSG_LOAD_FAILED: &str = "Error loading movies.";
pub const MSG_WATCH_LIST_EMPTY: &str = "Your watch list is empty.";
pub const MSG_SELECT_FIRST: &str = "Please select a movie first.";
pub const MSG_NO_TRAILER: &str = "No trailer available for this movie.";
pub const MSG_TRAILER_FAILED: &str = "Error loading trailer. Check the log for details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Genres,
    Results,
}

/// What the results area currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Loading,
    Message(String),
    Movies,
}

/// Side effects the event loop performs for the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    OpenUrl(String),
}

pub struct App {
    pub focus: Focus,
    pub search_query: String,
    pub autocomplete: Autocomplete,

    pub genre_index: usize,

    pub results: Vec<MovieRecord>,
    pub cards: Vec<MovieCard>,
    pub results_view: ResultsView,
    pub results_title: String,
    pub results_state: ListState,

    pub featured: Option<MovieRecord>,
    pub hero: Option<Hero>,

    pub watch_list: WatchList,

    pub alert: Option<String>,
    pub status_message: String,
    pub tick: usize,
    pub should_quit: bool,

    // Hit areas from the last draw, for mouse handling
    pub area_search: Rect,
    pub area_dropdown: Rect,
    pub area_genres: Rect,
    pub area_results: Rect,
    pub genre_hitboxes: Vec<(u16, u16)>,
    pub last_click: Option<(usize, Instant)>,
}

impl App {
    pub fn new(watch_list: WatchList) -> Self {
        Self {
            focus: Focus::Search,
            search_query: String::new(),
            autocomplete: Autocomplete::default(),
            genre_index: 0,
            results: Vec::new(),
            cards: Vec::new(),
            results_view: ResultsView::Message(String::new()),
            results_title: String::from("Results"),
            results_state: ListState::default(),
            featured: None,
            hero: None,
            watch_list,
            alert: None,
            status_message: String::from(
                "Type a title and press Enter. Tab switches panes, Ctrl+C quits.",
            ),
            tick: 0,
            should_quit: false,
            area_search: Rect::default(),
            area_dropdown: Rect::default(),
            area_genres: Rect::default(),
            area_results: Rect::default(),
            genre_hitboxes: Vec::new(),
            last_click: None,
        }
    }

    /// Work to kick off once the terminal is up.
    pub fn startup(&mut self, initial_genre: &str) -> Vec<Task> {
        if let Some(i) = GENRES.iter().position(|g| g.eq_ignore_ascii_case(initial_genre)) {
            self.genre_index = i;
        }
        vec![self.get_movies_by_genre(initial_genre), Task::Catalog]
    }

    /// Recommendations for the typed title. A blank title only prompts.
    pub fn get_recommendations(&mut self) -> Option<Task> {
        let title = self.search_query.trim().to_string();
        if title.is_empty() {
            self.results_view = ResultsView::Message(MSG_ENTER_TITLE.to_string());
            return None;
        }
        self.results_view = ResultsView::Loading;
        self.results_title = format!("Because you searched \"{}\"", title);
        self.status_message = format!("Finding movies like \"{}\"...", title);
        Some(Task::Recommend(title))
    }

    pub fn get_movies_by_genre(&mut self, genre: &str) -> Task {
        self.results_view = ResultsView::Loading;
        self.results_title = format!("{} movies", genre);
        self.status_message = format!("Loading {} movies...", genre);
        Task::Genre(genre.to_string())
    }

    pub fn selected_genre(&self) -> &'static str {
        GENRES[self.genre_index.min(GENRES.len() - 1)]
    }

    pub fn next_genre(&mut self) {
        self.genre_index = (self.genre_index + 1) % GENRES.len();
    }

    pub fn previous_genre(&mut self) {
        self.genre_index = match self.genre_index {
            0 => GENRES.len() - 1,
            i => i - 1,
        };
    }

    /// Replaces whatever the results area showed with `movies`.
    pub fn display_movies(&mut self, movies: Vec<MovieRecord>) {
        self.cards = build_cards(&movies);
        self.results = movies;
        self.results_view = ResultsView::Movies;
        self.last_click = None;
        self.results_state = ListState::default();
        if !self.results.is_empty() {
            self.results_state.select(Some(0));
        }
    }

    pub fn show_movie_details(&mut self, index: usize) {
        let Some(movie) = self.results.get(index).cloned() else {
            return;
        };
        debug!(movie_id = movie.movie_id, "featuring movie");
        self.results_state.select(Some(index));
        self.hero = Some(Hero::from_movie(&movie));
        self.status_message = format!(
            "Featuring {}. p plays the trailer, a adds to your watch list.",
            movie.display_title()
        );
        self.featured = Some(movie);
    }

    /// Trailer for a result card, skipping the hero panel.
    pub fn play_trailer(&mut self, index: usize) -> Option<Task> {
        let movie = self.results.get(index)?;
        self.status_message = format!("Looking up trailer for {}...", movie.display_title());
        Some(Task::Trailer {
            movie_id: movie.movie_id,
            featured_title: None,
        })
    }

    /// Trailer for the featured movie.
    pub fn play_featured(&mut self) -> Option<Task> {
        let Some(movie) = &self.featured else {
            info!("No movie selected for play_featured");
            self.alert = Some(MSG_SELECT_FIRST.to_string());
            return None;
        };
        self.status_message = format!("Looking up trailer for {}...", movie.display_title());
        Some(Task::Trailer {
            movie_id: movie.movie_id,
            featured_title: Some(movie.display_title().to_string()),
        })
    }

    pub fn add_to_list(&mut self) {
        let Some(movie) = self.featured.clone() else {
            self.alert = Some(MSG_SELECT_FIRST.to_string());
            return;
        };
        let title = movie.display_title();
        self.alert = Some(match self.watch_list.add(&movie) {
            Ok(AddOutcome::Added) => {
                info!(
                    movie_id = movie.movie_id,
                    count = self.watch_list.len(),
                    "added to watch list"
                );
                format!("{} added to your watch list!", title)
            }
            Ok(AddOutcome::AlreadyListed) => format!("{} is already in your watch list!", title),
            Err(e) => {
                error!("Error saving watch list: {:#}", e);
                format!("{} added, but the watch list could not be saved.", title)
            }
        });
    }

    pub fn show_watch_list(&mut self) {
        self.results_title = format!("Watch list ({})", self.watch_list.len());
        if self.watch_list.is_empty() {
            self.results_view = ResultsView::Message(MSG_WATCH_LIST_EMPTY.to_string());
            return;
        }
        let movies = self.watch_list.entries().to_vec();
        self.display_movies(movies);
    }

    pub fn type_char(&mut self, c: char) {
        self.search_query.push(c);
        self.autocomplete.update(&self.search_query);
    }

    pub fn backspace(&mut self) {
        self.search_query.pop();
        self.autocomplete.update(&self.search_query);
    }

    /// Fills the search box with `title` and searches for it.
    pub fn pick_suggestion(&mut self, title: &str) -> Option<Task> {
        self.search_query = title.to_string();
        self.autocomplete.clear();
        self.get_recommendations()
    }

    pub fn dismiss_alert(&mut self) -> bool {
        self.alert.take().is_some()
    }

    /// Folds a finished network task into the state.
    pub fn apply(&mut self, action: AsyncAction) -> Option<Effect> {
        match action {
            AsyncAction::MoviesLoaded(BackendReply::Movies(movies)) => {
                self.status_message = format!(
                    "{} movies. Enter shows details, t plays the trailer.",
                    movies.len()
                );
                self.display_movies(movies);
            }
            AsyncAction::MoviesLoaded(BackendReply::Failure { error }) => {
                self.status_message = String::from("The backend reported an error.");
                self.results_view = ResultsView::Message(error);
            }
            AsyncAction::MoviesFailed(reason) => {
                self.status_message = format!("Request failed: {}", reason);
                self.results_view = ResultsView::Message(MSG_LOAD_FAILED.to_string());
            }
            AsyncAction::CatalogLoaded(titles) => {
                self.autocomplete.set_catalog(titles);
            }
            AsyncAction::CatalogFailed(reason) => {
                self.status_message = format!("Title suggestions are unavailable: {}", reason);
            }
            AsyncAction::TrailerFound(url) => {
                self.status_message = String::from("Opening trailer in your browser...");
                return Some(Effect::OpenUrl(url));
            }
            AsyncAction::TrailerMissing { featured_title } => {
                self.alert = Some(match featured_title {
                    Some(title) => format!("No trailer available for \"{}\"", title),
                    None => MSG_NO_TRAILER.to_string(),
                });
            }
            AsyncAction::TrailerFailed(reason) => {
                self.status_message = format!("Trailer lookup failed: {}", reason);
                self.alert = Some(MSG_TRAILER_FAILED.to_string());
            }
        }
        None
    }
}
