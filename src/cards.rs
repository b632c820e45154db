use crate::api::MovieRecord;

pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const CARD_PLACEHOLDER: &str = "https://via.placeholder.com/150x225?text=No+Poster";

/// What the results grid shows for one movie.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub movie_id: u64,
    pub title: String,
    pub poster_url: String,
    pub alt: String,
    pub match_percent: Option<f64>,
}

pub fn poster_url(movie: &MovieRecord) -> Option<String> {
    movie
        .poster_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", POSTER_BASE, p))
}

pub fn build_card(movie: &MovieRecord) -> MovieCard {
    MovieCard {
        movie_id: movie.movie_id,
        title: movie.display_title().to_string(),
        poster_url: poster_url(movie).unwrap_or_else(|| CARD_PLACEHOLDER.to_string()),
        alt: movie
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Movie Poster".to_string()),
        match_percent: movie.similarity_score,
    }
}

pub fn build_cards(movies: &[MovieRecord]) -> Vec<MovieCard> {
    movies.iter().map(build_card).collect()
}
