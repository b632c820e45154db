use crate::api::MovieRecord;
use crate::cards::poster_url;

pub const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/w1280";
pub const HERO_PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Poster";

/// The featured-movie banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub title: String,
    pub overview: String,
    pub duration: String,
    pub rating: String,
    pub backdrop_url: Option<String>,
    pub poster_url: String,
    pub poster_alt: String,
    pub genres: Option<String>,
    pub cast: Option<String>,
}

impl Hero {
    pub fn from_movie(movie: &MovieRecord) -> Self {
        let title = movie.display_title().to_string();

        let overview = movie
            .overview
            .clone()
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| "No summary available.".to_string());

        // zero is treated the same as missing
        let duration = match movie.runtime {
            Some(r) if r > 0.0 => format!("{} min", format_number(r)),
            _ => "Duration: N/A".to_string(),
        };
        let rating = match movie.vote_average {
            Some(v) if v > 0.0 => format!("{}/10", format_number(v)),
            _ => "Rating: N/A".to_string(),
        };

        let backdrop_url = movie
            .backdrop_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", BACKDROP_BASE, p));

        let (poster_url, poster_alt) = match poster_url(movie) {
            Some(url) => (url, title.clone()),
            None => (HERO_PLACEHOLDER.to_string(), "No Poster Available".to_string()),
        };

        Self {
            title,
            overview,
            duration,
            rating,
            backdrop_url,
            poster_url,
            poster_alt,
            genres: movie.genres.clone().filter(|g| !g.is_empty()),
            cast: movie.cast.clone().filter(|c| !c.is_empty()),
        }
    }
}

// 162.0 -> "162", 7.25 -> "7.25"
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_record() {
        let movie = MovieRecord {
            movie_id: 603,
            title: Some("The Matrix".into()),
            overview: Some("A hacker learns the truth.".into()),
            runtime: Some(136.0),
            vote_average: Some(7.9),
            poster_path: Some("/matrix.jpg".into()),
            backdrop_path: Some("/matrix_bg.jpg".into()),
            genres: Some("Action Science Fiction".into()),
            ..Default::default()
        };
        let hero = Hero::from_movie(&movie);
        assert_eq!(hero.title, "The Matrix");
        assert_eq!(hero.duration, "136 min");
        assert_eq!(hero.rating, "7.9/10");
        assert_eq!(
            hero.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/matrix_bg.jpg")
        );
        assert_eq!(hero.poster_url, "https://image.tmdb.org/t/p/w500/matrix.jpg");
        assert_eq!(hero.poster_alt, "The Matrix");
        assert_eq!(hero.genres.as_deref(), Some("Action Science Fiction"));
        assert_eq!(hero.cast, None);
    }

    #[test]
    fn bare_record_gets_fallbacks() {
        let hero = Hero::from_movie(&MovieRecord { movie_id: 1, ..Default::default() });
        assert_eq!(hero.title, "Unknown Title");
        assert_eq!(hero.overview, "No summary available.");
        assert_eq!(hero.duration, "Duration: N/A");
        assert_eq!(hero.rating, "Rating: N/A");
        assert_eq!(hero.backdrop_url, None);
        assert_eq!(hero.poster_url, HERO_PLACEHOLDER);
        assert_eq!(hero.poster_alt, "No Poster Available");
    }

    #[test]
    fn zero_rating_and_runtime_read_as_missing() {
        let movie = MovieRecord {
            movie_id: 2,
            runtime: Some(0.0),
            vote_average: Some(0.0),
            ..Default::default()
        };
        let hero = Hero::from_movie(&movie);
        assert_eq!(hero.duration, "Duration: N/A");
        assert_eq!(hero.rating, "Rating: N/A");
    }
}
