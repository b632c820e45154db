use crate::errors::ClientError;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_TMDB_URL: &str = "https://api.themoviedb.org/3";
const YOUTUBE_WATCH: &str = "https://www.youtube.com/watch?v=";

/// One film as the recommendation backend returns it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct MovieRecord {
    pub movie_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
}

impl MovieRecord {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "Unknown Title",
        }
    }
}

/// The backend answers with either a movie list or `{"error": "..."}`,
/// whatever the HTTP status.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum BackendReply {
    Movies(Vec<MovieRecord>),
    Failure { error: String },
}

#[derive(Debug, Deserialize, Clone)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Video {
    #[serde(rename = "type")]
    pub video_type: String,
    pub site: String,
    pub key: String,
}

/// First YouTube trailer in the list, as a watch URL.
pub fn select_trailer(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
        .map(|v| format!("{}{}", YOUTUBE_WATCH, v.key))
}

fn build_http_client() -> Result<reqwest::Client, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("marquee/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| ClientError::network("client builder", e))
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<(u16, String), ClientError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| ClientError::network(url, e))?;
    let status = resp.status().as_u16();
    let text = resp.text().await.map_err(|e| ClientError::network(url, e))?;
    Ok((status, text))
}

fn parse<T: DeserializeOwned>(url: &str, text: &str) -> Result<T, ClientError> {
    serde_json::from_str(text).map_err(|e| ClientError::parse(url, e))
}

/// Client for the local recommendation backend.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn recommend(&self, title: &str) -> Result<BackendReply, ClientError> {
        let url = format!("{}/recommend?title={}", self.base_url, urlencoding::encode(title));
        self.get_reply(&url).await
    }

    pub async fn movies_by_genre(&self, genre: &str) -> Result<BackendReply, ClientError> {
        let url = format!("{}/movies/genre?genre={}", self.base_url, urlencoding::encode(genre));
        self.get_reply(&url).await
    }

    /// Every title the backend knows, for autocomplete.
    pub async fn catalog(&self) -> Result<Vec<String>, ClientError> {
        let url = format!("{}/movies", self.base_url);
        let (status, text) = fetch_text(&self.client, &url).await?;
        if !(200..300).contains(&status) {
            return Err(ClientError::status(&url, status));
        }
        parse(&url, &text)
    }

    // Error bodies come back with 400/404 and still carry the message we show.
    async fn get_reply(&self, url: &str) -> Result<BackendReply, ClientError> {
        let (status, text) = fetch_text(&self.client, url).await?;
        debug!(url, status, "backend replied");
        parse(url, &text)
    }
}

/// Client for TMDB video metadata.
#[derive(Clone)]
pub struct TrailerClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TrailerClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub async fn videos(&self, movie_id: u64) -> Result<VideoList, ClientError> {
        let api_key = self.api_key.as_deref().ok_or(ClientError::MissingApiKey)?;
        let url = format!(
            "{}/movie/{}/videos?api_key={}&language=en-US",
            self.base_url,
            movie_id,
            urlencoding::encode(api_key)
        );
        let (status, text) = fetch_text(&self.client, &url).await?;
        debug!(movie_id, status, "tmdb videos replied");
        if !(200..300).contains(&status) {
            return Err(ClientError::status(&url, status));
        }
        parse(&url, &text)
    }

    /// Watch URL of the movie's first YouTube trailer, if it has one.
    pub async fn find_trailer(&self, movie_id: u64) -> Result<Option<String>, ClientError> {
        let list = self.videos(movie_id).await?;
        Ok(select_trailer(&list.results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(video_type: &str, site: &str, key: &str) -> Video {
        Video {
            video_type: video_type.to_string(),
            site: site.to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn picks_first_youtube_trailer() {
        let videos = vec![
            video("Teaser", "YouTube", "teaser"),
            video("Trailer", "Vimeo", "vimeo"),
            video("Trailer", "YouTube", "first"),
            video("Trailer", "YouTube", "second"),
        ];
        assert_eq!(
            select_trailer(&videos).as_deref(),
            Some("https://www.youtube.com/watch?v=first")
        );
    }

    #[test]
    fn no_matching_video_means_no_trailer() {
        let videos = vec![video("Teaser", "YouTube", "a"), video("Trailer", "Vimeo", "b")];
        assert_eq!(select_trailer(&videos), None);
        assert_eq!(select_trailer(&[]), None);
    }

    #[test]
    fn backend_error_body_parses_as_failure() {
        let reply: BackendReply = serde_json::from_str(r#"{"error": "Movie not found"}"#).unwrap();
        assert_eq!(reply, BackendReply::Failure { error: "Movie not found".into() });
    }

    #[test]
    fn backend_movie_list_keeps_order_and_optionals() {
        let body = r#"[
            {"movie_id": 19995, "title": "Avatar", "genres": "Action Adventure",
             "cast": "Sam Worthington", "vote_average": 7.2,
             "overview": "In the 22nd century...", "runtime": 162.0,
             "poster_path": "/avatar.jpg", "backdrop_path": "/avatar_bg.jpg",
             "similarity_score": 81.5},
            {"movie_id": 285, "title": "Pirates", "runtime": null, "poster_path": null}
        ]"#;
        let BackendReply::Movies(movies) = serde_json::from_str(body).unwrap() else {
            panic!("expected movie list");
        };
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].movie_id, 19995);
        assert_eq!(movies[0].runtime, Some(162.0));
        assert_eq!(movies[1].display_title(), "Pirates");
        assert_eq!(movies[1].runtime, None);
        assert_eq!(movies[1].poster_path, None);
    }

    #[test]
    fn record_round_trip_skips_absent_fields() {
        let movie = MovieRecord {
            movie_id: 7,
            title: Some("Heat".into()),
            ..Default::default()
        };
        let text = serde_json::to_string(&movie).unwrap();
        assert_eq!(text, r#"{"movie_id":7,"title":"Heat"}"#);
    }

    #[test]
    fn untitled_record_falls_back() {
        assert_eq!(MovieRecord::default().display_title(), "Unknown Title");
    }
}
