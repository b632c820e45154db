use crate::api::{BackendClient, BackendReply, TrailerClient};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Network work requested by the UI. Runs off the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Recommend(String),
    Genre(String),
    Catalog,
    /// `featured_title` is set when the request came from the hero panel.
    Trailer {
        movie_id: u64,
        featured_title: Option<String>,
    },
}

/// Results posted back to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncAction {
    MoviesLoaded(BackendReply),
    MoviesFailed(String),
    CatalogLoaded(Vec<String>),
    CatalogFailed(String),
    TrailerFound(String),
    TrailerMissing { featured_title: Option<String> },
    TrailerFailed(String),
}

#[derive(Clone)]
pub struct Clients {
    pub backend: BackendClient,
    pub trailer: TrailerClient,
}

impl Task {
    pub async fn run(self, clients: &Clients) -> AsyncAction {
        match self {
            Task::Recommend(title) => match clients.backend.recommend(&title).await {
                Ok(reply) => {
                    info!(title = %title, "recommendations received");
                    AsyncAction::MoviesLoaded(reply)
                }
                Err(e) => {
                    error!("Error in recommend for '{}': {}", title, e);
                    AsyncAction::MoviesFailed(e.to_string())
                }
            },
            Task::Genre(genre) => match clients.backend.movies_by_genre(&genre).await {
                Ok(reply) => {
                    info!(genre = %genre, "genre listing received");
                    AsyncAction::MoviesLoaded(reply)
                }
                Err(e) => {
                    error!("Error in movies_by_genre for '{}': {}", genre, e);
                    AsyncAction::MoviesFailed(e.to_string())
                }
            },
            Task::Catalog => match clients.backend.catalog().await {
                Ok(titles) => {
                    info!(count = titles.len(), "title catalog loaded");
                    AsyncAction::CatalogLoaded(titles)
                }
                Err(e) => {
                    error!("Error loading title catalog: {}", e);
                    AsyncAction::CatalogFailed(e.to_string())
                }
            },
            Task::Trailer { movie_id, featured_title } => {
                match clients.trailer.find_trailer(movie_id).await {
                    Ok(Some(url)) => {
                        info!(movie_id, url = %url, "trailer found");
                        AsyncAction::TrailerFound(url)
                    }
                    Ok(None) => {
                        info!(movie_id, "no trailer found");
                        AsyncAction::TrailerMissing { featured_title }
                    }
                    Err(e) => {
                        error!("Error fetching trailer for {}: {}", movie_id, e);
                        AsyncAction::TrailerFailed(e.to_string())
                    }
                }
            }
        }
    }
}

/// Runs `task` on the runtime and posts its outcome to `tx`. Nothing is
/// cancelled: outcomes arrive in completion order.
pub fn spawn_task(task: Task, clients: &Clients, tx: &mpsc::Sender<AsyncAction>) {
    let clients = clients.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let action = task.run(&clients).await;
        let _ = tx.send(action).await;
    });
}
