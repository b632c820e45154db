use crate::api::MovieRecord;
use crate::storage::LocalStorage;
use anyhow::{Context, Result};
use tracing::{info, warn};

pub const WATCH_LIST_KEY: &str = "watchList";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyListed,
}

/// Movies the user saved, unique by `movie_id`, in the order they were added.
#[derive(Debug, Clone)]
pub struct WatchList {
    entries: Vec<MovieRecord>,
    storage: LocalStorage,
}

impl WatchList {
    /// Loads the stored list. A missing or unreadable entry starts empty.
    pub fn load(storage: LocalStorage) -> Self {
        let entries = match storage.get_item(WATCH_LIST_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<MovieRecord>>(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Stored watch list is not valid JSON, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read local storage, starting empty: {:#}", e);
                Vec::new()
            }
        };
        info!(count = entries.len(), "Watch list loaded");
        Self { entries, storage }
    }

    pub fn entries(&self) -> &[MovieRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, movie_id: u64) -> bool {
        self.entries.iter().any(|m| m.movie_id == movie_id)
    }

    /// Appends `movie` unless its id is already listed, then persists.
    pub fn add(&mut self, movie: &MovieRecord) -> Result<AddOutcome> {
        if self.contains(movie.movie_id) {
            return Ok(AddOutcome::AlreadyListed);
        }
        self.entries.push(movie.clone());
        self.save()?;
        Ok(AddOutcome::Added)
    }

    fn save(&self) -> Result<()> {
        let text = serde_json::to_string(&self.entries)?;
        self.storage
            .set_item(WATCH_LIST_KEY, &text)
            .context("Failed to persist watch list")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::scratch_dir;

    fn movie(id: u64, title: &str) -> MovieRecord {
        MovieRecord {
            movie_id: id,
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn duplicate_add_leaves_list_unchanged() {
        let dir = scratch_dir("watch-dup");
        let mut list = WatchList::load(LocalStorage::in_dir(&dir));

        assert_eq!(list.add(&movie(10, "Up")).unwrap(), AddOutcome::Added);
        let renamed = movie(10, "Up (re-release)");
        assert_eq!(list.add(&renamed).unwrap(), AddOutcome::AlreadyListed);

        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].display_title(), "Up");
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn reload_restores_same_ids_in_order() {
        let dir = scratch_dir("watch-reload");
        let mut list = WatchList::load(LocalStorage::in_dir(&dir));
        for (id, title) in [(3, "Jaws"), (1, "Rocky"), (2, "Alien")] {
            list.add(&movie(id, title)).unwrap();
        }

        let reloaded = WatchList::load(LocalStorage::in_dir(&dir));
        let ids: Vec<u64> = reloaded.entries().iter().map(|m| m.movie_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(reloaded.entries(), list.entries());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn garbage_in_storage_starts_empty() {
        let dir = scratch_dir("watch-garbage");
        let storage = LocalStorage::in_dir(&dir);
        storage.set_item(WATCH_LIST_KEY, "{oops").unwrap();

        let list = WatchList::load(storage);
        assert!(list.is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn add_after_truncated_storage_persists() {
        let dir = scratch_dir("watch-truncated");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("storage.json"), r#"{"watchList": "[{\"movie_id\": 1"#).unwrap();

        let mut list = WatchList::load(LocalStorage::in_dir(&dir));
        assert!(list.is_empty());
        assert_eq!(list.add(&movie(275, "Fargo")).unwrap(), AddOutcome::Added);

        let reloaded = WatchList::load(LocalStorage::in_dir(&dir));
        let ids: Vec<u64> = reloaded.entries().iter().map(|m| m.movie_id).collect();
        assert_eq!(ids, vec![275]);
        let _ = std::fs::remove_dir_all(dir);
    }
}
