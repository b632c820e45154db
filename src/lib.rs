pub mod api;
pub mod app;
pub mod autocomplete;
pub mod cards;
pub mod config;
pub mod errors;
pub mod hero;
pub mod input;
pub mod storage;
pub mod tasks;
pub mod ui;
pub mod watchlist;
