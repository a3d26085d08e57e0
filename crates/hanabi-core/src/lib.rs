pub mod config;
pub mod error;
pub mod feed;
pub mod gallery;
pub mod models;
pub mod playback;
pub mod player;
pub mod ranker;
pub mod schedule;
pub mod search;
pub mod settings;
pub mod storage;
pub mod theme;
pub mod view;
