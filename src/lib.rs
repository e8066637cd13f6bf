//! Terminal client for a remote meme feed.
//!
//! Memes are fetched read-only from the meme API. Votes, new memes and
//! comments stay in the local view models and are never sent back.

pub mod app;
pub mod commands;
pub mod config;
pub mod countdown;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod render;
pub mod repositories;
pub mod routes;
pub mod views;
pub mod vote;
