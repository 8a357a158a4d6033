//! Core engine for a browse-and-watch video UI: debounced type-ahead search
//! over a TMDB-style metadata API, normalization of the raw result pages
//! into presentation-ready lists, and resolution of a selected title to an
//! embeddable playback URL through an ordered strategy chain. An axum
//! facade exposes the same operations over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
