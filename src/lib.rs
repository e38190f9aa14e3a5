//! Static site generator for previous-year exam questions and formula sheets.
//!
//! Content lives in a directory tree of JSON documents keyed by subject and
//! year (see [`content::ContentStore`]). [`publish`] renders it into HTML
//! pages, either all at once into an output directory or one route at a time
//! through [`server`].

pub mod config;
pub mod content;
pub mod publish;
pub mod server;
