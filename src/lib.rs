//! PR reviewer assignment service library.
//!
//! Teams own users, users author and review pull requests, and the services
//! keep reviewer assignments consistent as team membership changes.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
