//! Request handlers

pub mod auth;
pub mod claims;
pub mod docs;
pub mod flights;
pub mod health;
