//! Loja storefront library.
//!
//! Public JSON API for the shop: catalog, search, session cart, customer
//! accounts, checkout, site content and visitor forms. Exposed as a library
//! so the router can be tested without a running server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod search;
pub mod services;
pub mod state;
pub mod validation;
