//! Loja back-office library.
//!
//! Management API for catalog, banners, orders, site content, the contact
//! inbox, stock notifications and the admin flag. Shares the `shop` schema
//! with the storefront.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
