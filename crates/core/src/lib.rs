//! Loja Core - Shared types library.
//!
//! This crate provides common types used across all Loja components:
//! - `storefront` - Public JSON API for the shop
//! - `admin` - Back office API (products, banners, orders, content)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. The `postgres` feature adds sqlx encode/decode support so
//! the server crates can read rows straight into these types.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, statuses and locales
//! - [`models`] - Domain entities shared by storefront and admin
//! - [`cart`] - Reducer-style shopping cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod models;
pub mod types;

pub use cart::{Cart, CartAction, CartItem};
pub use types::*;
