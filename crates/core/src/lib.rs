//! Core library for blogview
//!
//! This crate implements the **Functional Core** of the blogview application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The blogview project uses a two-crate architecture:
//!
//! - **`blogview_core`** (this crate): Pure transformation functions with zero I/O
//! - **`blogview`**: HTTP fetching, session state, and terminal rendering (the Imperative Shell)
//!
//! Every function here is deterministic and can be tested with fixture data,
//! no mocking required.
//!
//! # Module Organization
//!
//! - [`models`]: Wire types for posts, authors, and comments
//! - [`filter`]: Search term and author filtering over the posts collection
//! - [`pagination`]: Fixed-size paging and navigation bounds
//! - [`query`]: List view query state, its reset rules, and the derived list view
//! - [`detail`]: Post and author detail assembly from already-fetched entities
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use blogview_core::query::{derive_list_view, QueryState};
//!
//! let mut query = QueryState::default();
//! query.select_author(Some(3));
//!
//! let view = derive_list_view(&posts, &users, &query);
//! assert_eq!(view.pagination.current_page, 1);
//! ```

pub mod detail;
pub mod filter;
pub mod models;
pub mod pagination;
pub mod query;
