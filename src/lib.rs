//! # Library Timesheet Scheduler
//!
//! Client-side engine for the library staff timesheet service. The remote
//! service owns persistence and spreadsheet rendering; this crate provides
//! the typed wire model, the validation and document-building logic, a
//! fallback-aware HTTP client, and the form/state controller that the
//! `lts-cli` terminal front end drives.
//!
//! ## Features
//!
//! - **Wire model**: staff entries, reusable profiles, and schedule documents
//!   with the exact field and enum vocabulary the backend expects
//! - **Time grid**: quarter-hour parsing, formatting, and option enumeration
//!   for the 11:30..16:15 business window
//! - **Validation**: fail-fast form validation with operator-facing messages
//! - **HTTP client**: the CRUD and generate-timesheet operations, probing a
//!   secondary base URL when the primary route answers not-found
//! - **Controller**: form state, view caches, and the add/delete/generate
//!   orchestration, including saving the returned spreadsheet to disk
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects shared by the client and controller
//! - [`services`]: pure business logic (time grid, document builder,
//!   validation)
//! - [`http`]: client configuration, error type, and the API client
//! - [`controller`]: the form/state controller driven by the front end

pub mod api;
pub mod controller;
pub mod http;
pub mod services;
