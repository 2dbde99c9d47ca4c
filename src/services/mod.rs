//! Service layer: pure business logic for the form application.
//!
//! Everything here is synchronous and side-effect free; the controller
//! composes these services with the HTTP client.

pub mod schedule_doc;
pub mod timegrid;
pub mod validation;
