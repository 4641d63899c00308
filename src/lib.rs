//! DocDiff Server Library
//!
//! Compares two revisions of a PDF document and reports, page by page, what
//! changed. This crate exposes the comparison engine and router for
//! integration tests; the server binary is in main.rs.
//!
//! # Modules
//!
//! - `compare`: extraction, LCS diffing, per-page and document verdicts
//! - `report`: summary PDF generation from a comparison result
//! - `routes`: HTTP boundary (upload, report download, previews)
//! - `store`: bounded cache of finished comparisons

pub mod compare;
pub mod config;
pub mod report;
pub mod routes;
pub mod state;
pub mod store;
