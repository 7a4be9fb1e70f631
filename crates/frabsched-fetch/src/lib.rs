//! HTTP fetch of Frab schedules.
//!
//! The core parser never performs I/O; this crate is the collaborator that
//! downloads the document and hands the bytes over.
//!
//! ```text
//! URL ──GET──▶ ScheduleClient ──bytes──▶ ScheduleParser ──▶ Vec<EventRecord>
//! ```
//!
//! # Example
//!
//! ```ignore
//! use frabsched_fetch::get_schedule;
//!
//! let records = get_schedule("https://fahrplan.example.org/schedule.xml", "demo").await?;
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{ScheduleClient, get_schedule};
pub use config::FetchConfig;
pub use error::{FetchError, FetchErrorCode, FetchResult};
