//! Asana API client library for Rust, covering the sections resource.
//!
//! Resource wrappers such as [`Sections`] map each method to one endpoint and
//! hand the request to a [`Transport`]. [`AsanaClient`] is the bundled
//! blocking HTTP transport; any other type implementing [`Transport`] can be
//! used instead.
//!
//! # Quick Start
//!
//! ```no_run
//! use asana_client::{AsanaClient, CreateSectionParams, RequestOptions};
//!
//! let client = AsanaClient::new("https://app.asana.com/api/1.0", Some("0/token")).unwrap();
//!
//! // Create a section, then list every section of the project
//! let params = CreateSectionParams::new("Next Actions").to_params();
//! let created = client
//!     .sections()
//!     .create_in_project("1331", &params, &RequestOptions::default())
//!     .unwrap();
//! println!("created {}", created["gid"]);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod params;
pub mod resources;
pub mod transport;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use client::AsanaClient;
pub use config::ClientConfig;
pub use error::{AsanaError, Result};
pub use models::{ProjectRef, Section, SectionCompact};
pub use params::{CreateSectionParams, InsertSectionParams, UpdateSectionParams};
pub use resources::Sections;
pub use transport::{Params, RequestOptions, Transport};
