//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own filesystem and delivery concerns so route handlers
//! stay focused on protocol translation. Catalog logic lives in the
//! `canvas` crate and is shared with the browser build.

pub mod orders;
pub mod upload;
