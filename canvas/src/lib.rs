//! Overlay placement engine and catalog model for the arch configurator.
//!
//! This crate is compiled to WebAssembly for the admin page and linked
//! natively by the server. It owns the catalog of backgrounds and overlays,
//! the visitor's selection session, and the placement state machine that
//! turns raw pointer events on the preview canvas into geometry writes. The
//! host page only wires DOM events to the engine and applies the resulting
//! [`engine::Action`]s; the server only persists and serves the catalog.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level placement engine, testable without a browser |
//! | [`catalog`] | Backgrounds, overlays, categories, and the copy-on-write store |
//! | [`geometry`] | Unit-tagged dimensions and the four-field placement record |
//! | [`gesture`] | Pure snapshot + pointer → geometry math |
//! | [`input`] | Gesture target and the placement state machine |
//! | [`hit`] | Hit-testing overlays and their resize handles |
//! | [`session`] | Customer selections and the order payload |
//! | [`viewport`] | Screen/canvas points and the preview rectangle |
//! | [`wasm`] | `wasm-bindgen` handles for the admin and customer pages |
//! | [`consts`] | Shared numeric constants (size floor, handle size, cursors) |

pub mod catalog;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod session;
pub mod viewport;
pub mod wasm;
