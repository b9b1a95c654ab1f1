#![forbid(unsafe_code)]

//! Core primitives for Bramble.
//!
//! This crate holds the leaf dependencies of the editor core: document-space
//! geometry ([`Point`], [`Rect`]) and the canonical keyboard input types
//! ([`Key`], [`Modifiers`], [`KeyInput`]) that the higher layers dispatch on.
//! Nothing in here owns document state.

pub mod event;
pub mod geometry;

pub use event::{Key, KeyInput, Modifiers};
pub use geometry::{Point, Rect};
