//! Shared types for the WOBJ mesh container.
//!
//! This crate holds everything a reader and a writer of `.wobj` files must
//! agree on:
//! - [`math`] - POD vector types used by the vertex layout
//! - [`formats`] - header, vertex, texture path fields and the container reader
//! - [`wobj_format`] - extensions and version tag

pub mod formats;
pub mod math;
pub mod wobj_format;

pub use formats::*;
pub use math::{Vec2, Vec3};
pub use wobj_format::{WOBJ_FORMAT, WobjFormat};
