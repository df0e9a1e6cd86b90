//! tessbox - Tesseract box file model and codec.
//!
//! A box file pairs each character of a scanned page with its bounding
//! rectangle. This crate parses box files (legacy 5-field and current
//! 6-field lines) into per-page collections, offers the selection, lookup
//! and merge operations an editor needs, and writes the boxes back out.

pub mod codec;
pub mod error;
pub mod geometry;
pub mod model;
pub mod params;
pub mod text;

pub use codec::{format, format_with, parse};
pub use error::{BoxError, Result};
pub use geometry::{FileCoords, Point, Rect};
pub use model::{BoxDocument, BoxFormat, BoxPage, TessBox};
pub use params::{CodecOptions, CombineSymbols, LineEnding};
