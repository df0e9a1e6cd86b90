//! Box data model.
//!
//! - `TessBox`: one character annotation (text, rectangle, page, selection)
//! - `BoxPage`: ordered boxes of one page with selection, lookup and merge
//! - `BoxDocument`: pages of a multi-page image plus the box file format

pub mod document;
pub mod page;
pub mod tessbox;

pub use document::{BoxDocument, BoxFormat};
pub use page::BoxPage;
pub use tessbox::TessBox;
