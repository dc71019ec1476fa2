//! Renderers turning editor snapshots into shareable output.
//!
//! `html` produces the content snapshot handed to the public share view;
//! `text` backs the terminal front-end and `--print`.

pub mod html;
pub mod text;

pub use html::{to_html, to_page_html};
pub use text::to_lines;
