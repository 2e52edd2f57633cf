//! Thread input: reading exported email threads from disk

mod html;

pub use html::{InputError, html_to_text, load_thread};
