//! Page arenas owning element storage.

pub mod page;

pub use page::{Background, Page};
