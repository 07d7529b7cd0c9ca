//! wishlist: phases → sections → items, with reordering, theming and JSON export
//!
//! Layers, innermost first:
//! - [`domain`]: entities, id generation, reorder and the hierarchy store
//! - [`application`]: persistence, export and the session service
//! - [`infrastructure`]: key-value/filesystem implementations and wiring
//! - [`cli`]: terminal presentation layer

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
