//! Browser sessions and the chat transcript.
//!
//! Each browser gets a [`Session`] looked up by cookie from the shared
//! [`SessionStore`]. The session owns the coach transcript; handlers pass it
//! explicitly into the shell operations and the renderer.
//!
//! # Example
//!
//! ```rust
//! use vitaflex_shell::session::{ChatRole, SessionStore};
//!
//! let store = SessionStore::new();
//! let session = store.create();
//! session.push(ChatRole::User, "Hello!");
//!
//! assert_eq!(session.transcript().len(), 1);
//! ```

mod thread;

pub use thread::{ChatMessage, ChatRole, Session, SessionStore};
