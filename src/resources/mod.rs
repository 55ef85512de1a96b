//! Resource wrappers: one method per remote endpoint, each delegating to a
//! [`Transport`](crate::Transport) verb.

pub mod sections;

pub use sections::Sections;

/// Percent-encode an identifier for use as a single path segment.
pub(crate) fn segment(id: impl std::fmt::Display) -> String {
    urlencoding::encode(&id.to_string()).into_owned()
}
