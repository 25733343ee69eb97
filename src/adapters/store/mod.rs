//! Document store adapter
//!
//! The store is the pipeline's only external data dependency. The
//! [`DocumentStore`] trait captures its read-only contract; the HTTP
//! implementation talks to a FHIR-style search API.

pub mod cursor;
pub mod http;
pub mod traits;

pub use cursor::EventCursor;
pub use http::HttpDocumentStore;
pub use traits::DocumentStore;
