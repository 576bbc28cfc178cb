//! Record output boundary
//!
//! Persistent storage, compression, and format conversion belong to an
//! external collaborator; this module only defines the seam records flow
//! through and a JSON writer for the CLI.

mod json;
mod traits;

pub use json::JsonSink;
pub use traits::RecordSink;
