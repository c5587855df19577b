//! Request-target path decoding.
//!
//! Takes the raw target from the request line, extracts the path and normalizes it:
//! - un-escape `%2F` ('/') and `%2E` ('.'), nothing else
//! - drop the query
//! - remove `.` / `..` segments and collapse empty (`//`) segments
//!
//! The result is what routing and resource mapping should look at, instead of the
//! server's own (possibly un-normalized) parsed path.

pub mod absolute;
pub mod dot_segments;
pub mod error;
pub mod form;
pub mod origin;
pub mod percent;

pub use error::DecodeError;
pub use form::{decode_target, get_path_from_raw_target, TargetForm};
pub use origin::normalize_origin_form;
