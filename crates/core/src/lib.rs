//! Domain logic for the vistoria compliance-inspection platform.
//!
//! Pure rules only: validation, the weighted compliance scorer, and the
//! evidence filename policy. No I/O lives here -- persistence is in
//! `vistoria-db` and HTTP/file handling in `vistoria-api`.

pub mod catalog;
pub mod error;
pub mod evidence;
pub mod inspection;
pub mod scoring;
pub mod types;
