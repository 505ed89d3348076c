//! Data model shared between the landing-page backend and the external editor.
//!
//! Everything here is plain serde data: the backend renders and packages it,
//! the editor reads the template catalogue and writes brand configurations.

pub mod model;
pub mod requests;
pub mod responses;
