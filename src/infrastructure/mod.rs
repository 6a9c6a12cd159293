//! Filesystem locations inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, which Zellij points at the
//! directory it was started from (usually the user's home).

pub mod paths;

pub use paths::get_data_dir;
