//! CLI Commands module
//!
//! Each command follows a consistent pattern with dedicated Args and
//! Command structs.

pub mod add;
pub mod create;
pub mod list;
pub mod quote;
pub mod show;
pub mod suggest;
pub mod version;
pub mod watch;
