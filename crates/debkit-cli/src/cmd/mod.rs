//! Command implementations

pub mod changelog;
pub mod completions;
pub mod copyright;
pub mod hook;
pub mod paths;
pub mod prebuild;
