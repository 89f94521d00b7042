//! Command-line front end for `betcode_export`.

pub mod cli;
pub mod commands;
pub mod logging;
