//! JSON configuration files for the command-line tools.

pub mod profile_demo;
