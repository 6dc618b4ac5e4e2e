//! Pure domain data: providers, options, certificate metadata, constants.

pub mod certificate;
pub mod constants;
pub mod options;
pub mod types;
