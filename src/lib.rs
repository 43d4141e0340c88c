pub mod analyzers;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod portal;

pub use errors::GpaError;
