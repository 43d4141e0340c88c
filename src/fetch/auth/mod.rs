//! Request decorators layered over an [`HttpClient`](crate::fetch::HttpClient).

mod referer;

pub use referer::Referer;
