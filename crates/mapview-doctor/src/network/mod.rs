//! Network helpers
//!
//! Request timeouts and retry/backoff policy

mod retry;
mod timeout;

pub use retry::*;
pub use timeout::*;

#[cfg(test)]
mod tests;
