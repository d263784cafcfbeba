//! Error types for the proxy pool.
//!
//! None of these are fatal: a failed borrow means a living cell is drawn
//! without a proxy, a failed release is a caller bug that gets logged.

use thiserror::Error;

use super::pool::ProxyHandle;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Warm-up has not finished yet
    #[error("proxy pool is still warming up")]
    NotReady,

    /// No idle proxy and no room to create one
    #[error("proxy pool exhausted at {capacity} proxies")]
    Exhausted { capacity: usize },

    /// Handle was not issued by this pool, or is not currently borrowed
    #[error("proxy handle {0:?} was not issued by this pool")]
    ForeignHandle(ProxyHandle),
}

pub type PoolResult<T> = Result<T, PoolError>;
