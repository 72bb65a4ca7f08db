//! Content sources: where raw post texts come from.
//!
//! The engine only sees the [`ContentSource`] trait. Two implementations
//! ship with the crate:
//!
//! - [`TimelineClient`] fetches timelines over HTTP
//! - [`FixtureSource`] serves canned texts from memory or a TOML file

mod fixture;
mod timeline;

pub use fixture::FixtureSource;
pub use timeline::{DEFAULT_API_URL, TimelineClient, parse_timeline};

use crate::AccountHandle;
use derive_getters::Getters;
use derive_more::{Display, Error};

/// Default upper bound on items requested per account.
pub const DEFAULT_MAX_ITEMS: u32 = 3200;

/// Parameters sent with every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct FetchRequest {
    /// Whether reposts/shares are included.
    include_reposts: bool,
    /// Upper bound on items returned; the source may return fewer.
    max_items: u32,
}

impl FetchRequest {
    /// Creates a fetch request.
    pub fn new(include_reposts: bool, max_items: u32) -> Self {
        Self {
            include_reposts,
            max_items,
        }
    }
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self::new(false, DEFAULT_MAX_ITEMS)
    }
}

/// Why a content source could not deliver an account's items.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SourceError {
    /// The account was not found or the source refused the request.
    #[display("request rejected with status {status}, the handle may be invalid")]
    Rejected {
        /// HTTP-style status code returned by the source.
        status: u16,
    },
    /// The request never completed.
    #[display("transport failure: {message}")]
    Transport {
        /// Underlying failure description.
        message: String,
    },
    /// The response arrived but could not be read.
    #[display("unreadable response: {message}")]
    Decode {
        /// Underlying failure description.
        message: String,
    },
}

/// Supplies raw post texts for an account.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches the account's recent texts in the order the source returns them.
    async fn fetch(
        &self,
        account: &AccountHandle,
        request: &FetchRequest,
    ) -> Result<Vec<String>, SourceError>;
}
