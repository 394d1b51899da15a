//! Spotify Web API endpoints
//!
//! Every endpoint is a free function taking a [`SpotifyClient`] and
//! returning an unexecuted request object. Count bounds are checked while
//! building, so an out-of-range call never reaches the network.
//!
//! ```rust,ignore
//! let client = SpotifyClient::new(BearerToken::new(token));
//! let mut request = albums::get_albums(&client, &["4aawyAB9vmqN3uQ7FjRGTy"], None)?;
//! if request.execute(&HttpClient::new())? == 200 {
//!     for album in request.data().into_iter().flatten() {
//!         println!("{}", album.name()?);
//!     }
//! }
//! ```
//!
//! A few endpoints keep long-standing quirks such as a malformed path, a
//! dropped parameter or a reshape that does not match the response. Each is
//! documented on the function and logged at warn when the request is built.

pub mod albums;
pub mod artists;
pub mod audiobooks;
pub mod categories;
pub mod chapters;
pub mod episodes;
pub mod genres;
pub mod markets;
pub mod models;
pub mod player;
pub mod playlists;
pub mod search;
pub mod shows;
pub mod tracks;
pub mod users;

pub use models::*;

use crate::bounds::{check_count, Bound};
use crate::credentials::BearerToken;
use crate::error::ValidationError;
use crate::request::{QueryValue, RequestDescriptor};

pub const BASE_URL: &str = "https://api.spotify.com/v1";

/// Market sent when the caller does not name one
pub const DEFAULT_MARKET: &str = "gb";

/// Per-resource count limits
pub mod limits {
    use crate::bounds::Bound;

    pub const ALBUM_IDS: Bound = Bound::up_to(20);
    pub const ARTIST_IDS: Bound = Bound::up_to(50);
    pub const SHOW_IDS: Bound = Bound::up_to(50);
    pub const EPISODE_IDS: Bound = Bound::up_to(50);
    pub const AUDIOBOOK_IDS: Bound = Bound::up_to(50);
    pub const CHAPTER_IDS: Bound = Bound::up_to(50);
    pub const TRACK_IDS: Bound = Bound::up_to(50);
    pub const PLAYLIST_ITEMS: Bound = Bound::up_to(50);
    pub const PLAYER_ITEMS: Bound = Bound::up_to(50);
    /// Artists, genres and tracks combined
    pub const RECOMMENDATION_SEEDS: Bound = Bound::up_to(5);
}

/// Base URL, access token and default market for one user
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    base_url: String,
    token: BearerToken,
    market: String,
}

impl SpotifyClient {
    pub fn new(token: BearerToken) -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            token,
            market: DEFAULT_MARKET.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_market(mut self, market: &str) -> Self {
        self.market = market.to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn market_or(&self, market: Option<&str>) -> String {
        market.unwrap_or(&self.market).to_string()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Descriptor for `path` carrying the JSON and bearer headers
    pub fn descriptor(&self, path: &str) -> RequestDescriptor {
        RequestDescriptor::new(self.url(path))
            .header("Content-Type", "application/json")
            .header("Authorization", self.token.header_value())
    }
}

/// Comma-join identifiers for a list-valued query parameter
pub fn join_ids(ids: &[&str]) -> String {
    ids.join(",")
}

pub(crate) fn ids_query(ids: &[&str]) -> QueryValue {
    QueryValue::joined(ids.iter().copied())
}

/// Check an ID list against its bound
pub(crate) fn check_ids(parameter: &str, ids: &[&str], bound: Bound) -> Result<(), ValidationError> {
    check_count(parameter, ids.len(), bound)
}

/// Apply `limit` (defaulting to the bound maximum) and `offset` (default 0)
pub(crate) fn with_paging(
    descriptor: RequestDescriptor,
    bound: Bound,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<RequestDescriptor, ValidationError> {
    let limit = limit.unwrap_or(bound.max as u32);
    check_count("limit", limit as usize, bound)?;
    Ok(descriptor
        .query("limit", limit)
        .query("offset", offset.unwrap_or(0)))
}

pub(crate) fn divergent(endpoint: &'static str, detail: &'static str) {
    tracing::warn!(endpoint, "building divergent endpoint: {}", detail);
}

/// Generate save, remove and check functions for one library collection
macro_rules! define_library_endpoints {
    (
        resource: $resource:ident,
        parameter: $parameter:literal,
        path: $path:literal,
        bound: $bound:expr
        $(, remove_sends_market: $market:literal)? $(,)?
    ) => {
        paste::paste! {
            #[doc = concat!("Save one or more ", stringify!($resource), " to the current user's library.")]
            pub fn [<save_ $resource>](
                client: &$crate::spotify::SpotifyClient,
                ids: &[&str],
            ) -> $crate::error::Result<$crate::request::PutRequest> {
                $crate::spotify::check_ids($parameter, ids, $bound)?;
                Ok($crate::request::PutRequest::new(
                    client.descriptor($path).query("ids", $crate::spotify::ids_query(ids)),
                ))
            }

            #[doc = concat!("Remove one or more ", stringify!($resource), " from the current user's library.")]
            pub fn [<remove_saved_ $resource>](
                client: &$crate::spotify::SpotifyClient,
                ids: &[&str],
            ) -> $crate::error::Result<$crate::request::DeleteRequest> {
                $crate::spotify::check_ids($parameter, ids, $bound)?;
                let descriptor = client.descriptor($path).query("ids", $crate::spotify::ids_query(ids));
                $(
                    let descriptor = if $market {
                        descriptor.query("market", client.market())
                    } else {
                        descriptor
                    };
                )?
                Ok($crate::request::DeleteRequest::new(descriptor))
            }

            #[doc = concat!("Check which of the given ", stringify!($resource), " are saved, in request order.")]
            pub fn [<check_saved_ $resource>](
                client: &$crate::spotify::SpotifyClient,
                ids: &[&str],
            ) -> $crate::error::Result<$crate::request::GetRequest<Vec<bool>>> {
                $crate::spotify::check_ids($parameter, ids, $bound)?;
                Ok($crate::request::GetRequest::with_reshape(
                    client
                        .descriptor(concat!($path, "/contains"))
                        .query("ids", $crate::spotify::ids_query(ids)),
                    |body| Ok(serde_json::from_value(body.clone())?),
                ))
            }
        }
    };
}

pub(crate) use define_library_endpoints;
