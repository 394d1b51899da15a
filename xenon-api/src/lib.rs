//! Typed request wrappers for a handful of REST APIs
//!
//! Every call is modelled as a single-use request object built from a
//! [`RequestDescriptor`] and executed once against a [`Transport`]. Responses
//! are exposed through read-only views over the parsed JSON.
//!
//! ```rust,ignore
//! use xenon_api::spotify::{self, SpotifyClient};
//! use xenon_api::{BearerToken, HttpClient, Request};
//!
//! let client = SpotifyClient::new(BearerToken::new(token));
//! let mut request = spotify::albums::get_album(&client, "4aawyAB9vmqN3uQ7FjRGTy", None);
//!
//! match request.execute(&HttpClient::new())? {
//!     200 => println!("{}", request.data().unwrap().name()?),
//!     status => println!("album lookup failed with {}", status),
//! }
//! ```
//!
//! - [`spotify`]: Spotify Web API catalog, library and player endpoints
//! - [`govee`]: Govee smart-light listing and control
//! - [`smh`]: Satchel One homework, todos and attachments
//!
//! Validation of counts and ranges happens while a request is built, so an
//! invalid call never reaches the network.

pub mod bounds;
pub mod config;
pub mod credentials;
pub mod error;
pub mod govee;
pub mod logging;
pub mod request;
pub mod scaffold;
pub mod smh;
pub mod spotify;

#[cfg(test)]
mod test_support;

pub use config::XenonConfig;
pub use credentials::{ApiKey, BearerToken};
pub use error::{ApiError, Result, ValidationError};
pub use request::{DeleteRequest, GetRequest, PostRequest, PutRequest, QueryValue, Request, RequestDescriptor};
pub use scaffold::{ObjectScaffold, Page};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, Method, Transport};
