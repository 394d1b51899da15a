//! Available markets

use crate::request::GetRequest;

use super::genres::string_list;
use super::SpotifyClient;

/// ISO 3166-1 alpha-2 codes of the markets Spotify is available in
pub fn get_available_markets(client: &SpotifyClient) -> GetRequest<Vec<String>> {
    GetRequest::with_reshape(client.descriptor("/markets"), |body| {
        string_list(body, "markets")
    })
}
