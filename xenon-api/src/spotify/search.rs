//! Catalog search

use crate::error::Result;
use crate::request::{GetRequest, QueryValue};
use crate::scaffold::ObjectScaffold;

use super::limits::PLAYLIST_ITEMS;
use super::{with_paging, SearchResults, SpotifyClient};

/// Item types searched when the caller does not narrow the query
pub const DEFAULT_SEARCH_TYPES: [&str; 7] = [
    "album",
    "artist",
    "playlist",
    "track",
    "show",
    "episode",
    "audiobook",
];

/// Search the catalog for `query`
///
/// One result page is returned per requested type.
pub fn search_for_item(
    client: &SpotifyClient,
    query: &str,
    types: Option<&[&str]>,
    market: Option<&str>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<SearchResults>> {
    let types = types.unwrap_or(&DEFAULT_SEARCH_TYPES[..]);
    let descriptor = client
        .descriptor("/search")
        .query("q", query)
        .query("type", QueryValue::joined(types.iter().copied()))
        .query("market", client.market_or(market));
    let descriptor = with_paging(descriptor, PLAYLIST_ITEMS, limit, offset)?;
    Ok(GetRequest::with_reshape(descriptor, SearchResults::from_ref))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::BearerToken;
    use crate::request::Request;
    use crate::test_support::StubTransport;

    fn client() -> SpotifyClient {
        SpotifyClient::new(BearerToken::new("token"))
    }

    #[test]
    fn test_default_types_joined() {
        let request = search_for_item(&client(), "daft punk", None, None, None, None).unwrap();
        assert_eq!(
            request.descriptor().encoded_query("type").as_deref(),
            Some("album,artist,playlist,track,show,episode,audiobook")
        );
        assert_eq!(request.descriptor().encoded_query("q").as_deref(), Some("daft punk"));
    }

    #[test]
    fn test_search_results_pages() {
        let transport = StubTransport::new(
            200,
            r#"{
                "tracks": {"href": "h", "limit": 1, "offset": 0, "total": 1, "next": null,
                           "previous": null, "items": [{"id": "t1", "name": "One More Time"}]},
                "shows": {"href": "h", "limit": 1, "offset": 0, "total": 0, "items": []}
            }"#,
        );
        let mut request = search_for_item(&client(), "one", Some(&["track", "show"][..]), None, Some(1), None).unwrap();
        request.execute(&transport).unwrap();

        let results = request.data().unwrap();
        let tracks = results.tracks_found().unwrap();
        assert_eq!(tracks[0].name().unwrap(), "One More Time");
        assert!(results.album_page().unwrap().is_none());
        assert!(results.show_page().unwrap().is_none());
    }
}
