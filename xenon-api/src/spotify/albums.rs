//! Album catalog and library endpoints

use crate::error::Result;
use crate::request::GetRequest;
use crate::scaffold::{list_of, ObjectScaffold, Page};

use super::limits::ALBUM_IDS;
use super::{check_ids, ids_query, with_paging, Album, SpotifyClient};

/// Get catalog information for a single album
pub fn get_album(client: &SpotifyClient, album_id: &str, market: Option<&str>) -> GetRequest<Album> {
    GetRequest::with_reshape(
        client
            .descriptor(&format!("/albums/{}", album_id))
            .query("market", client.market_or(market)),
        Album::from_ref,
    )
}

/// Get catalog information for up to 20 albums
pub fn get_albums(
    client: &SpotifyClient,
    album_ids: &[&str],
    market: Option<&str>,
) -> Result<GetRequest<Vec<Album>>> {
    check_ids("album_ids", album_ids, ALBUM_IDS)?;
    Ok(GetRequest::with_reshape(
        client
            .descriptor("/albums")
            .query("ids", ids_query(album_ids))
            .query("market", client.market_or(market)),
        |body| list_of(body, "albums"),
    ))
}

/// Get a page of an album's tracks
pub fn get_album_tracks(
    client: &SpotifyClient,
    album_id: &str,
    limit: Option<u32>,
    offset: Option<u32>,
    market: Option<&str>,
) -> Result<GetRequest<Page>> {
    let descriptor = with_paging(
        client.descriptor(&format!("/albums/{}/tracks", album_id)),
        ALBUM_IDS,
        limit,
        offset,
    )?
    .query("market", client.market_or(market));
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

/// Get a page of the albums saved in the current user's library
pub fn get_saved_albums(
    client: &SpotifyClient,
    limit: Option<u32>,
    offset: Option<u32>,
    market: Option<&str>,
) -> Result<GetRequest<Page>> {
    let descriptor = with_paging(client.descriptor("/me/albums"), ALBUM_IDS, limit, offset)?
        .query("market", client.market_or(market));
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

super::define_library_endpoints! {
    resource: albums,
    parameter: "album_ids",
    path: "/me/albums",
    bound: ALBUM_IDS,
}

/// Get new album releases featured on the browse tab
///
/// The response nests the page under `albums`; the reshape wraps the whole
/// body, so read it with `page.view::<Page>("albums")`.
pub fn get_new_releases(
    client: &SpotifyClient,
    market: Option<&str>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    let descriptor = client
        .descriptor("/browse/new-releases")
        .query("country", client.market_or(market));
    let descriptor = with_paging(descriptor, ALBUM_IDS, limit, offset)?;
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::BearerToken;
    use crate::error::{ApiError, ValidationError};
    use crate::request::Request;
    use crate::test_support::StubTransport;

    fn client() -> SpotifyClient {
        SpotifyClient::new(BearerToken::new("token"))
    }

    #[test]
    fn test_get_albums_joins_ids() {
        let request = get_albums(&client(), &["a1", "a2", "a3"], None).unwrap();
        let descriptor = request.descriptor();
        assert_eq!(descriptor.url(), "https://api.spotify.com/v1/albums");
        assert_eq!(descriptor.encoded_query("ids").as_deref(), Some("a1,a2,a3"));
        assert_eq!(descriptor.encoded_query("market").as_deref(), Some("gb"));
    }

    #[test]
    fn test_get_albums_too_many_ids() {
        let ids: Vec<String> = (0..21).map(|i| format!("id{}", i)).collect();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();

        match get_albums(&client(), &ids, None) {
            Err(ApiError::Validation(ValidationError::TooMany { parameter, max })) => {
                assert_eq!(parameter, "album_ids");
                assert_eq!(max, 20);
            }
            other => panic!("Expected TooMany, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_get_albums_reshapes_list() {
        let transport = StubTransport::new(200, r#"{"albums":[{"id":"a1","name":"One"},{"id":"a2","name":"Two"}]}"#);
        let mut request = get_albums(&client(), &["a1", "a2"], Some("us")).unwrap();
        request.execute(&transport).unwrap();

        let albums = request.data().unwrap();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[1].name().unwrap(), "Two");
        assert_eq!(transport.last_request().unwrap().query_values("market"), vec!["us"]);
    }

    #[test]
    fn test_get_album_tracks_limit_bound() {
        assert!(get_album_tracks(&client(), "abc", Some(20), None, None).is_ok());
        assert!(get_album_tracks(&client(), "abc", Some(21), None, None).is_err());
        assert!(get_album_tracks(&client(), "abc", Some(0), None, None).is_err());
    }

    #[test]
    fn test_library_endpoints() {
        let save = save_albums(&client(), &["a1", "a2"]).unwrap();
        assert_eq!(save.descriptor().url(), "https://api.spotify.com/v1/me/albums");
        assert_eq!(save.descriptor().encoded_query("ids").as_deref(), Some("a1,a2"));

        let check = check_saved_albums(&client(), &["a1"]).unwrap();
        assert_eq!(check.descriptor().url(), "https://api.spotify.com/v1/me/albums/contains");

        assert!(remove_saved_albums(&client(), &[]).is_err());
    }

    #[test]
    fn test_check_saved_albums_reshape() {
        let transport = StubTransport::new(200, "[true,false]");
        let mut request = check_saved_albums(&client(), &["a1", "a2"]).unwrap();
        request.execute(&transport).unwrap();
        assert_eq!(request.data(), Some(&vec![true, false]));
    }

    #[test]
    fn test_new_releases_uses_country() {
        let request = get_new_releases(&client(), None, Some(5), Some(10)).unwrap();
        let descriptor = request.descriptor();
        assert_eq!(descriptor.encoded_query("country").as_deref(), Some("gb"));
        assert_eq!(descriptor.encoded_query("limit").as_deref(), Some("5"));
        assert_eq!(descriptor.encoded_query("offset").as_deref(), Some("10"));
        assert!(descriptor.query_value("market").is_none());
    }
}
