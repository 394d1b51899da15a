//! Audiobook catalog and library endpoints

use crate::error::{ApiError, Result};
use crate::request::GetRequest;
use crate::scaffold::{list_of, ObjectScaffold, Page};

use super::limits::AUDIOBOOK_IDS;
use super::{check_ids, ids_query, with_paging, Audiobook, SpotifyClient};

pub fn get_audiobook(client: &SpotifyClient, audiobook_id: &str, market: Option<&str>) -> GetRequest<Audiobook> {
    GetRequest::with_reshape(
        client
            .descriptor(&format!("/audiobooks/{}", audiobook_id))
            .query("market", client.market_or(market)),
        Audiobook::from_ref,
    )
}

/// Get catalog information for up to 50 audiobooks
pub fn get_audiobooks(
    client: &SpotifyClient,
    audiobook_ids: &[&str],
    market: Option<&str>,
) -> Result<GetRequest<Vec<Audiobook>>> {
    check_ids("audiobook_ids", audiobook_ids, AUDIOBOOK_IDS)?;
    Ok(GetRequest::with_reshape(
        client
            .descriptor("/audiobooks")
            .query("ids", ids_query(audiobook_ids))
            .query("market", client.market_or(market)),
        |body| list_of(body, "audiobooks"),
    ))
}

pub fn get_audiobook_chapters(
    client: &SpotifyClient,
    audiobook_id: &str,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    let descriptor = with_paging(
        client.descriptor(&format!("/audiobooks/{}/chapters", audiobook_id)),
        AUDIOBOOK_IDS,
        limit,
        offset,
    )?;
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

/// Always fails: the service answers this endpoint with 403 for every user
pub fn get_saved_audiobooks(
    _client: &SpotifyClient,
    _limit: Option<u32>,
    _offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    Err(ApiError::Unavailable {
        endpoint: "get_saved_audiobooks",
        reason: "the service rejects /me/audiobooks listings with 403",
    })
}

super::define_library_endpoints! {
    resource: audiobooks,
    parameter: "audiobook_ids",
    path: "/me/audiobooks",
    bound: AUDIOBOOK_IDS,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::BearerToken;
    use crate::request::Request;

    fn client() -> SpotifyClient {
        SpotifyClient::new(BearerToken::new("token"))
    }

    #[test]
    fn test_saved_audiobooks_unavailable() {
        match get_saved_audiobooks(&client(), None, None) {
            Err(ApiError::Unavailable { endpoint, .. }) => assert_eq!(endpoint, "get_saved_audiobooks"),
            _ => panic!("Expected Unavailable"),
        }
    }

    #[test]
    fn test_chapters_path() {
        let request = get_audiobook_chapters(&client(), "ab1", Some(10), None).unwrap();
        assert_eq!(
            request.descriptor().url(),
            "https://api.spotify.com/v1/audiobooks/ab1/chapters"
        );
    }

    #[test]
    fn test_bounds() {
        assert!(get_audiobooks(&client(), &[], None).is_err());
        let ids: Vec<&str> = std::iter::repeat("x").take(50).collect();
        assert!(save_audiobooks(&client(), &ids).is_ok());
    }
}
