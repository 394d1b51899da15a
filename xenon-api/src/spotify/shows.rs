//! Podcast show catalog and library endpoints

use crate::error::Result;
use crate::request::GetRequest;
use crate::scaffold::{list_of, ObjectScaffold, Page};

use super::limits::SHOW_IDS;
use super::{check_ids, ids_query, with_paging, Show, SpotifyClient};

pub fn get_show(client: &SpotifyClient, show_id: &str, market: Option<&str>) -> GetRequest<Show> {
    GetRequest::with_reshape(
        client
            .descriptor(&format!("/shows/{}", show_id))
            .query("market", client.market_or(market)),
        Show::from_ref,
    )
}

/// Get catalog information for up to 50 shows
pub fn get_shows(client: &SpotifyClient, show_ids: &[&str]) -> Result<GetRequest<Vec<Show>>> {
    check_ids("show_ids", show_ids, SHOW_IDS)?;
    Ok(GetRequest::with_reshape(
        client.descriptor("/shows").query("ids", ids_query(show_ids)),
        |body| list_of(body, "shows"),
    ))
}

pub fn get_show_episodes(
    client: &SpotifyClient,
    show_id: &str,
    market: Option<&str>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    let descriptor = client
        .descriptor(&format!("/shows/{}/episodes", show_id))
        .query("market", client.market_or(market));
    let descriptor = with_paging(descriptor, SHOW_IDS, limit, offset)?;
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

pub fn get_saved_shows(
    client: &SpotifyClient,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    let descriptor = with_paging(client.descriptor("/me/shows"), SHOW_IDS, limit, offset)?;
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

super::define_library_endpoints! {
    resource: shows,
    parameter: "show_ids",
    path: "/me/shows",
    bound: SHOW_IDS,
    remove_sends_market: true,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::BearerToken;
    use crate::request::Request;

    fn client() -> SpotifyClient {
        SpotifyClient::new(BearerToken::new("token")).with_market("de")
    }

    #[test]
    fn test_remove_sends_market() {
        let request = remove_saved_shows(&client(), &["s1"]).unwrap();
        assert_eq!(request.descriptor().encoded_query("market").as_deref(), Some("de"));

        let save = save_shows(&client(), &["s1"]).unwrap();
        assert!(save.descriptor().query_value("market").is_none());
    }

    #[test]
    fn test_show_episodes_limit() {
        assert!(get_show_episodes(&client(), "s1", None, Some(51), None).is_err());
        let request = get_show_episodes(&client(), "s1", Some("fr"), Some(10), Some(5)).unwrap();
        assert_eq!(request.descriptor().encoded_query("market").as_deref(), Some("fr"));
    }
}
