//! Podcast episode endpoints
//!
//! Every multi-episode endpoint here targets the bare base URL instead of an
//! `/episodes` or `/me/episodes` path. Only [`get_episode`] reaches a
//! resource path.

use crate::error::Result;
use crate::request::{DeleteRequest, GetRequest, PutRequest};
use crate::scaffold::{list_of, ObjectScaffold, Page};

use super::limits::EPISODE_IDS;
use super::{check_ids, divergent, ids_query, with_paging, Episode, SpotifyClient};

pub fn get_episode(client: &SpotifyClient, episode_id: &str, market: Option<&str>) -> GetRequest<Episode> {
    GetRequest::with_reshape(
        client
            .descriptor(&format!("/episodes/{}", episode_id))
            .query("market", client.market_or(market)),
        Episode::from_ref,
    )
}

pub fn get_episodes(
    client: &SpotifyClient,
    episode_ids: &[&str],
    market: Option<&str>,
) -> Result<GetRequest<Vec<Episode>>> {
    check_ids("episode_ids", episode_ids, EPISODE_IDS)?;
    divergent("get_episodes", "targets the base url");
    Ok(GetRequest::with_reshape(
        client
            .descriptor("")
            .query("ids", ids_query(episode_ids))
            .query("market", client.market_or(market)),
        |body| list_of(body, "episodes"),
    ))
}

pub fn get_saved_episodes(
    client: &SpotifyClient,
    market: Option<&str>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    let descriptor = client.descriptor("").query("market", client.market_or(market));
    let descriptor = with_paging(descriptor, EPISODE_IDS, limit, offset)?;
    divergent("get_saved_episodes", "targets the base url");
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

pub fn save_episodes(client: &SpotifyClient, episode_ids: &[&str]) -> Result<PutRequest> {
    check_ids("episode_ids", episode_ids, EPISODE_IDS)?;
    divergent("save_episodes", "targets the base url");
    Ok(PutRequest::new(
        client.descriptor("").query("ids", ids_query(episode_ids)),
    ))
}

pub fn remove_saved_episodes(client: &SpotifyClient, episode_ids: &[&str]) -> Result<DeleteRequest> {
    check_ids("episode_ids", episode_ids, EPISODE_IDS)?;
    divergent("remove_saved_episodes", "targets the base url");
    Ok(DeleteRequest::new(
        client.descriptor("").query("ids", ids_query(episode_ids)),
    ))
}

pub fn check_saved_episodes(client: &SpotifyClient, episode_ids: &[&str]) -> Result<GetRequest> {
    check_ids("episode_ids", episode_ids, EPISODE_IDS)?;
    divergent("check_saved_episodes", "targets the base url");
    Ok(GetRequest::new(
        client.descriptor("").query("ids", ids_query(episode_ids)),
    ))
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
    fn test_multi_episode_endpoints_target_base_url() {
        let base = "https://api.spotify.com/v1";
        assert_eq!(get_episodes(&client(), &["e1"], None).unwrap().descriptor().url(), base);
        assert_eq!(save_episodes(&client(), &["e1"]).unwrap().descriptor().url(), base);
        assert_eq!(remove_saved_episodes(&client(), &["e1"]).unwrap().descriptor().url(), base);
        assert_eq!(check_saved_episodes(&client(), &["e1"]).unwrap().descriptor().url(), base);
        assert_eq!(get_saved_episodes(&client(), None, None, None).unwrap().descriptor().url(), base);
    }

    #[test]
    fn test_single_episode_path() {
        assert_eq!(
            get_episode(&client(), "e1", None).descriptor().url(),
            "https://api.spotify.com/v1/episodes/e1"
        );
    }
}
