//! Artist catalog and follow endpoints

use crate::error::Result;
use crate::request::{DeleteRequest, GetRequest, PutRequest, QueryValue};
use crate::scaffold::{list_of, ObjectScaffold, Page};

use super::limits::ARTIST_IDS;
use super::{check_ids, divergent, ids_query, with_paging, Artist, SpotifyClient, Track};

/// Album groups requested when the caller names none
pub const DEFAULT_INCLUDE_GROUPS: [&str; 4] = ["album", "single", "appears_on", "compilation"];

pub fn get_artist(client: &SpotifyClient, artist_id: &str) -> GetRequest<Artist> {
    GetRequest::with_reshape(
        client.descriptor(&format!("/artists/{}", artist_id)),
        Artist::from_ref,
    )
}

/// Get catalog information for up to 50 artists
///
/// The IDs are sent as repeated `ids` keys rather than one comma-joined
/// value.
pub fn get_artists(client: &SpotifyClient, artist_ids: &[&str]) -> Result<GetRequest<Vec<Artist>>> {
    check_ids("artist_ids", artist_ids, ARTIST_IDS)?;
    divergent("get_artists", "ids sent as repeated query keys");
    Ok(GetRequest::with_reshape(
        client
            .descriptor("/artists")
            .query("ids", QueryValue::repeated(artist_ids.iter().copied())),
        |body| list_of(body, "artists"),
    ))
}

/// Get a page of an artist's albums
///
/// `include_groups` is sent as repeated keys, like the IDs of
/// [`get_artists`].
pub fn get_artist_albums(
    client: &SpotifyClient,
    artist_id: &str,
    include_groups: Option<&[&str]>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    let groups = include_groups.unwrap_or(&DEFAULT_INCLUDE_GROUPS[..]);
    let descriptor = client
        .descriptor(&format!("/artists/{}/albums", artist_id))
        .query("include_groups", QueryValue::repeated(groups.iter().copied()));
    let descriptor = with_paging(descriptor, ARTIST_IDS, limit, offset)?;
    divergent("get_artist_albums", "include_groups sent as repeated query keys");
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

pub fn get_artist_top_tracks(
    client: &SpotifyClient,
    artist_id: &str,
    market: Option<&str>,
) -> GetRequest<Vec<Track>> {
    GetRequest::with_reshape(
        client
            .descriptor(&format!("/artists/{}/top-tracks", artist_id))
            .query("market", client.market_or(market)),
        |body| list_of(body, "tracks"),
    )
}

/// Get artists similar to the given one
///
/// The path has no slash between `artists` and the ID, and the ID is also
/// sent as an `id` query parameter.
pub fn get_related_artists(client: &SpotifyClient, artist_id: &str) -> GetRequest<Vec<Artist>> {
    divergent("get_related_artists", "path is missing the slash before the artist id");
    GetRequest::with_reshape(
        client
            .descriptor(&format!("/artists{}/related-artists", artist_id))
            .query("id", artist_id),
        |body| list_of(body, "artists"),
    )
}

pub fn follow_artists(client: &SpotifyClient, artist_ids: &[&str]) -> Result<PutRequest> {
    check_ids("artist_ids", artist_ids, ARTIST_IDS)?;
    Ok(PutRequest::new(
        client
            .descriptor("/me/following")
            .query("type", "artist")
            .query("ids", ids_query(artist_ids)),
    ))
}

pub fn unfollow_artists(client: &SpotifyClient, artist_ids: &[&str]) -> Result<DeleteRequest> {
    check_ids("artist_ids", artist_ids, ARTIST_IDS)?;
    Ok(DeleteRequest::new(
        client
            .descriptor("/me/following")
            .query("type", "artist")
            .query("ids", ids_query(artist_ids)),
    ))
}

/// Check whether the current user follows the given artists
///
/// Targets `/following/contains`, without the `/me` prefix.
pub fn check_follows_artists(client: &SpotifyClient, artist_ids: &[&str]) -> Result<GetRequest> {
    check_ids("artist_ids", artist_ids, ARTIST_IDS)?;
    divergent("check_follows_artists", "path is missing the /me prefix");
    Ok(GetRequest::new(
        client
            .descriptor("/following/contains")
            .query("type", "artist")
            .query("ids", ids_query(artist_ids)),
    ))
}
