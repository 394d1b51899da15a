//! Playlist endpoints

use serde_json::{json, Map, Value};

use crate::error::{ApiError, Result};
use crate::request::{DeleteRequest, GetRequest, PostRequest, PutRequest};
use crate::scaffold::{ObjectScaffold, Page};

use super::limits::PLAYLIST_ITEMS;
use super::{check_ids, divergent, ids_query, with_paging, Playlist, SpotifyClient};

/// Optional fields for [`change_playlist_details`] and [`create_playlist`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistDetails {
    pub name: Option<String>,
    pub public: Option<bool>,
    pub collaborative: Option<bool>,
    pub description: Option<String>,
}

impl PlaylistDetails {
    fn into_payload(self) -> Value {
        let mut payload = Map::new();
        if let Some(name) = self.name {
            payload.insert("name".to_string(), Value::String(name));
        }
        if let Some(public) = self.public {
            payload.insert("public".to_string(), Value::Bool(public));
        }
        if let Some(collaborative) = self.collaborative {
            payload.insert("collaborative".to_string(), Value::Bool(collaborative));
        }
        if let Some(description) = self.description {
            payload.insert("description".to_string(), Value::String(description));
        }
        Value::Object(payload)
    }
}

pub fn get_playlist(client: &SpotifyClient, playlist_id: &str, market: Option<&str>) -> GetRequest<Playlist> {
    GetRequest::with_reshape(
        client
            .descriptor(&format!("/playlists/{}", playlist_id))
            .query("market", client.market_or(market)),
        Playlist::from_ref,
    )
}

/// Rename a playlist or change its visibility and description
pub fn change_playlist_details(
    client: &SpotifyClient,
    playlist_id: &str,
    details: PlaylistDetails,
) -> PutRequest {
    PutRequest::new(
        client
            .descriptor(&format!("/playlists/{}", playlist_id))
            .payload(details.into_payload()),
    )
}

pub fn get_playlist_items(
    client: &SpotifyClient,
    playlist_id: &str,
    limit: Option<u32>,
    offset: Option<u32>,
    market: Option<&str>,
) -> Result<GetRequest<Page>> {
    let descriptor = with_paging(
        client.descriptor(&format!("/playlists/{}/tracks", playlist_id)),
        PLAYLIST_ITEMS,
        limit,
        offset,
    )?
    .query("market", client.market_or(market));
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

/// Add track or episode URIs to a playlist
///
/// Posts to `/playlists/{id}` without the `/tracks` suffix and drops
/// `position`, so the service rejects the call or appends at the end.
pub fn add_items_to_playlist(
    client: &SpotifyClient,
    playlist_id: &str,
    uris: &[&str],
    _position: Option<u32>,
) -> Result<PostRequest> {
    check_ids("uris", uris, PLAYLIST_ITEMS)?;
    divergent("add_items_to_playlist", "missing /tracks suffix and position dropped");
    Ok(PostRequest::new(
        client
            .descriptor(&format!("/playlists/{}", playlist_id))
            .query("uris", ids_query(uris)),
    ))
}

/// Move `range_length` items starting at `range_start` to before `insert_before`
pub fn reorder_playlist_items(
    client: &SpotifyClient,
    playlist_id: &str,
    range_start: u32,
    insert_before: u32,
    range_length: Option<u32>,
) -> PutRequest {
    PutRequest::new(
        client
            .descriptor(&format!("/playlists/{}/tracks", playlist_id))
            .query("range_start", range_start)
            .query("insert_before", insert_before)
            .query("range_length", range_length.unwrap_or(1)),
    )
}

pub fn remove_playlist_items(client: &SpotifyClient, playlist_id: &str, uris: &[&str]) -> Result<DeleteRequest> {
    check_ids("uris", uris, PLAYLIST_ITEMS)?;
    let tracks: Vec<Value> = uris.iter().map(|uri| json!({ "uri": uri })).collect();
    Ok(DeleteRequest::new(
        client
            .descriptor(&format!("/playlists/{}/tracks", playlist_id))
            .payload(json!({ "tracks": tracks })),
    ))
}

pub fn get_current_users_playlists(
    client: &SpotifyClient,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    let descriptor = with_paging(client.descriptor("/me/playlists"), PLAYLIST_ITEMS, limit, offset)?;
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

pub fn get_users_playlists(
    client: &SpotifyClient,
    user_id: &str,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    let descriptor = with_paging(
        client.descriptor(&format!("/users/{}/playlists", user_id)),
        PLAYLIST_ITEMS,
        limit,
        offset,
    )?;
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

/// Create a playlist for `user_id`
///
/// Unset details default to a private, non-collaborative playlist with an
/// empty description. Read the result with [`created_playlist`].
pub fn create_playlist(
    client: &SpotifyClient,
    user_id: &str,
    name: &str,
    details: PlaylistDetails,
) -> PostRequest {
    let payload = json!({
        "name": name,
        "public": details.public.unwrap_or(false),
        "collaborative": details.collaborative.unwrap_or(false),
        "description": details.description.unwrap_or_default(),
    });
    PostRequest::new(
        client
            .descriptor(&format!("/users/{}/playlists", user_id))
            .payload(payload),
    )
}

/// The playlist returned by an executed [`create_playlist`]
pub fn created_playlist(request: &PostRequest) -> Result<Playlist> {
    let body = request
        .json()
        .ok_or_else(|| ApiError::parse("create_playlist returned no body"))??;
    Playlist::from_value(body)
}

pub fn get_featured_playlists(
    client: &SpotifyClient,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    let descriptor = with_paging(
        client.descriptor("/browse/featured-playlists"),
        PLAYLIST_ITEMS,
        limit,
        offset,
    )?;
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

pub fn get_category_playlists(
    client: &SpotifyClient,
    category_id: &str,
    country: Option<&str>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest<Page>> {
    let descriptor = client
        .descriptor(&format!("/browse/categories/{}/playlists", category_id))
        .query("country", client.market_or(country));
    let descriptor = with_paging(descriptor, PLAYLIST_ITEMS, limit, offset)?;
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

/// Cover images of a playlist, as returned
pub fn get_playlist_cover_image(client: &SpotifyClient, playlist_id: &str) -> GetRequest {
    GetRequest::new(client.descriptor(&format!("/playlists/{}/images", playlist_id)))
}

/// Uploading a custom cover is not supported
pub fn upload_playlist_cover(_client: &SpotifyClient, _playlist_id: &str, _jpeg_base64: &str) -> Result<PutRequest> {
    Err(ApiError::Unavailable {
        endpoint: "upload_playlist_cover",
        reason: "image upload is not implemented",
    })
}

pub fn follow_playlist(client: &SpotifyClient, playlist_id: &str, public: bool) -> PutRequest {
    PutRequest::new(
        client
            .descriptor(&format!("/playlists/{}/followers", playlist_id))
            .payload(json!({ "public": public })),
    )
}

pub fn unfollow_playlist(client: &SpotifyClient, playlist_id: &str) -> DeleteRequest {
    DeleteRequest::new(client.descriptor(&format!("/playlists/{}/followers", playlist_id)))
}
