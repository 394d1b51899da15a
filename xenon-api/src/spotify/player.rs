//! Playback control endpoints
//!
//! Commands that target a device take an optional `device_id`; without it
//! Spotify uses the currently active device.

use serde_json::json;

use crate::bounds::{check_limit, check_range};
use crate::error::Result;
use crate::request::{GetRequest, PostRequest, PutRequest};
use crate::scaffold::{list_of, ObjectScaffold, Page};

use super::limits::PLAYER_ITEMS;
use super::{divergent, Device, PlaybackState, Queue, SpotifyClient};

/// Repeat mode accepted by [`set_repeat_mode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatState {
    Track,
    Context,
    Off,
}

impl RepeatState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatState::Track => "track",
            RepeatState::Context => "context",
            RepeatState::Off => "off",
        }
    }
}

pub fn get_playback_state(client: &SpotifyClient, market: Option<&str>) -> GetRequest<PlaybackState> {
    GetRequest::with_reshape(
        client
            .descriptor("/me/player")
            .query("market", client.market_or(market)),
        PlaybackState::from_ref,
    )
}

/// Move playback to another device
///
/// `play` is accepted but never sent, so playback keeps its current state.
pub fn transfer_playback(client: &SpotifyClient, device_id: &str, _play: bool) -> PutRequest {
    divergent("transfer_playback", "play flag is not sent");
    PutRequest::new(
        client
            .descriptor("/me/player")
            .payload(json!({ "device_ids": [device_id] })),
    )
}

/// List the user's available devices
///
/// Targets `/me/players/devices`, which the service does not serve.
pub fn get_available_devices(client: &SpotifyClient) -> GetRequest<Vec<Device>> {
    divergent("get_available_devices", "path is /me/players/devices");
    GetRequest::with_reshape(client.descriptor("/me/players/devices"), |body| {
        list_of(body, "devices")
    })
}

pub fn start_playback(client: &SpotifyClient, device_id: Option<&str>) -> PutRequest {
    PutRequest::new(
        client
            .descriptor("/me/player/play")
            .query_opt("device_id", device_id),
    )
}

pub fn pause_playback(client: &SpotifyClient, device_id: Option<&str>) -> PutRequest {
    PutRequest::new(
        client
            .descriptor("/me/player/pause")
            .query_opt("device_id", device_id),
    )
}

pub fn skip_to_next(client: &SpotifyClient, device_id: Option<&str>) -> PostRequest {
    PostRequest::new(
        client
            .descriptor("/me/player/next")
            .query_opt("device_id", device_id),
    )
}

pub fn skip_to_previous(client: &SpotifyClient, device_id: Option<&str>) -> PostRequest {
    PostRequest::new(
        client
            .descriptor("/me/player/previous")
            .query_opt("device_id", device_id),
    )
}

pub fn seek_to_position(client: &SpotifyClient, position_ms: u64, device_id: Option<&str>) -> PutRequest {
    PutRequest::new(
        client
            .descriptor("/me/player/seek")
            .query("position_ms", position_ms)
            .query_opt("device_id", device_id),
    )
}

pub fn set_repeat_mode(client: &SpotifyClient, state: RepeatState, device_id: Option<&str>) -> PutRequest {
    PutRequest::new(
        client
            .descriptor("/me/player/repeat")
            .query("state", state.as_str())
            .query_opt("device_id", device_id),
    )
}

/// Set the volume of the active or given device, 0 to 100 percent
pub fn set_playback_volume(
    client: &SpotifyClient,
    volume_percent: u8,
    device_id: Option<&str>,
) -> Result<PutRequest> {
    check_range("volume_percent", volume_percent, 0, 100)?;
    Ok(PutRequest::new(
        client
            .descriptor("/me/player/volume")
            .query("volume_percent", volume_percent)
            .query_opt("device_id", device_id),
    ))
}

pub fn toggle_playback_shuffle(client: &SpotifyClient, state: bool, device_id: Option<&str>) -> PutRequest {
    PutRequest::new(
        client
            .descriptor("/me/player/shuffle")
            .query("state", state)
            .query_opt("device_id", device_id),
    )
}

/// Tracks played recently, newest first, as a cursor page
///
/// `after` is a Unix timestamp in milliseconds.
pub fn get_recently_played(
    client: &SpotifyClient,
    after: Option<u64>,
    limit: Option<u32>,
) -> Result<GetRequest<Page>> {
    check_limit("limit", limit, PLAYER_ITEMS)?;
    let limit = limit.unwrap_or(PLAYER_ITEMS.max as u32);
    Ok(GetRequest::with_reshape(
        client
            .descriptor("/me/player/recently-played")
            .query_opt("after", after)
            .query("limit", limit),
        Page::from_ref,
    ))
}

pub fn get_user_queue(client: &SpotifyClient) -> GetRequest<Queue> {
    GetRequest::with_reshape(client.descriptor("/me/player/queue"), Queue::from_ref)
}

/// Append a track or episode URI to the queue
pub fn add_item_to_queue(client: &SpotifyClient, uri: &str, device_id: Option<&str>) -> PostRequest {
    PostRequest::new(
        client
            .descriptor("/me/player/queue")
            .query("uri", uri)
            .query_opt("device_id", device_id),
    )
}
