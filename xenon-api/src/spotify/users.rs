//! User profile, top items and follow endpoints

use crate::bounds::check_limit;
use crate::error::{ApiError, Result};
use crate::request::{DeleteRequest, GetRequest, PutRequest, QueryValue};
use crate::scaffold::{list_of, ObjectScaffold, Page};

use super::limits::TRACK_IDS;
use super::{check_ids, divergent, ids_query, with_paging, Artist, SpotifyClient, TopItems, Track, User};

/// Window for the top items listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    /// Roughly the last year
    LongTerm,
    /// Roughly the last six months
    #[default]
    MediumTerm,
    /// Roughly the last four weeks
    ShortTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::LongTerm => "long_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::ShortTerm => "short_term",
        }
    }
}

/// Item kind for the top items listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopItemType {
    Artists,
    Tracks,
}

impl TopItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopItemType::Artists => "artists",
            TopItemType::Tracks => "tracks",
        }
    }
}

pub fn get_current_users_profile(client: &SpotifyClient) -> GetRequest<User> {
    GetRequest::with_reshape(client.descriptor("/me"), User::from_ref)
}

/// Top artists or tracks
///
/// The path is the literal `/me/top/type`; `item_type` is never substituted.
/// Use [`get_top_items`] for a working request.
pub fn get_current_users_top_items(
    client: &SpotifyClient,
    _item_type: TopItemType,
    limit: Option<u32>,
    offset: Option<u32>,
    time_range: Option<TimeRange>,
) -> Result<GetRequest<Page>> {
    let descriptor = with_paging(client.descriptor("/me/top/type"), TRACK_IDS, limit, offset)?
        .query("time_range", time_range.unwrap_or_default().as_str());
    divergent("get_current_users_top_items", "path is the literal /me/top/type");
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

/// Top artists or tracks as typed views
pub fn get_top_items(
    client: &SpotifyClient,
    item_type: TopItemType,
    limit: Option<u32>,
    offset: Option<u32>,
    time_range: Option<TimeRange>,
) -> Result<GetRequest<TopItems>> {
    let descriptor = with_paging(
        client.descriptor(&format!("/me/top/{}", item_type.as_str())),
        TRACK_IDS,
        limit,
        offset,
    )?
    .query("time_range", time_range.unwrap_or_default().as_str());
    Ok(GetRequest::with_reshape(descriptor, move |body| match item_type {
        TopItemType::Artists => list_of::<Artist>(body, "items").map(TopItems::Artists),
        TopItemType::Tracks => list_of::<Track>(body, "items").map(TopItems::Tracks),
    }))
}

/// Public profile of another user
///
/// The profile object is reshaped as a [`Page`]; convert with
/// `User::from_value(page.into_value())`.
pub fn get_users_profile(client: &SpotifyClient, user_id: &str) -> GetRequest<Page> {
    divergent("get_users_profile", "profile reshaped as a page");
    GetRequest::with_reshape(client.descriptor(&format!("/users/{}", user_id)), Page::from_ref)
}

/// Artists the current user follows, as a cursor page under `artists`
///
/// Only `limit` is sent; there is no way to page past the first cursor and
/// the required `type=artist` parameter is missing.
pub fn get_followed_artists(client: &SpotifyClient, limit: Option<u32>) -> Result<GetRequest<Page>> {
    check_limit("limit", limit, TRACK_IDS)?;
    let limit = limit.unwrap_or(TRACK_IDS.max as u32);
    divergent("get_followed_artists", "after and type are not sent");
    Ok(GetRequest::with_reshape(
        client.descriptor("/me/following").query("limit", limit),
        Page::from_ref,
    ))
}

pub fn follow_users(client: &SpotifyClient, user_ids: &[&str]) -> Result<PutRequest> {
    check_ids("user_ids", user_ids, TRACK_IDS)?;
    Ok(PutRequest::new(
        client
            .descriptor("/me/following")
            .query("type", "user")
            .query("ids", ids_query(user_ids)),
    ))
}

pub fn unfollow_users(client: &SpotifyClient, user_ids: &[&str]) -> Result<DeleteRequest> {
    check_ids("user_ids", user_ids, TRACK_IDS)?;
    Ok(DeleteRequest::new(
        client
            .descriptor("/me/following")
            .query("type", "user")
            .query("ids", ids_query(user_ids)),
    ))
}

/// Whether the current user follows each of `user_ids`
///
/// The ids are sent as repeated `ids` keys rather than one joined value.
pub fn check_follows_users(client: &SpotifyClient, user_ids: &[&str]) -> Result<GetRequest<Vec<bool>>> {
    check_ids("user_ids", user_ids, TRACK_IDS)?;
    divergent("check_follows_users", "ids sent as repeated keys");
    Ok(GetRequest::with_reshape(
        client
            .descriptor("/me/following/contains")
            .query("type", "user")
            .query("ids", QueryValue::repeated(user_ids.iter().copied())),
        |body| serde_json::from_value(body.clone()).map_err(ApiError::from),
    ))
}
