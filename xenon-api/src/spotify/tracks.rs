//! Track catalog, library and audio analysis endpoints

use crate::bounds::check_count;
use crate::error::Result;
use crate::request::GetRequest;
use crate::scaffold::{list_of, ObjectScaffold, Page};

use super::limits::{RECOMMENDATION_SEEDS, TRACK_IDS};
use super::{check_ids, divergent, ids_query, with_paging, AudioFeatures, SpotifyClient, Track};

pub fn get_track(client: &SpotifyClient, track_id: &str, market: Option<&str>) -> GetRequest<Track> {
    GetRequest::with_reshape(
        client
            .descriptor(&format!("/tracks/{}", track_id))
            .query("market", client.market_or(market)),
        Track::from_ref,
    )
}

pub fn get_tracks(
    client: &SpotifyClient,
    track_ids: &[&str],
    market: Option<&str>,
) -> Result<GetRequest<Vec<Track>>> {
    check_ids("track_ids", track_ids, TRACK_IDS)?;
    Ok(GetRequest::with_reshape(
        client
            .descriptor("/tracks")
            .query("ids", ids_query(track_ids))
            .query("market", client.market_or(market)),
        |body| list_of(body, "tracks"),
    ))
}

pub fn get_saved_tracks(
    client: &SpotifyClient,
    limit: Option<u32>,
    offset: Option<u32>,
    market: Option<&str>,
) -> Result<GetRequest<Page>> {
    let descriptor = with_paging(client.descriptor("/me/tracks"), TRACK_IDS, limit, offset)?
        .query("market", client.market_or(market));
    Ok(GetRequest::with_reshape(descriptor, Page::from_ref))
}

super::define_library_endpoints! {
    resource: tracks,
    parameter: "track_ids",
    path: "/me/tracks",
    bound: TRACK_IDS,
}

pub fn get_track_audio_features(client: &SpotifyClient, track_id: &str) -> GetRequest<AudioFeatures> {
    GetRequest::with_reshape(
        client.descriptor(&format!("/audio-features/{}", track_id)),
        AudioFeatures::from_ref,
    )
}

/// Audio features for several tracks, left as returned
///
/// Read the entries with `list_of::<AudioFeatures>(body, "audio_features")`.
pub fn get_tracks_audio_features(client: &SpotifyClient, track_ids: &[&str]) -> Result<GetRequest> {
    check_ids("track_ids", track_ids, TRACK_IDS)?;
    Ok(GetRequest::new(
        client.descriptor("/audio-features").query("ids", ids_query(track_ids)),
    ))
}

/// Seeds for [`get_recommendations`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationSeeds<'a> {
    pub artists: &'a [&'a str],
    pub genres: &'a [&'a str],
    pub tracks: &'a [&'a str],
}

impl RecommendationSeeds<'_> {
    pub fn count(&self) -> usize {
        self.artists.len() + self.genres.len() + self.tracks.len()
    }
}

/// Track recommendations
///
/// Between one and five seeds are required in total. The seeds are only
/// counted; the request carries `limit` and `offset` alone, so the service
/// answers without them.
pub fn get_recommendations(
    client: &SpotifyClient,
    seeds: &RecommendationSeeds<'_>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<GetRequest> {
    check_count("seeds", seeds.count(), RECOMMENDATION_SEEDS)?;
    let descriptor = with_paging(client.descriptor("/recommendations"), TRACK_IDS, limit, offset)?;
    divergent("get_recommendations", "seed parameters are not sent");
    Ok(GetRequest::new(descriptor))
}
