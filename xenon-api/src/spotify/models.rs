//! Domain views over Spotify response objects

use serde_json::Value;

use crate::define_scaffold;
use crate::error::{ApiError, Result};
use crate::scaffold::{ObjectScaffold, Page};

define_scaffold! {
    /// An album, simplified or full
    pub struct Album {
        id: str => "id",
        name: str => "name",
        /// `album`, `single` or `compilation`
        album_type: str => "album_type",
        total_tracks: int => "total_tracks",
        available_markets: strings => "available_markets",
        external_urls: map => "external_urls",
        href: str => "href",
        images: list => "images",
        release_date: str => "release_date",
        /// `year`, `month` or `day`
        release_date_precision: str => "release_date_precision",
        /// Present only when the content is restricted in some way
        restrictions: probe_map => "restrictions",
        uri: str => "uri",
    }
}

impl Album {
    /// Release date parsed at the precision the album declares
    pub fn released_on(&self) -> Result<chrono::NaiveDate> {
        parse_release_date(self.release_date()?, self.release_date_precision()?)
    }

    pub fn artists(&self) -> Result<Vec<Artist>> {
        self.views("artists")
    }

    /// The tracks page embedded in a full album
    pub fn tracks(&self) -> Result<Page> {
        self.view("tracks")
    }

    /// Tracks of the embedded page as views, rebuilt on each call
    pub fn album_tracks(&self) -> Result<Vec<Track>> {
        self.views("tracks.items")
    }
}

define_scaffold! {
    pub struct Artist {
        id: str => "id",
        name: str => "name",
        external_urls: map => "external_urls",
        followers: int => "followers.total",
        genres: strings => "genres",
        href: str => "href",
        images: list => "images",
        /// 0 to 100
        popularity: int => "popularity",
        kind: str => "type",
        uri: str => "uri",
    }
}

define_scaffold! {
    /// A podcast show
    pub struct Show {
        id: str => "id",
        name: str => "name",
        available_markets: strings => "available_markets",
        copyrights: list => "copyrights",
        description: str => "description",
        html_description: str => "html_description",
        is_explicit: bool => "explicit",
        external_urls: map => "external_urls",
        href: str => "href",
        images: list => "images",
        is_externally_hosted: nullable_bool => "is_externally_hosted",
        languages: strings => "languages",
        media_type: str => "media_type",
        publisher: str => "publisher",
        kind: str => "type",
        uri: str => "uri",
        total_episodes: probe_int => "total_episodes",
    }
}

impl Show {
    pub fn episodes(&self) -> Result<Page> {
        self.view("episodes")
    }
}

define_scaffold! {
    pub struct Episode {
        id: str => "id",
        name: str => "name",
        audio_preview_url: nullable_str => "audio_preview_url",
        description: str => "description",
        html_description: str => "html_description",
        duration_ms: int => "duration_ms",
        is_explicit: bool => "explicit",
        external_urls: map => "external_urls",
        href: str => "href",
        images: list => "images",
        is_externally_hosted: bool => "is_externally_hosted",
        is_playable: bool => "is_playable",
        languages: strings => "languages",
        release_date: str => "release_date",
        release_date_precision: str => "release_date_precision",
        /// Only present with the `user-read-playback-position` scope
        resume_point: probe_map => "resume_point",
        restrictions: probe_map => "restrictions",
        kind: str => "type",
        uri: str => "uri",
    }
}

impl Episode {
    /// The show this episode belongs to
    pub fn show(&self) -> Result<Show> {
        self.view("show")
    }
}

define_scaffold! {
    pub struct Audiobook {
        id: str => "id",
        name: str => "name",
        available_markets: strings => "available_markets",
        copyrights: list => "copyrights",
        description: str => "description",
        html_description: str => "html_description",
        edition: probe_str => "edition",
        is_explicit: bool => "explicit",
        external_urls: map => "external_urls",
        href: str => "href",
        images: list => "images",
        languages: strings => "languages",
        media_type: str => "media_type",
        publisher: str => "publisher",
        kind: str => "type",
        uri: str => "uri",
        total_chapters: int => "total_chapters",
    }
}

impl Audiobook {
    /// Author names
    pub fn authors(&self) -> Result<Vec<String>> {
        names(self.get_list("authors")?)
    }

    /// Narrator names
    pub fn narrators(&self) -> Result<Vec<String>> {
        names(self.get_list("narrators")?)
    }

    pub fn chapters(&self) -> Result<Page> {
        self.view("chapters")
    }
}

define_scaffold! {
    pub struct Chapter {
        id: str => "id",
        name: str => "name",
        audio_preview_url: nullable_str => "audio_preview_url",
        chapter_number: int => "chapter_number",
        description: str => "description",
        html_description: str => "html_description",
        duration_ms: int => "duration_ms",
        is_explicit: bool => "explicit",
        external_urls: map => "external_urls",
        href: str => "href",
        images: list => "images",
        is_playable: probe_bool => "is_playable",
        languages: strings => "languages",
        release_date: str => "release_date",
        release_date_precision: str => "release_date_precision",
        resume_point: probe_map => "resume_point",
        restrictions: probe_map => "restrictions",
        kind: str => "type",
        uri: str => "uri",
    }
}

impl Chapter {
    pub fn audiobook(&self) -> Result<Audiobook> {
        self.view("audiobook")
    }
}

define_scaffold! {
    pub struct Track {
        id: str => "id",
        name: str => "name",
        available_markets: strings => "available_markets",
        disc_number: int => "disc_number",
        duration_ms: int => "duration_ms",
        is_explicit: bool => "explicit",
        external_ids: map => "external_ids",
        external_urls: map => "external_urls",
        href: str => "href",
        /// Only present when a market was given
        is_playable: probe_bool => "is_playable",
        restrictions: probe_map => "restrictions",
        popularity: int => "popularity",
        preview_url: nullable_str => "preview_url",
        track_number: int => "track_number",
        kind: str => "type",
        uri: str => "uri",
        is_local: bool => "is_local",
    }
}

impl Track {
    /// The album embedded in a full track
    pub fn album(&self) -> Result<Album> {
        self.view("album")
    }

    pub fn artists(&self) -> Result<Vec<Artist>> {
        self.views("artists")
    }
}

define_scaffold! {
    /// Audio analysis summary of one track
    pub struct AudioFeatures {
        id: str => "id",
        acousticness: float => "acousticness",
        analysis_url: str => "analysis_url",
        danceability: float => "danceability",
        duration_ms: int => "duration_ms",
        energy: float => "energy",
        instrumentalness: float => "instrumentalness",
        /// Pitch class, -1 when undetected
        key: int => "key",
        liveness: float => "liveness",
        loudness: float => "loudness",
        /// 1 for major, 0 for minor
        mode: int => "mode",
        speechiness: float => "speechiness",
        tempo: float => "tempo",
        time_signature: int => "time_signature",
        track_href: str => "track_href",
        kind: str => "type",
        uri: str => "uri",
        valence: float => "valence",
    }
}

define_scaffold! {
    /// Search response: one page per requested filter
    pub struct SearchResults {}
}

impl SearchResults {
    fn page(&self, key: &str) -> Result<Option<Page>> {
        self.probe_view(key)
    }

    pub fn track_page(&self) -> Result<Option<Page>> {
        self.page("tracks")
    }

    pub fn artist_page(&self) -> Result<Option<Page>> {
        self.page("artists")
    }

    pub fn album_page(&self) -> Result<Option<Page>> {
        self.page("albums")
    }

    pub fn playlist_page(&self) -> Result<Option<Page>> {
        self.page("playlists")
    }

    /// Shows page.
    ///
    /// Presence is probed under the singular `show` key while the page is
    /// read from `shows`, so a normal search response yields `None`.
    pub fn show_page(&self) -> Result<Option<Page>> {
        if self.has_key("show") {
            return self.view("shows").map(Some);
        }
        Ok(None)
    }

    pub fn episode_page(&self) -> Result<Option<Page>> {
        self.page("episodes")
    }

    pub fn audiobook_page(&self) -> Result<Option<Page>> {
        self.page("audiobooks")
    }

    /// Items of a result page as typed views, empty when the filter was not requested
    fn items<V: ObjectScaffold>(&self, key: &str) -> Result<Vec<V>> {
        match self.page(key)? {
            Some(page) => page.items_as(),
            None => Ok(Vec::new()),
        }
    }

    pub fn tracks_found(&self) -> Result<Vec<Track>> {
        self.items("tracks")
    }

    pub fn artists_found(&self) -> Result<Vec<Artist>> {
        self.items("artists")
    }

    pub fn albums_found(&self) -> Result<Vec<Album>> {
        self.items("albums")
    }

    pub fn playlists_found(&self) -> Result<Vec<Playlist>> {
        self.items("playlists")
    }

    pub fn shows_found(&self) -> Result<Vec<Show>> {
        self.items("shows")
    }

    pub fn episodes_found(&self) -> Result<Vec<Episode>> {
        self.items("episodes")
    }

    pub fn audiobooks_found(&self) -> Result<Vec<Audiobook>> {
        self.items("audiobooks")
    }
}

define_scaffold! {
    /// A user profile, public or private
    pub struct User {
        id: str => "id",
        display_name: nullable_str => "display_name",
        external_urls: map => "external_urls",
        followers: int => "followers.total",
        href: str => "href",
        images: list => "images",
        kind: str => "type",
        uri: str => "uri",
        /// Private profile fields, present only for the current user
        country: probe_str => "country",
        email: probe_str => "email",
        product: probe_str => "product",
        explicit_content: probe_map => "explicit_content",
    }
}

impl User {
    /// Display name, falling back to the email address
    pub fn username(&self) -> Result<Option<&str>> {
        match self.display_name()? {
            Some(name) if !name.is_empty() => Ok(Some(name)),
            _ => Ok(self.email()),
        }
    }
}

define_scaffold! {
    pub struct Playlist {
        id: str => "id",
        name: str => "name",
        is_collaborative: bool => "collaborative",
        description: nullable_str => "description",
        external_urls: map => "external_urls",
        followers: probe_int => "followers.total",
        href: str => "href",
        images: list => "images",
        /// `None` when the playlist status is not relevant
        is_public: nullable_bool => "public",
        snapshot_id: str => "snapshot_id",
        kind: str => "type",
        uri: str => "uri",
    }
}

impl Playlist {
    pub fn owner(&self) -> Result<User> {
        self.view("owner")
    }

    pub fn tracks(&self) -> Result<Page> {
        self.view("tracks")
    }
}

define_scaffold! {
    /// A browse category
    pub struct Category {
        id: str => "id",
        name: str => "name",
        href: str => "href",
        icons: list => "icons",
    }
}

define_scaffold! {
    /// A playback device
    pub struct Device {
        id: nullable_str => "id",
        name: str => "name",
        is_active: bool => "is_active",
        is_private_session: bool => "is_private_session",
        is_restricted: bool => "is_restricted",
        kind: str => "type",
        volume_percent: nullable_int => "volume_percent",
        supports_volume: probe_bool => "supports_volume",
    }
}

/// A playable item: the queue and player mix tracks and episodes
#[derive(Debug, Clone, PartialEq)]
pub enum PlayableItem {
    Track(Track),
    Episode(Episode),
}

impl PlayableItem {
    fn from_typed(value: &Value, kind: &str) -> Result<Self> {
        match kind {
            "track" => Ok(PlayableItem::Track(Track::from_ref(value)?)),
            "episode" => Ok(PlayableItem::Episode(Episode::from_ref(value)?)),
            other => Err(ApiError::parse(format!(
                "Item was not a track or episode. Returned {} instead.",
                other
            ))),
        }
    }

    pub fn name(&self) -> Result<&str> {
        match self {
            PlayableItem::Track(track) => track.name(),
            PlayableItem::Episode(episode) => episode.name(),
        }
    }

    pub fn uri(&self) -> Result<&str> {
        match self {
            PlayableItem::Track(track) => track.uri(),
            PlayableItem::Episode(episode) => episode.uri(),
        }
    }
}

define_scaffold! {
    /// The user's playback queue
    pub struct Queue {}
}

impl Queue {
    /// `None` when nothing is playing
    pub fn currently_playing(&self) -> Result<Option<PlayableItem>> {
        match self.probe("currently_playing") {
            Some(item) => {
                let kind = item
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ApiError::missing_key(Self::KIND, "currently_playing.type"))?;
                PlayableItem::from_typed(item, kind).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Queued tracks and episodes; anything else is an error
    pub fn queue(&self) -> Result<Vec<PlayableItem>> {
        self.get_list("queue")?
            .iter()
            .map(|item| {
                let kind = item
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ApiError::missing_key(Self::KIND, "queue.type"))?;
                PlayableItem::from_typed(item, kind)
            })
            .collect()
    }
}

define_scaffold! {
    pub struct PlaybackState {
        /// `off`, `track` or `context`
        repeat_state: str => "repeat_state",
        shuffle_state: bool => "shuffle_state",
        context: probe_map => "context",
        /// Unix millisecond timestamp of when the data was fetched
        timestamp: int => "timestamp",
        progress_ms: nullable_int => "progress_ms",
        is_playing: bool => "is_playing",
        /// `track`, `episode`, `ad` or `unknown`
        currently_playing_type: str => "currently_playing_type",
        actions: map => "actions",
    }
}

impl PlaybackState {
    pub fn device(&self) -> Result<Device> {
        self.view("device")
    }

    /// The playing item, `None` for ads, unknown content or an idle player
    pub fn item(&self) -> Result<Option<PlayableItem>> {
        let kind = self.currently_playing_type()?;
        match (self.probe("item"), kind) {
            (Some(item), "track" | "episode") => PlayableItem::from_typed(item, kind).map(Some),
            _ => Ok(None),
        }
    }
}

/// Items of a top-items listing
#[derive(Debug, Clone, PartialEq)]
pub enum TopItems {
    Artists(Vec<Artist>),
    Tracks(Vec<Track>),
}

fn names(entries: &[Value]) -> Result<Vec<String>> {
    entries
        .iter()
        .map(|entry| {
            entry
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ApiError::missing_key("Audiobook", "name"))
        })
        .collect()
}

/// Parse a release date at `year`, `month` or `day` precision
pub fn parse_release_date(date: &str, precision: &str) -> Result<chrono::NaiveDate> {
    let padded = match precision {
        "year" => format!("{}-01-01", date),
        "month" => format!("{}-01", date),
        _ => date.to_string(),
    };
    chrono::NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
        .map_err(|e| ApiError::parse(format!("invalid release date '{}': {}", date, e)))
}
