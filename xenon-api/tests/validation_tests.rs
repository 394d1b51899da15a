//! Count and range validation happens before any network call

use std::cell::Cell;

use rstest::rstest;
use xenon_api::spotify::{self, SpotifyClient};
use xenon_api::{ApiError, BearerToken, HttpError, HttpRequest, HttpResponse, Transport, ValidationError};

/// Counts calls and answers each with an empty 200
#[derive(Default)]
struct CountingTransport {
    calls: Cell<usize>,
}

impl Transport for CountingTransport {
    fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.set(self.calls.get() + 1);
        Ok(HttpResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }
}

fn client() -> SpotifyClient {
    SpotifyClient::new(BearerToken::new("token"))
}

fn ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("id{:02}", i)).collect()
}

/// Build the multi-id request named by `parameter`
fn build(parameter: &str, ids: &[&str]) -> Result<(), ApiError> {
    let client = client();
    match parameter {
        "album_ids" => spotify::albums::get_albums(&client, ids, None).map(|_| ()),
        "artist_ids" => spotify::artists::get_artists(&client, ids).map(|_| ()),
        "track_ids" => spotify::tracks::get_tracks(&client, ids, None).map(|_| ()),
        "show_ids" => spotify::shows::get_shows(&client, ids).map(|_| ()),
        "chapter_ids" => spotify::chapters::get_chapters(&client, ids, None).map(|_| ()),
        "episode_ids" => spotify::episodes::get_episodes(&client, ids, None).map(|_| ()),
        "saved_episode_ids" => spotify::episodes::save_episodes(&client, ids).map(|_| ()),
        "audiobook_ids" => spotify::audiobooks::get_audiobooks(&client, ids, None).map(|_| ()),
        "playlist_add_uris" => spotify::playlists::add_items_to_playlist(&client, "p1", ids, None).map(|_| ()),
        "playlist_remove_uris" => spotify::playlists::remove_playlist_items(&client, "p1", ids).map(|_| ()),
        "user_ids" => spotify::users::follow_users(&client, ids).map(|_| ()),
        "seeds" => {
            let seeds = spotify::tracks::RecommendationSeeds {
                tracks: ids,
                ..Default::default()
            };
            spotify::tracks::get_recommendations(&client, &seeds, None, None).map(|_| ())
        }
        other => panic!("unknown parameter {}", other),
    }
}

/// Parameter name reported in validation errors
fn wire_name(parameter: &str) -> &str {
    match parameter {
        "saved_episode_ids" => "episode_ids",
        "playlist_add_uris" | "playlist_remove_uris" => "uris",
        other => other,
    }
}

#[rstest]
#[case::albums("album_ids", 20)]
#[case::artists("artist_ids", 50)]
#[case::tracks("track_ids", 50)]
#[case::shows("show_ids", 50)]
#[case::chapters("chapter_ids", 50)]
#[case::episodes("episode_ids", 50)]
#[case::saved_episodes("saved_episode_ids", 50)]
#[case::audiobooks("audiobook_ids", 50)]
#[case::playlist_add("playlist_add_uris", 50)]
#[case::playlist_remove("playlist_remove_uris", 50)]
#[case::users("user_ids", 50)]
#[case::seeds("seeds", 5)]
fn test_id_bounds(#[case] parameter: &str, #[case] max: usize) {
    let at_max = ids(max);
    let at_max: Vec<&str> = at_max.iter().map(String::as_str).collect();
    assert!(build(parameter, &at_max).is_ok());

    let over = ids(max + 1);
    let over: Vec<&str> = over.iter().map(String::as_str).collect();
    match build(parameter, &over) {
        Err(ApiError::Validation(ValidationError::TooMany { parameter: p, max: m })) => {
            assert_eq!(p, wire_name(parameter));
            assert_eq!(m, max);
        }
        other => panic!("Expected TooMany, got {:?}", other),
    }

    assert!(matches!(
        build(parameter, &[]),
        Err(ApiError::Validation(ValidationError::TooFew { min: 1, .. }))
    ));
}

#[test]
fn test_rejected_builds_never_dispatch() {
    use xenon_api::Request;

    let transport = CountingTransport::default();
    let over = ids(51);
    let over: Vec<&str> = over.iter().map(String::as_str).collect();

    let get = spotify::albums::get_albums(&client(), &over[..21], None)
        .and_then(|mut request| request.execute(&transport));
    let put = spotify::albums::save_albums(&client(), &over[..21])
        .and_then(|mut request| request.execute(&transport));
    let post = spotify::playlists::add_items_to_playlist(&client(), "p1", &over, None)
        .and_then(|mut request| request.execute(&transport));
    let delete = spotify::episodes::remove_saved_episodes(&client(), &over)
        .and_then(|mut request| request.execute(&transport));

    for result in [get, put, post, delete] {
        assert!(matches!(result, Err(ApiError::Validation(ValidationError::TooMany { .. }))));
    }
    assert_eq!(transport.calls.get(), 0);

    let mut accepted = spotify::albums::save_albums(&client(), &over[..20]).unwrap();
    accepted.execute(&transport).unwrap();
    assert_eq!(transport.calls.get(), 1);
}

#[test]
fn test_too_many_message() {
    let err = ValidationError::TooMany {
        parameter: "album_ids".to_string(),
        max: 20,
    };
    assert_eq!(err.to_string(), "Parameter 'album_ids' returned more than 20 values.");
}

#[rstest]
#[case(0, true)]
#[case(55, true)]
#[case(100, true)]
#[case(101, false)]
#[case(255, false)]
fn test_volume_range(#[case] volume: u8, #[case] accepted: bool) {
    let result = spotify::player::set_playback_volume(&client(), volume, None);
    assert_eq!(result.is_ok(), accepted);
}

#[test]
fn test_unavailable_endpoints() {
    assert!(matches!(
        spotify::audiobooks::get_saved_audiobooks(&client(), None, None),
        Err(ApiError::Unavailable { .. })
    ));
    assert!(matches!(
        spotify::playlists::upload_playlist_cover(&client(), "p1", "aGk="),
        Err(ApiError::Unavailable { .. })
    ));
}
