//! Recommendation genre seeds

use crate::request::GetRequest;

use super::SpotifyClient;

/// Genres usable as recommendation seeds
pub fn get_available_genre_seeds(client: &SpotifyClient) -> GetRequest<Vec<String>> {
    GetRequest::with_reshape(
        client.descriptor("/recommendations/available-genre-seeds"),
        |body| string_list(body, "genres"),
    )
}

pub(crate) fn string_list(body: &serde_json::Value, key: &str) -> crate::error::Result<Vec<String>> {
    let values = body
        .get(key)
        .cloned()
        .ok_or_else(|| crate::error::ApiError::missing_key("response", key))?;
    Ok(serde_json::from_value(values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::BearerToken;
    use crate::request::Request;
    use crate::test_support::StubTransport;

    #[test]
    fn test_genre_seeds() {
        let client = SpotifyClient::new(BearerToken::new("token"));
        let transport = StubTransport::new(200, r#"{"genres":["acoustic","afrobeat"]}"#);
        let mut request = get_available_genre_seeds(&client);
        request.execute(&transport).unwrap();
        assert_eq!(request.data().unwrap(), &vec!["acoustic".to_string(), "afrobeat".to_string()]);
    }
}
