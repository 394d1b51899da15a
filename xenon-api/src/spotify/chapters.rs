//! Audiobook chapter endpoints

use crate::error::Result;
use crate::request::GetRequest;
use crate::scaffold::{list_of, ObjectScaffold};

use super::limits::CHAPTER_IDS;
use super::{check_ids, ids_query, Chapter, SpotifyClient};

pub fn get_chapter(client: &SpotifyClient, chapter_id: &str, market: Option<&str>) -> GetRequest<Chapter> {
    GetRequest::with_reshape(
        client
            .descriptor(&format!("/chapters/{}", chapter_id))
            .query("market", client.market_or(market)),
        Chapter::from_ref,
    )
}

pub fn get_chapters(
    client: &SpotifyClient,
    chapter_ids: &[&str],
    market: Option<&str>,
) -> Result<GetRequest<Vec<Chapter>>> {
    check_ids("chapter_ids", chapter_ids, CHAPTER_IDS)?;
    Ok(GetRequest::with_reshape(
        client
            .descriptor("/chapters")
            .query("ids", ids_query(chapter_ids))
            .query("market", client.market_or(market)),
        |body| list_of(body, "chapters"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::BearerToken;
    use crate::request::Request;
    use crate::test_support::StubTransport;

    #[test]
    fn test_get_chapters() {
        let client = SpotifyClient::new(BearerToken::new("token"));
        let transport = StubTransport::new(200, r#"{"chapters":[{"id":"c1","chapter_number":3}]}"#);
        let mut request = get_chapters(&client, &["c1"], None).unwrap();
        request.execute(&transport).unwrap();

        assert_eq!(request.data().unwrap()[0].chapter_number().unwrap(), 3);
        assert_eq!(request.descriptor().encoded_query("ids").as_deref(), Some("c1"));
    }
}
