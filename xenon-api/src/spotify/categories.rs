//! Browse category endpoint

use crate::request::GetRequest;
use crate::scaffold::{ObjectScaffold, Page};

use super::{divergent, SpotifyClient};

/// Get a single browse category
///
/// The body is a category object but is reshaped as a [`Page`]; convert with
/// `Category::from_value(page.into_value())` to read it.
pub fn get_category(client: &SpotifyClient, category_id: &str) -> GetRequest<Page> {
    divergent("get_category", "category object reshaped as a page");
    GetRequest::with_reshape(
        client.descriptor(&format!("/browse/categories/{}", category_id)),
        Page::from_ref,
    )
}
