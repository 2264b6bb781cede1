//! Menu items: form draft, backend record, listing and the submission workflow.
pub mod category;
pub mod draft;
pub mod record;
pub mod workflow;

use crate::error::AppResult;
use crate::http::PublicHttpClient;

pub use category::{Category, UnknownCategory};
pub use draft::{MenuItemDraft, ValidatedDraft, ValidationError};
pub use record::{MenuEntry, MenuItemRecord};
pub use workflow::{MenuItemSubmissionWorkflow, SubmissionState, SubmitError, MENU_PATH};

/// Fetch the current menu. This read needs no credentials.
pub async fn list_menu(http: &PublicHttpClient) -> AppResult<Vec<MenuEntry>> {
    let response = http.get(MENU_PATH).await?;
    let entries: Vec<MenuEntry> = response.json()?;
    tracing::debug!(count = entries.len(), "Fetched menu");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lists_menu_from_public_endpoint() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/menu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "1", "name": "Veg Roll", "category": "salad", "price": 120, "image": "https://img/x.png"},
                {"_id": "2", "name": "Tea", "category": "drinks", "price": 20.5}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let http = PublicHttpClient::new(mock_server.uri());
        let entries = list_menu(&http).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Veg Roll");
        assert_eq!(entries[1].price, 20.5);
    }
}
