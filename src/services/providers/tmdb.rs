//! TMDB search provider
//!
//! Queries the TMDB `/search/movie` and `/search/tv` endpoints with a bearer
//! token. Adult content is excluded, the locale is pinned to `en-US`, and
//! only the first result page is fetched; query-text spaces travel as `+`.

use reqwest::{header, Client as HttpClient};

use crate::{
    error::{AppError, AppResult},
    models::{Category, SearchPage},
    services::providers::MetadataProvider,
};

pub struct TmdbProvider {
    http_client: HttpClient,
    api_token: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_token: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_token,
            api_url,
        }
    }

    /// Builds the search URL for one category
    fn search_url(&self, query: &str, category: Category) -> String {
        let query = query.replace(' ', "+");
        format!(
            "{}/search/{}?include_adult=false&language=en-US&page=1&query={}",
            self.api_url,
            category.search_path(),
            query
        )
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search(&self, query: &str, category: Category) -> AppResult<SearchPage> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = self.search_url(query, category);

        let response = self
            .http_client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let page: SearchPage = response.json().await?;

        tracing::info!(
            query = %query,
            category = %category,
            results = page.results.len(),
            total_results = ?page.total_results,
            provider = self.name(),
            "Search page fetched"
        );

        Ok(page)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> TmdbProvider {
        TmdbProvider::new(
            "test_token".to_string(),
            "http://test.local/3".to_string(),
        )
    }

    #[test]
    fn test_search_url_replaces_spaces_with_plus() {
        let provider = create_test_provider();
        let url = provider.search_url("the matrix reloaded", Category::Movie);

        assert!(url.ends_with("&query=the+matrix+reloaded"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_search_url_pins_filters() {
        let provider = create_test_provider();
        let url = provider.search_url("dune", Category::Movie);

        assert_eq!(
            url,
            "http://test.local/3/search/movie?include_adult=false&language=en-US&page=1&query=dune"
        );
    }

    #[test]
    fn test_search_url_category_path() {
        let provider = create_test_provider();

        let movie = provider.search_url("q", Category::Movie);
        let series = provider.search_url("q", Category::Series);

        assert!(movie.contains("/search/movie?"));
        assert!(series.contains("/search/tv?"));
    }

    #[tokio::test]
    async fn test_search_rejects_empty_query() {
        let provider = create_test_provider();

        let result = provider.search("   ", Category::Movie).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
