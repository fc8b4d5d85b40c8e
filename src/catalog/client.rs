//! HTTP client for the ExerciseDB RapidAPI endpoints

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ExerciseCatalog, RemoteExercise};
use crate::config::Config;
use crate::error::{CatalogError, CatalogResult};

const KEY_HEADER: &str = "X-RapidAPI-Key";
const HOST_HEADER: &str = "X-RapidAPI-Host";

pub struct ExerciseDbClient {
    client: Client,
    config: Config,
}

impl ExerciseDbClient {
    pub fn new(config: Config) -> CatalogResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Base URL with `segments` appended, each percent-encoded on its own
    fn endpoint(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request<T: DeserializeOwned>(&self, url: Url, query: &[(&str, usize)]) -> CatalogResult<T> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(query)
            .header(KEY_HEADER, &self.config.api_key)
            .header(HOST_HEADER, &self.config.api_host)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch one exercise by ExerciseDB id. A 404 means "not found", not an error.
    pub async fn get_by_id(&self, id: &str) -> CatalogResult<Option<RemoteExercise>> {
        let url = self.endpoint(&["exercises", "exercise", id])?;
        match self.request(url, &[]).await {
            Ok(exercise) => Ok(Some(exercise)),
            Err(CatalogError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Walk the full listing page by page.
    ///
    /// Stops on an empty page, a short page, or after `max_pages` pages.
    /// A zero `page_size` requests nothing.
    pub async fn list_all(&self, page_size: usize, max_pages: Option<usize>) -> CatalogResult<Vec<RemoteExercise>> {
        if page_size == 0 {
            return Ok(Vec::new());
        }
        let mut all = Vec::new();
        let mut offset = 0;
        let mut page = 0;

        while max_pages.is_none_or(|max| page < max) {
            let url = self.endpoint(&["exercises"])?;
            let chunk: Vec<RemoteExercise> = self
                .request(url, &[("limit", page_size), ("offset", offset)])
                .await?;

            let len = chunk.len();
            all.extend(chunk);
            if len == 0 || len < page_size {
                break;
            }

            offset += page_size;
            page += 1;
        }

        Ok(all)
    }
}

#[async_trait]
impl ExerciseCatalog for ExerciseDbClient {
    async fn search_by_name(
        &self,
        name: &str,
        limit: usize,
        offset: usize,
    ) -> CatalogResult<Vec<RemoteExercise>> {
        let url = self.endpoint(&["exercises", "name", name])?;
        self.request(url, &[("limit", limit), ("offset", offset)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ExerciseDbClient {
        let config = Config::resolve(Some("key".to_string()), None, Some(base.to_string())).unwrap();
        ExerciseDbClient::new(config).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_search_term() {
        let c = client("https://exercisedb.p.rapidapi.com");
        let url = c.endpoint(&["exercises", "name", "Cable Pull-Through"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://exercisedb.p.rapidapi.com/exercises/name/Cable%20Pull-Through"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("http://localhost:8080/api/");
        let url = c.endpoint(&["exercises", "exercise", "0001"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/exercises/exercise/0001");
    }

    #[test]
    fn test_endpoint_escapes_slashes() {
        let c = client("http://localhost:8080");
        let url = c.endpoint(&["exercises", "name", "push/pull"]).unwrap();
        assert_eq!(url.path(), "/exercises/name/push%2Fpull");
    }
}
