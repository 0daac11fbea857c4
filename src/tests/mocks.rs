//! Mock implementations for testing

use marvel_protocol::{Character, CharacterDataContainer, CharacterDataWrapper, ListCharactersQuery};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::client::CatalogApi;
use crate::error::{ExplorerError, Result};

/// In-memory catalog standing in for the remote service
#[derive(Debug, Clone, Default)]
pub struct MockCatalogClient {
    pub characters: Vec<Character>,
    pub fail_list: bool,
    pub fail_lookup: bool,
    /// Per-id latency applied to lookups
    pub delays: Arc<Mutex<HashMap<i64, Duration>>>,
    /// Endpoints hit, in order
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockCatalogClient {
    pub fn new(characters: Vec<Character>) -> Self {
        Self {
            characters,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_list: true,
            fail_lookup: true,
            ..Self::default()
        }
    }

    pub fn with_delay(self, id: i64, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(id, delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CatalogApi for MockCatalogClient {
    async fn list_characters(&self, query: &ListCharactersQuery) -> Result<CharacterDataWrapper> {
        self.calls.lock().unwrap().push("/characters".to_string());
        if self.fail_list {
            return Err(ExplorerError::api(500, "Internal Server Error"));
        }

        let matching: Vec<Character> = self
            .characters
            .iter()
            .filter(|c| match &query.name_starts_with {
                Some(prefix) => c.name.to_lowercase().starts_with(&prefix.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();

        let total = matching.len() as u32;
        let results: Vec<Character> = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();

        Ok(CharacterDataWrapper {
            code: 200,
            status: "Ok".to_string(),
            attribution_text: None,
            etag: None,
            data: CharacterDataContainer {
                offset: query.offset,
                limit: query.limit,
                total,
                count: results.len() as u32,
                results,
            },
        })
    }

    async fn lookup_character(&self, id: i64) -> Result<Option<Character>> {
        self.calls.lock().unwrap().push(format!("/characters/{}", id));

        let delay = self.delays.lock().unwrap().get(&id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_lookup {
            return Err(ExplorerError::network("connection refused"));
        }

        Ok(self.characters.iter().find(|c| c.id == id).cloned())
    }
}
