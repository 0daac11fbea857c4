//! Test utilities and helpers for unit tests
//!
//! Builders for character records and serialized response envelopes.

use marvel_protocol::{Character, CharacterDataContainer, CharacterDataWrapper, Image, ResourceList};

/// A character with an empty description and zero related items
pub fn character(id: i64, name: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        description: String::new(),
        modified: "2014-04-29T14:18:17-0400".to_string(),
        thumbnail: Image {
            path: format!("http://i.annihil.us/u/prod/marvel/i/mg/{}", id),
            extension: "jpg".to_string(),
        },
        resource_uri: Some(format!("http://gateway.marvel.com/v1/public/characters/{}", id)),
        comics: ResourceList::default(),
        series: ResourceList::default(),
        stories: ResourceList::default(),
        events: ResourceList::default(),
        urls: Vec::new(),
    }
}

/// A character with the given comics/series/stories availability
pub fn character_with_counts(id: i64, name: &str, comics: u32, series: u32, stories: u32) -> Character {
    let mut c = character(id, name);
    c.comics.available = comics;
    c.series.available = series;
    c.stories.available = stories;
    c
}

pub fn envelope(characters: &[Character]) -> CharacterDataWrapper {
    CharacterDataWrapper {
        code: 200,
        status: "Ok".to_string(),
        attribution_text: Some("Data provided by Marvel. © 2024 MARVEL".to_string()),
        etag: None,
        data: CharacterDataContainer {
            offset: 0,
            limit: characters.len() as u32,
            total: characters.len() as u32,
            count: characters.len() as u32,
            results: characters.to_vec(),
        },
    }
}

pub fn envelope_json(characters: &[Character]) -> String {
    serde_json::to_string(&envelope(characters)).expect("Failed to serialize envelope")
}

pub fn names(characters: &[Character]) -> Vec<&str> {
    characters.iter().map(|c| c.name.as_str()).collect()
}
