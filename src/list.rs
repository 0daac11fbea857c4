//! List view: one page of characters, searched, filtered and sorted locally

use marvel_protocol::{Character, ListCharactersQuery};
use std::sync::Arc;

use crate::client::CatalogApi;
use crate::detail::DetailView;
use crate::error::{ExplorerError, Result};
use crate::query::{CharacterFilter, Query, SortKey, SortOrder};
use crate::ui::{create_spinner, UI};

pub const FETCH_CHARACTERS_FAILED: &str = "Failed to fetch characters. Please try again later.";
pub const NO_MATCHING_CHARACTERS: &str = "No characters found matching your search.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub search: String,
    pub filter: CharacterFilter,
    pub sort: SortKey,
    pub order: SortOrder,
    pub limit: u32,
    pub offset: u32,
    pub browse: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: CharacterFilter::All,
            sort: SortKey::Name,
            order: SortOrder::Asc,
            limit: marvel_protocol::MAX_PAGE_SIZE,
            offset: 0,
            browse: false,
        }
    }
}

impl ListOptions {
    pub fn query(&self) -> Query {
        Query::new()
            .search(self.search.clone())
            .filter(self.filter)
            .sort_by(self.sort, self.order)
    }
}

/// What the list view shows: the derived rows plus the size of the fetched page
#[derive(Debug, Clone)]
pub struct ListPage {
    pub characters: Vec<Character>,
    pub fetched: usize,
    pub attribution: Option<String>,
}

pub struct ListView<C: CatalogApi> {
    client: Arc<C>,
    ui: UI,
}

impl<C: CatalogApi> ListView<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            ui: UI::new(),
        }
    }

    /// Fetch one page and derive the visible rows. Any fetch failure becomes a
    /// single user-facing error and no rows.
    pub async fn load(&self, options: &ListOptions) -> Result<ListPage> {
        let request = ListCharactersQuery::new()
            .limit(options.limit)
            .offset(options.offset);

        let response = match self.client.list_characters(&request).await {
            Ok(response) => response,
            Err(e) if e.is_transport_error() => {
                tracing::debug!(error = %e, "Character list fetch failed");
                return Err(ExplorerError::fetch_failed(FETCH_CHARACTERS_FAILED));
            }
            Err(e) => return Err(e),
        };

        let attribution = response.attribution_text.clone();
        let fetched = response.into_results();
        let characters = options.query().apply(&fetched);

        Ok(ListPage {
            characters,
            fetched: fetched.len(),
            attribution,
        })
    }

    pub async fn run(&self, options: ListOptions) -> Result<()> {
        let spinner = create_spinner("Loading characters...");
        let page = self.load(&options).await;
        spinner.finish_and_clear();
        let page = page?;

        self.render(&page);

        if options.browse && !page.characters.is_empty() {
            DetailView::new(Arc::clone(&self.client))
                .browse(page.characters.into())
                .await?;
        }
        Ok(())
    }

    pub fn render(&self, page: &ListPage) {
        self.ui.header("Marvel Characters");
        self.ui.info(&showing_summary(page.characters.len(), page.fetched));
        self.ui.blank_line();

        if page.characters.is_empty() {
            self.ui.warning(NO_MATCHING_CHARACTERS);
        } else {
            for (index, character) in page.characters.iter().enumerate() {
                self.ui.character_row(index + 1, character);
            }
        }

        if let Some(attribution) = &page.attribution {
            self.ui.blank_line();
            self.ui.dimmed(attribution);
        }
    }

    /// `search <prefix>`: server-side prefix match, rendered like the list
    pub async fn search(&self, prefix: &str, browse: bool) -> Result<()> {
        if prefix.trim().is_empty() {
            return Err(ExplorerError::invalid_input("Search prefix must not be empty"));
        }

        let spinner = create_spinner("Searching...");
        let characters = self.client.search_characters(prefix).await;
        spinner.finish_and_clear();

        let page = ListPage {
            fetched: characters.len(),
            characters,
            attribution: None,
        };
        self.render(&page);

        if browse && !page.characters.is_empty() {
            DetailView::new(Arc::clone(&self.client))
                .browse(page.characters.into())
                .await?;
        }
        Ok(())
    }
}

pub fn showing_summary(shown: usize, fetched: usize) -> String {
    format!("Showing {} of {} characters", shown, fetched)
}
