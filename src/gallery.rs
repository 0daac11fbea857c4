//! Gallery view: image URLs and badges, filtered but never sorted

use marvel_protocol::{ImageVariant, ListCharactersQuery};
use std::sync::Arc;

use crate::client::CatalogApi;
use crate::detail::DetailView;
use crate::error::{ExplorerError, Result};
use crate::list::{showing_summary, ListPage, FETCH_CHARACTERS_FAILED};
use crate::query::{CharacterFilter, Query};
use crate::ui::{create_spinner, UI};

pub const NO_FILTERED_CHARACTERS: &str = "No characters found with the selected filter.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryOptions {
    pub filter: CharacterFilter,
    pub limit: u32,
    pub browse: bool,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            filter: CharacterFilter::All,
            limit: marvel_protocol::MAX_PAGE_SIZE,
            browse: false,
        }
    }
}

pub struct GalleryView<C: CatalogApi> {
    client: Arc<C>,
    ui: UI,
}

impl<C: CatalogApi> GalleryView<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            ui: UI::new(),
        }
    }

    /// Fetched page with the categorical filter applied, in server order
    pub async fn load(&self, options: &GalleryOptions) -> Result<ListPage> {
        let request = ListCharactersQuery::new().limit(options.limit);

        match self.client.list_characters(&request).await {
            Ok(response) => Ok(ListPage {
                characters: Query::new()
                    .filter(options.filter)
                    .apply(&response.data.results),
                fetched: response.data.results.len(),
                attribution: response.attribution_text,
            }),
            Err(e) if e.is_transport_error() => {
                tracing::debug!(error = %e, "Gallery fetch failed");
                Err(ExplorerError::fetch_failed(FETCH_CHARACTERS_FAILED))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn run(&self, options: GalleryOptions) -> Result<()> {
        let spinner = create_spinner("Loading gallery...");
        let page = self.load(&options).await;
        spinner.finish_and_clear();
        let page = page?;

        self.ui.header("Character Gallery");
        self.ui.dimmed(&format!("Filter: {}", options.filter.label()));
        self.ui.info(&showing_summary(page.characters.len(), page.fetched));
        self.ui.blank_line();

        if page.characters.is_empty() {
            self.ui.warning(NO_FILTERED_CHARACTERS);
            return Ok(());
        }

        for character in &page.characters {
            let image_url = self
                .client
                .resolve_image_url(character, ImageVariant::PortraitXlarge);
            self.ui.gallery_card(character, &image_url);
        }

        if let Some(attribution) = &page.attribution {
            self.ui.dimmed(attribution);
        }

        if options.browse {
            DetailView::new(Arc::clone(&self.client))
                .browse(page.characters.into())
                .await?;
        }
        Ok(())
    }
}
