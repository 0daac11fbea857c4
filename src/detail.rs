//! Detail view: one character, optionally with prev/next traversal

use dialoguer::{theme::ColorfulTheme, Select};
use marvel_protocol::{Character, ImageVariant};
use std::sync::Arc;

use crate::client::CatalogApi;
use crate::error::{ExplorerError, Result};
use crate::fetch::FetchGuard;
use crate::navigation::Navigation;
use crate::ui::{create_spinner, UI};

pub const FETCH_DETAILS_FAILED: &str = "Failed to fetch character details. Please try again later.";
pub const CHARACTER_NOT_FOUND: &str = "Character not found.";

/// Result of loading one record
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loaded(Box<Character>),
    NotFound,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Next,
    Back,
}

impl NavAction {
    pub fn label(&self) -> &'static str {
        match self {
            NavAction::Previous => "← Previous",
            NavAction::Next => "Next →",
            NavAction::Back => "Back to List",
        }
    }
}

/// Actions offered for the current cursor; Previous/Next drop out at the ends
pub fn available_actions(navigation: &Navigation) -> Vec<NavAction> {
    let mut actions = Vec::with_capacity(3);
    if navigation.has_previous() {
        actions.push(NavAction::Previous);
    }
    if navigation.has_next() {
        actions.push(NavAction::Next);
    }
    actions.push(NavAction::Back);
    actions
}

pub struct DetailView<C: CatalogApi> {
    client: Arc<C>,
    guard: FetchGuard<i64>,
    ui: UI,
}

impl<C: CatalogApi> DetailView<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            guard: FetchGuard::new(),
            ui: UI::new(),
        }
    }

    /// Fetch `id`, superseding any load still in flight.
    ///
    /// `None` means a newer load replaced this one and the result was dropped.
    pub async fn load(&self, id: i64) -> Option<DetailState> {
        let ticket = self.guard.begin(id);
        let outcome = self
            .guard
            .run(&ticket, self.client.lookup_character(id))
            .await?;

        Some(match outcome {
            Ok(Some(character)) => DetailState::Loaded(Box::new(character)),
            Ok(None) => DetailState::NotFound,
            Err(e) => {
                tracing::debug!(id, error = %e, "Character lookup failed");
                DetailState::Failed
            }
        })
    }

    async fn load_with_spinner(&self, id: i64) -> Option<DetailState> {
        let spinner = create_spinner("Loading character...");
        let state = self.load(id).await;
        spinner.finish_and_clear();
        state
    }

    fn render(&self, character: &Character) {
        let image_url = self
            .client
            .resolve_image_url(character, ImageVariant::PortraitXlarge);
        self.ui.character_detail(character, &image_url);
    }

    /// `show <id>`: a single record, no traversal
    pub async fn show(&self, id: i64) -> Result<()> {
        match self.load_with_spinner(id).await {
            Some(DetailState::Loaded(character)) => {
                self.render(&character);
                Ok(())
            }
            Some(DetailState::NotFound) => Err(ExplorerError::not_found("Character")),
            Some(DetailState::Failed) => Err(ExplorerError::fetch_failed(FETCH_DETAILS_FAILED)),
            None => Ok(()),
        }
    }

    /// Show the navigation's current record and follow Previous/Next until Back
    pub async fn navigate(&self, mut navigation: Navigation) -> Result<()> {
        loop {
            match self.load_with_spinner(navigation.current_id()).await {
                Some(DetailState::Loaded(character)) => self.render(&character),
                Some(DetailState::NotFound) => self.ui.error(CHARACTER_NOT_FOUND),
                Some(DetailState::Failed) => self.ui.error(FETCH_DETAILS_FAILED),
                None => continue,
            }

            if let Some(progress) = navigation.progress_label() {
                self.ui.dimmed(&progress);
            }

            let actions = available_actions(&navigation);
            let labels: Vec<&str> = actions.iter().map(NavAction::label).collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .items(&labels)
                .default(0)
                .interact_opt()?;

            match selection.map(|index| actions[index]) {
                Some(NavAction::Previous) => {
                    navigation.move_previous();
                }
                Some(NavAction::Next) => {
                    navigation.move_next();
                }
                Some(NavAction::Back) | None => return Ok(()),
            }
        }
    }

    /// Pick a record from `snapshot`, open it, and come back to the picker on Back
    pub async fn browse(&self, snapshot: Arc<[Character]>) -> Result<()> {
        if snapshot.is_empty() {
            return Ok(());
        }

        let mut items: Vec<&str> = snapshot.iter().map(|c| c.name.as_str()).collect();
        items.push("Quit");

        let mut last = 0;
        loop {
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Open a character")
                .items(&items)
                .default(last)
                .max_length(15)
                .interact_opt()?;

            let Some(index) = selection.filter(|&i| i < snapshot.len()) else {
                return Ok(());
            };
            last = index;

            let navigation = Navigation::new(Arc::clone(&snapshot), snapshot[index].id);
            self.navigate(navigation).await?;
        }
    }
}
