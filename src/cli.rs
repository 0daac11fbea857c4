use clap::{ArgAction, Args, Subcommand};
use marvel_protocol::ListCharactersQuery;
use std::path::PathBuf;
use std::sync::Arc;

use crate::client::{CatalogApi, MarvelClient};
use crate::config::{Config, ConfigService};
use crate::detail::DetailView;
use crate::error::Result;
use crate::gallery::{GalleryOptions, GalleryView};
use crate::list::{ListOptions, ListView};
use crate::query::{CharacterFilter, SortKey, SortOrder};
use crate::ui::{create_spinner, UI};
use crate::version::format_version_info;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List characters with search, filter and sort
    #[command(aliases = &["ls"])]
    List(ListArgs),

    /// Show character images and badges
    #[command(aliases = &["g"])]
    Gallery(GalleryArgs),

    /// Show one character in detail
    #[command(aliases = &["detail"])]
    Show(ShowArgs),

    /// Find characters whose name starts with a prefix
    Search(SearchArgs),

    /// Show configuration and API status
    #[command(aliases = &["st"])]
    Status,

    /// Configure settings
    #[command(aliases = &["cfg"])]
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Case-insensitive name search over the fetched page
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// all, hasDescription, hasComics or hasSeries
    #[arg(short, long, default_value = "all")]
    pub filter: CharacterFilter,

    /// name, modified, comics, series or stories
    #[arg(long, default_value = "name")]
    pub sort: SortKey,

    #[arg(long, default_value = "asc")]
    pub order: SortOrder,

    /// Records to fetch (defaults to the configured page size)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: Option<u32>,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Pick a character afterwards and step through the results
    #[arg(long)]
    pub browse: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GalleryArgs {
    #[arg(short, long, default_value = "all")]
    pub filter: CharacterFilter,

    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: Option<u32>,

    #[arg(long)]
    pub browse: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    pub id: i64,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    pub prefix: String,

    #[arg(long)]
    pub browse: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    Show,
    SetKeys {
        public_key: String,
        private_key: String,
    },
    SetEndpoint {
        url: String,
    },
    SetTimeout {
        seconds: u64,
    },
    SetPageSize {
        size: u32,
    },
    SetVerbose {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    Reset,
}

/// CLI handler for processing commands
pub struct CliHandler {
    config: Config,
    config_path: Option<PathBuf>,
    ui: UI,
}

impl CliHandler {
    /// Load configuration from `config_path`, or the default location
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config = match &config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        Ok(Self::with_config(config, config_path))
    }

    /// Use an already loaded configuration; `config_path` is where `config`
    /// subcommands save it
    pub fn with_config(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            ui: UI::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn client(&self) -> Result<Arc<MarvelClient>> {
        let client_config = self.config.to_client_config()?;
        Ok(Arc::new(MarvelClient::new(client_config)?))
    }

    /// Execute a CLI command
    pub async fn execute(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::List(args) => self.handle_list(args).await,
            Commands::Gallery(args) => self.handle_gallery(args).await,
            Commands::Show(args) => self.handle_show(args).await,
            Commands::Search(args) => self.handle_search(args).await,
            Commands::Status => self.handle_status().await,
            Commands::Config(args) => self.handle_config(args).await,
        }
    }

    async fn handle_list(&mut self, args: ListArgs) -> Result<()> {
        let options = ListOptions {
            search: args.search,
            filter: args.filter,
            sort: args.sort,
            order: args.order,
            limit: args.limit.unwrap_or(self.config.page_size),
            offset: args.offset,
            browse: args.browse,
        };
        ListView::new(self.client()?).run(options).await
    }

    async fn handle_gallery(&mut self, args: GalleryArgs) -> Result<()> {
        let options = GalleryOptions {
            filter: args.filter,
            limit: args.limit.unwrap_or(self.config.page_size),
            browse: args.browse,
        };
        GalleryView::new(self.client()?).run(options).await
    }

    async fn handle_show(&mut self, args: ShowArgs) -> Result<()> {
        DetailView::new(self.client()?).show(args.id).await
    }

    async fn handle_search(&mut self, args: SearchArgs) -> Result<()> {
        ListView::new(self.client()?)
            .search(&args.prefix, args.browse)
            .await
    }

    /// Handle status command
    async fn handle_status(&mut self) -> Result<()> {
        let has_credentials = self.config.has_credentials();

        let mut status_info = vec![
            ("Version", format_version_info()),
            ("Endpoint", self.config.endpoint.clone()),
            (
                "Credentials",
                self.ui.format_credentials_status(has_credentials),
            ),
        ];

        if has_credentials {
            let client = self.client()?;
            let spinner = create_spinner("Contacting API...");
            let probe = client
                .list_characters(&ListCharactersQuery::new().limit(1))
                .await;
            spinner.finish_and_clear();

            match probe {
                Ok(response) => {
                    status_info.push(("Server", self.ui.format_server_status(true)));
                    status_info.push(("Characters", response.data.total.to_string()));
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Status probe failed");
                    status_info.push((
                        "Server",
                        format!("{} ({})", self.ui.format_server_status(false), e),
                    ));
                }
            }
        }

        self.ui.card("Status", status_info);
        Ok(())
    }

    /// Handle config command
    async fn handle_config(&mut self, args: ConfigArgs) -> Result<()> {
        let mut service = match self.config_path.clone() {
            Some(path) => ConfigService::with_config_path(self.config.clone(), path),
            None => ConfigService::new(self.config.clone()),
        };
        service.handle_config(args).await?;
        self.config = service.config().clone();
        Ok(())
    }
}
