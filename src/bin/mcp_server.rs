//! Pokedex MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp)
//! that exposes the Pokemon catalog, the mock session and the user profile
//! as tools for LLM interaction.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use pokedex::catalog::{CatalogRequest, CatalogState, ViewKind, FILTER_ALL};
use pokedex::interface::*;
use pokedex::{Pokedex, PokedexConfig, PokedexError};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct PokedexService {
    tool_router: ToolRouter<PokedexService>,
    pokedex: Arc<Pokedex>,
    page: Arc<Mutex<CatalogState>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FilterRequest {
    #[schemars(description = "Type name such as 'fire' or 'water', or 'all' to clear the filter")]
    pub type_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IdRequest {
    #[schemars(description = "Catalog number of the Pokemon")]
    pub id: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StrongestRequest {
    #[schemars(description = "How many Pokemon to rank (default 10)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    #[schemars(description = "Catalog number or part of a name; empty lists the first 50")]
    pub term: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToggleTypeRequest {
    #[schemars(description = "Type name to add to or remove from the favourites")]
    pub type_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToggleGenreRequest {
    #[schemars(description = "Movie genre to add to or remove from the favourites")]
    pub genre: String,
}

fn text(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn internal_error(context: &str, error: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(format!("{}: {}", context, error)),
        data: None,
    }
}

#[tool_router]
impl PokedexService {
    pub fn new(pokedex: Pokedex, page_size: u32) -> Self {
        Self {
            tool_router: Self::tool_router(),
            pokedex: Arc::new(pokedex),
            page: Arc::new(Mutex::new(CatalogState::new(page_size))),
        }
    }

    fn render_page(&self) -> String {
        let state = self.page.lock().unwrap_or_else(PoisonError::into_inner);
        display_catalog_page(&state)
    }

    // The view the page was trying to show, for error messages.
    fn page_view(&self) -> ViewKind {
        let state = self.page.lock().unwrap_or_else(PoisonError::into_inner);
        if state.filter == FILTER_ALL {
            ViewKind::All {
                limit: state.limit,
                offset: state.offset,
            }
        } else {
            ViewKind::ByType(state.filter.clone())
        }
    }

    async fn browse(&self, request: CatalogRequest) -> Result<CallToolResult, McpError> {
        match self.pokedex.browse(&self.page, request).await {
            Ok(true) => text(self.render_page()),
            Ok(false) => text(format!(
                "A newer list request replaced this one.\n{}",
                self.render_page()
            )),
            Err(e) => text(describe_error(&self.page_view(), &e)),
        }
    }

    async fn run_view(&self, kind: ViewKind) -> Result<CallToolResult, McpError> {
        let result = self.pokedex.view(&kind).await;
        text(render_view(&kind, &result))
    }

    #[tool(description = "Reload the current page of the Pokemon list")]
    async fn list_pokemon(&self) -> Result<CallToolResult, McpError> {
        self.browse(CatalogRequest::Reload).await
    }

    #[tool(description = "Filter the Pokemon list by type (up to 20 members), or 'all'")]
    async fn pokemon_by_type(
        &self,
        Parameters(request): Parameters<FilterRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.browse(CatalogRequest::Filter(request.type_name)).await
    }

    #[tool(description = "Append the next page to the Pokemon list")]
    async fn load_more_pokemon(&self) -> Result<CallToolResult, McpError> {
        self.browse(CatalogRequest::LoadMore).await
    }

    #[tool(description = "Open the detail panel of a Pokemon in the current list")]
    async fn select_listed_pokemon(
        &self,
        Parameters(request): Parameters<IdRequest>,
    ) -> Result<CallToolResult, McpError> {
        let found = {
            let mut state = self.page.lock().unwrap_or_else(PoisonError::into_inner);
            state.select(request.id).is_some()
        };
        if found {
            text(self.render_page())
        } else {
            text(format!(
                "Pokemon #{} is not in the current list.",
                request.id
            ))
        }
    }

    #[tool(description = "Close the detail panel of the Pokemon list")]
    async fn close_pokemon_detail(&self) -> Result<CallToolResult, McpError> {
        self.page
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear_selection();
        text(self.render_page())
    }

    #[tool(description = "Look up detailed information about one Pokemon")]
    async fn lookup_pokemon(
        &self,
        Parameters(request): Parameters<IdRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run_view(ViewKind::ById(request.id)).await
    }

    #[tool(description = "Rank the first 50 Pokemon by their total base stats")]
    async fn strongest_pokemon(
        &self,
        Parameters(request): Parameters<StrongestRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run_view(ViewKind::Strongest {
            limit: request.limit.unwrap_or(10),
        })
        .await
    }

    #[tool(description = "List the most popular Pokemon")]
    async fn popular_pokemon(&self) -> Result<CallToolResult, McpError> {
        self.run_view(ViewKind::Popular).await
    }

    #[tool(description = "List the legendary Pokemon")]
    async fn legendary_pokemon(&self) -> Result<CallToolResult, McpError> {
        self.run_view(ViewKind::Legendary).await
    }

    #[tool(description = "Search Pokemon by catalog number or by name")]
    async fn search_pokemon(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let title = format!("Search '{}'", request.term.trim());
        match self.pokedex.search(&request.term).await {
            Ok(found) => text(display_pokemon_list(&title, &found)),
            Err(PokedexError::NotAuthenticated) => text("You need to log in first.".to_string()),
            Err(e) => text(format!("Search failed: {}", e)),
        }
    }

    #[tool(description = "Log in with a username and password")]
    async fn login(
        &self,
        Parameters(request): Parameters<LoginRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .pokedex
            .session()
            .submit(&request.username, &request.password)
        {
            Ok(outcome) => text(display_login_outcome(outcome).to_string()),
            Err(e) => Err(internal_error("Error saving session", e)),
        }
    }

    #[tool(description = "Log out of the current session")]
    async fn logout(&self) -> Result<CallToolResult, McpError> {
        match self.pokedex.session().logout() {
            Ok(()) => text("You have been logged out.".to_string()),
            Err(e) => Err(internal_error("Error clearing session", e)),
        }
    }

    #[tool(description = "Show the user profile and preferences")]
    async fn get_profile(&self) -> Result<CallToolResult, McpError> {
        if self.pokedex.session().require_auth().is_err() {
            return text("You need to log in first.".to_string());
        }
        let profile = self.pokedex.profile().get();
        text(format!(
            "{}\n{}\n{}",
            display_profile(&profile),
            display_type_palette(&profile),
            display_movie_genres(&profile)
        ))
    }

    #[tool(description = "Add or remove a favourite Pokemon type")]
    async fn toggle_favorite_type(
        &self,
        Parameters(request): Parameters<ToggleTypeRequest>,
    ) -> Result<CallToolResult, McpError> {
        if self.pokedex.session().require_auth().is_err() {
            return text("You need to log in first.".to_string());
        }
        let name = request.type_name.trim().to_lowercase();
        let mut selected = false;
        self.pokedex
            .profile()
            .update(|profile| selected = profile.toggle_favorite_type(&name))
            .map_err(|e| internal_error("Error saving profile", e))?;
        text(display_toggle("types", &name, selected))
    }

    #[tool(description = "Add or remove a favourite movie genre")]
    async fn toggle_movie_genre(
        &self,
        Parameters(request): Parameters<ToggleGenreRequest>,
    ) -> Result<CallToolResult, McpError> {
        if self.pokedex.session().require_auth().is_err() {
            return text("You need to log in first.".to_string());
        }
        let genre = request.genre.trim().to_string();
        let mut selected = false;
        self.pokedex
            .profile()
            .update(|profile| selected = profile.toggle_movie_genre(&genre))
            .map_err(|e| internal_error("Error saving profile", e))?;
        text(display_toggle("movie genres", &genre, selected))
    }

    #[tool(description = "Use a Pokemon's artwork as the profile avatar")]
    async fn select_avatar(
        &self,
        Parameters(request): Parameters<IdRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.pokedex.select_avatar(request.id).await {
            Ok(profile) => text(format!("Avatar updated.\n{}", display_profile(&profile))),
            Err(e) => text(describe_error(&ViewKind::ById(request.id), &e)),
        }
    }
}

#[tool_handler]
impl ServerHandler for PokedexService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the MCP transport; logs go to stderr.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| format!("tracing init failed: {}", e))?;

    let config_path = std::env::var_os("POKEDEX_CONFIG").map(PathBuf::from);
    let config = PokedexConfig::load_or_default(config_path.as_deref())?;
    let pokedex = Pokedex::from_config(&config)?;

    info!("Pokedex MCP Server starting...");
    let service = PokedexService::new(pokedex, config.page_size);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    info!("Server running, waiting for shutdown...");
    let quit_reason = server.waiting().await?;

    info!(?quit_reason, "Pokedex MCP Server exiting");
    Ok(())
}
