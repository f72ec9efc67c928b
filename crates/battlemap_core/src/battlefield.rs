//! One generation session: a terrain layout plus the tokens laid over it.
//!
//! The token run is derived from the map run, so the two are always
//! replaced together. Regenerating swaps in the new map and drops the old
//! tokens before the new token run starts.

use serde::{Deserialize, Serialize};

use crate::catalog::TerrainCatalog;
use crate::error::Result;
use crate::map_generation::{self, MapConfig, MapRun};
use crate::render::{DebugLevel, MapFrame, TokenFrame};
use crate::rng::SeededRng;
use crate::scenario::Scenario;
use crate::settings::GeneratorSettings;
use crate::tokens::{Token, TokenGenerator, TokenLayoutConfig, TokenRun};

/// Everything needed to produce a battlefield.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattlefieldRequest {
    /// Map dimensions and map seed.
    pub map: MapConfig,
    /// Weighting and resource budget.
    pub settings: GeneratorSettings,
    /// Scenario to lay tokens out for. `None` skips token placement.
    pub scenario: Option<Scenario>,
    /// Token seed to reproduce; `None` draws a fresh one.
    pub token_seed: Option<u32>,
    /// Token retry budgets. Dimensions follow the map.
    pub tokens: TokenLayoutConfig,
}

impl BattlefieldRequest {
    /// Set the map configuration.
    #[must_use]
    pub fn with_map(mut self, map: MapConfig) -> Self {
        self.map = map;
        self
    }

    /// Set the generator settings.
    #[must_use]
    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Lay tokens out for `scenario`.
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Reproduce a token layout from `seed`.
    #[must_use]
    pub fn with_token_seed(mut self, seed: u32) -> Self {
        self.token_seed = Some(seed);
        self
    }

    /// Set the token retry budgets.
    #[must_use]
    pub fn with_token_layout(mut self, tokens: TokenLayoutConfig) -> Self {
        self.tokens = tokens;
        self
    }
}

/// A generated map and its tokens.
#[derive(Debug, Clone, Serialize)]
pub struct Battlefield<'c> {
    #[serde(skip)]
    catalog: &'c TerrainCatalog,
    map: MapRun<'c>,
    tokens: Option<TokenRun>,
}

impl<'c> Battlefield<'c> {
    /// Generate a map, then tokens over it.
    pub fn generate(request: &BattlefieldRequest, catalog: &'c TerrainCatalog) -> Result<Self> {
        let map = generate_map(request, catalog)?;
        let tokens = generate_tokens(request, &map)?;
        Ok(Self {
            catalog,
            map,
            tokens,
        })
    }

    /// Replace the map and tokens with a fresh run.
    ///
    /// On a token failure the new map is kept and no tokens remain.
    pub fn regenerate(&mut self, request: &BattlefieldRequest) -> Result<()> {
        self.map = generate_map(request, self.catalog)?;
        self.tokens = None;
        self.tokens = generate_tokens(request, &self.map)?;
        Ok(())
    }

    /// The map run.
    #[must_use]
    pub fn map(&self) -> &MapRun<'c> {
        &self.map
    }

    /// The token run, if a scenario was requested.
    #[must_use]
    pub fn token_run(&self) -> Option<&TokenRun> {
        self.tokens.as_ref()
    }

    /// Placed tokens; empty without a scenario.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        self.tokens
            .as_ref()
            .map(|run| run.tokens.as_slice())
            .unwrap_or_default()
    }

    /// Terrain layer for the render sink.
    #[must_use]
    pub fn map_frame(&self, debug: bool) -> MapFrame {
        let config = &self.map.config;
        MapFrame::build(&self.map.nodes, config.width, config.height, debug)
    }

    /// Token layer for the render sink.
    #[must_use]
    pub fn token_frame(&self, level: DebugLevel) -> TokenFrame {
        let config = &self.map.config;
        TokenFrame::build(self.tokens(), config.width, config.height, level)
    }
}

fn generate_map<'c>(
    request: &BattlefieldRequest,
    catalog: &'c TerrainCatalog,
) -> Result<MapRun<'c>> {
    let config = request.map.clone().with_settings(&request.settings);
    map_generation::generate(&config, catalog, request.settings.resources.clone())
}

fn generate_tokens(request: &BattlefieldRequest, map: &MapRun<'_>) -> Result<Option<TokenRun>> {
    let Some(scenario) = request.scenario else {
        return Ok(None);
    };
    let layout = request
        .tokens
        .clone()
        .with_dimensions(map.config.width, map.config.height);
    let mut rng = SeededRng::from_optional_seed(request.token_seed);
    TokenGenerator::new(&map.nodes, layout)
        .generate(scenario, &mut rng)
        .map(Some)
}
