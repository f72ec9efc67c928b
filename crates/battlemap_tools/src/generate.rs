//! Turn command-line options into a battlefield request and run it.

use std::path::{Path, PathBuf};

use battlemap_core::battlefield::{Battlefield, BattlefieldRequest};
use battlemap_core::catalog::TerrainCatalog;
use battlemap_core::map_generation::MapConfig;
use battlemap_core::render::DebugLevel;
use battlemap_core::rng::parse_seed;
use battlemap_core::scenario::Scenario;
use battlemap_core::settings::{GeneratorSettings, ResourceBudget};

use crate::ascii::{render_ascii, AsciiConfig};
use crate::error::{CliError, Result};
use crate::report::GenerationReport;

/// How to print a generated battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty JSON report.
    #[default]
    Json,
    /// Terminal preview.
    Ascii,
}

/// Options for one `generate` invocation, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Map seed as a decimal string.
    pub seed: Option<String>,
    /// Token seed as a decimal string.
    pub token_seed: Option<String>,
    /// Scenario name or index.
    pub scenario: Option<String>,
    /// Resource budget, `"2,0,3"`.
    pub resources: Option<String>,
    /// Force weighted selection on.
    pub weighted: bool,
    /// RON settings file applied before the other flags.
    pub settings: Option<PathBuf>,
    /// Token debug overlay, 0-2.
    pub debug_level: u8,
    /// Output format.
    pub format: OutputFormat,
}

/// Read a RON settings file.
pub fn load_settings(path: &Path) -> Result<GeneratorSettings> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = GeneratorSettings::from_ron(&source)?;
    tracing::debug!(path = %path.display(), ?settings, "Loaded settings");
    Ok(settings)
}

/// Scenario by display name or by share-link index.
pub fn parse_scenario(raw: &str) -> Result<Scenario> {
    let trimmed = raw.trim();
    let scenario = if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Scenario::from_index_param(trimmed)?
    } else {
        trimmed.parse::<Scenario>()?
    };
    Ok(scenario)
}

/// Build the request `options` describe.
///
/// A settings file is applied first; `--weighted` and `--resources` then
/// override it.
pub fn build_request(options: &GenerateOptions) -> Result<BattlefieldRequest> {
    let mut settings = match &options.settings {
        Some(path) => load_settings(path)?,
        None => GeneratorSettings::default(),
    };
    if options.weighted {
        settings.weighted = true;
    }
    if let Some(raw) = &options.resources {
        settings.resources = Some(ResourceBudget::from_param(raw)?);
    }

    let mut map = MapConfig::default();
    if let Some(raw) = &options.seed {
        map = map.with_seed(parse_seed(raw)?);
    }

    let mut request = BattlefieldRequest::default()
        .with_map(map)
        .with_settings(settings);
    if let Some(raw) = &options.scenario {
        request = request.with_scenario(parse_scenario(raw)?);
    }
    if let Some(raw) = &options.token_seed {
        request = request.with_token_seed(parse_seed(raw)?);
    }
    Ok(request)
}

/// Generate a battlefield and format it for printing.
pub fn run(options: &GenerateOptions) -> Result<String> {
    let debug_level = DebugLevel::try_from(options.debug_level)?;
    let request = build_request(options)?;
    let field = Battlefield::generate(&request, TerrainCatalog::standard())?;

    tracing::info!(
        seed = field.map().seed,
        nodes = field.map().nodes.len(),
        outcome = ?field.map().outcome,
        tokens = field.tokens().len(),
        "Battlefield generated"
    );

    match options.format {
        OutputFormat::Json => {
            let report = GenerationReport::new(&field, &request.settings, debug_level);
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Ascii => Ok(render_ascii(
            &field,
            &AsciiConfig {
                debug_level,
                ..AsciiConfig::default()
            },
        )),
    }
}
