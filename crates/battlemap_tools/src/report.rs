//! JSON report of a generated battlefield.

use battlemap_core::battlefield::Battlefield;
use battlemap_core::catalog::TerrainCategory;
use battlemap_core::map_generation::MapOutcome;
use battlemap_core::render::{DebugLevel, MapFrame, TokenFrame};
use battlemap_core::settings::GeneratorSettings;
use battlemap_core::tokens::TokenRun;
use serde::Serialize;

/// Everything `generate --format json` prints.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Terrain layer.
    pub map: MapReport,
    /// Token layer; `null` without a scenario.
    pub tokens: Option<TokenRun>,
    /// Parameters that reproduce this battlefield.
    pub share: ShareParams,
    /// Draw commands, included when a debug level is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<Frames>,
}

/// Terrain layer summary.
#[derive(Debug, Clone, Serialize)]
pub struct MapReport {
    /// Map seed.
    pub seed: u32,
    /// Map width.
    pub width: f64,
    /// Map height.
    pub height: f64,
    /// Piece count the run aimed for.
    pub target: u32,
    /// Placement attempts made.
    pub attempts: u32,
    /// Why the run stopped.
    pub outcome: MapOutcome,
    /// Placed pieces in placement order.
    pub nodes: Vec<NodeReport>,
}

/// One placed piece.
#[derive(Debug, Clone, Serialize)]
pub struct NodeReport {
    /// Catalog id.
    pub type_id: usize,
    /// Image key.
    pub visual_tag: &'static str,
    /// Gameplay category.
    pub category: TerrainCategory,
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Rotation in radians.
    pub angle: f64,
    /// Overlap radius.
    pub bounding_radius: f64,
}

/// Sharing-channel parameters as plain decimal strings.
#[derive(Debug, Clone, Serialize)]
pub struct ShareParams {
    /// Map seed.
    pub seed: String,
    /// Token seed, if tokens were generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_seed: Option<String>,
    /// Scenario index, if tokens were generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Settings flags.
    pub settings: String,
    /// Resource budget; empty when unrestricted.
    pub resources: String,
}

/// Render frames for both layers.
#[derive(Debug, Clone, Serialize)]
pub struct Frames {
    /// Terrain layer with debug markers.
    pub map: MapFrame,
    /// Token layer at the requested debug level.
    pub tokens: TokenFrame,
}

impl GenerationReport {
    /// Summarize `field`. Frames are attached unless `debug_level` is off.
    #[must_use]
    pub fn new(
        field: &Battlefield<'_>,
        settings: &GeneratorSettings,
        debug_level: DebugLevel,
    ) -> Self {
        let run = field.map();
        let map = MapReport {
            seed: run.seed,
            width: run.config.width,
            height: run.config.height,
            target: run.target,
            attempts: run.attempts,
            outcome: run.outcome,
            nodes: run
                .nodes
                .iter()
                .map(|node| NodeReport {
                    type_id: node.terrain.id,
                    visual_tag: node.terrain.visual_tag,
                    category: node.terrain.category,
                    x: node.position.x,
                    y: node.position.y,
                    angle: node.angle,
                    bounding_radius: node.bounding_radius,
                })
                .collect(),
        };

        let tokens = field.token_run().cloned();
        let share = ShareParams {
            seed: run.seed.to_string(),
            token_seed: tokens.as_ref().map(|t| t.seed.to_string()),
            scenario: tokens.as_ref().map(|t| t.scenario.index().to_string()),
            settings: settings.settings_param(),
            resources: settings.resources_param(),
        };

        let frames = (debug_level != DebugLevel::Off).then(|| Frames {
            map: field.map_frame(true),
            tokens: field.token_frame(debug_level),
        });

        Self {
            map,
            tokens,
            share,
            frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battlemap_core::battlefield::BattlefieldRequest;
    use battlemap_core::catalog::TerrainCatalog;
    use battlemap_core::map_generation::MapConfig;
    use battlemap_core::scenario::Scenario;
    use battlemap_core::settings::ResourceBudget;

    fn field(request: &BattlefieldRequest) -> Battlefield<'static> {
        Battlefield::generate(request, TerrainCatalog::standard()).unwrap()
    }

    #[test]
    fn test_share_params_reproduce_request() {
        let settings =
            GeneratorSettings::default().with_resources(ResourceBudget::new(vec![2, 0, 3, 1, 4]));
        let request = BattlefieldRequest::default()
            .with_map(MapConfig::default().with_seed(4_294_967_295))
            .with_settings(settings.clone())
            .with_scenario(Scenario::Raze)
            .with_token_seed(0);
        let report = GenerationReport::new(&field(&request), &settings, DebugLevel::Off);

        assert_eq!(report.share.seed, "4294967295");
        assert_eq!(report.share.token_seed.as_deref(), Some("0"));
        assert_eq!(report.share.scenario.as_deref(), Some("11"));
        assert_eq!(report.share.settings, "0");
        assert_eq!(report.share.resources, "2,0,3,1,4");
        assert!(report.frames.is_none());
    }

    #[test]
    fn test_nodes_follow_placement_order() {
        let request = BattlefieldRequest::default().with_map(MapConfig::default().with_seed(42));
        let field = field(&request);
        let report = GenerationReport::new(&field, &GeneratorSettings::default(), DebugLevel::Off);
        assert_eq!(report.map.nodes.len(), field.map().nodes.len());
        for (node, placed) in report.map.nodes.iter().zip(&field.map().nodes) {
            assert_eq!(node.x, placed.position.x);
            assert_eq!(node.visual_tag, placed.terrain.visual_tag);
        }
        assert!(report.tokens.is_none());
        assert!(report.share.token_seed.is_none());
    }

    #[test]
    fn test_debug_level_attaches_frames() {
        let request = BattlefieldRequest::default()
            .with_map(MapConfig::default().with_seed(8))
            .with_scenario(Scenario::Raze)
            .with_token_seed(8);
        let report = GenerationReport::new(
            &field(&request),
            &GeneratorSettings::default(),
            DebugLevel::TerrainClearance,
        );
        let frames = report.frames.unwrap();
        assert_eq!(frames.tokens.commands.len(), 2 * 7);

        let json = serde_json::to_value(&frames.map).unwrap();
        assert_eq!(json["commands"][0]["kind"], "background");
    }
}
