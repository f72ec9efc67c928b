//! ASCII battlefield preview for terminal review.
//!
//! Each terrain piece fills the cells its bounding circle covers with a
//! character for its category. Tokens are drawn on top.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use battlemap_core::battlefield::Battlefield;
use battlemap_core::catalog::TerrainCategory;
use battlemap_core::math::Vec2;
use battlemap_core::render::DebugLevel;
use battlemap_core::tokens::TOKEN_CLEARANCE;

/// ASCII preview configuration.
#[derive(Debug, Clone)]
pub struct AsciiConfig {
    /// Width of the ASCII viewport.
    pub width: usize,
    /// Height of the ASCII viewport.
    pub height: usize,
    /// Show the symbol legend and piece counts.
    pub show_legend: bool,
    /// Use colored output (ANSI).
    pub use_color: bool,
    /// Ring tokens with their terrain clearance.
    pub debug_level: DebugLevel,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            show_legend: true,
            use_color: false,
            debug_level: DebugLevel::Off,
        }
    }
}

/// ANSI color codes.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";

    pub const BLUE: &str = "\x1b[34m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GREEN: &str = "\x1b[32m";
    pub const WHITE: &str = "\x1b[37m";
    pub const GRAY: &str = "\x1b[90m";
}

fn category_char(category: TerrainCategory) -> char {
    match category {
        TerrainCategory::Blocking => '#',
        TerrainCategory::Difficult => '~',
        TerrainCategory::Obstacle => '=',
        TerrainCategory::Hill => '^',
        TerrainCategory::Forest => 'T',
    }
}

fn category_color(category: TerrainCategory) -> &'static str {
    match category {
        TerrainCategory::Blocking => colors::RED,
        TerrainCategory::Difficult => colors::BLUE,
        TerrainCategory::Obstacle => colors::WHITE,
        TerrainCategory::Hill => colors::YELLOW,
        TerrainCategory::Forest => colors::GREEN,
    }
}

const TOKEN_CHAR: char = 'O';
const CLEARANCE_CHAR: char = '+';

struct Grid {
    cells: Vec<Vec<(char, &'static str)>>,
    scale: Vec2,
}

impl Grid {
    #[allow(clippy::cast_precision_loss)]
    fn new(config: &AsciiConfig, map_width: f64, map_height: f64) -> Self {
        Self {
            cells: vec![vec![('.', ""); config.width]; config.height],
            scale: Vec2::new(
                config.width as f64 / map_width.max(1.0),
                config.height as f64 / map_height.max(1.0),
            ),
        }
    }

    /// Map-space center of cell `(col, row)`.
    #[allow(clippy::cast_precision_loss)]
    fn cell_center(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            (col as f64 + 0.5) / self.scale.x,
            (row as f64 + 0.5) / self.scale.y,
        )
    }

    /// Fill every cell whose center lies within `radius` of `center`.
    fn fill_circle(&mut self, center: Vec2, radius: f64, cell: (char, &'static str)) {
        for row in 0..self.cells.len() {
            for col in 0..self.cells[row].len() {
                if self.cell_center(col, row).distance(center) <= radius {
                    self.cells[row][col] = cell;
                }
            }
        }
    }

    /// Set the cell containing `point`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn plot(&mut self, point: Vec2, cell: (char, &'static str)) {
        let rows = self.cells.len();
        let cols = self.cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return;
        }
        let col = ((point.x * self.scale.x).max(0.0) as usize).min(cols - 1);
        let row = ((point.y * self.scale.y).max(0.0) as usize).min(rows - 1);
        self.cells[row][col] = cell;
    }
}

/// Render a battlefield as ASCII art.
pub fn render_ascii(field: &Battlefield<'_>, config: &AsciiConfig) -> String {
    let run = field.map();
    let mut grid = Grid::new(config, run.config.width, run.config.height);

    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for node in &run.nodes {
        let category = node.terrain.category;
        grid.fill_circle(
            node.position,
            node.bounding_radius,
            (category_char(category), category_color(category)),
        );
        *counts.entry(node.terrain.visual_tag).or_default() += 1;
    }

    if config.debug_level >= DebugLevel::TerrainClearance {
        for token in field.tokens() {
            grid.fill_circle(token.position(), TOKEN_CLEARANCE, (CLEARANCE_CHAR, colors::GRAY));
        }
    }
    for token in field.tokens() {
        grid.plot(token.position(), (TOKEN_CHAR, colors::BOLD));
    }

    let (on, off) = if config.use_color {
        (colors::BOLD, colors::RESET)
    } else {
        ("", "")
    };
    let scenario = field
        .token_run()
        .map_or_else(
            || "none".to_string(),
            |t| format!("{} (token seed {})", t.scenario, t.seed),
        );

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{on}╔══ Seed: {} │ Pieces: {}/{} │ Scenario: {scenario} ══╗{off}",
        run.seed,
        run.nodes.len(),
        run.target,
    );

    let border: String = "═".repeat(config.width);
    let _ = writeln!(output, "║{border}║");
    for row in &grid.cells {
        output.push('║');
        for (ch, color) in row {
            if config.use_color && !color.is_empty() {
                output.push_str(color);
                output.push(*ch);
                output.push_str(colors::RESET);
            } else {
                output.push(*ch);
            }
        }
        output.push_str("║\n");
    }

    if config.show_legend {
        let rule = "═".repeat(config.width.saturating_sub(10));
        let _ = writeln!(output, "╠══ LEGEND {rule}╣");
        let _ = writeln!(
            output,
            "║ #=Blocking ~=Difficult ==Obstacle ^=Hill T=Forest O=Token +=Clearance"
        );
        let pieces = counts
            .iter()
            .map(|(tag, n)| format!("{tag}:{n}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(output, "║ {pieces}");
    }

    let _ = writeln!(output, "╚{border}╝");
    output
}
