//! Draw-command frames for the map and token layers.
//!
//! The core never touches a drawing surface. It turns placement output into
//! an ordered list of [`DrawCommand`]s in map units, and a [`RenderSink`]
//! owned by the front end replays them. A sink reports whether it has a
//! surface to draw on; presenting to a sink without one fails with
//! [`RenderError::SurfaceNotReady`] instead of waiting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::map_generation::PlacedTerrain;
use crate::math::Vec2;
use crate::tokens::{Token, TOKEN_CLEARANCE, TOKEN_SEPARATION};

/// Distance between grid lines.
pub const GRID_SPACING: f64 = 100.0;

/// Side of the debug marker drawn at each piece center.
pub const CENTER_MARKER_SIZE: f64 = 6.0;

/// Radius of a drawn token.
pub const TOKEN_DRAW_RADIUS: f64 = 4.1;

/// Display height as a fraction of display width.
pub const DISPLAY_ASPECT: f64 = 0.66;

/// Errors at the render boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The sink has no surface to draw on yet.
    #[error("Render surface is not ready")]
    SurfaceNotReady,

    /// Debug level outside `0..=2`.
    #[error("Invalid debug level {0}, expected 0, 1 or 2")]
    InvalidDebugLevel(u8),
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Grass background.
    pub const FIELD: Self = Self(112, 179, 68);
    /// Grid lines and outlines.
    pub const BLACK: Self = Self(0, 0, 0);
    /// Debug overlays.
    pub const RED: Self = Self(255, 0, 0);
    /// Token fill.
    pub const TOKEN: Self = Self(0xca, 0xb9, 0xa5);
}

/// How much token debug overlay to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DebugLevel {
    /// Tokens only.
    #[default]
    Off,
    /// Also the terrain clearance circle.
    TerrainClearance,
    /// Also the token separation circle.
    TokenSeparation,
}

impl TryFrom<u8> for DebugLevel {
    type Error = RenderError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Off),
            1 => Ok(Self::TerrainClearance),
            2 => Ok(Self::TokenSeparation),
            other => Err(RenderError::InvalidDebugLevel(other)),
        }
    }
}

/// One drawing primitive in map units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill the whole frame.
    Background {
        /// Fill color.
        color: Rgb,
    },
    /// Straight stroked line.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Stroke color.
        color: Rgb,
    },
    /// Terrain image centered on a point.
    Sprite {
        /// Image key from the catalog.
        visual_tag: &'static str,
        /// Image center.
        center: Vec2,
        /// Side of the square the image is scaled into.
        size: f64,
        /// Rotation in radians.
        angle: f64,
    },
    /// Filled axis-aligned square.
    Square {
        /// Square center.
        center: Vec2,
        /// Side length.
        size: f64,
        /// Fill color.
        color: Rgb,
    },
    /// Circle outline with an optional fill.
    Circle {
        /// Circle center.
        center: Vec2,
        /// Circle radius.
        radius: f64,
        /// Outline color.
        stroke: Rgb,
        /// Fill color, if filled.
        fill: Option<Rgb>,
    },
}

/// A finished layer ready for a sink.
pub trait Frame {
    /// Map-space size as `(width, height)`.
    fn size(&self) -> (f64, f64);

    /// Commands in drawing order.
    fn commands(&self) -> &[DrawCommand];
}

/// Terrain layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFrame {
    /// Map width.
    pub width: f64,
    /// Map height.
    pub height: f64,
    /// Commands in drawing order.
    pub commands: Vec<DrawCommand>,
}

impl MapFrame {
    /// Background, grid, then one sprite per piece. With `debug`, each piece
    /// also gets a center marker and its bounding circle.
    #[must_use]
    pub fn build(nodes: &[PlacedTerrain<'_>], width: f64, height: f64, debug: bool) -> Self {
        let mut commands = vec![DrawCommand::Background { color: Rgb::FIELD }];
        commands.extend(grid_lines(width, height));

        for node in nodes {
            commands.push(DrawCommand::Sprite {
                visual_tag: node.terrain.visual_tag,
                center: node.position,
                size: node.terrain.radius * 2.0,
                angle: node.angle,
            });
            if debug {
                commands.push(DrawCommand::Square {
                    center: node.position,
                    size: CENTER_MARKER_SIZE,
                    color: Rgb::RED,
                });
                commands.push(DrawCommand::Circle {
                    center: node.position,
                    radius: node.bounding_radius,
                    stroke: Rgb::BLACK,
                    fill: None,
                });
            }
        }

        Self {
            width,
            height,
            commands,
        }
    }
}

impl Frame for MapFrame {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

fn grid_lines(width: f64, height: f64) -> Vec<DrawCommand> {
    let mut lines = Vec::new();
    let mut x = GRID_SPACING;
    while x < width {
        lines.push(DrawCommand::Line {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, height),
            color: Rgb::BLACK,
        });
        x += GRID_SPACING;
    }
    let mut y = GRID_SPACING;
    while y < height {
        lines.push(DrawCommand::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(width, y),
            color: Rgb::BLACK,
        });
        y += GRID_SPACING;
    }
    lines
}

/// Token layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenFrame {
    /// Layout width.
    pub width: f64,
    /// Layout height.
    pub height: f64,
    /// Commands in drawing order.
    pub commands: Vec<DrawCommand>,
}

impl TokenFrame {
    /// A filled circle per token, plus the clearance circles `level` asks for.
    #[must_use]
    pub fn build(tokens: &[Token], width: f64, height: f64, level: DebugLevel) -> Self {
        let mut commands = Vec::with_capacity(tokens.len());
        for token in tokens {
            let center = token.position();
            commands.push(DrawCommand::Circle {
                center,
                radius: TOKEN_DRAW_RADIUS,
                stroke: Rgb::BLACK,
                fill: Some(Rgb::TOKEN),
            });
            if level >= DebugLevel::TerrainClearance {
                commands.push(DrawCommand::Circle {
                    center,
                    radius: TOKEN_CLEARANCE,
                    stroke: Rgb::RED,
                    fill: None,
                });
            }
            if level >= DebugLevel::TokenSeparation {
                commands.push(DrawCommand::Circle {
                    center,
                    radius: TOKEN_SEPARATION,
                    stroke: Rgb::BLACK,
                    fill: None,
                });
            }
        }

        Self {
            width,
            height,
            commands,
        }
    }
}

impl Frame for TokenFrame {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

/// Size of the surface a sink draws on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMetrics {
    /// Surface width in display pixels.
    pub display_width: f64,
}

impl SurfaceMetrics {
    /// Surface height in display pixels.
    #[must_use]
    pub fn display_height(&self) -> f64 {
        self.display_width * DISPLAY_ASPECT
    }

    /// Per-axis factors mapping a `width` x `height` layout onto the surface.
    #[must_use]
    pub fn scale(&self, width: f64, height: f64) -> Vec2 {
        Vec2::new(self.display_width / width, self.display_height() / height)
    }
}

/// Front-end drawing target.
pub trait RenderSink {
    /// Surface size, or `None` while the surface does not exist yet.
    fn surface(&self) -> Option<SurfaceMetrics>;

    /// Draw one command. `scale` maps map units to display pixels.
    fn draw(&mut self, command: &DrawCommand, scale: Vec2);
}

/// Replay `frame` into `sink`, returning the number of commands drawn.
pub fn present<S, F>(sink: &mut S, frame: &F) -> Result<usize, RenderError>
where
    S: RenderSink + ?Sized,
    F: Frame + ?Sized,
{
    let metrics = sink.surface().ok_or(RenderError::SurfaceNotReady)?;
    let (width, height) = frame.size();
    let scale = metrics.scale(width, height);
    for command in frame.commands() {
        sink.draw(command, scale);
    }
    tracing::trace!(commands = frame.commands().len(), "Frame presented");
    Ok(frame.commands().len())
}
