//! Scenario token placement.
//!
//! Tokens are objective markers placed over a finished terrain layout.
//! Each scenario names a [`TokenStrategy`]; a strategy either produces a
//! complete layout or fails cheaply, and the driver reruns it from scratch
//! until it succeeds or the strategy budget runs out.
//!
//! Placement rules shared by every strategy:
//! - a token keeps `clearance + bounding_radius` away from Blocking pieces
//! - tokens keep `separation` away from each other
//! - tokens stay `clearance` away from the left and right map edges

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::map_generation::PlacedTerrain;
use crate::math::{Rect, Vec2};
use crate::rng::SeededRng;
use crate::scenario::{Scenario, TokenStrategy};

/// Base distance a token keeps from Blocking terrain and from the map edge.
pub const TOKEN_CLEARANCE: f64 = 25.0;

/// Minimum distance between two tokens.
pub const TOKEN_SEPARATION: f64 = 100.0;

/// Attempts allowed per token before a strategy attempt gives up.
pub const MAX_TOKEN_ATTEMPTS: u32 = 100;

/// Strategy invocations allowed before a scenario is declared infeasible.
pub const MAX_STRATEGY_ATTEMPTS: u32 = 1000;

/// Tokens placed on the two Raze lines.
pub const RAZE_SIDE_TOKENS: usize = 6;

/// Vertical offset of the Raze lines from the map center.
pub const RAZE_LINE_OFFSET: f64 = 50.0;

/// A scenario marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position as a vector.
    #[must_use]
    pub const fn position(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Token layout parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLayoutConfig {
    /// Layout width.
    pub width: f64,
    /// Layout height.
    pub height: f64,
    /// Terrain and edge clearance.
    pub clearance: f64,
    /// Token-to-token separation.
    pub separation: f64,
    /// Attempts per token.
    pub max_token_attempts: u32,
    /// Strategy invocations per run.
    pub max_strategy_attempts: u32,
}

impl Default for TokenLayoutConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            clearance: TOKEN_CLEARANCE,
            separation: TOKEN_SEPARATION,
            max_token_attempts: MAX_TOKEN_ATTEMPTS,
            max_strategy_attempts: MAX_STRATEGY_ATTEMPTS,
        }
    }
}

impl TokenLayoutConfig {
    /// Set the layout size.
    #[must_use]
    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the strategy retry budget.
    #[must_use]
    pub const fn with_max_strategy_attempts(mut self, attempts: u32) -> Self {
        self.max_strategy_attempts = attempts;
        self
    }

    /// Horizontal range token centers may use.
    fn x_range(&self) -> (f64, f64) {
        (self.clearance, self.width - self.clearance)
    }
}

/// Result of one token run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRun {
    /// Seed the run used.
    pub seed: u32,
    /// Scenario the tokens were laid out for.
    pub scenario: Scenario,
    /// Strategy invocations it took.
    pub strategy_attempts: u32,
    /// Placed tokens in placement order.
    pub tokens: Vec<Token>,
}

/// Places tokens over one terrain layout.
#[derive(Debug, Clone)]
pub struct TokenGenerator<'m, 'c> {
    nodes: &'m [PlacedTerrain<'c>],
    config: TokenLayoutConfig,
}

impl<'m, 'c> TokenGenerator<'m, 'c> {
    /// Generator over `nodes`.
    #[must_use]
    pub fn new(nodes: &'m [PlacedTerrain<'c>], config: TokenLayoutConfig) -> Self {
        Self { nodes, config }
    }

    /// Layout parameters.
    #[must_use]
    pub fn config(&self) -> &TokenLayoutConfig {
        &self.config
    }

    /// First Blocking piece closer to `token` than `clearance + bounding_radius`.
    #[must_use]
    pub fn terrain_collision(&self, token: Token) -> Option<&'m PlacedTerrain<'c>> {
        self.nodes.iter().find(|node| {
            node.terrain.is_blocking()
                && token
                    .position()
                    .within(node.position, self.config.clearance + node.bounding_radius)
        })
    }

    /// First token in `others` closer to `token` than the separation.
    #[must_use]
    pub fn token_collision<'t>(&self, token: Token, others: &'t [Token]) -> Option<&'t Token> {
        others
            .iter()
            .find(|other| token.position().within(other.position(), self.config.separation))
    }

    /// Slide `token` along x to the nearest spot clear of Blocking terrain.
    ///
    /// Scans one unit at a time to the left and to the right, never past the
    /// edge clearance, and keeps whichever clear spot is fewer steps away
    /// (right wins a tie). y is never changed. If neither direction finds a
    /// clear spot the token comes back unchanged.
    #[must_use]
    pub fn reposition_x(&self, token: Token) -> Token {
        if self.terrain_collision(token).is_none() {
            return token;
        }

        let (min_x, max_x) = self.config.x_range();
        let scan = |step: f64| -> Option<(u32, f64)> {
            let mut x = token.x;
            let mut steps = 0;
            loop {
                if self.terrain_collision(Token::new(x, token.y)).is_none() {
                    return Some((steps, x));
                }
                let next = x + step;
                if next < min_x || next > max_x {
                    return None;
                }
                x = next;
                steps += 1;
            }
        };

        let chosen = match (scan(-1.0), scan(1.0)) {
            (Some(left), Some(right)) => Some(if left.0 < right.0 { left } else { right }),
            (left, right) => left.or(right),
        };
        match chosen {
            Some((_, x)) => Token::new(x, token.y),
            None => {
                tracing::warn!(x = token.x, y = token.y, "No clear x position for token");
                token
            }
        }
    }

    /// Lay out tokens for `scenario`, retrying the strategy until it succeeds.
    pub fn generate(&self, scenario: Scenario, rng: &mut SeededRng) -> Result<TokenRun> {
        Rect::inset(self.config.width, self.config.height, self.config.clearance).ok_or(
            GenerationError::InvalidDimensions {
                width: self.config.width,
                height: self.config.height,
                edge_boundary: self.config.clearance,
            },
        )?;

        let mut tokens = Vec::new();
        for attempt in 1..=self.config.max_strategy_attempts {
            tokens.clear();
            let placed = match scenario.strategy() {
                TokenStrategy::Raze => self.place_raze(rng, &mut tokens),
                TokenStrategy::NotImplemented => Ok(()),
            };
            match placed {
                Ok(()) => {
                    tracing::debug!(
                        %scenario,
                        seed = rng.seed(),
                        attempt,
                        tokens = tokens.len(),
                        "Tokens generated"
                    );
                    return Ok(TokenRun {
                        seed: rng.seed(),
                        scenario,
                        strategy_attempts: attempt,
                        tokens,
                    });
                }
                Err(e) => tracing::debug!(%scenario, attempt, "Strategy attempt failed: {e}"),
            }
        }

        Err(GenerationError::ScenarioInfeasible {
            scenario: scenario.name().to_string(),
            attempts: self.config.max_strategy_attempts,
        })
    }

    /// Raze: a center token slid clear along x, then three tokens on each
    /// of the lines `offset` above and below the center.
    fn place_raze(&self, rng: &mut SeededRng, tokens: &mut Vec<Token>) -> Result<()> {
        let center = Token::new(self.config.width / 2.0, self.config.height / 2.0);
        tokens.push(self.reposition_x(center));

        let (min_x, max_x) = self.config.x_range();
        for index in 0..RAZE_SIDE_TOKENS {
            let offset = if index % 2 == 0 {
                RAZE_LINE_OFFSET
            } else {
                -RAZE_LINE_OFFSET
            };
            let y = center.y + offset;

            let mut attempts = 0;
            loop {
                if attempts >= self.config.max_token_attempts {
                    tracing::warn!(
                        token = index + 1,
                        attempts,
                        "Max attempts exceeded placing token"
                    );
                    tokens.clear();
                    return Err(GenerationError::TokenPlacementFailed {
                        token_index: index,
                        attempts,
                    });
                }
                attempts += 1;

                let candidate = Token::new(rng.next_range(min_x, max_x), y);
                if self.token_collision(candidate, tokens).is_none()
                    && self.terrain_collision(candidate).is_none()
                {
                    tokens.push(candidate);
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Lay out tokens for `scenario` over `nodes`, drawing a fresh seed when
/// `seed` is `None`.
pub fn generate_tokens(
    nodes: &[PlacedTerrain<'_>],
    scenario: Scenario,
    config: TokenLayoutConfig,
    seed: Option<u32>,
) -> Result<TokenRun> {
    let mut rng = SeededRng::from_optional_seed(seed);
    TokenGenerator::new(nodes, config).generate(scenario, &mut rng)
}
