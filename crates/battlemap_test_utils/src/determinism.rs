//! Determinism testing utilities.
//!
//! Provides a harness for verifying that map and token generation
//! produce identical results given identical seeds.
//!
//! # Testing Strategy
//!
//! A shared seed must reproduce a battlefield exactly. Sources of
//! non-determinism include:
//!
//! - **Fresh seeds**: [`SeededRng::from_optional_seed`] with `None` draws
//!   from the OS. Tests always pass explicit seeds.
//!
//! - **Shared RNG state**: Every run owns its stream. Nothing may draw from
//!   a stream it did not create.
//!
//! - **Iteration order**: Nodes and tokens are kept in placement order and
//!   compared as sequences, never as sets.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: Individual runs are reproducible
//! 2. **Property tests**: Random seeds and budgets still reproduce
//! 3. **Parallel tests**: Running N generations on threads all match
//!
//! [`SeededRng::from_optional_seed`]: battlemap_core::rng::SeededRng::from_optional_seed

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use battlemap_core::battlefield::{Battlefield, BattlefieldRequest};
use battlemap_core::catalog::TerrainCatalog;
use serde::Serialize;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for deterministic generation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that generation was deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Generation is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Hash any serializable output through its JSON form.
///
/// Floats hash by their exact printed value, so two outputs hash equal
/// only if every coordinate matches bit for bit.
///
/// # Panics
///
/// Panics if `value` cannot be serialized.
#[must_use]
pub fn output_hash<T: Serialize + ?Sized>(value: &T) -> u64 {
    let json = serde_json::to_string(value).expect("output must serialize");
    let mut hasher = DefaultHasher::new();
    json.hash(&mut hasher);
    hasher.finish()
}

/// Run a generation multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run the generation
/// * `generate` - Function producing one output
/// * `hash` - Function to compute the output hash
///
/// # Example
///
/// ```
/// use battlemap_core::prelude::*;
/// use battlemap_core::map_generation::generate;
/// use battlemap_test_utils::determinism::{output_hash, verify_determinism};
///
/// let config = MapConfig::default().with_seed(42);
/// let result = verify_determinism(
///     5,
///     || generate(&config, TerrainCatalog::standard(), None).unwrap(),
///     |run| output_hash(&run.nodes),
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<T, Gen, HashFn>(
    runs: usize,
    generate: Gen,
    hash: HashFn,
) -> DeterminismResult
where
    Gen: Fn() -> T,
    HashFn: Fn(&T) -> u64,
{
    let hashes: Vec<u64> = (0..runs).map(|_| hash(&generate())).collect();
    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    tracing::debug!(runs, is_deterministic, "Determinism check finished");

    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Verify a full battlefield (map and tokens) reproduces from `request`.
///
/// The request must carry both a map seed and a token seed.
///
/// # Panics
///
/// Panics if generation fails.
#[must_use]
pub fn verify_battlefield_determinism(
    request: &BattlefieldRequest,
    runs: usize,
) -> DeterminismResult {
    verify_determinism(
        runs,
        || {
            Battlefield::generate(request, TerrainCatalog::standard())
                .expect("battlefield generation failed")
        },
        output_hash,
    )
}

/// Generate the same battlefield on `threads` scoped threads and collect hashes.
///
/// Catches anything that leaks state between runs, such as a shared
/// stream or a lazily built catalog that differs per thread.
///
/// # Panics
///
/// Panics if generation fails or a thread panics.
#[must_use]
pub fn run_parallel_generations(request: &BattlefieldRequest, threads: usize) -> DeterminismResult {
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    let field = Battlefield::generate(request, TerrainCatalog::standard())
                        .expect("battlefield generation failed");
                    output_hash(&field)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("generation thread panicked"))
            .collect()
    });

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);
    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Index of the first element where two placement sequences differ.
///
/// A length mismatch diverges at the shorter length. `None` means the
/// sequences are identical.
#[must_use]
pub fn find_first_divergence<T: PartialEq>(a: &[T], b: &[T]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

// =============================================================================
// Property-based testing strategies
// =============================================================================

/// Proptest strategies for generation inputs.
pub mod strategies {
    use battlemap_core::map_generation::MapConfig;
    use battlemap_core::scenario::Scenario;
    use battlemap_core::settings::ResourceBudget;
    use proptest::prelude::*;

    /// Any 32-bit seed.
    pub fn arb_seed() -> impl Strategy<Value = u32> {
        any::<u32>()
    }

    /// Resource budget covering the standard catalog, 0-3 of each type.
    pub fn arb_budget() -> impl Strategy<Value = ResourceBudget> {
        proptest::collection::vec(0u32..4, 9).prop_map(ResourceBudget::new)
    }

    /// Budget of any length, including ids past the catalog.
    pub fn arb_ragged_budget() -> impl Strategy<Value = ResourceBudget> {
        proptest::collection::vec(0u32..6, 0..14).prop_map(ResourceBudget::new)
    }

    /// Map config with a fixed seed and roomy dimensions.
    pub fn arb_map_config() -> impl Strategy<Value = MapConfig> {
        (arb_seed(), 300.0f64..1200.0, 200.0f64..900.0, 0.0f64..80.0, any::<bool>()).prop_map(
            |(seed, width, height, edge, weighted)| {
                MapConfig::default()
                    .with_dimensions(width, height)
                    .with_edge_boundary(edge)
                    .with_weighted(weighted)
                    .with_seed(seed)
            },
        )
    }

    /// Any scenario.
    pub fn arb_scenario() -> impl Strategy<Value = Scenario> {
        proptest::sample::select(Scenario::ALL.to_vec())
    }
}
