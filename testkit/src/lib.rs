//! orgtree Testkit
//!
//! Shared tooling for orgtree tests:
//! - `config` - ForestConfig controlling generation
//! - `forest` - Seeded random forests built through the mutation engine
//! - `mutations` - Random mutation sequences, valid and invalid
//! - `invariants` - Structural and derived-field consistency checks

mod config;
mod forest;
mod invariants;
mod mutations;

pub use config::ForestConfig;
pub use forest::ForestGenerator;
pub use invariants::check_invariants;
pub use mutations::MutationGenerator;

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber once. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
