//! Helpers shared by the `credibil-ssi` tests.

mod docstore;
pub mod fixtures;

pub use crate::docstore::DocStore;

/// Install a compact `tracing` subscriber that writes to the test harness.
///
/// Honours `RUST_LOG`. Safe to call from every test: only the first call
/// installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .compact()
        .try_init();
}
