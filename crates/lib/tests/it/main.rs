/*! Integration tests for Collectia.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - collection: Tests for the Collection engine (construction, mutation,
 *   queries, cursor, functional operations, merge, serialization, cloning
 *   and the recursive kind)
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("collectia=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod collection;
