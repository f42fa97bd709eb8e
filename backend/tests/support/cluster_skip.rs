//! Policy for suites that need an embedded PostgreSQL cluster.
//!
//! Clusters cannot start in every sandbox. By default a setup failure skips
//! the suite with a `SKIP-TEST-CLUSTER` marker; CI sets
//! `REQUIRE_TEST_CLUSTER=1` so a broken cluster fails loudly instead.

/// Returns true when `REQUIRE_TEST_CLUSTER` is set to a truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn test_cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handle embedded cluster setup failures consistently across suites.
///
/// Prints a skip marker and returns `None`, or panics when the cluster is
/// required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if test_cluster_required() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
