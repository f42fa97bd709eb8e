//! Shared embedded PostgreSQL cluster for integration tests.
//!
//! One cluster is started per test binary through
//! `pg_embedded_setup_unpriv::test_support::shared_cluster_handle`; each test
//! then provisions its own temporary database on it. When `PG_RUNTIME_DIR` or
//! `PG_DATA_DIR` is unset, both point at a per-process directory under the
//! cargo target dir while the cluster bootstraps. Environment mutation is
//! serialised with `env-lock`.

use std::path::PathBuf;
use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

fn scratch_dirs() -> std::io::Result<(PathBuf, PathBuf)> {
    let target = std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"),
        PathBuf::from,
    );
    let base = target
        .join("pg-embed")
        .join(format!("counter-{}", std::process::id()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

fn is_transient(error: &str) -> bool {
    let lower = error.to_lowercase();
    ["connection reset", "timed out", "timeout", "temporarily unavailable", "dns error"]
        .iter()
        .any(|pattern| lower.contains(pattern))
}

/// Return the process-wide cluster, bootstrapping it on first use and
/// retrying transient download failures.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let (runtime_dir, data_dir) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            (
                "PG_RUNTIME_DIR",
                Some(runtime_dir.to_string_lossy().into_owned()),
            ),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 1..=MAX_ATTEMPTS {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_ATTEMPTS || !is_transient(&last_error) {
                    break;
                }
                eprintln!("pg-embed: attempt {attempt}/{MAX_ATTEMPTS} failed: {last_error}");
                std::thread::sleep(RETRY_DELAY * attempt);
            }
        }
    }
    Err(last_error)
}
