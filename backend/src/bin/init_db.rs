//! Create the counter schema and seed the singleton row.
//!
//! Safe to run repeatedly: migrations are idempotent and the row is only
//! inserted when absent.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use backend::domain::ports::{CounterRepository, EnsureOutcome};
use backend::outbound::persistence::{
    DbPool, DieselCounterRepository, PoolConfig, apply_migrations,
};
use backend::settings::database_url_from_env;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, bail};
use mockable::{DefaultEnv, Env};
use tokio::runtime::Builder;

/// `init-db` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "init-db",
    about = "Create the counter tables and seed the counter row",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL`, then the local default.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime
        .block_on(async_main(args))
        .wrap_err("database initialisation failed")
}

async fn async_main(args: CliArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url, &DefaultEnv::new())?;

    let applied = apply_migrations(database_url.clone())
        .await
        .wrap_err("create counter tables")?;
    println!("schema ready ({applied} migration(s) applied)");

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(1))
        .await
        .wrap_err("create database pool")?;
    let outcome = DieselCounterRepository::new(pool)
        .ensure()
        .await
        .wrap_err("seed counter row")?;

    println!("{}", describe(outcome));
    Ok(())
}

fn resolve_database_url<E: Env>(explicit: Option<String>, env: &E) -> Result<String> {
    match explicit {
        Some(value) if value.trim().is_empty() => {
            bail!("--database-url must not be empty when provided")
        }
        Some(value) => Ok(value),
        None => Ok(database_url_from_env(env)),
    }
}

fn describe(outcome: EnsureOutcome) -> String {
    match outcome {
        EnsureOutcome::Created(counter) => {
            format!("counter row created with count={}", counter.value())
        }
        EnsureOutcome::Existing(counter) => {
            format!("counter row already exists with count={}", counter.value())
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI helpers.

    use backend::domain::Counter;
    use backend::settings::DEFAULT_DATABASE_URL;
    use mockable::MockEnv;
    use rstest::rstest;

    use super::*;

    fn env_with(url: Option<&'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |_| url.map(str::to_owned));
        env
    }

    #[rstest]
    fn explicit_url_wins_over_environment() {
        let url = resolve_database_url(
            Some("postgresql://cli/atelier_db".to_owned()),
            &env_with(Some("postgresql://env/atelier_db")),
        )
        .expect("valid url");
        assert_eq!(url, "postgresql://cli/atelier_db");
    }

    #[rstest]
    #[case(Some("postgresql://env/atelier_db"), "postgresql://env/atelier_db")]
    #[case(None, DEFAULT_DATABASE_URL)]
    fn environment_then_default(#[case] env_url: Option<&'static str>, #[case] expected: &str) {
        let url = resolve_database_url(None, &env_with(env_url)).expect("valid url");
        assert_eq!(url, expected);
    }

    #[rstest]
    fn blank_explicit_url_is_rejected() {
        assert!(resolve_database_url(Some("  ".to_owned()), &env_with(None)).is_err());
    }

    #[rstest]
    #[case(EnsureOutcome::Created(Counter::zero()), "counter row created with count=0")]
    #[case(
        EnsureOutcome::Existing(Counter::new(12)),
        "counter row already exists with count=12"
    )]
    fn describes_seed_outcome(#[case] outcome: EnsureOutcome, #[case] expected: &str) {
        assert_eq!(describe(outcome), expected);
    }

    #[rstest]
    fn parses_database_url_flag() {
        let args = CliArgs::try_parse_from(["init-db", "--database-url", "postgresql://x/db"])
            .expect("valid args");
        assert_eq!(args.database_url.as_deref(), Some("postgresql://x/db"));
    }
}
