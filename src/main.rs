mod config;
mod directory;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::rc::Rc;

use access::routes::{self, RouteAccess};
use access::{GuardOutcome, GuardPolicy, Identity, Role, RoleCache, RoleResolution, SessionState};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{ConfigError, ResolverConfig};
use crate::directory::HttpRoleDirectory;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client init failed: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("role lookup failed: {0}")]
    Resolve(#[from] access::ResolveError),
    #[error("identity key must not be blank")]
    BlankIdentity,
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "scarlet-aid", about = "ScarletAid role and route access probe")]
struct Cli {
    /// Overrides `SCARLET_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "SCARLET_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve and print the role for an account email.
    Role { email: String },
    /// Evaluate the route guard for an account against client paths.
    Check {
        email: String,
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print the client route table.
    Routes,
}

#[derive(Debug, Serialize)]
struct PathReport<'a> {
    path: &'a str,
    access: RouteAccess,
    outcome: GuardOutcome,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = ResolverConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url.trim_end_matches('/').to_owned();
    }

    match cli.command {
        Command::Routes => print_json(&routes::route_table()),
        Command::Role { email } => {
            let cache = build_cache(&config, cli.token)?;
            let identity = identity_for(&email)?;
            let key = identity.lookup_key().ok_or(CliError::BlankIdentity)?;
            let role = cache.fetch(key).await?;
            print_json(&role_report(&identity, role)?)
        }
        Command::Check { email, paths } => {
            let cache = build_cache(&config, cli.token)?;
            let identity = identity_for(&email)?;
            let reports = check_paths(&cache, identity, &paths).await;
            print_json(&reports)
        }
    }
}

fn build_cache(config: &ResolverConfig, token: Option<String>) -> Result<RoleCache, CliError> {
    let directory = HttpRoleDirectory::new(config, token)?;
    tracing::info!(base_url = %config.api_base_url, attempts = config.lookup_attempts, "role directory configured");
    Ok(RoleCache::new(Rc::new(directory), config.retry_policy()))
}

fn identity_for(email: &str) -> Result<Identity, CliError> {
    let identity = Identity::new(email);
    if identity.lookup_key().is_none() {
        return Err(CliError::BlankIdentity);
    }
    Ok(identity)
}

/// `role` output: the key as it was looked up, not as it was typed.
fn role_report(identity: &Identity, role: Role) -> Result<serde_json::Value, CliError> {
    let key = identity.lookup_key().ok_or(CliError::BlankIdentity)?;
    Ok(serde_json::json!({ "key": key, "role": role }))
}

/// Evaluate every path concurrently; guarded paths share one role lookup.
async fn check_paths<'a>(cache: &RoleCache, identity: Identity, paths: &'a [String]) -> Vec<PathReport<'a>> {
    let session = SessionState::signed_in(identity);
    let session = &session;
    let checks = paths.iter().map(|path| async move {
        let access = routes::access_for(path);
        let outcome = match access {
            RouteAccess::Public => GuardOutcome::Allow,
            RouteAccess::Guarded(policy) => evaluate(cache, session, policy, path).await,
        };
        tracing::info!(path = %path, ?outcome, "route checked");
        PathReport { path, access, outcome }
    });
    futures::future::join_all(checks).await
}

async fn evaluate(cache: &RoleCache, session: &SessionState, policy: GuardPolicy, path: &str) -> GuardOutcome {
    let role: RoleResolution = cache.resolve(session.identity()).await;
    policy.evaluate(session, &role, path)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
