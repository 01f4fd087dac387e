//! Catalog administration CLI

use std::process::ExitCode;

use catalog_app::{
    auth::{AuthServiceError, PgUsersService, Role},
    database,
};
use clap::{Args, Parser, Subcommand};
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "catalog-app", about = "Catalog administration CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Manage user roles and activation
    User(UserCommand),
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Add a role to a user
    GrantRole(RoleArgs),

    /// Remove a role from a user
    RevokeRole(RoleArgs),

    /// Allow a user to authenticate again
    Activate(EmailArgs),

    /// Reject every token presented by a user
    Deactivate(EmailArgs),
}

#[derive(Debug, Args)]
struct EmailArgs {
    /// Email the user registered with
    #[arg(long)]
    email: String,
}

#[derive(Debug, Args)]
struct RoleArgs {
    /// Email the user registered with
    #[arg(long)]
    email: String,

    /// One of `admin`, `super-user` or `user`
    #[arg(long)]
    role: Role,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("failed to connect to database")]
    Connect(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),

    #[error(transparent)]
    Auth(#[from] AuthServiceError),
}

#[tokio::main]
pub async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(cli_error) => {
            error!(error = ?cli_error, "command failed");

            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let database_url = cli.database_url.ok_or(CliError::MissingDatabaseUrl)?;

    let pool = database::connect(&database_url, 2)
        .await
        .map_err(CliError::Connect)?;

    let user_command = match cli.command {
        Commands::Migrate => {
            database::migrate(&pool).await.map_err(CliError::Migrate)?;

            info!("migrations applied");

            return Ok(());
        }
        Commands::User(UserCommand { command }) => command,
    };

    let users = PgUsersService::new(pool);

    let user = match user_command {
        UserSubcommand::GrantRole(RoleArgs { email, role }) => {
            users.grant_role(&email, role).await?
        }
        UserSubcommand::RevokeRole(RoleArgs { email, role }) => {
            users.revoke_role(&email, role).await?
        }
        UserSubcommand::Activate(EmailArgs { email }) => users.set_active(&email, true).await?,
        UserSubcommand::Deactivate(EmailArgs { email }) => {
            users.set_active(&email, false).await?
        }
    };

    let roles: Vec<&str> = user.roles.iter().map(|role| role.as_str()).collect();

    info!(
        user_uuid = %user.uuid,
        email = %user.email,
        is_active = user.is_active,
        roles = ?roles,
        "user updated"
    );

    Ok(())
}
