use std::path::Path;
use std::pin::pin;

use campus_core::config::CampusConfig;
use campus_identity::{IdentityClient, IdentityUser, ScopeClaims, UserAccounts};
use futures_util::TryStreamExt;
use tracing::info;

/// Identity account actions exposed on the command line.
#[derive(Debug, clap::Subcommand)]
pub enum UsersCommand {
    /// Show a user, creating the account if it does not exist
    Get { email: String },
    /// Create a user for an email address
    Create { email: String },
    /// List every user in the project
    List,
    /// Print a user's custom claims as JSON
    Claims { email: String },
    /// Replace a user's claims with the given scopes (none clears admin)
    SetScopes {
        email: String,
        scopes: Vec<String>,
    },
    /// Revoke all refresh tokens of an existing user
    Revoke { email: String },
}

/// Run a `users` subcommand against the configured identity project.
pub async fn run(config_path: &str, command: UsersCommand) -> anyhow::Result<()> {
    let config = CampusConfig::load(Path::new(config_path))?;
    config.validate()?;

    if !config.identity.enabled {
        anyhow::bail!("Identity is not enabled in configuration. Set identity.enabled = true.");
    }

    let client = IdentityClient::from_config(&config.identity)?;
    info!(project_id = %config.identity.project_id, base_url = client.base_url(), "connected identity client");
    let accounts = UserAccounts::new(client);

    match command {
        UsersCommand::Get { email } => {
            let user = accounts.get_user(&email).await?;
            print_user(&user);
        }
        UsersCommand::Create { email } => {
            let user = accounts.create_user(&email).await?;
            println!("Created user {}", user.uid());
            print_user(&user);
        }
        UsersCommand::List => {
            let mut users = pin!(accounts.list_users());
            let mut count = 0usize;
            while let Some(user) = users.try_next().await? {
                println!("{}", user_line(&user));
                count += 1;
            }
            println!("{count} users");
        }
        UsersCommand::Claims { email } => {
            let claims = accounts.get_claims(&email).await?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
        UsersCommand::SetScopes { email, scopes } => {
            accounts.set_scopes(&email, &scopes).await?;
            let claims = ScopeClaims::from_scopes(scopes);
            println!(
                "Set scopes for {email}: admin={}, scopes=[{}]",
                claims.is_admin,
                claims.scopes.join(", ")
            );
            println!("The change is visible to the user after their next token refresh.");
        }
        UsersCommand::Revoke { email } => {
            let Some(user) = accounts.find_user(&email).await? else {
                anyhow::bail!("no user exists for {email}");
            };
            accounts.revoke_token(&user).await?;
            println!("Revoked refresh tokens for {email} ({})", user.uid());
        }
    }

    Ok(())
}

fn user_line(user: &IdentityUser) -> String {
    format!(
        "{}\t{}{}",
        user.uid(),
        user.email.as_deref().unwrap_or("-"),
        if user.disabled == Some(true) {
            "\t(disabled)"
        } else {
            ""
        }
    )
}

fn print_user(user: &IdentityUser) {
    println!("  uid:      {}", user.uid());
    println!("  email:    {}", user.email.as_deref().unwrap_or("-"));
    if let Some(name) = &user.display_name {
        println!("  name:     {name}");
    }
    match user.custom_claims() {
        Ok(claims) if !claims.is_empty() => {
            println!("  claims:   {}", serde_json::Value::Object(claims))
        }
        Ok(_) => {}
        Err(e) => println!("  claims:   <unreadable: {e}>"),
    }
}
