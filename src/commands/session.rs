//! Session CLI commands: sign in, register, sign out, show.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_core::types::UserId;
use storefront_entity::User;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Show the current session
    Show,
    /// Sign in with a user returned by the authentication backend
    Login(UserFields),
    /// Register a new user and sign in once confirmed
    Register {
        /// User details
        #[command(flatten)]
        user: UserFields,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Sign out and forget the persisted session
    Logout,
}

/// User details supplied on the command line
#[derive(Debug, Args)]
pub struct UserFields {
    /// User ID (random if omitted)
    #[arg(long)]
    pub id: Option<String>,
    /// Username
    #[arg(short, long)]
    pub username: String,
    /// Email address
    #[arg(short, long)]
    pub email: String,
    /// Display name
    #[arg(long)]
    pub name: Option<String>,
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Avatar URL
    #[arg(long)]
    pub avatar: Option<String>,
    /// Granted authority (repeatable)
    #[arg(short, long = "authority")]
    pub authorities: Vec<String>,
}

impl UserFields {
    /// Build the user value
    fn to_user(&self) -> Result<User, AppError> {
        let mut user = User::new(self.username.as_str(), self.email.as_str())
            .with_authorities(self.authorities.iter().cloned());
        if let Some(id) = &self.id {
            user.id = id
                .parse::<UserId>()
                .map_err(|e| AppError::validation(format!("Invalid user ID: {}", e)))?;
        }
        if let Some(name) = &self.name {
            user = user.with_name(name.as_str());
        }
        if let Some(phone) = &self.phone {
            user = user.with_phone(phone.as_str());
        }
        if let Some(avatar) = &self.avatar {
            user = user.with_avatar(avatar.as_str());
        }
        Ok(user)
    }
}

/// Execute session commands
pub async fn execute(
    args: &SessionArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::open_auth_store(config).await?;

    match &args.command {
        SessionCommand::Show => {
            let session = store.session();
            match format {
                OutputFormat::Table => match session.user() {
                    Some(user) => {
                        output::print_kv("Signed in", "yes");
                        output::print_kv("User ID", &user.id.to_string());
                        output::print_kv("Username", &user.username);
                        output::print_kv("Email", &user.email);
                        output::print_kv("Name", user.display_name());
                        output::print_kv("Authorities", &user.authorities.join(", "));
                    }
                    None => output::print_kv("Signed in", "no"),
                },
                OutputFormat::Json => output::print_json(&session),
            }
        }
        SessionCommand::Login(fields) => {
            let user = fields.to_user()?;
            let username = user.username.clone();
            store.login(user).await?;
            output::print_success(&format!("Signed in as {}", username));
        }
        SessionCommand::Register { user: fields, yes } => {
            let user = fields.to_user()?;
            let username = user.username.clone();
            let skip_prompt = *yes;
            let prompt = format!("Register and sign in as '{}'?", username);

            store
                .register(user, async move {
                    if skip_prompt {
                        return Ok(());
                    }
                    confirm(prompt).await
                })
                .await?;
            output::print_success(&format!("Registered and signed in as {}", username));
        }
        SessionCommand::Logout => {
            let was_signed_in = store.is_authenticated();
            store.logout().await?;
            if was_signed_in {
                output::print_success("Signed out");
            } else {
                output::print_warning("No one was signed in");
            }
        }
    }
    Ok(())
}

/// Ask for interactive confirmation without blocking the runtime
async fn confirm(prompt: String) -> Result<(), AppError> {
    let accepted = tokio::task::spawn_blocking(move || {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
    })
    .await
    .map_err(|e| AppError::internal(format!("Prompt task failed: {}", e)))?
    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

    if accepted {
        Ok(())
    } else {
        Err(AppError::registration("Registration cancelled"))
    }
}
