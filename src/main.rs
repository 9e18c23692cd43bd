//! WolfAuth CLI
//!
//! Terminal front end for the portal. Each invocation opens the preference
//! store, drives one screen through the runtime and prints the result.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wolfauth_portal::config::{generate_default_config, Config};
use wolfauth_portal::screens::{EditProfileScreen, LoginScreen, ProfileScreen, RegisterScreen};
use wolfauth_portal::*;

#[derive(Parser)]
#[command(name = "wolfauth")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "WolfAuth account portal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: user config dir, then ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with username or email
    Login {
        identifier: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
        /// Telegram handle, e.g. @wolf
        #[arg(long)]
        telegram: String,
    },

    /// Forget the stored access token
    Logout,

    /// Show the profile page
    Profile {
        #[arg(long, value_enum, default_value = "friends")]
        tab: TabArg,
    },

    /// Edit the stored profile
    EditProfile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        telegram: Option<String>,
        /// Image file to use as avatar
        #[arg(long)]
        avatar: Option<PathBuf>,
    },

    /// Show or change settings
    Settings {
        #[arg(long)]
        toggle_dark_mode: bool,
        /// Language code (ru, en)
        #[arg(long)]
        language: Option<String>,
    },

    /// Resolve a route through the authentication gate
    Open { path: String },

    /// Print a default config file
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TabArg {
    Friends,
    Notifications,
}

impl From<TabArg> for ProfileTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Friends => ProfileTab::Friends,
            TabArg::Notifications => ProfileTab::Notifications,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    init_logging(&config.logging);

    let data_dir = config.data_dir();
    tracing::debug!(data_dir = %data_dir.display(), auth_url = %config.auth.base_url, "Configuration loaded");

    let store = SqliteStore::open(&data_dir)
        .with_context(|| format!("Cannot open preference store in {}", data_dir.display()))?;
    let auth = HttpAuthClient::new(config.auth.client_config())?;
    let mut portal = Portal::new(Preferences::new(Arc::new(store)), Arc::new(auth));

    run(&mut portal, cli.command).await
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("wolfauth_portal={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(portal: &mut Portal, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login {
            identifier,
            password,
        } => {
            portal.open(Route::Login);
            portal
                .dispatch(LoginEvent::FieldChanged(LoginField::Identifier, identifier))
                .await;
            portal
                .dispatch(LoginEvent::FieldChanged(LoginField::Password, password))
                .await;
            portal.dispatch(LoginEvent::Submit).await;

            if portal.session().is_authenticated() && portal.route() == Route::Root {
                println!("Logged in");
                return Ok(());
            }
            match login_screen(portal).and_then(|s| s.error()) {
                Some(error) => bail!("{}", error),
                None => bail!("Login did not complete"),
            }
        }

        Commands::Register {
            username,
            email,
            password,
            confirm_password,
            telegram,
        } => {
            portal.open(Route::Register);
            let confirm = confirm_password.unwrap_or_else(|| password.clone());
            for (field, value) in [
                (RegisterField::Username, username),
                (RegisterField::Email, email),
                (RegisterField::Password, password),
                (RegisterField::ConfirmPassword, confirm),
                (RegisterField::Telegram, telegram),
            ] {
                portal.dispatch(RegisterEvent::FieldChanged(field, value)).await;
            }
            portal.dispatch(RegisterEvent::Submit).await;

            let Some(screen) = register_screen(portal) else {
                bail!("Registration did not complete");
            };
            if let Some(success) = screen.success() {
                println!("{}", success);
                return Ok(());
            }
            match screen.error() {
                Some(error) => bail!("{}", error),
                None => bail!("Registration did not complete"),
            }
        }

        Commands::Logout => {
            if let Admission::Redirect(_) = portal.open(Route::Profile) {
                println!("Not logged in");
                return Ok(());
            }
            portal.dispatch(ProfileEvent::Logout).await;
            if portal.session().is_authenticated() {
                bail!("Failed to log out");
            }
            println!("Logged out");
            Ok(())
        }

        Commands::Profile { tab } => {
            if let Admission::Redirect(to) = portal.open(Route::Profile) {
                bail!("Not logged in; redirected to {}", to);
            }
            portal.dispatch(ProfileEvent::SelectTab(tab.into())).await;
            if let Some(screen) = profile_screen(portal) {
                print_profile(screen);
            }
            Ok(())
        }

        Commands::EditProfile {
            username,
            email,
            telegram,
            avatar,
        } => {
            portal.open(Route::EditProfile);
            let changes = [
                (ProfileField::Username, username),
                (ProfileField::Email, email),
                (ProfileField::Telegram, telegram),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    portal
                        .dispatch(EditProfileEvent::FieldChanged(field, value))
                        .await;
                }
            }
            if let Some(path) = avatar {
                let file = AvatarFile::from_path(&path)?;
                portal.dispatch(EditProfileEvent::AvatarSelected(file)).await;
                if let Some(error) = edit_profile_screen(portal).and_then(|s| s.error()) {
                    bail!("{}", error);
                }
            }
            portal.dispatch(EditProfileEvent::Submit).await;

            if let Some(error) = edit_profile_screen(portal).and_then(|s| s.error()) {
                bail!("{}", error);
            }
            let profile = UserProfile::load(portal.preferences());
            println!("Profile updated: {} <{}>", profile.username, profile.email);
            Ok(())
        }

        Commands::Settings {
            toggle_dark_mode,
            language,
        } => {
            portal.open(Route::Settings);
            if toggle_dark_mode {
                portal.dispatch(SettingsEvent::ToggleDarkMode).await;
            }
            if let Some(code) = language {
                if Language::from_code(&code).is_none() {
                    bail!("Unsupported language: {}", code);
                }
                portal.dispatch(SettingsEvent::ChangeLanguage(code)).await;
            }

            if let Screen::Settings(screen) = portal.screen() {
                if let Some(error) = screen.error() {
                    bail!("{}", error);
                }
                let record = screen.record();
                println!("Dark mode: {}", if record.dark_mode { "on" } else { "off" });
                println!("Theme:     {}", portal.theme());
                println!(
                    "Language:  {} ({})",
                    record.language.display_name(),
                    record.language.code()
                );
            }
            Ok(())
        }

        Commands::Open { path } => {
            let Some(route) = Route::from_path(&path) else {
                bail!("Unknown route: {}", path);
            };
            match portal.open(route) {
                Admission::Render(route) => println!("Rendering {} ({})", route, portal.screen().name()),
                Admission::Redirect(route) => println!("Redirected to {}", route),
            }
            Ok(())
        }

        Commands::Config => {
            print!("{}", generate_default_config());
            Ok(())
        }
    }
}

fn print_profile(screen: &ProfileScreen) {
    let profile = screen.profile();
    println!("{}", profile.username);
    println!("  Email:    {}", profile.email);
    println!("  Telegram: {}", profile.telegram);
    if profile.avatar.starts_with("data:") {
        println!("  Avatar:   (embedded image)");
    } else {
        println!("  Avatar:   {}", profile.avatar);
    }

    println!();
    println!("Sites:");
    for site in screen.sites() {
        println!("  {:<3} {:<12} {}", site.id, site.name, site.url);
    }

    println!();
    match screen.tab() {
        ProfileTab::Friends => {
            println!("{:<20} {}", "Friend", "Status");
            println!("{}", "-".repeat(30));
            for friend in screen.friends() {
                println!("{:<20} {}", friend.name, friend.status.label());
            }
        }
        ProfileTab::Notifications => {
            println!("Notifications:");
            for (text, age) in screen.notification_rows() {
                println!("  {} ({})", text, age);
            }
        }
    }
}

fn login_screen(portal: &Portal) -> Option<&LoginScreen> {
    match portal.screen() {
        Screen::Login(screen) => Some(screen),
        _ => None,
    }
}

fn register_screen(portal: &Portal) -> Option<&RegisterScreen> {
    match portal.screen() {
        Screen::Register(screen) => Some(screen),
        _ => None,
    }
}

fn profile_screen(portal: &Portal) -> Option<&ProfileScreen> {
    match portal.screen() {
        Screen::Profile(screen) => Some(screen),
        _ => None,
    }
}

fn edit_profile_screen(portal: &Portal) -> Option<&EditProfileScreen> {
    match portal.screen() {
        Screen::EditProfile(screen) => Some(screen),
        _ => None,
    }
}
