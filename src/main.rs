use clap::{Args, Parser, Subcommand};
use session_auth::{AuthConfig, ConfigError, SessionAuthClient};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("login failed: {0}")]
    LoginFailed(String),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "session-auth", about = "Log in against a session authentication API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the result.
    Login(LoginArgs),
    /// Print the resolved endpoints.
    Endpoints,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long, env = "AUTH_EMAIL")]
    email: String,

    #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, default_value_t = false, help = "Print the fetched profile on success")]
    show_profile: bool,

    #[arg(long, default_value_t = false, help = "Log out again before exiting")]
    logout: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = AuthConfig::from_env()?;

    match cli.command {
        Command::Login(args) => run_login(&config, args).await,
        Command::Endpoints => {
            println!("login:   {}", config.login_url);
            println!("profile: {}", config.profile_url);
            match config.request_timeout {
                Some(timeout) => println!("timeout: {}s", timeout.as_secs()),
                None => println!("timeout: transport default"),
            }
            Ok(())
        }
    }
}

async fn run_login(config: &AuthConfig, args: LoginArgs) -> Result<(), CliError> {
    let client = SessionAuthClient::from_config(config)?;

    let mut signal = client.authenticated();
    let watcher = tokio::spawn(async move {
        while let Some(authenticated) = signal.changed().await {
            tracing::info!(authenticated, "session status changed");
        }
    });

    let result = client.login(&args.email, &args.password).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if args.show_profile {
        if let Some(user) = client.current_user() {
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
    }
    if args.logout {
        client.logout();
    }

    // Dropping the last client handle ends the watcher.
    drop(client);
    let _ = watcher.await;

    if result.success { Ok(()) } else { Err(CliError::LoginFailed(result.error_message)) }
}
