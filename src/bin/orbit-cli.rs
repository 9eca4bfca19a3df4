use clap::{Parser, Subcommand};
use url::Url;

use orbit_api::cli::{check, sign_claims};
use orbit_api::security::cors::ALLOWED_ORIGINS;
use orbit_api::security::{Secret, TokenAuthority};

#[derive(Parser)]
#[command(name = "orbit-cli")]
#[command(about = "Maintenance CLI for the Orbit API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue or inspect bearer tokens
    Token {
        /// Environment variable holding the signing secret
        #[arg(long, default_value = "JWT_SECRET")]
        secret_env: String,

        #[command(subcommand)]
        action: TokenAction,
    },
    /// Smoke-test a running server
    Check {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: Url,

        /// Origin to send with the CORS preflight
        #[arg(short, long, default_value = ALLOWED_ORIGINS[0])]
        origin: String,

        /// Bearer token to check against the verify endpoint
        #[arg(short, long, env = "ORBIT_TOKEN")]
        token: Option<String>,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Sign a payload and print the token
    Sign {
        /// JSON object to embed as claims
        #[arg(short, long, default_value = r#"{"sub":"admin","role":"admin"}"#)]
        claims: String,
    },
    /// Verify a token and print its claims
    Verify { token: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Token { secret_env, action } => {
            let authority = TokenAuthority::new(&Secret::from_env(&secret_env)?);
            match action {
                TokenAction::Sign { claims } => {
                    println!("{}", sign_claims(&authority, &claims)?);
                }
                TokenAction::Verify { token } => match authority.verify_token(&token) {
                    Some(claims) => println!("{}", serde_json::to_string_pretty(&claims)?),
                    None => {
                        eprintln!("Token rejected");
                        std::process::exit(1);
                    }
                },
            }
        }
        Commands::Check { url, origin, token } => {
            let client = reqwest::Client::new();
            let report = check(&client, &url, &origin, token.as_deref()).await?;

            println!("health:    {}", report.health_status);
            println!(
                "preflight: {} origin={} methods={}",
                report.preflight_status, report.allow_origin, report.allow_methods
            );
            println!("verify:    {} authenticated={:?}", report.verify_status, report.authenticated);

            if !report.passed() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
