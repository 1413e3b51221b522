//! FlexDoc command-line client.
//!
//! Thin consumer over the state stores: every subcommand maps onto one store
//! operation, with the session persisted under the data directory so logins
//! survive between invocations.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use flexdoc_cli::{data_dir, format_file_size, init_tracing};
use flexdoc_client::{ApiClient, FilePayload};
use flexdoc_core::models::{ConversionType, LoginRequest, SignupRequest};
use flexdoc_core::{ClientConfig, FileKeyStore, KeyValueStore};
use flexdoc_store::{FileStore, PreferencesStore, SessionStore, Theme};

#[derive(Parser, Debug)]
#[command(name = "flexdoc")]
#[command(about = "Client for the FlexDoc document-conversion service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and forget the stored session
    Logout,
    /// Show the current session
    Status,
    /// List converted files
    Files {
        /// Output format: table or json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Upload a file and convert it
    Convert {
        /// Path to the source file
        path: PathBuf,
        /// Conversion tag, e.g. pdf_to_excel (see `flexdoc types`)
        #[arg(long = "type", value_name = "TYPE")]
        conversion_type: String,
    },
    /// Delete a converted file by id
    Delete { id: String },
    /// List available conversion types
    Types,
    /// Get or set the color theme (light/dark)
    Theme {
        /// New theme; omit to print the current one
        value: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let keystore: Arc<dyn KeyValueStore> = Arc::new(FileKeyStore::new(data_dir()));
    let client = Arc::new(ApiClient::new(&ClientConfig::from_env(), keystore.clone())?);
    let session = Arc::new(SessionStore::new(client.clone(), keystore.clone()));
    let _listener = session.spawn_eviction_listener();

    match cli.command {
        Command::Signup {
            first_name,
            last_name,
            email,
            password,
        } => {
            let user = session
                .signup(&SignupRequest {
                    first_name,
                    last_name,
                    email,
                    password,
                })
                .await?;
            println!("Welcome, {}! You are now logged in.", user.full_name());
        }
        Command::Login { email, password } => {
            let user = session.login(&LoginRequest { email, password }).await?;
            println!("Logged in as {} <{}>", user.full_name(), user.email);
        }
        Command::Logout => {
            session.logout().await;
            println!("Logged out.");
        }
        Command::Status => {
            session.restore_session().await;
            let state = session.snapshot();
            match state.user {
                Some(user) if state.is_authenticated() => {
                    println!("Logged in as {} <{}>", user.full_name(), user.email);
                }
                _ => println!("Not logged in."),
            }
        }
        Command::Files { format } => {
            let files = FileStore::new(client).fetch_files().await?;
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else {
                if files.is_empty() {
                    println!("No converted files.");
                    return Ok(());
                }
                println!(
                    "{:<26} {:<30} {:<18} {:>10}  {}",
                    "ID", "CONVERTED", "CONVERSION", "SIZE", "CREATED"
                );
                for file in files {
                    println!(
                        "{:<26} {:<30} {:<18} {:>10}  {}",
                        file.id,
                        file.converted_filename,
                        file.conversion_type,
                        file.file_size.map_or("-".to_string(), format_file_size),
                        file.created_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        Command::Convert {
            path,
            conversion_type,
        } => {
            let conversion_type: ConversionType = conversion_type.parse()?;
            let payload = FilePayload::from_path(&path)?;
            let store = Arc::new(FileStore::new(client));

            let task = {
                let store = store.clone();
                let payload = payload.clone();
                tokio::spawn(async move { store.convert_file(&payload, conversion_type).await })
            };

            loop {
                tokio::time::sleep(Duration::from_millis(150)).await;
                match store.upload_progress() {
                    Some(progress) => {
                        print!("\r{:?} {:>3}%", progress.status, progress.progress);
                        let _ = std::io::stdout().flush();
                        if progress.status.is_terminal() {
                            println!();
                            break;
                        }
                    }
                    None if task.is_finished() => break,
                    None => {}
                }
            }

            let file = task.await??;
            println!(
                "Converted {} -> {} ({})",
                file.original_filename, file.converted_filename, file.cloud_url
            );
        }
        Command::Delete { id } => {
            FileStore::new(client).delete_file(&id).await?;
            println!("Deleted {}", id);
        }
        Command::Types => {
            for ct in ConversionType::ALL {
                let (source, target) = ct.formats();
                println!("{:<18} {:<20} {} -> {}", ct.as_str(), ct.label(), source, target);
            }
        }
        Command::Theme { value } => {
            let prefs = PreferencesStore::new(keystore);
            prefs.load().await;
            match value {
                Some(raw) => {
                    let theme: Theme = raw.parse()?;
                    prefs.set_theme(theme).await;
                    println!("Theme set to {}", theme.as_str());
                }
                None => println!("{}", prefs.theme().as_str()),
            }
        }
    }

    Ok(())
}
