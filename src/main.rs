use anyhow::Context;
use clap::Parser;
use rice_dashboard::config::cli::{Command, LinksCommand, NotesCommand};
use rice_dashboard::core::dashboard::{NewLink, NoteUpdate};
use rice_dashboard::core::favicon::FaviconResolver;
use rice_dashboard::core::store::RecordStore;
use rice_dashboard::utils::{logger, validation::Validate};
use rice_dashboard::{
    CliConfig, DashboardConfig, DashboardError, DashboardService, FeedImageResolver, LocalStorage,
};
use serde::Serialize;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Err(e) = run(cli).await {
        tracing::debug!("Command failed: {:?}", e);

        let exit_code = match e.downcast_ref::<DashboardError>() {
            Some(err) => {
                eprintln!("❌ {}", err.user_friendly_message());
                err.exit_code()
            }
            None => {
                eprintln!("❌ {:#}", e);
                1
            }
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> anyhow::Result<()> {
    let config = cli.load_config().context("loading configuration")?;
    config.validate()?;
    if cli.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    match cli.command {
        Command::Images => {
            let resolver = FeedImageResolver::new(&config)?;
            let resolution = resolver.resolve().await;
            if let Some(tier) = resolution.tier() {
                tracing::info!("Gallery degraded to {:?} fallback", tier);
            }
            print_json(&resolution.into_entries())
        }
        Command::Favicon { url } => {
            println!("{}", FaviconResolver::new(&config.favicon).resolve(&url));
            Ok(())
        }
        command => {
            let service = build_service(&config)?;
            run_store_command(&service, command).await
        }
    }
}

fn build_service(config: &DashboardConfig) -> anyhow::Result<DashboardService<LocalStorage>> {
    let storage = LocalStorage::new(&config.storage.data_dir);
    tracing::debug!("Using data directory {}", storage.base_path().display());

    Ok(DashboardService::new(
        RecordStore::new(storage, config.storage.snapshot_file.clone()),
        FeedImageResolver::new(config)?,
        FaviconResolver::new(&config.favicon),
    ))
}

async fn run_store_command(
    service: &DashboardService<LocalStorage>,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Dashboard => print_json(&service.dashboard().await?),
        Command::Init => {
            let created = service.ensure_admin_user().await?;
            print_json(&serde_json::json!({ "admin_created": created }))
        }
        Command::Login { username, password } => {
            match service.verify_credentials(&username, &password).await? {
                Some(user) => print_json(&serde_json::json!({ "id": user.id, "username": user.username })),
                None => Err(DashboardError::AuthError {
                    message: "Invalid username or password".to_string(),
                }
                .into()),
            }
        }
        Command::Notes(NotesCommand::List) => print_json(&service.list_notes().await?),
        Command::Notes(NotesCommand::Add { title, content }) => {
            print_json(&service.add_note(&title, &content).await?)
        }
        Command::Notes(NotesCommand::Edit {
            id,
            title,
            content,
            completed,
        }) => print_json(
            &service
                .edit_note(
                    id,
                    NoteUpdate {
                        title,
                        content,
                        completed,
                    },
                )
                .await?,
        ),
        Command::Notes(NotesCommand::Delete { id }) => {
            service.delete_note(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        Command::Links(LinksCommand::List) => print_json(&service.list_links().await?),
        Command::Links(LinksCommand::Add {
            title,
            url,
            category,
            description,
            fast_access,
        }) => print_json(
            &service
                .add_link(NewLink {
                    title,
                    url,
                    category,
                    description,
                    fast_access,
                })
                .await?,
        ),
        Command::Links(LinksCommand::Delete { id }) => {
            service.delete_link(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        Command::Images | Command::Favicon { .. } => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
