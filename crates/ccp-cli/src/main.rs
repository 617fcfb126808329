use ccp_cli::args::{Cli, Commands, ProfileCommands};
use ccp_cli::config::{self, Profile};
use ccp_cli::run;
use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let profile_path = match &cli.connection.profile {
        Some(path) => path.clone(),
        None => config::default_profile_path()?,
    };

    match &cli.command {
        Commands::Apply(args) => {
            let profile = config::load_profile(&profile_path)?;
            let (client_config, credentials) =
                run::resolve_connection(&cli.connection, profile.as_ref())?;
            let request = run::build_request(args)?;

            let report = run::apply(&client_config, &credentials, &request)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Profile(args) => match args.command {
            ProfileCommands::Save => {
                let existing = config::load_profile(&profile_path)?;
                // Saving never needs the password.
                let mut connection = cli.connection.clone();
                connection.password.get_or_insert_default();
                let (client_config, credentials) =
                    run::resolve_connection(&connection, existing.as_ref())?;
                let profile = Profile {
                    config_version: 0,
                    base_url: client_config.endpoint.base_url,
                    username: credentials.username,
                    version: client_config.endpoint.version,
                    validate_certs: client_config.validate_certs,
                };
                config::save_profile(&profile_path, &profile)?;
            }
            ProfileCommands::Show => match config::load_profile(&profile_path)? {
                Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
                None => eyre::bail!("no profile at {}", profile_path.display()),
            },
            ProfileCommands::Delete => config::delete_profile(&profile_path)?,
        },
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
