use clap::Parser;
use scadastore::application::{
    export_configuration, import_configuration, init::init, navigate, ApiClient, AuthService,
    ConfigService, ConfigurationStore, Method, Navigation,
};
use scadastore::cli::{format_configuration_list, format_integrity_issues, Cli, Commands};
use scadastore::domain::{
    check_integrity, AuthResponse, DiagramConfiguration, DiagramSnapshot, RouteTable,
};
use scadastore::error::ScadaError;
use scadastore::infrastructure::{
    Config, FileStorage, FileSystemRepository, SessionStore, WorkspaceRepository,
};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr so stdout stays machine-readable; level from SCADA_LOG
fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("SCADA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn open_workspace() -> Result<(FileSystemRepository, Config), ScadaError> {
    let repo = FileSystemRepository::discover()?;
    let config = repo.load_config()?;
    Ok((repo, config))
}

fn open_store(repo: &FileSystemRepository, config: &Config) -> ConfigurationStore<FileStorage> {
    ConfigurationStore::with_key(repo.storage(), &config.storage_key)
}

fn report_integrity(config: &DiagramConfiguration) {
    let issues = check_integrity(config);
    if issues.is_empty() {
        return;
    }
    for issue in &issues {
        warn!(
            name = %config.name,
            issue = %issue,
            "Configuration has a dangling or inconsistent reference"
        );
    }
    eprint!(
        "Warning: '{}' has {} integrity issue(s):\n{}",
        config.name,
        issues.len(),
        format_integrity_issues(&issues)
    );
}

fn read_snapshot(path: &Path) -> Result<DiagramSnapshot, ScadaError> {
    let text = fs::read_to_string(path).map_err(|e| ScadaError::ImportRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| {
        ScadaError::InvalidConfiguration(format!("snapshot {}: {}", path.display(), e))
    })
}

fn parse_param(raw: &str) -> Result<(String, String), ScadaError> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| {
            ScadaError::Config(format!("Invalid parameter '{}': expected KEY=VALUE", raw))
        })
}

fn run(cli: Cli) -> Result<(), ScadaError> {
    match cli.command {
        Commands::Init { path } => {
            init(&path)?;
            println!("Initialized scadastore workspace at {}", path.display());
            Ok(())
        }
        Commands::Save {
            name,
            snapshot,
            description,
        } => {
            let (repo, config) = open_workspace()?;
            let snapshot = read_snapshot(&snapshot)?;

            let saved = open_store(&repo, &config).save(
                &name,
                &snapshot.components,
                &snapshot.groups,
                snapshot.canvas,
                description.as_deref(),
            )?;
            report_integrity(&saved);

            println!(
                "Saved '{}' ({} components, {} groups)",
                saved.name,
                saved.components.len(),
                saved.groups.len()
            );
            Ok(())
        }
        Commands::Load { name } => {
            let (repo, config) = open_workspace()?;
            let loaded = open_store(&repo, &config).load(&name)?;
            println!("{}", serde_json::to_string_pretty(&loaded)?);
            Ok(())
        }
        Commands::List => {
            let (repo, config) = open_workspace()?;
            let configs = open_store(&repo, &config).list_all();
            println!("{}", format_configuration_list(&configs).trim_end());
            Ok(())
        }
        Commands::Delete { name } => {
            let (repo, config) = open_workspace()?;
            if open_store(&repo, &config).delete(&name)? > 0 {
                println!("Deleted '{}'", name);
            } else {
                println!("No configuration named '{}'", name);
            }
            Ok(())
        }
        Commands::Export { name, out } => {
            let (repo, config) = open_workspace()?;
            let loaded = open_store(&repo, &config).load(&name)?;
            let dir = out.unwrap_or_else(|| config.export_path(repo.root()));
            let path = export_configuration(&loaded, &dir)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Import { file, save } => {
            let imported = import_configuration(&file)?;
            report_integrity(&imported);
            println!(
                "Valid configuration '{}' (version {}, {} components, {} groups)",
                imported.name,
                imported.version,
                imported.components.len(),
                imported.groups.len()
            );

            if save {
                let (repo, config) = open_workspace()?;
                open_store(&repo, &config).put(&imported)?;
                println!("Stored '{}'", imported.name);
            }
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("storage_key = {}", config.storage_key);
                println!("export_dir = {}", config.export_dir);
                println!("api_base_url = {}", config.api_base_url);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: scadastore config [--list | <key> [<value>]]");
                println!("Valid keys: storage_key, export_dir, api_base_url, created");
                Ok(())
            }
        }
        Commands::Login { response } => {
            let repo = FileSystemRepository::discover()?;
            let response: AuthResponse = serde_json::from_str(&fs::read_to_string(&response)?)?;

            AuthService::new(SessionStore::new(repo.session_path())).save_auth_data(&response)?;
            println!("Logged in as {}", response.user_data.username);
            Ok(())
        }
        Commands::Logout => {
            let repo = FileSystemRepository::discover()?;
            AuthService::new(SessionStore::new(repo.session_path())).clear_auth_data()?;
            println!("Logged out");
            Ok(())
        }
        Commands::Whoami => {
            let repo = FileSystemRepository::discover()?;
            let auth = AuthService::new(SessionStore::new(repo.session_path()));
            if !auth.is_authenticated() {
                return Err(ScadaError::Unauthenticated);
            }
            let user = auth.current_user().ok_or(ScadaError::Unauthenticated)?;

            println!("{} <{}>", user.username, user.email);
            println!("role: {}", user.role);
            println!("permissions: {}", auth.user_permissions().join(", "));
            Ok(())
        }
        Commands::Can { permission } => {
            let repo = FileSystemRepository::discover()?;
            let auth = AuthService::new(SessionStore::new(repo.session_path()));
            if !auth.is_authenticated() {
                return Err(ScadaError::Unauthenticated);
            }
            println!("{}", if auth.has_permission(&permission) { "yes" } else { "no" });
            Ok(())
        }
        Commands::Route { path } => {
            let repo = FileSystemRepository::discover()?;
            let auth = AuthService::new(SessionStore::new(repo.session_path()));

            match navigate(&RouteTable::default(), &path, auth.is_authenticated()) {
                Navigation::Proceed { view } => println!("proceed {}", view),
                Navigation::Redirect { to } => println!("redirect {}", to),
                Navigation::NotFound => println!("not found"),
            }
            Ok(())
        }
        Commands::Api {
            method,
            resource,
            params,
            body,
        } => {
            let (repo, config) = open_workspace()?;
            let auth = AuthService::new(SessionStore::new(repo.session_path()));

            let method = Method::from_str(&method).map_err(ScadaError::Config)?;
            let params = params
                .iter()
                .map(|p| parse_param(p))
                .collect::<Result<Vec<_>, _>>()?;
            let body = body
                .map(|b| serde_json::from_str::<serde_json::Value>(&b))
                .transpose()?;

            let client = ApiClient::new(&config.get_api_base_url(), auth.access_token());
            let request = client.request(method, &resource, &params, body.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&request)?);
            Ok(())
        }
    }
}
