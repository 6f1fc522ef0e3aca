use clap::Parser;
use directories::ProjectDirs;
use querypad::config::QuerypadConfig;
use querypad::error::{QuerypadError, Result};
use querypad::playground::Playground;
use querypad::query::{self, DEFAULT_WIDTH};
use querypad::render::{QueryFormatter, Renderer};
use querypad::share::{token, Fragment, SessionFile, ShareCodec};
use querypad::tui;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    data_dir: PathBuf,
    config: QuerypadConfig,
}

fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = init_context()?;

    match cli.command {
        Some(Commands::Fmt { input, width }) => handle_fmt(&ctx, input, width),
        Some(Commands::Tree { input }) => handle_tree(input),
        Some(Commands::Token { input, decode }) => handle_token(&ctx, input, decode),
        Some(Commands::Open { token }) => handle_open(&ctx, token),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_play(&ctx),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_context() -> Result<AppContext> {
    let data_dir = match std::env::var_os("QUERYPAD_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let proj_dirs = ProjectDirs::from("com", "querypad", "querypad").ok_or_else(|| {
                QuerypadError::Config("Could not determine data directory".into())
            })?;
            proj_dirs.data_dir().to_path_buf()
        }
    };

    let config = QuerypadConfig::load(&data_dir).unwrap_or_default();

    Ok(AppContext { data_dir, config })
}

/// Resolve a positional input: an existing file path is read, anything else
/// is taken as literal query text, and no argument at all means stdin.
fn read_input(input: Option<String>) -> Result<String> {
    match input {
        Some(arg) => {
            if Path::new(&arg).is_file() {
                Ok(std::fs::read_to_string(&arg)?)
            } else {
                Ok(arg)
            }
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn handle_fmt(ctx: &AppContext, input: Option<String>, width: Option<usize>) -> Result<()> {
    let source = read_input(input)?;
    let width = width.unwrap_or(ctx.config.width);
    let formatted = query::format(&source, width)?;
    println!("{}", formatted);
    Ok(())
}

fn handle_tree(input: Option<String>) -> Result<()> {
    let source = read_input(input)?;
    print!("{}", query::tree(&source)?);
    Ok(())
}

fn handle_token(ctx: &AppContext, input: Option<String>, decode: Option<String>) -> Result<()> {
    if let Some(token) = decode {
        let text = token::decode(&token).map_err(QuerypadError::Token)?;
        println!("{}", text);
        return Ok(());
    }

    match input {
        Some(_) => {
            let source = read_input(input)?;
            let token = token::encode(&source).map_err(QuerypadError::Token)?;
            println!("{}", token);
        }
        None => {
            let session = SessionFile::new(&ctx.data_dir);
            match session.get()? {
                Some(token) if !token.is_empty() => println!("{}", token),
                _ => println!("No saved session."),
            }
        }
    }
    Ok(())
}

fn handle_open(ctx: &AppContext, token: String) -> Result<()> {
    // Reject broken tokens before touching the session file.
    token::decode(&token).map_err(QuerypadError::Token)?;
    let mut session = SessionFile::new(&ctx.data_dir);
    session.set(&token)?;
    handle_play(ctx)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            println!("width = {}", ctx.config.width);
        }
        (Some("width"), None) => {
            println!("width = {}", ctx.config.width);
        }
        (Some("width"), Some(v)) => {
            let width: usize = v
                .parse()
                .map_err(|_| QuerypadError::Config(format!("Invalid width: {}", v)))?;
            let mut config = ctx.config.clone();
            config.width = width;
            config.save(&ctx.data_dir)?;
            println!("width = {}", width);
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
            println!("Available keys: width");
        }
    }
    Ok(())
}

fn handle_play(ctx: &AppContext) -> Result<()> {
    let width = if ctx.config.width == 0 {
        DEFAULT_WIDTH
    } else {
        ctx.config.width
    };
    let renderer = Renderer::new(QueryFormatter::new(width));
    let codec = ShareCodec::new(SessionFile::new(&ctx.data_dir));
    let mut playground = Playground::start(renderer, codec);
    tui::run(&mut playground)
}
