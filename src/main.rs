use leercapitulo_scraper::config::Config;
use leercapitulo_scraper::LeerCapitulo;
use log::{error, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "usage: leercapitulo_scraper <command>

commands:
  popular [page]                 ongoing series
  latest [page]                  recently updated series
  search <query> [page]          series whose title contains <query>
  detail <url>                   metadata of one series
  chapters <url>                 chapter list, oldest first
  images <url>                   page images of one chapter (needs Chrome)
  download <image-url> <file>    save one page image";

#[derive(Debug, PartialEq)]
enum Command {
    Popular(u32),
    Latest(u32),
    Search(String, u32),
    Detail(String),
    Chapters(String),
    Images(String),
    Download(String, PathBuf),
}

fn parse_page(arg: Option<&String>) -> Result<u32, String> {
    match arg {
        None => Ok(1),
        Some(raw) => match raw.parse::<u32>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(format!("invalid page number '{}'", raw)),
        },
    }
}

fn required<'a>(arg: Option<&'a String>, name: &str) -> Result<&'a String, String> {
    arg.ok_or_else(|| format!("missing <{}>", name))
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let (cmd, rest) = args.split_first().ok_or("missing command")?;
    let command = match cmd.as_str() {
        "popular" => Command::Popular(parse_page(rest.first())?),
        "latest" => Command::Latest(parse_page(rest.first())?),
        "search" => Command::Search(
            required(rest.first(), "query")?.clone(),
            parse_page(rest.get(1))?,
        ),
        "detail" => Command::Detail(required(rest.first(), "url")?.clone()),
        "chapters" => Command::Chapters(required(rest.first(), "url")?.clone()),
        "images" => Command::Images(required(rest.first(), "url")?.clone()),
        "download" => Command::Download(
            required(rest.first(), "image-url")?.clone(),
            PathBuf::from(required(rest.get(1), "file")?),
        ),
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(command)
}

fn init_logging() {
    if Path::new("log4rs.yml").exists() {
        if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
            eprintln!("Failed to load log4rs.yml ({}), using env_logger", e);
            env_logger::init();
        }
    } else {
        env_logger::init();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(source: &LeerCapitulo, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Popular(page) => print_json(&source.popular(page).await?)?,
        Command::Latest(page) => print_json(&source.latest(page).await?)?,
        Command::Search(query, page) => print_json(&source.search(&query, page).await?)?,
        Command::Detail(url) => print_json(&source.manga_detail(&url).await?)?,
        Command::Chapters(url) => print_json(&source.chapters(&url).await?)?,
        Command::Images(url) => print_json(&source.chapter_images(&url).await?)?,
        Command::Download(url, file) => {
            let bytes = source.image_bytes(&url).await?;
            tokio::fs::write(&file, &bytes).await?;
            info!("Saved {} bytes to {}", bytes.len(), file.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, USAGE);
            return ExitCode::from(2);
        }
    };

    let config = Config::load();
    let source = match LeerCapitulo::from_config(&config) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to set up scraper: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Using site {}", source.site().origin());

    match run(&source, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
