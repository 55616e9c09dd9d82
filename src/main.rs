//! Command-line entry point.
//!
//! ```sh
//! DROPBOX_TOKEN=sl.xxx deckdrop
//! deckdrop --skip-upload --out deck.pptx
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use deckdrop::config::{Config, DEFAULT_TOKEN_ENV};
use deckdrop::{credential, pipeline};

/// Generate the "AI in Mobile Phones" deck and publish it to Dropbox
#[derive(Parser, Debug)]
#[command(name = "deckdrop", version)]
struct Args {
    /// Local output file
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Directory for downloaded images
    #[arg(long, value_name = "DIR")]
    image_dir: Option<PathBuf>,

    /// Destination path in Dropbox
    #[arg(long, value_name = "PATH")]
    remote_path: Option<String>,

    /// Only write the deck locally
    #[arg(long)]
    skip_upload: bool,

    /// Build slides without downloading images
    #[arg(long)]
    no_images: bool,

    /// Exit with status 1 when no share link was produced
    #[arg(long)]
    strict: bool,

    /// Environment variable holding the Dropbox token
    #[arg(long, value_name = "VAR", default_value = DEFAULT_TOKEN_ENV)]
    token_env: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()
        .with_skip_images(args.no_images)
        .with_skip_upload(args.skip_upload);
    if let Some(out) = &args.out {
        config = config.with_out_file(out);
    }
    if let Some(dir) = &args.image_dir {
        config = config.with_image_dir(dir);
    }
    if let Some(remote) = args.remote_path {
        config = config.with_remote_path(remote);
    }

    let token = if config.skip_upload {
        None
    } else {
        match credential::resolve_token(&args.token_env) {
            Ok(token) => Some(token),
            Err(e) => {
                log::error!("{}", e);
                None
            },
        }
    };

    let outcome = pipeline::run_with_progress(&config, token, |stage| println!("{}", stage)).await;
    match &outcome {
        Ok(report) => {
            println!("Saved presentation to {}", report.output.display());
            if let Some(link) = report.share_link() {
                println!("Shareable link: {}", link);
            }
            println!("\n{}", report.closing_message());
        },
        Err(e) => log::error!("{}", e),
    }

    ExitCode::from(pipeline::exit_code(&outcome, args.strict))
}
