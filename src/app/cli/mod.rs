//! CLI adapter.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use url::Url;

use crate::app::api::{self, NewRunOptions, UploadOptions, UploadOutcome};
use crate::app::config::CmsOverrides;
use crate::app::logging;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "olx")]
#[command(version)]
#[command(about = "Render, package and import OLX course runs", long_about = None)]
struct Cli {
    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new course run from the templates in the current directory
    #[clap(visible_alias = "nr")]
    NewRun {
        /// Create a new 'run/NAME' git branch, add changed files, and commit them
        #[arg(short = 'b', long)]
        create_branch: bool,
        /// Make the course run public
        #[arg(short = 'p', long)]
        public: bool,
        /// The run name suffix
        #[arg(short = 's', long)]
        suffix: Option<String>,
        /// The run identifier
        name: String,
        /// When the course run starts (YYYY-MM-DD)
        start_date: String,
        /// When the course run ends (YYYY-MM-DD)
        end_date: String,
    },
    /// Package the course into an import-ready .tar.gz
    Archive {
        /// Course root (defaults to the current directory)
        #[arg(short = 'r', long)]
        root: Option<PathBuf>,
        /// Archive name without the .tar.gz extension
        base_name: Option<PathBuf>,
    },
    /// Import a course archive into Studio
    Upload {
        /// Course ID to import into (read from the archive's course.xml if omitted)
        #[arg(long)]
        course_id: Option<String>,
        /// Wait for the import task to finish
        #[arg(short = 'w', long)]
        wait: bool,
        #[command(flatten)]
        cms: CmsArgs,
        /// Path to the course archive
        archive: PathBuf,
    },
    /// Print a bearer token for the Studio API
    Token {
        #[command(flatten)]
        cms: CmsArgs,
    },
}

#[derive(clap::Args)]
struct CmsArgs {
    /// Studio base URL (overrides OLX_CMS_URL and olx.toml)
    #[arg(long)]
    url: Option<Url>,
    /// OAuth2 client ID (overrides OLX_CLIENT_ID and olx.toml)
    #[arg(long)]
    client_id: Option<String>,
    /// OAuth2 client secret (overrides OLX_CLIENT_SECRET and olx.toml)
    #[arg(long)]
    client_secret: Option<String>,
}

impl From<CmsArgs> for CmsOverrides {
    fn from(args: CmsArgs) -> Self {
        CmsOverrides { url: args.url, client_id: args.client_id, client_secret: args.client_secret }
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::NewRun { create_branch, public, suffix, name, start_date, end_date } => {
            run_new_run(NewRunOptions {
                run_name: name,
                start_date,
                end_date,
                run_suffix: suffix,
                is_public: public,
                create_branch,
            })
        }
        Commands::Archive { root, base_name } => run_archive(root, base_name),
        Commands::Upload { course_id, wait, cms, archive } => {
            run_upload(UploadOptions { archive, course_id, wait, cms: cms.into() })
        }
        Commands::Token { cms } => run_token(cms.into()),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_new_run(options: NewRunOptions) -> Result<(), AppError> {
    let outcome = api::new_run(&options)?;
    tracing::info!(
        rendered = outcome.report.rendered.len(),
        materialized = outcome.report.materialized.len(),
        link = %outcome.policy_link.display(),
        "new run created"
    );
    if let Some(follow_up) = outcome.follow_up {
        eprint!("{}", follow_up);
    }
    eprintln!("All done!");
    Ok(())
}

fn run_archive(root: Option<PathBuf>, base_name: Option<PathBuf>) -> Result<(), AppError> {
    let archive = api::archive(root.as_deref(), base_name.as_deref())?;
    println!("✅ Created {}", archive.display());
    Ok(())
}

fn run_upload(options: UploadOptions) -> Result<(), AppError> {
    let archive = options.archive.clone();
    match api::upload(options)? {
        UploadOutcome::Submitted { task_id } => {
            println!("✅ Uploaded {} (import task {})", archive.display(), task_id);
        }
        UploadOutcome::Completed { task_id, attempts } => {
            println!(
                "✅ Imported {} (import task {}, {} status checks)",
                archive.display(),
                task_id,
                attempts
            );
        }
    }
    Ok(())
}

fn run_token(cms: CmsOverrides) -> Result<(), AppError> {
    println!("{}", api::token(cms)?);
    Ok(())
}
