mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pyq_lib::publish::themes::available_themes;

#[derive(Parser)]
#[command(name = "pyq-cli", about = "Previous year question site builder", version)]
struct Cli {
    /// Content root containing the `subjects/` directory
    #[arg(long, global = true, default_value = ".")]
    content: PathBuf,

    /// Config file (default: <content>/pyq.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the static site
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        out: PathBuf,
        /// Site title (overrides config)
        #[arg(long)]
        title: Option<String>,
        /// Theme name (overrides config)
        #[arg(
            long,
            value_parser = clap::builder::PossibleValuesParser::new(available_themes())
        )]
        theme: Option<String>,
        /// Render question cards expanded
        #[arg(long)]
        expand: bool,
    },

    /// List every subject/year in the content tree
    List,

    /// Print a question paper or formula sheet
    Show {
        /// Subject slug
        subject: String,
        /// Year slug
        year: String,
        /// Show the formula sheet instead of the questions
        #[arg(long)]
        formulas: bool,
    },

    /// Serve pages over HTTP, reading content on every request
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(&cli.content, cli.config.as_deref())?;

    match cli.command {
        Command::Build { out, title, theme, expand } => {
            commands::build::run(
                app,
                &out,
                title,
                theme,
                expand,
                &cli.format,
            )?;
        }
        Command::List => {
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Command::Show { subject, year, formulas } => {
            commands::show::run(&app, &subject, &year, formulas, &cli.format, use_color)?;
        }
        Command::Serve { port, host } => {
            commands::serve::run(app, host, port)?;
        }
    }

    Ok(())
}
