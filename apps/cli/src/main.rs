#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod config;
mod context;
mod domains;
mod session;
mod util;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::{
	context::{Context, OutputFormat},
	domains::{config::ConfigCmd, edit::EditCmd, issues::IssuesArgs, session::SessionCmd},
};

#[derive(Parser, Debug)]
#[command(
	name = "pre-estimate",
	version,
	about = "Clean up measured rooms before they go into an estimate"
)]
struct Cli {
	/// Path to pre-estimate data directory
	#[arg(long, global = true, env = "PRE_ESTIMATE_DATA_DIR")]
	data_dir: Option<PathBuf>,

	/// Session to work on instead of the current one
	#[arg(long, global = true)]
	session: Option<Uuid>,

	/// Output format
	#[arg(long, global = true, value_enum, default_value = "human")]
	format: OutputFormat,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	#[command(flatten)]
	Session(SessionCmd),
	#[command(flatten)]
	Edit(EditCmd),
	/// List blank or repeated room names and rooms that look like sub-areas
	Issues(IssuesArgs),
	/// CLI configuration
	#[command(subcommand)]
	Config(ConfigCmd),
}

fn default_data_dir() -> Result<PathBuf> {
	dirs::data_local_dir()
		.map(|dir| dir.join("pre-estimate"))
		.ok_or_else(|| anyhow::anyhow!("No local data directory on this platform; pass --data-dir"))
}

fn init_logging() {
	tracing_subscriber::registry()
		.with(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| EnvFilter::new("info,pe_room_model=debug")),
		)
		.with(
			tracing_subscriber::fmt::layer()
				.with_target(false)
				.with_writer(std::io::stderr),
		)
		.init();
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	init_logging();

	let data_dir = match cli.data_dir {
		Some(dir) => dir,
		None => default_data_dir()?,
	};

	let ctx = Context::new(cli.format, data_dir, cli.session);

	match cli.command {
		Commands::Session(cmd) => domains::session::run(&ctx, cmd),
		Commands::Edit(cmd) => domains::edit::run(&ctx, cmd),
		Commands::Issues(args) => domains::issues::run(&ctx, args),
		Commands::Config(cmd) => domains::config::run(&ctx.data_dir, cmd),
	}
}
