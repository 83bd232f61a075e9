//! jotter - quick categorized notes with debounced auto-save

pub mod cli;
pub mod domain;
pub mod editor;
pub mod logging;
pub mod store;
pub mod transfer;
pub mod view;

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser};
use log::debug;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_categories, handle_clear, handle_edit, handle_export, handle_import, handle_list,
        handle_new, handle_rm, handle_shell, handle_show,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(logging::level_for_verbosity(cli.verbose)).map_err(|e| anyhow!(e))?;
    debug!(
        "event=cli_start module=cli status=ok level={}",
        logging::logging_level().unwrap_or("off")
    );

    if let Command::Completions(args) = &cli.command {
        let mut command = Cli::command();
        clap_complete::generate(args.shell, &mut command, "jotter", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let store_path = config.store_path(cli.store.as_ref());

    match &cli.command {
        Command::New(args) => handle_new(args, &store_path, &config),
        Command::Edit(args) => handle_edit(args, &store_path, &config),
        Command::Rm(args) => handle_rm(args, &store_path, &config),
        Command::List(args) => handle_list(args, &store_path),
        Command::Show(args) => handle_show(args, &store_path),
        Command::Categories(args) => handle_categories(args, &store_path),
        Command::Export(args) => handle_export(args, &store_path),
        Command::Import(args) => handle_import(args, &store_path),
        Command::Clear(args) => handle_clear(args, &store_path),
        Command::Shell => handle_shell(&store_path, &config),
        Command::Completions(_) => Ok(()),
    }
}
