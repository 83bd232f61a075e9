//! Remove command handler.

use anyhow::Result;
use std::path::Path;

use super::{open_store, start_editor};
use crate::cli::RmArgs;
use crate::cli::config::Config;

pub fn handle_rm(args: &RmArgs, store_path: &Path, config: &Config) -> Result<()> {
    let mut store = open_store(store_path)?;
    let mut editor = start_editor(&store, config);

    let removed = editor.delete(&mut store, args.id)?;
    store.persist()?;

    println!("Deleted: {} [#{}]", removed.title(), removed.id());
    Ok(())
}
