//! Clear command handler.

use anyhow::{Result, bail};
use std::path::Path;

use super::open_store;
use crate::cli::ClearArgs;

pub fn handle_clear(args: &ClearArgs, store_path: &Path) -> Result<()> {
    let mut store = open_store(store_path)?;

    if !args.yes {
        bail!(
            "refusing to delete {} notes without --yes",
            store.len()
        );
    }

    let removed = store.clear_all();
    store.persist()?;
    println!("Deleted {removed} notes");
    Ok(())
}
