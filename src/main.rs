use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use gridmemo::{CacheConfig, FileStore, GridCache, MemoryCollection, MemorySnapshot, StaticPage};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "gridmemo")]
#[command(about = "Inspect and prune persisted grid user memory")]
struct Cli {
    /// Store file holding the memory collection
    #[arg(long, default_value = "gridmemo.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the memory keys of every remembered grid
    List,
    /// Print the remembered layout of one grid
    Show {
        #[arg(long)]
        path: String,
        #[arg(long, default_value = "")]
        hash: String,
        #[arg(long)]
        grid: String,
    },
    /// Forget one grid
    Delete {
        #[arg(long)]
        path: String,
        #[arg(long, default_value = "")]
        hash: String,
        #[arg(long)]
        grid: String,
        #[arg(long, default_value = "deleted from gridmemo tool")]
        reason: String,
    },
    /// Forget every grid
    Clear {
        #[arg(long, default_value = "cleared from gridmemo tool")]
        reason: String,
    },
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::List => list(&cli.store),
        Command::Show { path, hash, grid } => show(&cli.store, &path, &hash, &grid),
        Command::Delete {
            path,
            hash,
            grid,
            reason,
        } => {
            let cache = open_cache(&cli.store, &path, &hash)?;
            let deleted = cache.del_user_memory(Some(&grid), &reason)?;
            println!(
                "{}",
                if deleted { "Deleted" } else { "Nothing stored" }
            );
            Ok(())
        }
        Command::Clear { reason } => {
            let cache = open_cache(&cli.store, "/", "")?;
            let deleted = cache.del_user_memory(None, &reason)?;
            println!(
                "{}",
                if deleted { "Cleared" } else { "Nothing stored" }
            );
            Ok(())
        }
        Command::Version => {
            println!("gridmemo {}", gridmemo::version());
            Ok(())
        }
    }
}

fn open_store(store: &Path) -> Result<FileStore> {
    FileStore::open(store).with_context(|| format!("Failed to open store '{}'", store.display()))
}

fn open_cache(store: &Path, path: &str, hash: &str) -> Result<GridCache> {
    Ok(GridCache::new()
        .store(Arc::new(open_store(store)?))
        .page(Arc::new(StaticPage::new(path, hash))))
}

fn read_collection(store: &Path) -> Result<Option<MemoryCollection>> {
    use gridmemo::MemoryStore;

    let file_store = open_store(store)?;
    let raw = file_store.get_item(&CacheConfig::default().memory_key)?;
    raw.map(|raw| MemoryCollection::parse(&raw))
        .transpose()
        .context("Memory collection is not valid JSON")
}

fn list(store: &Path) -> Result<()> {
    let Some(collection) = read_collection(store)? else {
        println!("No user memory in '{}'", store.display());
        return Ok(());
    };
    for key in collection.keys() {
        println!("{}", key);
    }
    Ok(())
}

fn show(store: &Path, path: &str, hash: &str, grid: &str) -> Result<()> {
    let cache = open_cache(store, path, hash)?;
    let key = cache.get_memory_key(grid);
    let collection = read_collection(store)?.ok_or_else(|| anyhow!("No user memory stored"))?;
    let raw = collection
        .get(&key)
        .ok_or_else(|| anyhow!("No user memory for '{}'", key))?;
    let snapshot = MemorySnapshot::parse(raw).with_context(|| format!("Memory of '{}' is unreadable", key))?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
