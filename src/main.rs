mod cli;

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use medialib::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let session = Session::connect(cli.database_url.as_deref(), true).await?;

    match cli.command {
        Commands::Pick { uri, kind } => {
            let kind = kind.unwrap_or_else(|| MediaKind::infer_from_uri(&uri));
            let mut prefs = Preferences::load()?;
            prefs.last_uri = Some(uri.clone());
            prefs.last_kind = Some(kind);
            prefs.save()?;
            println!("Selected {kind}: {uri}");
        }
        Commands::Add => {
            let selection = Preferences::load()?.selection();
            match session.add_favorite(selection.as_ref()).await {
                Ok(record) => println!("Added to favorites (id={})", record.id),
                Err(Error::NoSelection) => println!("No media selected; run `medialib pick <uri>` first"),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::List => {
            session.refresh().await?;
            let items = session.snapshot();
            if items.is_empty() {
                println!("No favorites yet");
            } else {
                for r in items {
                    println!("{:>6}  {:<5}  {}", r.id, r.kind, r.uri);
                }
            }
        }
        Commands::Remove { id, yes } => {
            let Some(record) = session.database().find_by_id(id).await? else {
                println!("No favorite with id {id}");
                return Ok(());
            };
            if !yes && !confirm(&format!("Remove {} from favorites? [y/N] ", record.uri))? {
                println!("Cancelled");
                return Ok(());
            }
            let token = session.delete_favorite(&record).await?;
            let window = token.expires_at - epoch_now();
            let mut prefs = Preferences::load()?;
            prefs.pending_undo = Some(token);
            prefs.save()?;
            println!("Deleted. Run `medialib undo` within {window}s to restore.");
        }
        Commands::Undo => {
            let mut prefs = Preferences::load()?;
            match prefs.pending_undo.take() {
                None => println!("Nothing to undo"),
                Some(token) => {
                    if session.undo(&token).await? {
                        println!("Restored favorite (id={})", token.record.id);
                    } else {
                        println!("Undo window expired");
                    }
                    // Single-use either way.
                    prefs.save()?;
                }
            }
        }
        Commands::Export { out } => {
            let (count, path) = match out {
                Some(path) => (session.export_to(&path).await?, path),
                None => session.export().await?,
            };
            println!("Exported {count} favorites to {}", path.display());
        }
        Commands::Import { file } => {
            let payload = tokio::fs::read_to_string(&file).await?;
            match session.import(&payload).await {
                Ok(count) => println!("Imported {count} favorites"),
                Err(Error::MalformedPayload(msg)) => println!("Import failed: {msg}"),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Stats => {
            let stats = session.stats().await?;
            println!(
                "{} favorites ({} images, {} videos)",
                stats.total, stats.images, stats.videos
            );
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn epoch_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
