// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use docsearch::overlay::view::{welcome_group, ContentView, Dialog};
use docsearch::{
    KeyEvent, Navigate, OverlayConfig, PageEntry, SearchContext, SearchOverlay, StaticIndexLoader,
};

mod cli;
use cli::display;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// `DOCSEARCH_LOG` first, then the `-v` count. Logs go to stderr so stdout
/// stays clean for `--json`.
fn init_tracing(verbose: u8) {
    let filter = std::env::var("DOCSEARCH_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| {
            EnvFilter::new(match verbose {
                0 => "warn",
                1 => "docsearch=debug",
                _ => "docsearch=trace",
            })
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => OverlayConfig::from_file(path)?,
        None => OverlayConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    config.validate()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let output = Output { json: cli.json };
    match cli.command {
        Commands::Search { site, query } => runtime.block_on(search(&site, &query, config, output)),
        Commands::Pages { file } => pages(&file, output),
        Commands::Repl { site, pages } => {
            let pages = match pages {
                Some(path) => load_pages(&path)?,
                None => Vec::new(),
            };
            runtime.block_on(repl(&site, pages, config, output))
        }
    }
}

fn load_pages(path: &Path) -> Result<Vec<PageEntry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read pages file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid pages JSON in {}", path.display()))
}

fn mount(
    site: &Path,
    pages: Vec<PageEntry>,
    config: OverlayConfig,
) -> Result<(Arc<SearchContext>, SearchOverlay)> {
    if !site.is_dir() {
        bail!("site directory {} does not exist", site.display());
    }
    let loader = Arc::new(StaticIndexLoader::from_config(site, &config));
    let ctx = SearchContext::new(config, loader);
    let navigate: Navigate = Arc::new(|url: &str| println!("→ {}", url));
    let overlay = SearchOverlay::mount(Arc::clone(&ctx), pages, navigate);
    Ok((ctx, overlay))
}

#[derive(Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn show(&self, overlay: &SearchOverlay) -> Result<()> {
        let Some(rendered) = overlay.render() else {
            return Ok(());
        };
        if self.json {
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        } else {
            for line in display::render(display::use_colors(), &rendered) {
                println!("{}", line);
            }
        }
        Ok(())
    }

    fn show_dialog(&self, dialog: &Dialog) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(dialog)?);
        } else {
            for line in display::render_dialog(display::use_colors(), dialog) {
                println!("{}", line);
            }
        }
        Ok(())
    }
}

async fn search(site: &Path, query: &str, config: OverlayConfig, output: Output) -> Result<()> {
    let (_ctx, overlay) = mount(site, Vec::new(), config)?;
    overlay.open();
    if let Some(task) = overlay.set_query(query) {
        task.await.context("search task panicked")?;
    }
    output.show(&overlay)
}

fn pages(file: &Path, output: Output) -> Result<()> {
    let pages = load_pages(file)?;
    let content = ContentView::Welcome(welcome_group(&pages));
    let active_index = (!content.selectable_urls().is_empty()).then_some(0);
    output.show_dialog(&Dialog {
        query: String::new(),
        content,
        active_index,
    })
}

const REPL_HELP: &str = "\
lines are queries (empty line clears)
  :open  :close        open or close the dialog
  :up    :down         move the cursor
  :enter               select the item under the cursor
  :key <chord>         send a key, e.g. :key ctrl+k, :key esc
  :quit                leave";

async fn repl(site: &Path, pages: Vec<PageEntry>, config: OverlayConfig, output: Output) -> Result<()> {
    let (ctx, overlay) = mount(site, pages, config)?;

    eprintln!("{}", REPL_HELP);
    output.show(&overlay)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        match line {
            ":quit" | ":q" => break,
            ":help" => {
                eprintln!("{}", REPL_HELP);
                continue;
            }
            ":open" => overlay.open(),
            ":close" => overlay.close(),
            ":up" => overlay.move_selection(-1),
            ":down" => overlay.move_selection(1),
            ":enter" => {
                if overlay.select_active().is_none() {
                    eprintln!("nothing to select");
                }
            }
            _ if line.starts_with(":key ") => {
                let chord = &line[":key ".len()..];
                match KeyEvent::parse(chord) {
                    Some(event) => {
                        let disposition = ctx.keyboard().dispatch(&event);
                        tracing::debug!(chord, ?disposition, "key handled");
                    }
                    None => eprintln!("unknown key chord {:?}", chord),
                }
            }
            _ if line.starts_with(':') => {
                eprintln!("unknown command {:?} (:help lists commands)", line);
                continue;
            }
            query => {
                if !overlay.is_open() {
                    overlay.open();
                }
                if let Some(task) = overlay.set_query(query) {
                    task.await.context("search task panicked")?;
                }
            }
        }
        output.show(&overlay)?;
    }
    Ok(())
}
