// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the docsearch command-line interface.
//!
//! Three subcommands: `search` runs one query against a built site and
//! prints the dialog, `pages` prints the welcome list for a pages file, and
//! `repl` drives a live overlay from stdin so debouncing, staleness and
//! keyboard handling can be poked at by hand.

pub mod display;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docsearch",
    about = "Command-palette search over a static documentation site",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Overlay config JSON (camelCase keys, every field optional)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL passed to the index client, overriding the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Print the view model as JSON instead of drawing it
    #[arg(long, global = true)]
    pub json: bool,

    /// More logging (-v debug, -vv trace). DOCSEARCH_LOG wins when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one query against a site directory and print the dialog
    Search {
        /// Site root containing the search index (e.g. search/index.json)
        site: PathBuf,

        /// Search query
        query: String,
    },

    /// Print the welcome list for a pages JSON file
    Pages {
        /// JSON array of {title, url, parent?, description?}
        file: PathBuf,
    },

    /// Interactive overlay: lines are queries, `:help` lists commands
    Repl {
        /// Site root containing the search index
        site: PathBuf,

        /// Pages JSON for the welcome list
        #[arg(short, long)]
        pages: Option<PathBuf>,
    },
}
