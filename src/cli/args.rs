//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Wishlist manager: phases, sections and items with reordering, theming and JSON export
#[derive(Parser, Debug)]
#[command(name = "wishlist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file applied over the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides config)
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// Keep the wishlist in memory only (nothing is read or written)
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the wishlist tree
    Show,

    /// Manage phases
    Phase {
        #[command(subcommand)]
        command: PhaseCommands,
    },

    /// Manage sections within a phase
    Section {
        #[command(subcommand)]
        command: SectionCommands,
    },

    /// Manage items within a section
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },

    /// Light/dark theme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// Write the wishlist as pretty-printed JSON
    Export {
        /// Target file (default: export_file from config)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Delete the stored wishlist and theme
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum PhaseCommands {
    /// Append a new phase
    Add {
        /// Phase title
        title: String,
    },
    /// Rename a phase
    Rename {
        /// Phase id
        id: String,
        /// New title
        title: String,
    },
    /// Delete a phase with all its sections and items
    Delete {
        /// Phase id
        id: String,
    },
    /// Collapse/expand a phase
    Toggle {
        /// Phase id
        id: String,
    },
    /// Move a phase from one position to another
    Move {
        /// Current position (0-based)
        from: usize,
        /// Target position (0-based)
        to: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum SectionCommands {
    /// Append a new section to a phase
    Add {
        /// Phase id
        phase: String,
        /// Section title
        title: String,
    },
    /// Rename a section
    Rename {
        /// Section id
        id: String,
        /// New title
        title: String,
    },
    /// Delete a section with all its items
    Delete {
        /// Section id
        id: String,
    },
    /// Collapse/expand a section
    Toggle {
        /// Section id
        id: String,
    },
    /// Move a section within its phase
    Move {
        /// Phase id
        phase: String,
        /// Current position (0-based)
        from: usize,
        /// Target position (0-based)
        to: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Append a new item to a section
    Add {
        /// Section id
        section: String,
        /// Item name
        name: String,
        /// Item link (URL)
        #[arg(short, long, default_value = "")]
        link: String,
        /// Note (e.g. price, size)
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Edit an item (omitted fields keep their value)
    Edit {
        /// Item id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New link; pass "" to clear
        #[arg(short, long)]
        link: Option<String>,
        /// New note; pass "" to clear
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Mark/unmark an item as ordered
    Toggle {
        /// Item id
        id: String,
    },
    /// Delete an item
    Delete {
        /// Item id
        id: String,
    },
    /// Move an item within its section
    Move {
        /// Section id
        section: String,
        /// Current position (0-based)
        from: usize,
        /// Target position (0-based)
        to: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Switch between light and dark
    Toggle,
    /// Print the current theme
    Show,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config and data paths
    Path,
}
