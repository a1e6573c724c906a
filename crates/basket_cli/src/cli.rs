//! Command-line argument parsing.
//!
//! Parsing lives here; execution lives in `main.rs`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

/// Family shopping lists and chat from the terminal.
#[derive(Debug, Parser)]
#[command(name = "basket", version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// SQLite database file (overrides $BASKET_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Directory for rolling log files (overrides $BASKET_LOG_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides $BASKET_LOG_LEVEL)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assign a category to each item name
    Categorize {
        #[arg(required = true)]
        names: Vec<String>,
        #[arg(long)]
        english: bool,
    },

    /// Show the label of a category id; unknown ids print the "other" label
    #[command(allow_negative_numbers = true)]
    Label {
        id: i64,
        #[arg(long)]
        english: bool,
    },

    /// Render an RFC 3339 timestamp the way message views show it
    FormatDate {
        timestamp: String,
        #[arg(long)]
        english: bool,
    },

    /// Manage user profiles
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Search and manage contacts
    Contact {
        #[command(subcommand)]
        action: ContactCommands,
    },

    /// Direct messages
    Chat {
        #[command(subcommand)]
        action: ChatCommands,
    },

    /// Personal shopping list
    Shop {
        #[command(subcommand)]
        action: ShopCommands,
    },
}

/// Acting user, the way the backend receives the signed-in uid.
#[derive(Debug, Args)]
pub struct Viewer {
    #[arg(long = "as", value_name = "USER_ID")]
    pub id: Uuid,
}

#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Create a profile and print its id
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Show one profile
    Show { id: Uuid },
}

#[derive(Debug, Subcommand)]
pub enum ContactCommands {
    /// Find users by name, username or display name
    Search {
        #[command(flatten)]
        viewer: Viewer,
        term: String,
    },
    /// Add a user to your contacts
    Add {
        #[command(flatten)]
        viewer: Viewer,
        contact: Uuid,
    },
    /// Remove a user from your contacts
    Remove {
        #[command(flatten)]
        viewer: Viewer,
        contact: Uuid,
    },
    /// List your contacts
    List {
        #[command(flatten)]
        viewer: Viewer,
    },
}

#[derive(Debug, Subcommand)]
pub enum ChatCommands {
    /// Send a text message
    Send {
        #[command(flatten)]
        viewer: Viewer,
        #[arg(long)]
        to: Uuid,
        text: String,
    },
    /// Send a product list; items are `name` or `name:quantity`, split at the last `:`
    SendList {
        #[command(flatten)]
        viewer: Viewer,
        #[arg(long)]
        to: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Show the conversation with another user
    History {
        #[command(flatten)]
        viewer: Viewer,
        #[arg(long)]
        with: Uuid,
        #[arg(long)]
        english: bool,
    },
    /// Show unread messages, newest first
    Unread {
        #[command(flatten)]
        viewer: Viewer,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Mark a message as read
    Read {
        #[command(flatten)]
        viewer: Viewer,
        message: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum ShopCommands {
    /// Add an item; its category is picked from the name
    Add {
        #[command(flatten)]
        viewer: Viewer,
        name: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// List items, newest first
    List {
        #[command(flatten)]
        viewer: Viewer,
        /// Group items under category headings
        #[arg(long)]
        grouped: bool,
    },
    /// Flip one of your items between pending and done
    Toggle {
        #[command(flatten)]
        viewer: Viewer,
        item: i64,
    },
    /// Delete one of your items
    Remove {
        #[command(flatten)]
        viewer: Viewer,
        item: i64,
    },
}
