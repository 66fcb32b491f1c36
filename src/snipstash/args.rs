use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "snipstash")]
#[command(about = "A code snippet vault for the command line", long_about = None)]
#[command(version = crate::version_string())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new snippet
    #[command(alias = "a")]
    Add {
        /// Name of the snippet
        name: String,

        /// Snippet code, inline
        #[arg(short, long, conflicts_with = "file")]
        code: Option<String>,

        /// Read the snippet code from a file
        #[arg(short, long)]
        file: Option<std::path::PathBuf>,

        /// Language tag (e.g. rust, py, bash)
        #[arg(short, long)]
        lang: Option<String>,

        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Visibility: private, team, or public
        #[arg(long)]
        visibility: Option<String>,
    },

    /// List snippets
    #[command(alias = "ls")]
    List {
        /// Free-text search over name, code, tags, and owner
        #[arg(short, long)]
        search: Option<String>,

        /// Only snippets in this language
        #[arg(short, long)]
        lang: Option<String>,

        /// Only snippets carrying every given tag (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Only snippets with this visibility
        #[arg(long)]
        visibility: Option<String>,

        /// Include archived snippets
        #[arg(long)]
        archived: bool,

        /// Sort mode: name, name-desc, created, created-desc, usage, usage-desc
        #[arg(long)]
        sort: Option<String>,
    },

    /// Print a snippet's code (bumps its usage counter)
    #[command(alias = "s")]
    Show {
        /// Snippet id or name (exact, then partial match)
        snippet: String,
    },

    /// Edit a snippet's fields; a code change records a version
    #[command(alias = "e")]
    Edit {
        /// Snippet id or name
        snippet: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New code, inline
        #[arg(short, long, conflicts_with = "file")]
        code: Option<String>,

        /// Read the new code from a file
        #[arg(short, long)]
        file: Option<std::path::PathBuf>,

        /// New language tag
        #[arg(short, long)]
        lang: Option<String>,

        /// Replace the tag set (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// New visibility
        #[arg(long)]
        visibility: Option<String>,

        /// Change message recorded in the version log
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Delete one or more snippets (removes their version logs)
    #[command(alias = "rm")]
    Delete {
        /// Snippet ids or names
        #[arg(required = true, num_args = 1..)]
        snippets: Vec<String>,
    },

    /// Archive one or more snippets (hidden from the default list)
    Archive {
        #[arg(required = true, num_args = 1..)]
        snippets: Vec<String>,
    },

    /// Restore archived snippets
    Restore {
        #[arg(required = true, num_args = 1..)]
        snippets: Vec<String>,
    },

    /// Add or remove tags on one or more snippets
    Tag {
        /// Snippet ids or names
        #[arg(required = true, num_args = 1..)]
        snippets: Vec<String>,

        /// Tags to add (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        add: Vec<String>,

        /// Tags to remove (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        remove: Vec<String>,
    },

    /// Manage collaborators on a team snippet
    Collab {
        /// Snippet id or name
        snippet: String,

        /// User to add
        #[arg(short, long)]
        add: Option<String>,

        /// User to remove
        #[arg(short, long)]
        remove: Option<String>,
    },

    /// Show a snippet's version history
    #[command(alias = "h")]
    History {
        /// Snippet id or name
        snippet: String,
    },

    /// Search snippets (shorthand for list --search)
    Search { term: String },

    /// Export snippets to a tar.gz archive
    Export {
        /// Snippet ids or names; exports all non-archived when empty
        snippets: Vec<String>,

        /// Output path (defaults to snipstash-<timestamp>.tar.gz)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (owner, default-language, default-visibility)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
