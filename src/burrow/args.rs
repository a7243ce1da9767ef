use clap::{Parser, Subcommand};

/// Returns the version string, including git hash and commit date for dev
/// builds. Format: "0.3.2" for releases, "0.3.2@abc1234 2026-01-15" for
/// dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "burrow", bin_name = "burrow", version = get_version())]
#[command(
    about = "Depth-first tracker for exploratory research",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new tree and switch to it
    New {
        /// Name of the tree
        name: String,
    },

    /// List all trees
    #[command(alias = "list")]
    Ls,

    /// Switch to another tree
    Open {
        /// Name of the tree
        name: String,
    },

    /// Delete a tree
    Rm {
        /// Name of the tree
        name: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Rename a tree
    Rename {
        /// Current name
        old: String,

        /// New name
        new: String,
    },

    /// Copy a tree under a new name
    Cp {
        /// Tree to copy
        src: String,

        /// Name of the copy
        dst: String,
    },

    /// Print the tree outline
    Show {
        /// Limit the outline to this depth
        #[arg(short, long)]
        depth: Option<usize>,

        /// Include node bodies
        #[arg(short = 'a', long)]
        all: bool,
    },

    /// Print the path from the root to the current node
    Path,

    /// Print a node's body
    Cat {
        /// Node id (defaults to the current node)
        id: Option<String>,
    },

    /// Print statistics for the current tree
    Stat,

    /// Print the navigation history
    Log,

    /// Jump to a node by id
    Go {
        /// Node id (e.g. n12)
        id: String,
    },

    /// Move to the parent node
    Up,

    /// Move to a child of the current node
    Down {
        /// Child position, starting at 0
        #[arg(default_value_t = 0)]
        index: usize,
    },

    /// Move to the next sibling
    Next,

    /// Move to the previous sibling
    Prev,

    /// Jump to the root node
    Root,

    /// Jump to the previously visited node
    Back,

    /// Add a child (or sibling) of the current node
    Add {
        /// Create a sibling instead of a child
        #[arg(short, long)]
        sibling: bool,

        /// Jump to the new node right away
        #[arg(short, long)]
        enter: bool,

        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Retitle the current node
    Title {
        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Append a paragraph to a node's body
    Append {
        /// Node id (defaults to the current node)
        #[arg(short, long)]
        node: Option<String>,

        /// Text to append (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Edit a node in your editor
    #[command(alias = "e")]
    Edit {
        /// Node id (defaults to the current node)
        id: Option<String>,
    },

    /// Copy a node's body (or title) to the clipboard
    Yank {
        /// Node id (defaults to the current node)
        id: Option<String>,
    },

    /// Append the clipboard to the current node's body
    Paste,

    /// Move a node (and its subtree) under another parent
    Mv {
        /// Node to move
        id: String,

        /// New parent id
        parent: String,
    },

    /// Copy a node (and its subtree) under another parent
    Cpnode {
        /// Node to copy
        id: String,

        /// Parent for the copy
        target: String,
    },

    /// Delete a node and its subtree
    Rmnode {
        /// Node id (defaults to the current node)
        id: Option<String>,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Mark the current node done and move up
    Done {
        /// Summary words (joined with spaces, recorded in the body)
        #[arg(trailing_var_arg = true)]
        summary: Vec<String>,
    },

    /// Mark the current node dropped and move up
    Drop {
        /// Reason words (joined with spaces, recorded in the body)
        #[arg(trailing_var_arg = true)]
        reason: Vec<String>,
    },

    /// Mark a node as still to-do
    Todo {
        /// Node id (defaults to the current node)
        id: Option<String>,
    },

    /// Mark a node as active again
    Active {
        /// Node id (defaults to the current node)
        id: Option<String>,
    },

    /// Link a node to another node
    Link {
        /// Target node id
        to: String,

        /// Source node id (defaults to the current node)
        #[arg(short, long)]
        from: Option<String>,
    },

    /// Remove a link between two nodes
    Unlink {
        /// Target node id
        to: String,

        /// Source node id (defaults to the current node)
        #[arg(short, long)]
        from: Option<String>,
    },

    /// List a node's outgoing links
    Links {
        /// Node id (defaults to the current node)
        id: Option<String>,
    },

    /// List the nodes linking to a node
    Backlinks {
        /// Node id (defaults to the current node)
        id: Option<String>,
    },

    /// Search titles and bodies
    #[command(alias = "search")]
    Grep {
        /// Search term (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// List nodes with a given status
    FindStatus {
        /// One of: active, done, dropped, todo
        status: String,
    },

    /// List the leaves (nodes without children)
    FindLeaf,

    /// List leaves with no links in either direction
    FindOrphan,

    /// Export the current tree as JSON (or markdown)
    Export {
        /// Write to this file instead of stdout
        file: Option<String>,

        /// Export as markdown instead of JSON
        #[arg(long)]
        md: bool,
    },

    /// Import a tree from a JSON export
    Import {
        /// Path to the JSON file
        file: String,

        /// Overwrite an existing tree of the same name
        #[arg(long)]
        force: bool,
    },

    /// Open the full-screen UI
    #[command(alias = "ui")]
    Tui,
}
