use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(version, about = "A document tree engine for nested, publishable notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Acting user (falls back to QUILL_USER, then git user.email)
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new quill project in the current directory
    Init,

    /// Create a document
    Create {
        /// Document title (blank becomes "Untitled")
        #[arg(default_value = "")]
        title: String,

        /// Parent document id or unique prefix
        #[arg(long)]
        parent: Option<String>,

        /// Workspace id or unique prefix
        #[arg(long)]
        workspace: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List active documents (roots by default)
    List {
        /// Parent document id or prefix
        #[arg(long)]
        parent: Option<String>,

        /// Workspace id or prefix
        #[arg(long)]
        workspace: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List archived documents
    Trash {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get a single document by id or unique prefix
    Get {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a document's title, content, icon or cover
    Update {
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// Read new content from stdin
        #[arg(long)]
        stdin: bool,

        /// Set the icon
        #[arg(long, conflicts_with = "clear_icon")]
        icon: Option<String>,

        /// Clear the icon
        #[arg(long)]
        clear_icon: bool,

        /// Set the cover image URL
        #[arg(long, conflicts_with = "clear_cover")]
        cover: Option<String>,

        /// Clear the cover image
        #[arg(long)]
        clear_cover: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Archive a document and all its descendants
    Archive { id: String },

    /// Restore a document and all its descendants from the trash
    Restore { id: String },

    /// Permanently delete a document and all its descendants
    Remove {
        id: String,

        /// Skip the safety check
        #[arg(long)]
        force: bool,
    },

    /// Move a document before or after a sibling
    Reorder {
        id: String,

        /// Sibling to position against
        #[arg(long)]
        target: String,

        /// Relative position (before, after)
        #[arg(long)]
        position: String,
    },

    /// Publish a document for public read access
    Publish { id: String },

    /// Unpublish a document
    Unpublish { id: String },

    /// Full-text search over document titles
    Search {
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage workspaces
    Workspace(WorkspaceCommand),

    /// Run the HTTP API
    Serve {
        /// Listen address
        #[arg(long, default_value = "127.0.0.1:7677")]
        addr: String,
    },
}

#[derive(Args, Debug)]
pub struct WorkspaceCommand {
    #[command(subcommand)]
    pub action: WorkspaceAction,
}

#[derive(Subcommand, Debug)]
pub enum WorkspaceAction {
    /// Create a workspace
    Add {
        name: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List workspaces
    List {
        /// Include archived workspaces
        #[arg(long)]
        archived: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Archive a workspace and every document in it
    Archive { id: String },

    /// Permanently delete a workspace and every document in it
    Remove {
        id: String,

        /// Skip the safety check
        #[arg(long)]
        force: bool,
    },
}
