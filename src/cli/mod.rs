mod commands;
mod handlers;

pub use commands::{Cli, Commands, WorkspaceAction, WorkspaceCommand};
pub use handlers::{
    handle_archive, handle_create, handle_get, handle_init, handle_list, handle_publish,
    handle_remove, handle_reorder, handle_restore, handle_search, handle_serve, handle_trash,
    handle_update, handle_workspace_add, handle_workspace_archive, handle_workspace_list,
    handle_workspace_remove, resolve_user,
};
