use clap::Parser;
use quill::cli::{
    handle_archive, handle_create, handle_get, handle_init, handle_list, handle_publish,
    handle_remove, handle_reorder, handle_restore, handle_search, handle_serve, handle_trash,
    handle_update, handle_workspace_add, handle_workspace_archive, handle_workspace_list,
    handle_workspace_remove, Cli, Commands, WorkspaceAction,
};

fn main() {
    let cli = Cli::parse();
    let user = cli.user;

    let result = match cli.command {
        Commands::Init => handle_init(),
        Commands::Create {
            title,
            parent,
            workspace,
            stdin,
            json,
        } => handle_create(user, title, parent, workspace, stdin, json),
        Commands::List {
            parent,
            workspace,
            json,
        } => handle_list(user, parent, workspace, json),
        Commands::Trash { json } => handle_trash(user, json),
        Commands::Get { id, json } => handle_get(user, id, json),
        Commands::Update {
            id,
            title,
            stdin,
            icon,
            clear_icon,
            cover,
            clear_cover,
            json,
        } => handle_update(
            user, id, title, stdin, icon, clear_icon, cover, clear_cover, json,
        ),
        Commands::Archive { id } => handle_archive(user, id),
        Commands::Restore { id } => handle_restore(user, id),
        Commands::Remove { id, force } => handle_remove(user, id, force),
        Commands::Reorder {
            id,
            target,
            position,
        } => handle_reorder(user, id, target, position),
        Commands::Publish { id } => handle_publish(user, id, true),
        Commands::Unpublish { id } => handle_publish(user, id, false),
        Commands::Search { query, json } => handle_search(user, query, json),
        Commands::Workspace(ws_cmd) => match ws_cmd.action {
            WorkspaceAction::Add {
                name,
                description,
                icon,
                json,
            } => handle_workspace_add(user, name, description, icon, json),
            WorkspaceAction::List { archived, json } => {
                handle_workspace_list(user, archived, json)
            }
            WorkspaceAction::Archive { id } => handle_workspace_archive(user, id),
            WorkspaceAction::Remove { id, force } => handle_workspace_remove(user, id, force),
        },
        Commands::Serve { addr } => handle_serve(addr),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
