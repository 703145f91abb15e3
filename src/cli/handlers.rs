use std::env;
use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::Command;

use crate::api;
use crate::engine::HierarchyEngine;
use crate::error::{QuillError, Result};
use crate::model::{Document, DocumentUpdate, ReorderPosition, Workspace};

/// Find the project root by looking for .quill/ or .git/
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(".quill").exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

fn open_engine() -> Result<HierarchyEngine> {
    HierarchyEngine::open(&find_project_root())
}

/// Resolve the acting user: --user flag, QUILL_USER, then git user.email.
pub fn resolve_user(flag: Option<String>) -> Result<String> {
    if let Some(user) = flag {
        let user = user.trim().to_string();
        if !user.is_empty() {
            return Ok(user);
        }
    }
    if let Ok(user) = env::var("QUILL_USER") {
        let user = user.trim().to_string();
        if !user.is_empty() {
            return Ok(user);
        }
    }
    if let Some(email) = git_user_email() {
        return Ok(email);
    }
    Err(QuillError::NotAuthenticated)
}

fn git_user_email() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "user.email"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let email = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if email.is_empty() {
        None
    } else {
        Some(email)
    }
}

fn read_stdin() -> Result<Option<String>> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    if content.is_empty() {
        Ok(None)
    } else {
        Ok(Some(content))
    }
}

fn print_document_line(doc: &Document) {
    let icon = doc.icon.as_deref().unwrap_or("");
    let flags = match (doc.is_published, doc.is_archived) {
        (true, _) => " [published]",
        (_, true) => " [archived]",
        _ => "",
    };
    if icon.is_empty() {
        println!("{}  {}{}", doc.short_id(), doc.title, flags);
    } else {
        println!("{}  {} {}{}", doc.short_id(), icon, doc.title, flags);
    }
}

pub fn handle_init() -> Result<()> {
    let root = env::current_dir()?;
    let _engine = HierarchyEngine::init(&root)?;
    println!("Initialized quill project in {}", root.display());
    Ok(())
}

pub fn handle_create(
    user: Option<String>,
    title: String,
    parent: Option<String>,
    workspace: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;

    let parent_id = parent
        .map(|p| engine.resolve_document_id(&p))
        .transpose()?;
    let workspace_id = workspace
        .map(|w| engine.resolve_workspace_id(&w))
        .transpose()?;

    let mut doc = engine.create_document(&user, &title, parent_id, workspace_id)?;

    if stdin {
        if let Some(content) = read_stdin()? {
            let update = DocumentUpdate {
                content: Some(content),
                ..Default::default()
            };
            doc = engine.update_document(&user, &doc.id, update)?;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("Created document {} - {}", doc.short_id(), doc.title);
    }
    Ok(())
}

pub fn handle_list(
    user: Option<String>,
    parent: Option<String>,
    workspace: Option<String>,
    json: bool,
) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;

    let parent_id = parent
        .map(|p| engine.resolve_document_id(&p))
        .transpose()?;
    let workspace_id = workspace
        .map(|w| engine.resolve_workspace_id(&w))
        .transpose()?;

    let docs = engine.list_children(&user, parent_id.as_ref(), workspace_id.as_ref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
    } else if docs.is_empty() {
        println!("No documents");
    } else {
        for doc in &docs {
            print_document_line(doc);
        }
    }
    Ok(())
}

pub fn handle_trash(user: Option<String>, json: bool) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let docs = engine.list_trash(&user)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
    } else if docs.is_empty() {
        println!("Trash is empty");
    } else {
        for doc in &docs {
            print_document_line(doc);
        }
    }
    Ok(())
}

pub fn handle_get(user: Option<String>, id: String, json: bool) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let id = engine.resolve_document_id(&id)?;
    let doc = engine.get_document(Some(&user), &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{} ({})", doc.title, doc.id);
        if let Some(parent) = doc.parent_id {
            println!("  parent:    {}", parent);
        }
        if let Some(ws) = doc.workspace_id {
            println!("  workspace: {}", ws);
        }
        println!("  archived:  {}", doc.is_archived);
        println!("  published: {}", doc.is_published);
        println!("  updated:   {}", doc.updated_at.to_rfc3339());
        if let Some(content) = &doc.content {
            println!("\n{}", content);
        }
    }
    Ok(())
}

pub fn handle_update(
    user: Option<String>,
    id: String,
    title: Option<String>,
    stdin: bool,
    icon: Option<String>,
    clear_icon: bool,
    cover: Option<String>,
    clear_cover: bool,
    json: bool,
) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let id = engine.resolve_document_id(&id)?;

    let content = if stdin { read_stdin()? } else { None };
    let update = DocumentUpdate {
        title,
        content,
        icon: if clear_icon { Some(None) } else { icon.map(Some) },
        cover_image: if clear_cover { Some(None) } else { cover.map(Some) },
        is_published: None,
    };

    let doc = engine.update_document(&user, &id, update)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("Updated document {} - {}", doc.short_id(), doc.title);
    }
    Ok(())
}

pub fn handle_archive(user: Option<String>, id: String) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let id = engine.resolve_document_id(&id)?;
    let doc = engine.archive_document(&user, &id)?;
    println!("Archived '{}' ({})", doc.title, doc.short_id());
    Ok(())
}

pub fn handle_restore(user: Option<String>, id: String) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let id = engine.resolve_document_id(&id)?;
    let doc = engine.restore_document(&user, &id)?;
    println!("Restored '{}' ({})", doc.title, doc.short_id());
    Ok(())
}

pub fn handle_remove(user: Option<String>, id: String, force: bool) -> Result<()> {
    if !force {
        return Err(QuillError::InvalidInput(
            "remove is permanent and deletes all descendants; pass --force to confirm".to_string(),
        ));
    }
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let id = engine.resolve_document_id(&id)?;
    let doc = engine.remove_document(&user, &id)?;
    println!("Removed '{}' ({})", doc.title, doc.short_id());
    Ok(())
}

pub fn handle_reorder(
    user: Option<String>,
    id: String,
    target: String,
    position: String,
) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let id = engine.resolve_document_id(&id)?;
    let target = engine.resolve_document_id(&target)?;
    let position: ReorderPosition = position.parse().map_err(QuillError::InvalidInput)?;

    engine.reorder_documents(&user, &id, &target, position)?;
    println!("Reordered");
    Ok(())
}

pub fn handle_publish(user: Option<String>, id: String, published: bool) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let id = engine.resolve_document_id(&id)?;

    let update = DocumentUpdate {
        is_published: Some(published),
        ..Default::default()
    };
    let doc = engine.update_document(&user, &id, update)?;

    if published {
        println!("Published '{}' ({})", doc.title, doc.short_id());
    } else {
        println!("Unpublished '{}' ({})", doc.title, doc.short_id());
    }
    Ok(())
}

pub fn handle_search(user: Option<String>, query: String, json: bool) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let docs = engine.search(&user, &query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
    } else if docs.is_empty() {
        println!("No matches");
    } else {
        for doc in &docs {
            print_document_line(doc);
        }
    }
    Ok(())
}

pub fn handle_workspace_add(
    user: Option<String>,
    name: String,
    description: Option<String>,
    icon: Option<String>,
    json: bool,
) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let ws = engine.create_workspace(&user, &name, description, icon)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ws)?);
    } else {
        println!("Created workspace {} - {}", ws.short_id(), ws.name);
    }
    Ok(())
}

pub fn handle_workspace_list(user: Option<String>, archived: bool, json: bool) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let workspaces = engine.list_workspaces(&user, archived)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&workspaces)?);
    } else if workspaces.is_empty() {
        println!("No workspaces");
    } else {
        for ws in &workspaces {
            print_workspace_line(ws);
        }
    }
    Ok(())
}

fn print_workspace_line(ws: &Workspace) {
    let flag = if ws.is_archived { " [archived]" } else { "" };
    match ws.icon.as_deref() {
        Some(icon) => println!("{}  {} {}{}", ws.short_id(), icon, ws.name, flag),
        None => println!("{}  {}{}", ws.short_id(), ws.name, flag),
    }
}

pub fn handle_workspace_archive(user: Option<String>, id: String) -> Result<()> {
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let id = engine.resolve_workspace_id(&id)?;
    let ws = engine.archive_workspace(&user, &id)?;
    println!("Archived workspace '{}' ({})", ws.name, ws.short_id());
    Ok(())
}

pub fn handle_workspace_remove(user: Option<String>, id: String, force: bool) -> Result<()> {
    if !force {
        return Err(QuillError::InvalidInput(
            "remove is permanent and deletes every document in the workspace; pass --force to confirm"
                .to_string(),
        ));
    }
    let user = resolve_user(user)?;
    let engine = open_engine()?;
    let id = engine.resolve_workspace_id(&id)?;
    let ws = engine.remove_workspace(&user, &id)?;
    println!("Removed workspace '{}' ({})", ws.name, ws.short_id());
    Ok(())
}

pub fn handle_serve(addr: String) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quill=info")),
        )
        .init();

    let addr: SocketAddr = addr
        .parse()
        .map_err(|_| QuillError::InvalidInput(format!("invalid listen address '{addr}'")))?;

    let engine = open_engine()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(api::serve(engine, addr))
}
