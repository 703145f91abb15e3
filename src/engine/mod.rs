//! Hierarchy & lifecycle engine.
//!
//! Owns every state transition on the document/workspace trees: creation with
//! sibling ordering, recursive archive/restore/remove cascades, and
//! position-based reorder. Every mutation checks ownership before the first
//! write. Cascades are sequences of independent single-record patches; a
//! failure partway leaves a partially patched tree, and retrying is safe
//! because the archive/restore patches are idempotent.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{QuillError, Result};
use crate::model::{normalize_title, Document, DocumentUpdate, ReorderPosition, Workspace};
use crate::store::SqliteStore;

pub struct HierarchyEngine {
    store: SqliteStore,
}

impl HierarchyEngine {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub fn init(root: &Path) -> Result<Self> {
        Ok(Self::new(SqliteStore::init(root)?))
    }

    pub fn open(root: &Path) -> Result<Self> {
        Ok(Self::new(SqliteStore::open(root)?))
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    // ----- document lifecycle -----

    /// Create a document, as a root or under `parent_id`.
    ///
    /// Blank titles become "Untitled". A child inherits its parent's
    /// workspace, overriding any explicit `workspace_id`. The new document is
    /// appended after its active siblings (max order + 1).
    pub fn create_document(
        &self,
        user: &str,
        title: &str,
        parent_id: Option<Uuid>,
        workspace_id: Option<Uuid>,
    ) -> Result<Document> {
        let workspace_id = if let Some(pid) = parent_id {
            let parent = self.owned_document(user, &pid)?;
            parent.workspace_id
        } else if let Some(wid) = workspace_id {
            let ws = self.owned_workspace(user, &wid)?;
            if ws.is_archived {
                return Err(QuillError::InvalidScope(
                    "Cannot create documents in an archived workspace".to_string(),
                ));
            }
            Some(wid)
        } else {
            None
        };

        let max = self
            .store
            .max_sibling_order(user, parent_id.as_ref(), workspace_id.as_ref())?;

        let mut doc = Document::new(normalize_title(title), user.to_string());
        doc.parent_id = parent_id;
        doc.workspace_id = workspace_id;
        doc.sort_order = Some(max.unwrap_or(0) + 1);

        self.store.insert_document(&doc)?;
        debug!(id = %doc.id, parent = ?parent_id, "created document");
        Ok(doc)
    }

    /// Owner-only last-write-wins patch of the content-facing fields.
    /// Publishing and unpublishing go through here.
    pub fn update_document(&self, user: &str, id: &Uuid, update: DocumentUpdate) -> Result<Document> {
        let mut doc = self.owned_document(user, id)?;

        if let Some(title) = update.title {
            doc.title = normalize_title(&title);
        }
        if let Some(content) = update.content {
            doc.content = Some(content);
        }
        if let Some(icon) = update.icon {
            doc.icon = icon;
        }
        if let Some(cover) = update.cover_image {
            doc.cover_image = cover;
        }
        if let Some(published) = update.is_published {
            doc.is_published = published;
        }
        doc.updated_at = Utc::now();

        self.store.update_document(&doc)?;
        Ok(doc)
    }

    /// Soft-delete the document and, recursively, all its descendants.
    /// Idempotent on already-archived nodes.
    pub fn archive_document(&self, user: &str, id: &Uuid) -> Result<Document> {
        let doc = self.owned_document(user, id)?;

        let subtree = self.collect_subtree(user, doc.id)?;
        for node in &subtree {
            self.store.patch_archived(node, true)?;
        }

        debug!(id = %doc.id, nodes = subtree.len(), "archived subtree");
        self.fetch(id)
    }

    /// Restore the document and all its descendants. If the document's own
    /// parent is still archived, the parent link is cleared so the restored
    /// subtree does not stay hidden under an archived ancestor. Descendants
    /// keep their links.
    pub fn restore_document(&self, user: &str, id: &Uuid) -> Result<Document> {
        let doc = self.owned_document(user, id)?;

        // Walk the subtree up front so a cycle fails before any write.
        let subtree = self.collect_subtree(user, doc.id)?;

        if let Some(pid) = doc.parent_id {
            if let Some(parent) = self.store.get_document(&pid)? {
                if parent.is_archived {
                    self.store.patch_parent(&doc.id, None)?;
                }
            }
        }

        for node in &subtree {
            self.store.patch_archived(node, false)?;
        }

        debug!(id = %doc.id, nodes = subtree.len(), "restored subtree");
        self.fetch(id)
    }

    /// Hard-delete the document and all its descendants, mirroring the
    /// workspace-level cascade. Returns the pre-deletion snapshot of the
    /// target.
    pub fn remove_document(&self, user: &str, id: &Uuid) -> Result<Document> {
        let doc = self.owned_document(user, id)?;

        let subtree = self.collect_subtree(user, doc.id)?;
        for node in &subtree {
            self.store.delete_document(node)?;
        }

        debug!(id = %doc.id, nodes = subtree.len(), "removed subtree");
        Ok(doc)
    }

    /// Move `document_id` before or after `target_id` within their shared
    /// sibling group, then renormalize the whole group to contiguous orders.
    /// Both documents must share the exact same parent (including both being
    /// roots).
    pub fn reorder_documents(
        &self,
        user: &str,
        document_id: &Uuid,
        target_id: &Uuid,
        position: ReorderPosition,
    ) -> Result<()> {
        let doc = self.owned_document(user, document_id)?;
        let target = self.owned_document(user, target_id)?;

        if doc.parent_id != target.parent_id {
            return Err(QuillError::InvalidScope(
                "Documents must have the same parent".to_string(),
            ));
        }

        let mut siblings = self
            .store
            .active_children(user, doc.parent_id.as_ref(), None)?;
        sort_siblings(&mut siblings);
        siblings.retain(|d| d.id != doc.id);

        let target_idx = siblings
            .iter()
            .position(|d| d.id == target.id)
            .ok_or_else(|| {
                QuillError::InvalidScope("Target document not found in siblings".to_string())
            })?;

        let insert_at = match position {
            ReorderPosition::Before => target_idx,
            ReorderPosition::After => target_idx + 1,
        };
        siblings.insert(insert_at, doc);

        for (idx, sibling) in siblings.iter().enumerate() {
            self.store.patch_order(&sibling.id, (idx + 1) as i64)?;
        }

        debug!(id = %document_id, target = %target_id, %position, "reordered siblings");
        Ok(())
    }

    // ----- document queries -----

    /// Active documents under a parent (or roots), optionally scoped to a
    /// workspace, in sibling order.
    pub fn list_children(
        &self,
        user: &str,
        parent_id: Option<&Uuid>,
        workspace_id: Option<&Uuid>,
    ) -> Result<Vec<Document>> {
        let mut docs = self.store.active_children(user, parent_id, workspace_id)?;
        sort_siblings(&mut docs);
        Ok(docs)
    }

    /// Every archived document of the caller, any parent or workspace.
    pub fn list_trash(&self, user: &str) -> Result<Vec<Document>> {
        self.store.archived_documents(user)
    }

    /// Fetch a document. Published, non-archived documents are public; any
    /// other document requires its owner. The error never distinguishes
    /// "exists but not yours" beyond the generic Unauthorized.
    pub fn get_document(&self, caller: Option<&str>, id: &Uuid) -> Result<Document> {
        let doc = self.fetch(id)?;

        if doc.is_published && !doc.is_archived {
            return Ok(doc);
        }

        match caller {
            None => Err(QuillError::NotAuthenticated),
            Some(user) if doc.owner_id == user => Ok(doc),
            Some(_) => Err(QuillError::Unauthorized),
        }
    }

    /// Full-text title search over the caller's active documents.
    pub fn search(&self, user: &str, query: &str) -> Result<Vec<Document>> {
        self.store.search_titles(user, query)
    }

    // ----- workspaces -----

    pub fn create_workspace(
        &self,
        user: &str,
        name: &str,
        description: Option<String>,
        icon: Option<String>,
    ) -> Result<Workspace> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuillError::InvalidInput(
                "workspace name must not be empty".to_string(),
            ));
        }

        let mut ws = Workspace::new(name.to_string(), user.to_string());
        ws.description = description;
        ws.icon = icon;

        self.store.insert_workspace(&ws)?;
        debug!(id = %ws.id, "created workspace");
        Ok(ws)
    }

    pub fn list_workspaces(&self, user: &str, include_archived: bool) -> Result<Vec<Workspace>> {
        self.store.workspaces_for(user, include_archived)
    }

    /// Archive every document scoped to the workspace (flat fan-out over the
    /// workspace index, not a tree walk), then the workspace itself.
    pub fn archive_workspace(&self, user: &str, id: &Uuid) -> Result<Workspace> {
        let ws = self.owned_workspace(user, id)?;

        let n = self.store.archive_workspace_documents(user, &ws.id)?;
        self.store.patch_workspace_archived(&ws.id, true)?;

        debug!(id = %ws.id, documents = n, "archived workspace");
        self.store
            .get_workspace(id)?
            .ok_or_else(|| QuillError::NotFound(format!("workspace {id}")))
    }

    /// Hard-delete every document scoped to the workspace, then the
    /// workspace. Returns the pre-deletion snapshot.
    pub fn remove_workspace(&self, user: &str, id: &Uuid) -> Result<Workspace> {
        let ws = self.owned_workspace(user, id)?;

        let n = self.store.delete_workspace_documents(user, &ws.id)?;
        self.store.delete_workspace(&ws.id)?;

        debug!(id = %ws.id, documents = n, "removed workspace");
        Ok(ws)
    }

    // ----- id resolution (CLI ergonomics) -----

    /// Resolve a full UUID or a unique hex prefix to a document id.
    pub fn resolve_document_id(&self, input: &str) -> Result<Uuid> {
        if let Ok(id) = Uuid::parse_str(input) {
            return Ok(id);
        }
        let matches = self.store.documents_by_prefix(input)?;
        match matches.len() {
            0 => Err(QuillError::NotFound(format!("document {input}"))),
            1 => Ok(matches[0].id),
            _ => Err(QuillError::InvalidInput(format!(
                "ambiguous id prefix '{input}'"
            ))),
        }
    }

    pub fn resolve_workspace_id(&self, input: &str) -> Result<Uuid> {
        if let Ok(id) = Uuid::parse_str(input) {
            return Ok(id);
        }
        let matches = self.store.workspaces_by_prefix(input)?;
        match matches.len() {
            0 => Err(QuillError::NotFound(format!("workspace {input}"))),
            1 => Ok(matches[0].id),
            _ => Err(QuillError::InvalidInput(format!(
                "ambiguous id prefix '{input}'"
            ))),
        }
    }

    // ----- internals -----

    fn fetch(&self, id: &Uuid) -> Result<Document> {
        self.store
            .get_document(id)?
            .ok_or_else(|| QuillError::NotFound(format!("document {id}")))
    }

    fn owned_document(&self, user: &str, id: &Uuid) -> Result<Document> {
        let doc = self.fetch(id)?;
        if doc.owner_id != user {
            return Err(QuillError::Unauthorized);
        }
        Ok(doc)
    }

    fn owned_workspace(&self, user: &str, id: &Uuid) -> Result<Workspace> {
        let ws = self
            .store
            .get_workspace(id)?
            .ok_or_else(|| QuillError::NotFound(format!("workspace {id}")))?;
        if ws.owner_id != user {
            return Err(QuillError::Unauthorized);
        }
        Ok(ws)
    }

    /// Ids of `root` and all its descendants, depth-first. Parent links are
    /// expected to be acyclic; a visited-set guard turns a cycle introduced
    /// by a bug elsewhere into an error instead of an infinite walk.
    fn collect_subtree(&self, owner: &str, root: Uuid) -> Result<Vec<Uuid>> {
        let mut visited = HashSet::new();
        let mut stack = vec![root];
        let mut out = Vec::new();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return Err(QuillError::CycleDetected(id.to_string()));
            }
            out.push(id);
            for child in self.store.children_of(owner, &id)? {
                stack.push(child.id);
            }
        }
        Ok(out)
    }
}

/// Sibling sort rule, shared by listing and reorder:
/// ordered documents first (ascending, created_at breaks ties), then
/// unordered documents by creation time descending.
pub(crate) fn sort_siblings(docs: &mut [Document]) {
    docs.sort_by(|a, b| match (a.sort_order, b.sort_order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.created_at.cmp(&b.created_at)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.created_at.cmp(&a.created_at),
    });
}
