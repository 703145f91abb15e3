use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::{QuillError, Result};
use crate::model::{Document, Workspace};

const QUILL_DIR: &str = ".quill";
const QUILL_DB: &str = "quill.db";

const DOC_COLUMNS: &str = "id, title, owner_id, is_archived, is_published, content, \
                           cover_image, icon, parent_id, workspace_id, sort_order, \
                           created_at, updated_at";

const WS_COLUMNS: &str = "id, name, description, icon, owner_id, is_archived, created_at";

/// SQLite persistence for documents and workspaces.
///
/// Every mutation is a single-record statement; there are no cross-record
/// transactions. Cascades are sequences of independent patches driven by the
/// engine.
pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStore {
    /// Initialize a new quill project under `root`.
    pub fn init(root: &Path) -> Result<Self> {
        let quill_dir = root.join(QUILL_DIR);

        if quill_dir.exists() {
            return Err(QuillError::AlreadyInitialized);
        }

        fs::create_dir_all(&quill_dir)?;

        let path = quill_dir.join(QUILL_DB);
        let conn = Connection::open(&path)?;

        let store = Self { conn, path };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an existing quill project under `root`.
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(QUILL_DIR).join(QUILL_DB);

        if !path.exists() {
            return Err(QuillError::NotInitialized);
        }

        let conn = Connection::open(&path)?;
        let store = Self { conn, path };
        store.init_schema()?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.path
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS workspaces (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                icon TEXT,
                owner_id TEXT NOT NULL,
                is_archived INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_workspaces_owner ON workspaces(owner_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                owner_id TEXT NOT NULL,
                is_archived INTEGER NOT NULL DEFAULT 0,
                is_published INTEGER NOT NULL DEFAULT 0,
                content TEXT,
                cover_image TEXT,
                icon TEXT,
                parent_id TEXT,
                workspace_id TEXT,
                sort_order INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        // Reverse lookups the engine depends on: by owner, by (owner, parent)
        // for sibling discovery, by (owner, workspace) for flat fan-outs.
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_owner ON documents(owner_id)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_owner_parent
             ON documents(owner_id, parent_id)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_owner_workspace
             ON documents(owner_id, workspace_id)",
            [],
        )?;

        // FTS5 over titles only; content is an opaque editor payload.
        self.conn.execute(
            "CREATE VIRTUAL TABLE IF NOT EXISTS documents_fts USING fts5(
                id,
                title,
                content='documents',
                content_rowid='rowid'
            )",
            [],
        )?;

        self.conn.execute_batch(
            "
            CREATE TRIGGER IF NOT EXISTS documents_ai AFTER INSERT ON documents BEGIN
                INSERT INTO documents_fts(rowid, id, title)
                VALUES (new.rowid, new.id, new.title);
            END;

            CREATE TRIGGER IF NOT EXISTS documents_ad AFTER DELETE ON documents BEGIN
                INSERT INTO documents_fts(documents_fts, rowid, id, title)
                VALUES ('delete', old.rowid, old.id, old.title);
            END;

            CREATE TRIGGER IF NOT EXISTS documents_au AFTER UPDATE ON documents BEGIN
                INSERT INTO documents_fts(documents_fts, rowid, id, title)
                VALUES ('delete', old.rowid, old.id, old.title);
                INSERT INTO documents_fts(rowid, id, title)
                VALUES (new.rowid, new.id, new.title);
            END;
            ",
        )?;

        Ok(())
    }

    // ----- documents -----

    pub fn insert_document(&self, doc: &Document) -> Result<()> {
        self.conn.execute(
            "INSERT INTO documents
             (id, title, owner_id, is_archived, is_published, content, cover_image, icon,
              parent_id, workspace_id, sort_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                doc.id.to_string(),
                doc.title,
                doc.owner_id,
                doc.is_archived,
                doc.is_published,
                doc.content,
                doc.cover_image,
                doc.icon,
                doc.parent_id.map(|id| id.to_string()),
                doc.workspace_id.map(|id| id.to_string()),
                doc.sort_order,
                doc.created_at,
                doc.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_document(&self, id: &Uuid) -> Result<Option<Document>> {
        let doc = self
            .conn
            .query_row(
                &format!("SELECT {DOC_COLUMNS} FROM documents WHERE id = ?1"),
                [id.to_string()],
                doc_from_row,
            )
            .optional()?;
        Ok(doc)
    }

    /// Content-field update: title, content, cover, icon, published flag.
    /// Structural fields (parent, order, archived) go through the patch
    /// methods below.
    pub fn update_document(&self, doc: &Document) -> Result<()> {
        self.conn.execute(
            "UPDATE documents
             SET title = ?2, content = ?3, cover_image = ?4, icon = ?5,
                 is_published = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                doc.id.to_string(),
                doc.title,
                doc.content,
                doc.cover_image,
                doc.icon,
                doc.is_published,
                doc.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn delete_document(&self, id: &Uuid) -> Result<()> {
        self.conn
            .execute("DELETE FROM documents WHERE id = ?1", [id.to_string()])?;
        Ok(())
    }

    pub fn patch_archived(&self, id: &Uuid, archived: bool) -> Result<()> {
        self.conn.execute(
            "UPDATE documents SET is_archived = ?2, updated_at = ?3 WHERE id = ?1",
            params![id.to_string(), archived, Utc::now()],
        )?;
        Ok(())
    }

    pub fn patch_parent(&self, id: &Uuid, parent: Option<&Uuid>) -> Result<()> {
        self.conn.execute(
            "UPDATE documents SET parent_id = ?2, updated_at = ?3 WHERE id = ?1",
            params![id.to_string(), parent.map(|p| p.to_string()), Utc::now()],
        )?;
        Ok(())
    }

    pub fn patch_order(&self, id: &Uuid, order: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE documents SET sort_order = ?2, updated_at = ?3 WHERE id = ?1",
            params![id.to_string(), order, Utc::now()],
        )?;
        Ok(())
    }

    /// All children of a document, archived included. Cascades walk this.
    pub fn children_of(&self, owner: &str, parent: &Uuid) -> Result<Vec<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DOC_COLUMNS} FROM documents WHERE owner_id = ?1 AND parent_id = ?2"
        ))?;
        let docs = stmt
            .query_map(params![owner, parent.to_string()], doc_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(docs)
    }

    /// Active (non-archived) documents in a (owner, parent) scope, optionally
    /// narrowed to a workspace. Unsorted; the engine applies the sibling
    /// sort rule.
    pub fn active_children(
        &self,
        owner: &str,
        parent: Option<&Uuid>,
        workspace: Option<&Uuid>,
    ) -> Result<Vec<Document>> {
        let mut sql = format!(
            "SELECT {DOC_COLUMNS} FROM documents
             WHERE owner_id = ?1 AND parent_id IS ?2 AND is_archived = 0"
        );
        if workspace.is_some() {
            sql.push_str(" AND workspace_id IS ?3");
        }

        let parent_s = parent.map(|p| p.to_string());
        let workspace_s = workspace.map(|w| w.to_string());
        let mut stmt = self.conn.prepare(&sql)?;

        let docs = if workspace.is_some() {
            stmt.query_map(params![owner, parent_s, workspace_s], doc_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        } else {
            stmt.query_map(params![owner, parent_s], doc_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        };
        Ok(docs)
    }

    /// Highest sort_order among active siblings, None when the group is empty
    /// or entirely unordered.
    pub fn max_sibling_order(
        &self,
        owner: &str,
        parent: Option<&Uuid>,
        workspace: Option<&Uuid>,
    ) -> Result<Option<i64>> {
        let mut sql = String::from(
            "SELECT MAX(sort_order) FROM documents
             WHERE owner_id = ?1 AND parent_id IS ?2 AND is_archived = 0",
        );
        if workspace.is_some() {
            sql.push_str(" AND workspace_id IS ?3");
        }

        let parent_s = parent.map(|p| p.to_string());
        let workspace_s = workspace.map(|w| w.to_string());

        let max: Option<i64> = if workspace.is_some() {
            self.conn
                .query_row(&sql, params![owner, parent_s, workspace_s], |row| row.get(0))?
        } else {
            self.conn
                .query_row(&sql, params![owner, parent_s], |row| row.get(0))?
        };
        Ok(max)
    }

    /// Every archived document of the owner, storage order.
    pub fn archived_documents(&self, owner: &str) -> Result<Vec<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DOC_COLUMNS} FROM documents WHERE owner_id = ?1 AND is_archived = 1"
        ))?;
        let docs = stmt
            .query_map([owner], doc_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(docs)
    }

    pub fn documents_in_workspace(&self, owner: &str, workspace: &Uuid) -> Result<Vec<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DOC_COLUMNS} FROM documents WHERE owner_id = ?1 AND workspace_id = ?2"
        ))?;
        let docs = stmt
            .query_map(params![owner, workspace.to_string()], doc_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(docs)
    }

    /// Flat fan-out over the workspace index, not recursive through parents.
    pub fn archive_workspace_documents(&self, owner: &str, workspace: &Uuid) -> Result<usize> {
        let n = self.conn.execute(
            "UPDATE documents SET is_archived = 1, updated_at = ?3
             WHERE owner_id = ?1 AND workspace_id = ?2",
            params![owner, workspace.to_string(), Utc::now()],
        )?;
        Ok(n)
    }

    pub fn delete_workspace_documents(&self, owner: &str, workspace: &Uuid) -> Result<usize> {
        let n = self.conn.execute(
            "DELETE FROM documents WHERE owner_id = ?1 AND workspace_id = ?2",
            params![owner, workspace.to_string()],
        )?;
        Ok(n)
    }

    /// Resolve a hex id prefix to candidate documents (CLI ergonomics).
    pub fn documents_by_prefix(&self, prefix: &str) -> Result<Vec<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DOC_COLUMNS} FROM documents WHERE id LIKE ?1 LIMIT 10"
        ))?;
        let docs = stmt
            .query_map([format!("{}%", prefix.to_lowercase())], doc_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(docs)
    }

    /// Full-text title search over the caller's active documents.
    pub fn search_titles(&self, owner: &str, query: &str) -> Result<Vec<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM documents_fts f
             JOIN documents d ON d.id = f.id
             WHERE documents_fts MATCH ?1 AND d.owner_id = ?2 AND d.is_archived = 0
             ORDER BY rank
             LIMIT 50",
            doc_columns_prefixed("d")
        ))?;
        let docs = stmt
            .query_map(params![query, owner], doc_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(docs)
    }

    // ----- workspaces -----

    pub fn insert_workspace(&self, ws: &Workspace) -> Result<()> {
        self.conn.execute(
            "INSERT INTO workspaces
             (id, name, description, icon, owner_id, is_archived, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                ws.id.to_string(),
                ws.name,
                ws.description,
                ws.icon,
                ws.owner_id,
                ws.is_archived,
                ws.created_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_workspace(&self, id: &Uuid) -> Result<Option<Workspace>> {
        let ws = self
            .conn
            .query_row(
                &format!("SELECT {WS_COLUMNS} FROM workspaces WHERE id = ?1"),
                [id.to_string()],
                workspace_from_row,
            )
            .optional()?;
        Ok(ws)
    }

    pub fn delete_workspace(&self, id: &Uuid) -> Result<()> {
        self.conn
            .execute("DELETE FROM workspaces WHERE id = ?1", [id.to_string()])?;
        Ok(())
    }

    pub fn patch_workspace_archived(&self, id: &Uuid, archived: bool) -> Result<()> {
        self.conn.execute(
            "UPDATE workspaces SET is_archived = ?2 WHERE id = ?1",
            params![id.to_string(), archived],
        )?;
        Ok(())
    }

    pub fn workspaces_for(&self, owner: &str, include_archived: bool) -> Result<Vec<Workspace>> {
        let mut sql = format!(
            "SELECT {WS_COLUMNS} FROM workspaces WHERE owner_id = ?1"
        );
        if !include_archived {
            sql.push_str(" AND is_archived = 0");
        }
        sql.push_str(" ORDER BY created_at");

        let mut stmt = self.conn.prepare(&sql)?;
        let ws = stmt
            .query_map([owner], workspace_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ws)
    }

    pub fn workspaces_by_prefix(&self, prefix: &str) -> Result<Vec<Workspace>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WS_COLUMNS} FROM workspaces WHERE id LIKE ?1 LIMIT 10"
        ))?;
        let ws = stmt
            .query_map([format!("{}%", prefix.to_lowercase())], workspace_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ws)
    }
}

fn doc_columns_prefixed(alias: &str) -> String {
    DOC_COLUMNS
        .split(", ")
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_uuid(idx: usize, s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn doc_from_row(row: &Row) -> rusqlite::Result<Document> {
    let id: String = row.get(0)?;
    let parent_id: Option<String> = row.get(8)?;
    let workspace_id: Option<String> = row.get(9)?;

    Ok(Document {
        id: parse_uuid(0, &id)?,
        title: row.get(1)?,
        owner_id: row.get(2)?,
        is_archived: row.get(3)?,
        is_published: row.get(4)?,
        content: row.get(5)?,
        cover_image: row.get(6)?,
        icon: row.get(7)?,
        parent_id: parent_id.as_deref().map(|s| parse_uuid(8, s)).transpose()?,
        workspace_id: workspace_id
            .as_deref()
            .map(|s| parse_uuid(9, s))
            .transpose()?,
        sort_order: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

fn workspace_from_row(row: &Row) -> rusqlite::Result<Workspace> {
    let id: String = row.get(0)?;

    Ok(Workspace {
        id: parse_uuid(0, &id)?,
        name: row.get(1)?,
        description: row.get(2)?,
        icon: row.get(3)?,
        owner_id: row.get(4)?,
        is_archived: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl From<rusqlite::Error> for QuillError {
    fn from(e: rusqlite::Error) -> Self {
        QuillError::Storage(format!("SQLite error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (SqliteStore, TempDir) {
        let tmp = TempDir::new().unwrap();
        let store = SqliteStore::init(tmp.path()).unwrap();
        (store, tmp)
    }

    #[test]
    fn test_init_creates_db() {
        let (_store, tmp) = test_store();
        assert!(tmp.path().join(".quill/quill.db").exists());
    }

    #[test]
    fn test_init_twice_fails() {
        let (_store, tmp) = test_store();
        assert!(matches!(
            SqliteStore::init(tmp.path()),
            Err(QuillError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_open_without_init_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            SqliteStore::open(tmp.path()),
            Err(QuillError::NotInitialized)
        ));
    }

    #[test]
    fn test_document_round_trip() {
        let (store, _tmp) = test_store();

        let mut doc = Document::new("Roadmap".to_string(), "alice".to_string());
        doc.content = Some(r#"[{"type":"paragraph"}]"#.to_string());
        doc.icon = Some("🗺".to_string());
        doc.sort_order = Some(3);
        store.insert_document(&doc).unwrap();

        let loaded = store.get_document(&doc.id).unwrap().unwrap();
        assert_eq!(loaded.title, "Roadmap");
        assert_eq!(loaded.owner_id, "alice");
        assert_eq!(loaded.content.as_deref(), Some(r#"[{"type":"paragraph"}]"#));
        assert_eq!(loaded.icon.as_deref(), Some("🗺"));
        assert_eq!(loaded.sort_order, Some(3));
        assert!(!loaded.is_archived);
        assert!(!loaded.is_published);
        assert!(loaded.parent_id.is_none());
    }

    #[test]
    fn test_children_and_active_filter() {
        let (store, _tmp) = test_store();

        let root = Document::new("Root".to_string(), "alice".to_string());
        store.insert_document(&root).unwrap();

        let mut child = Document::new("Child".to_string(), "alice".to_string());
        child.parent_id = Some(root.id);
        store.insert_document(&child).unwrap();

        let mut hidden = Document::new("Hidden".to_string(), "alice".to_string());
        hidden.parent_id = Some(root.id);
        hidden.is_archived = true;
        store.insert_document(&hidden).unwrap();

        // children_of sees both, active_children only the live one
        assert_eq!(store.children_of("alice", &root.id).unwrap().len(), 2);
        let active = store.active_children("alice", Some(&root.id), None).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Child");

        // other owners see nothing
        assert!(store.children_of("bob", &root.id).unwrap().is_empty());
    }

    #[test]
    fn test_max_sibling_order() {
        let (store, _tmp) = test_store();

        assert_eq!(store.max_sibling_order("alice", None, None).unwrap(), None);

        let mut a = Document::new("A".to_string(), "alice".to_string());
        a.sort_order = Some(1);
        store.insert_document(&a).unwrap();

        let mut b = Document::new("B".to_string(), "alice".to_string());
        b.sort_order = Some(5);
        store.insert_document(&b).unwrap();

        assert_eq!(store.max_sibling_order("alice", None, None).unwrap(), Some(5));

        // archived siblings are excluded
        store.patch_archived(&b.id, true).unwrap();
        assert_eq!(store.max_sibling_order("alice", None, None).unwrap(), Some(1));
    }

    #[test]
    fn test_patch_parent_and_order() {
        let (store, _tmp) = test_store();

        let root = Document::new("Root".to_string(), "alice".to_string());
        store.insert_document(&root).unwrap();
        let doc = Document::new("Doc".to_string(), "alice".to_string());
        store.insert_document(&doc).unwrap();

        store.patch_parent(&doc.id, Some(&root.id)).unwrap();
        store.patch_order(&doc.id, 7).unwrap();

        let loaded = store.get_document(&doc.id).unwrap().unwrap();
        assert_eq!(loaded.parent_id, Some(root.id));
        assert_eq!(loaded.sort_order, Some(7));

        store.patch_parent(&doc.id, None).unwrap();
        let loaded = store.get_document(&doc.id).unwrap().unwrap();
        assert!(loaded.parent_id.is_none());
    }

    #[test]
    fn test_title_search() {
        let (store, _tmp) = test_store();

        let doc = Document::new("Quarterly planning".to_string(), "alice".to_string());
        store.insert_document(&doc).unwrap();

        let hits = store.search_titles("alice", "planning").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, doc.id);

        // not visible to other owners, nor once archived
        assert!(store.search_titles("bob", "planning").unwrap().is_empty());
        store.patch_archived(&doc.id, true).unwrap();
        assert!(store.search_titles("alice", "planning").unwrap().is_empty());
    }

    #[test]
    fn test_search_follows_rename() {
        let (store, _tmp) = test_store();

        let mut doc = Document::new("Old name".to_string(), "alice".to_string());
        store.insert_document(&doc).unwrap();

        doc.title = "Fresh name".to_string();
        doc.updated_at = Utc::now();
        store.update_document(&doc).unwrap();

        assert!(store.search_titles("alice", "Old").unwrap().is_empty());
        assert_eq!(store.search_titles("alice", "Fresh").unwrap().len(), 1);
    }

    #[test]
    fn test_prefix_lookup() {
        let (store, _tmp) = test_store();

        let doc = Document::new("Doc".to_string(), "alice".to_string());
        store.insert_document(&doc).unwrap();

        let prefix = &doc.id.to_string()[..7];
        let hits = store.documents_by_prefix(prefix).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, doc.id);

        assert!(store.documents_by_prefix("zzzzzzz").unwrap().is_empty());
    }

    #[test]
    fn test_workspace_round_trip() {
        let (store, _tmp) = test_store();

        let mut ws = Workspace::new("Engineering".to_string(), "alice".to_string());
        ws.icon = Some("⚙".to_string());
        store.insert_workspace(&ws).unwrap();

        let loaded = store.get_workspace(&ws.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Engineering");
        assert_eq!(loaded.icon.as_deref(), Some("⚙"));

        store.patch_workspace_archived(&ws.id, true).unwrap();
        assert!(store.workspaces_for("alice", false).unwrap().is_empty());
        assert_eq!(store.workspaces_for("alice", true).unwrap().len(), 1);

        store.delete_workspace(&ws.id).unwrap();
        assert!(store.get_workspace(&ws.id).unwrap().is_none());
    }

    #[test]
    fn test_workspace_document_fan_out() {
        let (store, _tmp) = test_store();

        let ws = Workspace::new("Eng".to_string(), "alice".to_string());
        store.insert_workspace(&ws).unwrap();

        for title in ["One", "Two"] {
            let mut doc = Document::new(title.to_string(), "alice".to_string());
            doc.workspace_id = Some(ws.id);
            store.insert_document(&doc).unwrap();
        }
        let outside = Document::new("Outside".to_string(), "alice".to_string());
        store.insert_document(&outside).unwrap();

        assert_eq!(store.archive_workspace_documents("alice", &ws.id).unwrap(), 2);
        assert_eq!(store.archived_documents("alice").unwrap().len(), 2);
        assert!(!store.get_document(&outside.id).unwrap().unwrap().is_archived);

        assert_eq!(store.delete_workspace_documents("alice", &ws.id).unwrap(), 2);
        assert!(store.documents_in_workspace("alice", &ws.id).unwrap().is_empty());
        assert!(store.get_document(&outside.id).unwrap().is_some());
    }
}
