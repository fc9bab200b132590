//! kb tool - static knowledge base with optional JSON persistence
//!
//! File shape: `{"entries": [{"name": "...", "summary": "..."}, ...]}`.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{Tool, required_str};
use crate::domain::{ToolArgs, ToolId};
use crate::error::Result;

/// One named entry in the knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub name: String,
    pub summary: String,
}

impl KnowledgeEntry {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct KnowledgeFile {
    #[serde(default)]
    entries: Vec<KnowledgeEntry>,
}

fn seed_entries() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(
            "Ada Lovelace",
            "Ada Lovelace was a 19th-century mathematician regarded as an early computing pioneer for her work on Charles Babbage's Analytical Engine.",
        ),
        KnowledgeEntry::new(
            "Alan Turing",
            "Alan Turing was a mathematician and logician, widely considered to be the father of theoretical computer science and artificial intelligence.",
        ),
    ]
}

#[derive(Debug, Clone)]
pub struct KnowledgeBaseTool {
    path: Option<PathBuf>,
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBaseTool {
    /// In-memory knowledge base with the seed entries and no backing file
    pub fn with_defaults() -> Self {
        Self {
            path: None,
            entries: seed_entries(),
        }
    }

    /// In-memory knowledge base with the given entries
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Self {
        Self { path: None, entries }
    }

    /// Load from `path`; a missing file yields the seed entries and a
    /// corrupt one an empty table
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let entries = if path.exists() {
            match Self::read_entries(path) {
                Ok(entries) => {
                    info!("Loaded {} knowledge base entries from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    warn!("Failed to load knowledge base from {}: {}", path.display(), e);
                    Vec::new()
                }
            }
        } else {
            info!("No knowledge base at {}, using defaults", path.display());
            seed_entries()
        };

        Self {
            path: Some(path.to_path_buf()),
            entries,
        }
    }

    fn read_entries(path: &Path) -> Result<Vec<KnowledgeEntry>> {
        let content = fs::read_to_string(path)?;
        let file: KnowledgeFile = serde_json::from_str(&content)?;
        Ok(file.entries)
    }

    /// Append an entry
    pub fn add_entry(&mut self, name: impl Into<String>, summary: impl Into<String>) {
        self.entries.push(KnowledgeEntry::new(name, summary));
    }

    /// Write the table back to its file, creating parent directories
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        self.save_to(path)
    }

    /// Write the table to an explicit path
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = KnowledgeFile {
            entries: self.entries.clone(),
        };
        fs::write(path, serde_json::to_string_pretty(&file)?)?;
        info!("Saved {} knowledge base entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// First entry whose name contains the query or is contained in it
    pub fn lookup(&self, query: &str) -> Option<&KnowledgeEntry> {
        let query = query.trim().to_lowercase();
        self.entries.iter().find(|entry| {
            let name = entry.name.to_lowercase();
            name.contains(&query) || query.contains(&name)
        })
    }
}

impl Tool for KnowledgeBaseTool {
    fn id(&self) -> ToolId {
        ToolId::KnowledgeBaseLookup
    }

    fn description(&self) -> &'static str {
        "Looks up information from knowledge base"
    }

    fn execute(&self, args: &ToolArgs) -> Result<String> {
        let query = required_str(args, "query")?;
        Ok(self
            .lookup(query)
            .map(|entry| entry.summary.clone())
            .unwrap_or_else(|| "No entry found.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::string_args;
    use tempfile::tempdir;

    fn ask(kb: &KnowledgeBaseTool, query: &str) -> String {
        kb.run(&string_args([("query", query)])).unwrap()
    }

    #[test]
    fn test_known_entries() {
        let kb = KnowledgeBaseTool::with_defaults();
        let ada = ask(&kb, "Ada Lovelace").to_lowercase();
        assert!(ada.contains("computing"));
        assert!(ada.contains("mathematician"));
        assert!(ask(&kb, "Alan Turing").to_lowercase().contains("theoretical computer science"));
    }

    #[test]
    fn test_case_insensitive_and_partial() {
        let kb = KnowledgeBaseTool::with_defaults();
        assert!(ask(&kb, "ALAN TURING").contains("Turing"));
        assert!(ask(&kb, "Lovelace").contains("computing"));
        assert!(ask(&kb, "Tell me about Alan Turing please").contains("logician"));
    }

    #[test]
    fn test_unknown_entry() {
        let kb = KnowledgeBaseTool::with_defaults();
        assert_eq!(ask(&kb, "Grace Hopper"), "No entry found.");
    }

    #[test]
    fn test_missing_file_uses_seed_entries() {
        let dir = tempdir().unwrap();
        let kb = KnowledgeBaseTool::load(dir.path().join("missing.json"));
        assert_eq!(kb.entries().len(), 2);
        assert_eq!(kb.entries()[0].name, "Ada Lovelace");
    }

    #[test]
    fn test_corrupt_file_yields_empty_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(&path, "{not json").unwrap();

        let kb = KnowledgeBaseTool::load(&path);
        assert!(kb.entries().is_empty());
        assert_eq!(ask(&kb, "Ada"), "No entry found.");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(
            &path,
            r#"{"entries": [{"name": "Test Person", "summary": "A person created for testing purposes."}]}"#,
        )
        .unwrap();

        let kb = KnowledgeBaseTool::load(&path);
        assert_eq!(ask(&kb, "test person"), "A person created for testing purposes.");
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("kb.json");

        let mut kb = KnowledgeBaseTool::load(&path);
        kb.add_entry("Grace Hopper", "Grace Hopper was a pioneer of compilers.");
        kb.save().unwrap();

        let reloaded = KnowledgeBaseTool::load(&path);
        assert_eq!(reloaded.entries(), kb.entries());
        assert_eq!(reloaded.entries()[2].name, "Grace Hopper");
    }

    #[test]
    fn test_save_without_path_is_noop() {
        let kb = KnowledgeBaseTool::with_defaults();
        assert!(kb.save().is_ok());
        assert!(kb.path().is_none());
    }
}
