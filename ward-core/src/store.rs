//! File-backed persistence: one JSON document per table under the data directory.

use crate::error::{Result, WardError};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// An entity that can live in a [`JsonTable`].
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// File stem of the table (e.g. `patients` → `patients.json`).
    const TABLE: &'static str;
    /// Human-readable name used in error messages.
    const KIND: &'static str;

    fn id(&self) -> Option<u64>;
    fn set_id(&mut self, id: u64);
}

pub trait Repository<T: Record> {
    /// Inserts `record`, assigning the next id when it has none, or replaces the
    /// stored row with the same id.
    fn save(&self, record: T) -> Result<T>;
    fn find_by_id(&self, id: u64) -> Result<Option<T>>;
    /// All rows, in insertion order.
    fn find_all(&self) -> Result<Vec<T>>;
    /// Returns `false` when there was nothing to delete.
    fn delete(&self, id: u64) -> Result<bool>;

    fn get(&self, id: u64) -> Result<T> {
        self.find_by_id(id)?
            .ok_or(WardError::NotFound { kind: T::KIND, id })
    }

    fn exists(&self, id: u64) -> Result<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }
}

/// Handle on the data directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Opens `root`, creating it if needed.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|source| WardError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table<T: Record>(&self) -> JsonTable<T> {
        JsonTable {
            path: self.root.join(format!("{}.json", T::TABLE)),
            _record: PhantomData,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TableFile<T> {
    next_id: u64,
    rows: Vec<T>,
}

impl<T> Default for TableFile<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonTable<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Record> JsonTable<T> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<TableFile<T>> {
        if !self.path.exists() {
            return Ok(TableFile::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| WardError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| WardError::Serialization {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, table: &TableFile<T>) -> Result<()> {
        let content =
            serde_json::to_string_pretty(table).map_err(|source| WardError::Serialization {
                path: self.path.clone(),
                source,
            })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|source| WardError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

impl<T: Record> Repository<T> for JsonTable<T> {
    fn save(&self, mut record: T) -> Result<T> {
        let mut table = self.load()?;
        match record.id() {
            Some(id) => {
                match table.rows.iter_mut().find(|r| r.id() == Some(id)) {
                    Some(existing) => *existing = record.clone(),
                    None => table.rows.push(record.clone()),
                }
                table.next_id = table.next_id.max(id + 1);
            }
            None => {
                record.set_id(table.next_id);
                table.next_id += 1;
                table.rows.push(record.clone());
            }
        }
        self.write(&table)?;
        Ok(record)
    }

    fn find_by_id(&self, id: u64) -> Result<Option<T>> {
        Ok(self
            .load()?
            .rows
            .into_iter()
            .find(|r| r.id() == Some(id)))
    }

    fn find_all(&self) -> Result<Vec<T>> {
        Ok(self.load()?.rows)
    }

    fn delete(&self, id: u64) -> Result<bool> {
        let mut table = self.load()?;
        let before = table.rows.len();
        table.rows.retain(|r| r.id() != Some(id));
        if table.rows.len() == before {
            return Ok(false);
        }
        self.write(&table)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Option<u64>,
        text: String,
    }

    impl Record for Note {
        const TABLE: &'static str = "notes";
        const KIND: &'static str = "Note";

        fn id(&self) -> Option<u64> {
            self.id
        }

        fn set_id(&mut self, id: u64) {
            self.id = Some(id);
        }
    }

    fn note(text: &str) -> Note {
        Note {
            id: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn missing_file_is_empty_table() {
        let tmp = tempdir().unwrap();
        let store = Store::open(&tmp.path().join("data")).unwrap();
        let notes = store.table::<Note>();
        assert!(notes.find_all().unwrap().is_empty());
        assert!(notes.find_by_id(1).unwrap().is_none());
        assert!(!notes.path().exists());
    }

    #[test]
    fn save_assigns_sequential_ids_and_keeps_order() {
        let tmp = tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        let notes = store.table::<Note>();

        let a = notes.save(note("a")).unwrap();
        let b = notes.save(note("b")).unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));

        let all = notes.find_all().unwrap();
        assert_eq!(all, vec![a, b]);
    }

    #[test]
    fn save_with_id_replaces_in_place() {
        let tmp = tempdir().unwrap();
        let notes = Store::open(tmp.path()).unwrap().table::<Note>();
        let mut first = notes.save(note("first")).unwrap();
        notes.save(note("second")).unwrap();

        first.text = "edited".to_string();
        notes.save(first).unwrap();

        let texts: Vec<String> = notes.find_all().unwrap().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["edited", "second"]);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let tmp = tempdir().unwrap();
        let notes = Store::open(tmp.path()).unwrap().table::<Note>();
        notes.save(note("a")).unwrap();
        let b = notes.save(note("b")).unwrap();

        assert!(notes.delete(b.id.unwrap()).unwrap());
        assert!(!notes.delete(b.id.unwrap()).unwrap());

        let c = notes.save(note("c")).unwrap();
        assert_eq!(c.id, Some(3));
    }

    #[test]
    fn get_reports_not_found() {
        let tmp = tempdir().unwrap();
        let notes = Store::open(tmp.path()).unwrap().table::<Note>();
        assert!(matches!(
            notes.get(42),
            Err(WardError::NotFound { kind: "Note", id: 42 })
        ));
    }

    #[test]
    fn corrupt_table_is_a_serialization_error() {
        let tmp = tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        let notes = store.table::<Note>();
        fs::write(notes.path(), "this file is not valid").unwrap();
        assert!(matches!(
            notes.find_all(),
            Err(WardError::Serialization { .. })
        ));
    }
}
