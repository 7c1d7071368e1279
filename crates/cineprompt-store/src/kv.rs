//! Typed JSON access to the `kv` table.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::database::Database;
use crate::error::Result;

/// One pending change inside a [`Database::write_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvWrite {
    Put { key: String, json: String },
    Remove { key: String },
}

impl KvWrite {
    /// Serialize `value` into a put for `key`.
    pub fn put<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Result<Self> {
        Ok(Self::Put {
            key: key.into(),
            json: serde_json::to_string(value)?,
        })
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Self::Remove { key: key.into() }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Remove { key } => key,
        }
    }
}

impl Database {
    /// Raw JSON stored under `key`, if any.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn()
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Deserialize the document stored under `key`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Insert or replace the document under `key`.
    pub fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.conn().execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Delete `key`.  Returns `true` if a row was deleted.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }

    /// All keys starting with `prefix`, in key order.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn().prepare(
            "SELECT key FROM kv
             WHERE substr(key, 1, length(?1)) = ?1
             ORDER BY key ASC",
        )?;
        let rows = stmt.query_map(params![prefix], |row| row.get::<_, String>(0))?;

        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }

    /// Apply every write in a single transaction: either all land or none do.
    pub fn write_batch(&mut self, writes: &[KvWrite]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn_mut().transaction()?;
        for write in writes {
            match write {
                KvWrite::Put { key, json } => {
                    tx.execute(
                        "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
                        params![key, json, now],
                    )?;
                }
                KvWrite::Remove { key } => {
                    tx.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}
