use crate::errors::RiskError;
use crate::store::SlotStorage;
use super::Database;

impl Database {
    pub fn get_slot(&self, key: &str) -> Result<Option<String>, RiskError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT value FROM slots WHERE key = ?1")
            .map_err(|e| RiskError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![key], |row: &rusqlite::Row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RiskError::Database(format!("Query error: {}", e))),
        }
    }

    pub fn set_slot(&self, key: &str, value: &str) -> Result<(), RiskError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, chrono::Utc::now().to_rfc3339()],
        ).map_err(|e| RiskError::Database(format!("Insert failed: {}", e)))?;
        Ok(())
    }

    pub fn remove_slot(&self, key: &str) -> Result<(), RiskError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM slots WHERE key = ?1", rusqlite::params![key])
            .map_err(|e| RiskError::Database(format!("Delete failed: {}", e)))?;
        Ok(())
    }
}

impl SlotStorage for Database {
    fn get(&self, key: &str) -> Result<Option<String>, RiskError> {
        self.get_slot(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RiskError> {
        self.set_slot(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), RiskError> {
        self.remove_slot(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_set_and_get_slot() {
        let db = Database::in_memory().unwrap();
        db.set_slot("submissions", "[]").unwrap();

        let value = db.get_slot("submissions").unwrap();
        assert_eq!(value, Some("[]".to_string()));
    }

    #[test]
    fn test_db_get_missing_slot() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_slot("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_db_set_slot_replaces_whole_value() {
        let db = Database::in_memory().unwrap();
        db.set_slot("submissions", r#"[{"a":1}]"#).unwrap();
        db.set_slot("submissions", r#"[{"b":2}]"#).unwrap();

        assert_eq!(db.get_slot("submissions").unwrap().as_deref(), Some(r#"[{"b":2}]"#));
    }

    #[test]
    fn test_db_remove_slot() {
        let db = Database::in_memory().unwrap();
        db.set_slot("submissions", "[]").unwrap();
        db.remove_slot("submissions").unwrap();
        assert!(db.get_slot("submissions").unwrap().is_none());

        // removing an absent slot is fine
        db.remove_slot("submissions").unwrap();
    }

    #[test]
    fn test_db_clones_share_connection() {
        let db = Database::in_memory().unwrap();
        let other = db.clone();
        db.set_slot("k", "v").unwrap();
        assert_eq!(other.get_slot("k").unwrap().as_deref(), Some("v"));
    }
}
