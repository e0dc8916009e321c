/// Key/value slots. Each slot holds one whole JSON document and is replaced as a unit.
pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS slots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";
