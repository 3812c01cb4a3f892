use std::{fs, io, path::Path};

use crate::models::Db;

pub const DEFAULT_DB_PATH: &str = "data/db.json";

pub fn load_db(path: &str) -> io::Result<Db> {
    let text = fs::read_to_string(path)?;
    let db: Db =
        serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(db)
}

// Write-then-rename keeps the database file whole if a save is interrupted.
pub fn save_db(path: &str, db: &Db) -> io::Result<()> {
    let tmp_path = format!("{path}.tmp");
    let text = serde_json::to_string_pretty(db)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&tmp_path, text)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
