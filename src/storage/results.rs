//! Result storage: save, load, and list applied results.

use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::model::{ReframeResult, StoredResult};

use super::{Result, Storage, StorageError};

/// Raw column values of one result row, before validation.
type RawRow = (String, String, String, String, String, String, String);

const SELECT_COLUMNS: &str =
    "SELECT id, challenge, created_at, reframe, shift, tag, transcript FROM result";

impl Storage {
    /// Saves an applied result.
    pub fn save_result(&self, stored: &StoredResult) -> Result<()> {
        let conn = self.open_db()?;
        if load_row(&conn, stored.id)?.is_some() {
            return Err(StorageError::AlreadyExists(stored.id));
        }
        let transcript = serde_json::to_string(&stored.result.transcript)?;
        conn.execute(
            "INSERT INTO result (id, challenge, created_at, reframe, shift, tag, transcript)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                stored.id.to_string(),
                &stored.challenge,
                stored.created_at.to_string(),
                &stored.result.reframe,
                &stored.result.shift,
                &stored.result.tag,
                transcript,
            ],
        )?;
        tracing::info!(id = %stored.id, tag = %stored.result.tag, "result saved");
        Ok(())
    }

    /// Loads a single result.
    pub fn load_result(&self, id: Uuid) -> Result<StoredResult> {
        let conn = self.open_db()?;
        let raw = load_row(&conn, id)?.ok_or(StorageError::NotFound(id))?;
        parse_row(raw)
    }

    /// Lists all results, oldest first.
    pub fn list_results(&self) -> Result<Vec<StoredResult>> {
        let conn = self.open_db()?;
        let mut stmt = conn.prepare(SELECT_COLUMNS)?;
        let raw = stmt
            .query_map([], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let mut results = raw.into_iter().map(parse_row).collect::<Result<Vec<_>>>()?;
        results.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(results)
    }
}

fn load_row(conn: &Connection, id: Uuid) -> Result<Option<RawRow>> {
    let row = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            [id.to_string()],
            read_row,
        )
        .optional()?;
    Ok(row)
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn parse_row(raw: RawRow) -> Result<StoredResult> {
    let (id_str, challenge, created_at_str, reframe, shift, tag, transcript_json) = raw;

    let id = id_str
        .parse::<Uuid>()
        .map_err(|e| StorageError::Corrupt(format!("invalid result id: {e}")))?;
    let created_at = created_at_str
        .parse::<jiff::Timestamp>()
        .map_err(|e| StorageError::Corrupt(format!("invalid created_at: {e}")))?;
    let transcript: Vec<String> = serde_json::from_str(&transcript_json)
        .map_err(|e| StorageError::Corrupt(format!("invalid transcript for {id}: {e}")))?;

    Ok(StoredResult {
        id,
        challenge,
        created_at,
        result: ReframeResult {
            transcript,
            shift,
            tag,
            reframe,
        },
    })
}
