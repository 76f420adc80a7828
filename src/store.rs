// 💾 Durable Snapshot - SQLite-backed fleet persistence
// Written in full at shutdown, read back at every later startup. A missing
// or unreadable snapshot is the normal first-run state and loads as an
// empty fleet; only the save path surfaces errors.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;

use crate::fleet::{Boat, BoatType, Fleet};

pub fn setup_schema(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // The position column preserves insertion order across the round-trip
    conn.execute(
        "CREATE TABLE IF NOT EXISTS boats (
            position INTEGER PRIMARY KEY,
            boat_type TEXT NOT NULL,
            name TEXT NOT NULL,
            year INTEGER NOT NULL,
            make_model TEXT NOT NULL,
            length_feet INTEGER NOT NULL,
            purchase_price REAL NOT NULL,
            expenses REAL NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS snapshot_meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            saved_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Overwrite the stored snapshot with the complete current fleet
pub fn persist_fleet(conn: &Connection, fleet: &Fleet) -> Result<()> {
    conn.execute("DELETE FROM boats", [])?;

    for (position, boat) in fleet.boats().iter().enumerate() {
        conn.execute(
            "INSERT INTO boats (
                position, boat_type, name, year, make_model,
                length_feet, purchase_price, expenses
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                position as i64,
                boat.boat_type.as_str(),
                boat.name,
                boat.year,
                boat.make_model,
                boat.length_feet,
                boat.purchase_price,
                boat.expenses,
            ],
        )?;
    }

    conn.execute(
        "INSERT INTO snapshot_meta (id, saved_at) VALUES (1, ?1)
         ON CONFLICT(id) DO UPDATE SET saved_at = excluded.saved_at",
        params![Utc::now().to_rfc3339()],
    )?;

    Ok(())
}

/// Read the full fleet back in insertion order, every field included
pub fn fetch_fleet(conn: &Connection) -> Result<Fleet> {
    let mut stmt = conn.prepare(
        "SELECT boat_type, name, year, make_model, length_feet, purchase_price, expenses
         FROM boats
         ORDER BY position",
    )?;

    let boats = stmt
        .query_map([], |row| {
            let type_text: String = row.get(0)?;
            let boat_type =
                BoatType::parse(&type_text).map_err(|_| rusqlite::Error::InvalidQuery)?;

            Ok(Boat {
                boat_type,
                name: row.get(1)?,
                year: row.get(2)?,
                make_model: row.get(3)?,
                length_feet: row.get(4)?,
                purchase_price: row.get(5)?,
                expenses: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Fleet::from_boats(boats))
}

/// Write the fleet snapshot to `path`, replacing any prior snapshot
pub fn save_snapshot(path: &Path, fleet: &Fleet) -> Result<()> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open fleet database {}", path.display()))?;
    setup_schema(&conn)?;
    persist_fleet(&conn, fleet)
}

/// Load the snapshot at `path`, or an empty fleet when there is none yet.
/// Read-only open keeps a first run from creating a stray database file.
pub fn load_snapshot(path: &Path) -> Fleet {
    try_load(path).unwrap_or_else(|_| Fleet::new())
}

fn try_load(path: &Path) -> Result<Fleet> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    fetch_fleet(&conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fleet() -> Fleet {
        let mut fleet = Fleet::new();
        let mut orion = Boat::new(
            BoatType::Sailing,
            "Orion".to_string(),
            2015,
            "Beneteau".to_string(),
            38,
            50_000.0,
        );
        orion.authorize_expense(30_000.0);
        fleet.add_boat(orion);
        fleet.add_boat(Boat::new(
            BoatType::Power,
            "Mako".to_string(),
            2020,
            "Boston Whaler".to_string(),
            24,
            80_000.0,
        ));
        fleet
    }

    #[test]
    fn round_trip_preserves_every_field_and_order() {
        let conn = Connection::open_in_memory().unwrap();
        setup_schema(&conn).unwrap();

        let fleet = sample_fleet();
        persist_fleet(&conn, &fleet).unwrap();
        let loaded = fetch_fleet(&conn).unwrap();

        assert_eq!(loaded, fleet, "snapshot round-trip must be lossless");
        assert_eq!(loaded.boats()[0].name, "Orion");
        assert_eq!(
            loaded.boats()[0].expenses, 30_000.0,
            "accumulated expenses must survive the round-trip"
        );
    }

    #[test]
    fn second_save_overwrites_the_first() {
        let conn = Connection::open_in_memory().unwrap();
        setup_schema(&conn).unwrap();

        persist_fleet(&conn, &sample_fleet()).unwrap();

        let mut smaller = Fleet::new();
        smaller.add_boat(Boat::new(
            BoatType::Power,
            "Skua".to_string(),
            2018,
            "Zodiac".to_string(),
            14,
            9_000.0,
        ));
        persist_fleet(&conn, &smaller).unwrap();

        let loaded = fetch_fleet(&conn).unwrap();
        assert_eq!(loaded, smaller);
    }

    #[test]
    fn persist_records_a_saved_at_timestamp() {
        let conn = Connection::open_in_memory().unwrap();
        setup_schema(&conn).unwrap();
        persist_fleet(&conn, &sample_fleet()).unwrap();

        let saved_at: String = conn
            .query_row("SELECT saved_at FROM snapshot_meta WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert!(!saved_at.is_empty());
    }

    #[test]
    fn missing_snapshot_loads_as_empty_fleet() {
        let fleet = load_snapshot(Path::new("/definitely/missing/FleetData.db"));
        assert!(fleet.is_empty());
    }

    #[test]
    fn save_then_load_round_trips_on_disk() {
        let path = std::env::temp_dir().join("fleet-management-store-test.db");
        let _ = std::fs::remove_file(&path);

        let fleet = sample_fleet();
        save_snapshot(&path, &fleet).unwrap();
        let loaded = load_snapshot(&path);

        assert_eq!(loaded, fleet);

        let _ = std::fs::remove_file(&path);
    }
}
