// 📥 Bulk Import - one-time CSV population of the fleet
// Line grammar: type,name,year,make_model,length_feet,purchase_price
// Bulk import drops malformed rows silently; the interactive add command
// uses the strict single-line parser instead. The asymmetry is intentional.

use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::fleet::{Boat, Fleet};

/// Expected column count for one boat row
const BOAT_FIELDS: usize = 6;

/// Load a fleet from a bulk-import CSV file.
///
/// Rows with the wrong field count or an unparsable field are skipped;
/// imported boats start with zero expenses. Only failure to open the file
/// itself is an error, which the caller reports before starting empty.
pub fn import_fleet(path: &Path) -> Result<Fleet> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?;
    Ok(fleet_from_reader(file))
}

fn fleet_from_reader<R: Read>(reader: R) -> Fleet {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut fleet = Fleet::new();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => continue, // unreadable row, skip
        };
        if record.len() != BOAT_FIELDS {
            continue;
        }
        match record.deserialize::<Boat>(None) {
            Ok(boat) => fleet.add_boat(boat),
            Err(_) => continue, // unparsable field, skip
        }
    }

    fleet
}

/// Parse one CSV-formatted boat line for the interactive add command.
/// Unlike bulk import, every defect here is a hard error for the caller.
pub fn parse_boat_line(line: &str) -> Result<Boat> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    let record = rdr
        .records()
        .next()
        .ok_or_else(|| anyhow!("empty boat line"))?
        .context("unreadable boat line")?;

    if record.len() != BOAT_FIELDS {
        bail!(
            "expected {} comma-separated fields, got {}",
            BOAT_FIELDS,
            record.len()
        );
    }

    let boat: Boat = record
        .deserialize(None)
        .context("invalid field in boat line")?;
    Ok(boat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::BoatType;

    #[test]
    fn well_formed_lines_import_with_zero_expenses() {
        let csv = "SAILING,Orion,2015,Beneteau,38,50000.00\n\
                   POWER,Mako,2020,Boston Whaler,24,80000.00\n";

        let fleet = fleet_from_reader(csv.as_bytes());

        assert_eq!(fleet.len(), 2);
        let orion = fleet.find_boat("Orion").unwrap();
        assert_eq!(orion.boat_type, BoatType::Sailing);
        assert_eq!(orion.year, 2015);
        assert_eq!(orion.make_model, "Beneteau");
        assert_eq!(orion.length_feet, 38);
        assert_eq!(orion.purchase_price, 50_000.0);
        assert_eq!(orion.expenses, 0.0);
    }

    #[test]
    fn malformed_rows_are_skipped_but_good_neighbors_survive() {
        // 5 fields, bad year, 7 fields, then one good row
        let csv = "SAILING,NoPrice,2015,Beneteau,38\n\
                   POWER,BadYear,twenty,Sea Ray,30,45000.00\n\
                   SAILING,Extra,2010,Catalina,32,30000.00,junk\n\
                   POWER,Mako,2020,Boston Whaler,24,80000.00\n";

        let fleet = fleet_from_reader(csv.as_bytes());

        assert_eq!(
            fleet.len(),
            1,
            "fleet size must equal the count of well-formed lines"
        );
        assert!(fleet.find_boat("Mako").is_some());
    }

    #[test]
    fn fields_are_trimmed_and_type_matches_any_case() {
        let csv = " sailing , Serenity , 2012 , Hunter , 33 , 42000.50 \n";

        let fleet = fleet_from_reader(csv.as_bytes());

        let boat = fleet.find_boat("Serenity").unwrap();
        assert_eq!(boat.boat_type, BoatType::Sailing);
        assert_eq!(boat.name, "Serenity");
        assert_eq!(boat.purchase_price, 42_000.50);
    }

    #[test]
    fn unknown_boat_type_row_is_skipped() {
        let csv = "ROWING,Skiff,2001,Custom,12,500.00\n";
        let fleet = fleet_from_reader(csv.as_bytes());
        assert!(fleet.is_empty());
    }

    #[test]
    fn missing_source_file_is_an_error() {
        let result = import_fleet(Path::new("/definitely/missing/fleet.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn parse_boat_line_accepts_a_well_formed_line() {
        let boat = parse_boat_line("POWER, Mako, 2020, Boston Whaler, 24, 80000.00").unwrap();
        assert_eq!(boat.boat_type, BoatType::Power);
        assert_eq!(boat.name, "Mako");
        assert_eq!(boat.expenses, 0.0);
    }

    #[test]
    fn parse_boat_line_rejects_wrong_field_count() {
        let result = parse_boat_line("SAILING,Orion,2015,Beneteau,38");
        assert!(result.is_err(), "interactive add must fail hard");
    }

    #[test]
    fn parse_boat_line_rejects_unparsable_field() {
        assert!(parse_boat_line("SAILING,Orion,2015,Beneteau,long,50000").is_err());
        assert!(parse_boat_line("CANOE,Orion,2015,Beneteau,38,50000").is_err());
    }
}
