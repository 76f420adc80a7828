// ⛵ Fleet Ledger - Boats, spending ceilings, expense authorization
// Each boat's purchase price is a fixed budget ceiling; accumulated expenses
// may only grow through the authorization check and never past the ceiling.

use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

// ============================================================================
// BOAT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoatType {
    Sailing,
    Power,
}

impl BoatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoatType::Sailing => "SAILING",
            BoatType::Power => "POWER",
        }
    }

    /// Parse from text, case-insensitively ("sailing" == "SAILING")
    pub fn parse(text: &str) -> Result<Self, FleetError> {
        match text.trim().to_uppercase().as_str() {
            "SAILING" => Ok(BoatType::Sailing),
            "POWER" => Ok(BoatType::Power),
            other => Err(FleetError::UnknownBoatType(other.to_string())),
        }
    }
}

impl fmt::Display for BoatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Custom Deserialize so CSV rows accept any casing of the type column
impl<'de> Deserialize<'de> for BoatType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        BoatType::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Ledger errors. A denied expense is an outcome, not an error
/// (see [`ExpenseOutcome`]).
#[derive(Error, Debug, PartialEq)]
pub enum FleetError {
    #[error("Cannot find boat {0}")]
    BoatNotFound(String),

    #[error("unknown boat type `{0}`, expected SAILING or POWER")]
    UnknownBoatType(String),
}

// ============================================================================
// BOAT
// ============================================================================

/// One boat in the fleet
///
/// Field order matches the bulk-import CSV columns:
/// `type,name,year,make_model,length_feet,purchase_price`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Boat {
    pub boat_type: BoatType,

    /// De-facto lookup key; matched case-insensitively, first match wins
    pub name: String,

    pub year: i32,

    pub make_model: String,

    pub length_feet: i32,

    /// Fixed spending ceiling, set once at creation
    pub purchase_price: f64,

    /// Accumulated authorized spend. Starts at 0.0 and is written only by
    /// `authorize_expense`; never present in the import CSV.
    #[serde(skip_deserializing)]
    pub expenses: f64,
}

/// Result of one expense authorization attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpenseOutcome {
    /// Committed; carries the boat's updated total spend
    Authorized { new_total: f64 },
    /// Rejected with no mutation; carries the pre-attempt remaining allowance
    Denied { remaining: f64 },
}

impl Boat {
    /// Makes a new boat with no expenses yet
    pub fn new(
        boat_type: BoatType,
        name: String,
        year: i32,
        make_model: String,
        length_feet: i32,
        purchase_price: f64,
    ) -> Self {
        Boat {
            boat_type,
            name,
            year,
            make_model,
            length_feet,
            purchase_price,
            expenses: 0.0,
        }
    }

    /// How much money is left to spend on this boat
    pub fn remaining_allowance(&self) -> f64 {
        self.purchase_price - self.expenses
    }

    /// Try to spend `amount` against this boat's ceiling.
    ///
    /// Equality is permitted: an exact-fit expense exhausts the allowance.
    /// Amounts are not sign-validated; a negative amount reduces the total
    /// and always authorizes.
    pub fn authorize_expense(&mut self, amount: f64) -> ExpenseOutcome {
        let new_total = self.expenses + amount;
        if new_total <= self.purchase_price {
            self.expenses = new_total;
            ExpenseOutcome::Authorized { new_total }
        } else {
            ExpenseOutcome::Denied {
                remaining: self.remaining_allowance(),
            }
        }
    }
}

// ============================================================================
// FLEET
// ============================================================================

/// Ordered collection of boats; insertion order drives report and snapshot
/// ordering. Name uniqueness is not enforced, lookups return the
/// earliest-inserted match.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fleet {
    boats: Vec<Boat>,
}

/// Aggregate sums for the report's totals line
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FleetTotals {
    pub total_paid: f64,
    pub total_spent: f64,
}

impl Fleet {
    pub fn new() -> Self {
        Fleet { boats: Vec::new() }
    }

    /// Rebuild a fleet from already-ordered records (snapshot load)
    pub fn from_boats(boats: Vec<Boat>) -> Self {
        Fleet { boats }
    }

    /// Append a boat to the end of the fleet
    pub fn add_boat(&mut self, boat: Boat) {
        self.boats.push(boat);
    }

    /// Remove the first boat whose name matches case-insensitively.
    /// Remaining order is preserved; a miss leaves the fleet untouched.
    pub fn remove_boat(&mut self, name: &str) -> Result<(), FleetError> {
        match self.position_of(name) {
            Some(index) => {
                self.boats.remove(index);
                Ok(())
            }
            None => Err(FleetError::BoatNotFound(name.to_string())),
        }
    }

    /// Case-insensitive first-match lookup by name
    pub fn find_boat(&self, name: &str) -> Option<&Boat> {
        self.position_of(name).map(|index| &self.boats[index])
    }

    /// Mutable variant of `find_boat`, used by the expense command
    pub fn find_boat_mut(&mut self, name: &str) -> Option<&mut Boat> {
        self.position_of(name).map(|index| &mut self.boats[index])
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.boats
            .iter()
            .position(|boat| boat.name.to_lowercase() == wanted)
    }

    /// Sum purchase prices and expenses across the whole fleet
    pub fn totals(&self) -> FleetTotals {
        let mut totals = FleetTotals::default();
        for boat in &self.boats {
            totals.total_paid += boat.purchase_price;
            totals.total_spent += boat.expenses;
        }
        totals
    }

    pub fn boats(&self) -> &[Boat] {
        &self.boats
    }

    pub fn len(&self) -> usize {
        self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }
}
