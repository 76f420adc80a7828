// 🧾 Fleet Report - fixed-width console rendering
// One line per boat in insertion order plus an aligned totals line. Money is
// always two decimals behind a dollar sign; the output is for humans, not
// for parsing.

use crate::fleet::{Boat, Fleet};

/// Render the formatted report line for one boat
pub fn boat_line(boat: &Boat) -> String {
    format!(
        "    {:<7} {:<20} {:>4} {:<12} {:>2}' : Paid $ {:>8.2} : Spent $ {:>8.2}",
        boat.boat_type.as_str(),
        boat.name,
        boat.year,
        boat.make_model,
        boat.length_feet,
        boat.purchase_price,
        boat.expenses,
    )
}

/// Render the whole fleet report, totals line included
pub fn fleet_report(fleet: &Fleet) -> String {
    let mut out = String::from("Fleet report:\n");

    for boat in fleet.boats() {
        out.push_str(&boat_line(boat));
        out.push('\n');
    }

    let totals = fleet.totals();
    out.push_str(&format!(
        "    {:<51}: Paid $ {:>8.2} : Spent $ {:>8.2}\n",
        "Total", totals.total_paid, totals.total_spent
    ));

    out
}
