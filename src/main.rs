// 🚤 Fleet Management System - interactive dispatcher
// Thin glue around the core: bootstrap the fleet (CSV argument on the first
// run, snapshot afterwards), drive the menu loop, write the snapshot at exit.

use anyhow::Result;
use std::env;
use std::io::{self, Write};
use std::path::Path;

use fleet_management::{
    fleet_report, import_fleet, load_snapshot, parse_boat_line, save_snapshot, ExpenseOutcome,
    Fleet,
};

/// Snapshot file in the working directory, created on first exit
const DB_FILENAME: &str = "FleetData.db";

fn main() -> Result<()> {
    println!("Welcome to the Fleet Management System");
    println!("--------------------------------------");
    println!();

    let args: Vec<String> = env::args().collect();

    // Bootstrap policy: CSV argument means first run, otherwise load the
    // snapshot from the previous session
    let mut fleet = if args.len() > 1 {
        match import_fleet(Path::new(&args[1])) {
            Ok(fleet) => fleet,
            Err(err) => {
                println!("Could not load CSV file: {err:#}");
                Fleet::new()
            }
        }
    } else {
        load_snapshot(Path::new(DB_FILENAME))
    };

    let mut lines = io::stdin().lines();

    loop {
        let Some(line) = read_line("(P)rint, (A)dd, (R)emove, (E)xpense, e(X)it : ", &mut lines)?
        else {
            break; // stdin closed, same as exit
        };

        let choice = line
            .trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or(' ');

        match choice {
            'P' => {
                println!();
                print!("{}", fleet_report(&fleet));
                println!();
            }
            'A' => add_boat(&mut fleet, &mut lines)?,
            'R' => remove_boat(&mut fleet, &mut lines)?,
            'E' => handle_expense(&mut fleet, &mut lines)?,
            'X' => break,
            _ => println!("Invalid menu option, try again"),
        }
    }

    // Data loss here is visible but not fatal to the run
    if let Err(err) = save_snapshot(Path::new(DB_FILENAME), &fleet) {
        println!("Error saving DB file: {err:#}");
    }

    println!("\nExiting the Fleet Management System");
    Ok(())
}

/// Prompt and read one line; `None` means stdin has closed
fn read_line(
    prompt: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

/// Add one boat from a CSV line; a malformed line fails this command only
fn add_boat(
    fleet: &mut Fleet,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<()> {
    let Some(line) = read_line("Please enter the new boat CSV data          : ", lines)? else {
        return Ok(());
    };

    match parse_boat_line(&line) {
        Ok(boat) => fleet.add_boat(boat),
        Err(err) => println!("Could not add boat: {err:#}"),
    }
    Ok(())
}

fn remove_boat(
    fleet: &mut Fleet,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<()> {
    let Some(name) = read_line("Which boat do you want to remove?           : ", lines)? else {
        return Ok(());
    };

    if let Err(err) = fleet.remove_boat(name.trim()) {
        println!("{err}");
    }
    Ok(())
}

fn handle_expense(
    fleet: &mut Fleet,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<()> {
    let Some(name) = read_line("Which boat do you want to spend on?         : ", lines)? else {
        return Ok(());
    };
    let name = name.trim().to_string();

    if fleet.find_boat(&name).is_none() {
        println!("Cannot find boat");
        return Ok(());
    }

    let Some(amount_text) = read_line("How much do you want to spend?              : ", lines)?
    else {
        return Ok(());
    };

    let amount: f64 = match amount_text.trim().parse() {
        Ok(amount) => amount,
        Err(_) => {
            println!("Invalid amount, expense not recorded");
            return Ok(());
        }
    };

    if let Some(boat) = fleet.find_boat_mut(&name) {
        match boat.authorize_expense(amount) {
            ExpenseOutcome::Authorized { new_total } => {
                println!("Expense authorized, ${new_total:.2} spent.");
            }
            ExpenseOutcome::Denied { remaining } => {
                println!("Expense not permitted, only ${remaining:.2} left to spend.");
            }
        }
    }
    Ok(())
}
