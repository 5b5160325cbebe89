//! Walks a small table through removal and growth, printing its shape.

use probe_table::{Table, TableError};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn initialize_logging() {
    // A logger may already be installed when embedded; the demo runs fine without one.
    let _ = TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

fn print_shape(table: &Table) {
    println!("Count: {} Size: {}", table.len(), table.capacity());
}

fn main() -> Result<(), TableError> {
    initialize_logging();

    let mut table = Table::with_capacity(10)?;
    for key in ["T", "V", "I", "G", "A", "B"] {
        table.insert(key, key)?;
    }
    table.remove("A");
    table.remove("A");
    print_shape(&table);

    table.insert("C", "C")?;
    print_shape(&table);

    table.insert("D", "D")?;
    print_shape(&table);

    match table.lookup("A") {
        Some(value) => println!("Find A (should be missing): {value}"),
        None => println!("Find A (should be missing): not found"),
    }

    table.destroy();
    Ok(())
}
