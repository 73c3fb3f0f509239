//! Interactive menu loop
//!
//! Every action reports its own outcome; no error leaves the loop.

use std::path::{Path, PathBuf};

use rust_decimal_macros::dec;
use shared::PlotId;

use crate::config::Config;
use crate::input;
use crate::report;
use crate::services::{connection::ConnectionManager, sync};
use crate::store::WorkingSet;

fn print_menu() {
    println!("\n=== HARVEST MANAGEMENT ===");
    println!("1) Register plot");
    println!("2) List plots");
    println!("3) Record harvest operation");
    println!("4) List operations");
    println!("5) Export .txt report");
    println!("6) Save JSON");
    println!("7) Load JSON");
    println!("8) Sync local -> database");
    println!("0) Quit");
}

/// Run the menu loop until the operator quits
pub async fn run(config: Config) {
    let data_path = PathBuf::from(&config.storage.data_file);
    let report_path = PathBuf::from(&config.storage.report_file);

    let mut working_set = WorkingSet::default();
    let mut manager = ConnectionManager::from_config(&config.database);

    loop {
        print_menu();
        let choice = input::read_nonempty("Choice: ");

        match choice.as_str() {
            "1" => register_plot(&mut working_set),
            "2" => list_plots(&working_set),
            "3" => record_operation(&mut working_set),
            "4" => list_operations(&working_set),
            "5" => export_report(&working_set, &report_path),
            "6" => save_data(&working_set, &data_path),
            "7" => load_data(&mut working_set, &data_path),
            "8" => {
                println!("\n=== Sync local -> database ===");
                sync::run_sync(&working_set, &mut manager).await;
            }
            "0" => {
                clear_console();
                println!("Goodbye!");
                break;
            }
            _ => {
                clear_console();
                println!("Invalid option.");
            }
        }
    }
}

fn register_plot(working_set: &mut WorkingSet) {
    let name = input::read_nonempty("Plot name: ");
    let area = input::read_decimal("Area (ha): ", Some(dec!(0.1)), None);
    match working_set.add_plot(name, area) {
        Ok(id) => {
            clear_console();
            println!("Plot {id} created.");
        }
        Err(e) => println!("{e}"),
    }
}

fn list_plots(working_set: &WorkingSet) {
    if working_set.plots.is_empty() {
        println!("No plots registered.");
        return;
    }
    clear_console();
    println!("=== Registered plots ===");
    println!("ID | Name | Area (ha)");
    for plot in working_set.plots.values() {
        println!("{:>2} | {} | {}", plot.id, plot.name, plot.area_ha);
    }
}

fn record_operation(working_set: &mut WorkingSet) {
    if working_set.plots.is_empty() {
        println!("Register plots first.");
        return;
    }
    list_plots(working_set);
    let plot_id = PlotId(input::read_i64("ID of the harvested plot: ", Some(1), None));
    if !working_set.plots.contains_key(&plot_id) {
        println!("No such plot.");
        return;
    }
    let date = input::read_date("Date (YYYY-MM-DD): ");
    let weight = input::read_decimal("Harvested weight (t): ", Some(dec!(0)), None);
    let loss = input::read_decimal("Estimated loss (%): ", Some(dec!(0)), Some(dec!(100)));
    match working_set.record_operation(plot_id, date, weight, loss) {
        Ok(op) => {
            clear_console();
            println!("Operation recorded. Loss alert: {}", op.alert);
        }
        Err(e) => println!("{e}"),
    }
}

fn list_operations(working_set: &WorkingSet) {
    if working_set.operations.is_empty() {
        println!("No operations recorded.");
        return;
    }
    clear_console();
    println!("ID | Date | Plot | Weight(t) | Loss(%) | Alert");
    for op in &working_set.operations {
        let plot_name = working_set.plot_name(op.plot_id).unwrap_or("?");
        println!(
            "{:>2} | {} | {}({}) | {:.2} | {:.2} | {}",
            op.id, op.date, op.plot_id, plot_name, op.weight_t, op.loss_pct, op.alert
        );
    }
}

fn export_report(working_set: &WorkingSet, path: &Path) {
    match report::export(working_set, path) {
        Ok(()) => {
            clear_console();
            println!("Report exported to: {}", path.display());
        }
        Err(e) => println!("Could not export report: {e}"),
    }
}

fn save_data(working_set: &WorkingSet, path: &Path) {
    match working_set.save(path) {
        Ok(()) => {
            clear_console();
            println!("Saved to {}.", path.display());
        }
        Err(e) => println!("Could not save: {e}"),
    }
}

fn load_data(working_set: &mut WorkingSet, path: &Path) {
    match WorkingSet::load(path) {
        Ok(loaded) => {
            *working_set = loaded;
            clear_console();
            println!("JSON loaded into memory.");
        }
        Err(e) => {
            clear_console();
            println!("Invalid JSON file: {e}");
        }
    }
}

fn clear_console() {
    let status = if cfg!(windows) {
        std::process::Command::new("cmd").args(["/C", "cls"]).status()
    } else {
        std::process::Command::new("clear").status()
    };
    let _ = status;
}
