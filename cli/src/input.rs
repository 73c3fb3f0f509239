//! Validated terminal input helpers
//!
//! Each reader loops until the operator enters something acceptable, printing
//! the reason otherwise. Decimal input accepts both `.` and `,` separators.

use std::io::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use shared::validation::parse_operation_date;

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

/// Read a non-empty line
pub fn read_nonempty(prompt: &str) -> String {
    loop {
        let value = prompt_line(prompt);
        if !value.is_empty() {
            return value;
        }
        println!("This field is required.");
    }
}

/// Read an integer, optionally range-checked
pub fn read_i64(prompt: &str, min: Option<i64>, max: Option<i64>) -> i64 {
    loop {
        match prompt_line(prompt).parse::<i64>() {
            Ok(v) => {
                if let Some(lo) = min {
                    if v < lo {
                        println!("Value must be >= {lo}.");
                        continue;
                    }
                }
                if let Some(hi) = max {
                    if v > hi {
                        println!("Value must be <= {hi}.");
                        continue;
                    }
                }
                return v;
            }
            Err(_) => println!("Enter a valid whole number."),
        }
    }
}

/// Read a decimal, optionally range-checked
pub fn read_decimal(prompt: &str, min: Option<Decimal>, max: Option<Decimal>) -> Decimal {
    loop {
        match parse_decimal(&prompt_line(prompt)) {
            Some(v) => {
                if let Some(lo) = min {
                    if v < lo {
                        println!("Value must be >= {lo}.");
                        continue;
                    }
                }
                if let Some(hi) = max {
                    if v > hi {
                        println!("Value must be <= {hi}.");
                        continue;
                    }
                }
                return v;
            }
            None => println!("Enter a valid decimal number (use . or ,)."),
        }
    }
}

/// Read a calendar date in YYYY-MM-DD form
pub fn read_date(prompt: &str) -> NaiveDate {
    loop {
        match parse_operation_date(&prompt_line(prompt)) {
            Ok(date) => return date,
            Err(msg) => println!("{msg}."),
        }
    }
}

/// Parse a decimal from operator input, accepting `,` as the separator
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    input.trim().replace(',', ".").parse::<Decimal>().ok()
}
