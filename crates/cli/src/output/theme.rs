use colored::Colorize;

pub fn print_header(title: &str) {
    println!();
    println!("  {} {}", "▍".yellow().bold(), title.bold());
    println!("  {}", "─".repeat(title.chars().count() + 2).dimmed());
}

pub fn print_kv(label: &str, value: &str) {
    let value = if value.is_empty() { "-" } else { value };
    println!("    {} {}", format!("{label:<14}").dimmed(), value.bright_white());
}

pub fn print_dim(msg: &str) {
    println!("  {}", msg.dimmed());
}
