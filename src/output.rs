use colored::Colorize;
use serde::Serialize;

/// Serialize `data` to stdout. Anything other than `json`/`yaml` falls back to pretty JSON.
pub fn output_data<T: Serialize>(data: &T, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "yaml" => {
            print!("{}", serde_yaml::to_string(data)?);
        }
        "json" | _ => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "ok".green().bold(), message);
}

/// Fatal errors go to stderr so stdout stays a clean report.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "!!".yellow().bold(), message.yellow());
}

pub fn print_info(message: &str) {
    println!("{} {}", "--".cyan(), message);
}
