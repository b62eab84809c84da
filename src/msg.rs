use colored::Colorize;

/// Print a success message with a green checkmark.
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a warning with a yellow bang.
pub fn warn(message: &str) {
    println!("{} {}", "!".yellow(), message);
}

