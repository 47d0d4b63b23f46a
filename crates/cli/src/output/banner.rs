use colored::Colorize;

const LOGO: &[&str] = &[
    r" __      __           _          ",
    r" \ \    / /_ _ _ _ __| |___ _ _  ",
    r"  \ \/\/ / _` | '_/ _` / -_) ' \ ",
    r"   \_/\_/\__,_|_| \__,_\___|_||_|",
];

const TAGLINE: &str = "  syscall detection rule admin";

pub fn print_version_block(version: &str, target: &str, server: &str) {
    for line in LOGO {
        println!("{}", line.yellow().bold());
    }
    println!("{}", TAGLINE.dimmed());
    println!();
    println!("  {} {}", "Version".dimmed(), version.bright_yellow().bold());
    println!("  {} {}", " Target".dimmed(), target.bright_white());
    println!("  {} {}", " Server".dimmed(), server.bright_white());
    println!();
}
