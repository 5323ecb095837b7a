//! Maraca CLI

use maracac::commands::run_format;

fn main() {
    maracac::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "fmt" => {
            let code = run_format(&args[2..]);
            if code != 0 {
                std::process::exit(code);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("maraca {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Maraca tooling");
    println!();
    println!("Usage: maraca <command> [options]");
    println!();
    println!("Commands:");
    println!("  fmt [paths...]       Format Maraca source files");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Format options:");
    println!("  --check             Check if files are formatted (exit 1 if not)");
    println!("  --diff              Show diff output instead of modifying files");
    println!("  --stdin             Read from stdin, write to stdout");
    println!("  --width=<n>         Target line width (default: 80)");
    println!("  --tab-width=<n>     Spaces per indentation level (default: 2)");
    println!();
    println!("Examples:");
    println!("  maraca fmt                      # Format all files");
    println!("  maraca fmt --check              # Check formatting (for CI)");
    println!("  maraca fmt --width=100 app.ma   # Format one file at width 100");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=maraca_fmt=trace) for debug logging.");
}
