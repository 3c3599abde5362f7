fn main() {
    if let Err(e) = relaychat::cli::main() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
