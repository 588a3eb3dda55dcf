fn main() {
    if let Err(e) = shiptrack_cli::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
