fn main() {
    if let Err(err) = gramcheck::cli::main() {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }
}
