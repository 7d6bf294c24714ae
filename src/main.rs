fn main() {
    if let Err(err) = series_filter::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
