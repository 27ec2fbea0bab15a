fn main() {
    if let Err(err) = repoflat::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
