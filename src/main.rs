fn main() {
    toklint_cli::init(vec![], &format!("toklint {}", env!("CARGO_PKG_VERSION")));
}
