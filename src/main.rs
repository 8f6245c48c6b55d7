fn main() {
    opsbench::app::cli::run();
}
