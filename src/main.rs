fn main() {
    shotframe::app::cli::run();
}
