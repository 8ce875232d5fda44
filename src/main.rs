fn main() {
    olx_utils::app::cli::run();
}
