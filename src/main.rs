use photomata::cli::Cli;

fn main() {
    Cli::run();
}
