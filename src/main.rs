//! gb - gitbridge command-line entry point

use gitbridge::ui::output;

fn main() {
    if let Err(err) = gitbridge::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
