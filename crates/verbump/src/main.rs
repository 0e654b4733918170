use clap::Parser;

use crate::cli::App;

mod cli;
mod config;
mod logging;

fn main() -> anyhow::Result<()> {
    let app = App::parse();
    logging::init(app.verbose);
    app.run()
}
