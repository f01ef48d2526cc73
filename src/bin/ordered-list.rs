use std::fs::File;
use std::io::{self, BufReader};

use clap::Parser;
use tracing::info;

use ordered_list::config::Config;
use ordered_list::error::Result;
use ordered_list::menu::{Menu, Script, Terminal};

fn main() -> Result<()> {
    let config = Config::parse();
    config.init_tracing();

    let mut menu = Menu::new(io::stdout()).quiet(config.quiet);
    match &config.script {
        Some(path) => {
            info!(path = %path.display(), "running script");
            let file = File::open(path)?;
            menu.run(&mut Script::new(BufReader::new(file)))?;
        }
        None => menu.run(&mut Terminal::new()?)?,
    }

    Ok(())
}
