use anyhow::Result;
use clap::Parser;
use memleak::alloc::SystemAllocator;
use memleak::cli::Cli;
use memleak::engine::{self, Engine, Outcome};
use memleak::{logs, native, utils};
use std::io;
use std::panic;
use std::process;

const EXIT_FAILURE: i32 = 1;

fn main() {
    logs::init();
    let code = match panic::catch_unwind(main_) {
        Ok(Ok(code)) => code,
        Ok(Err(e)) => {
            utils::report_failure(&e);
            EXIT_FAILURE
        }
        Err(e) => {
            utils::report_panic(&*e);
            EXIT_FAILURE
        }
    };
    process::exit(code);
}

fn main_() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprint!("{}", err);
            return Ok(EXIT_FAILURE);
        }
    };
    if cli.help {
        eprint!("{}", Cli::usage());
        return Ok(EXIT_FAILURE);
    }

    let config = cli.into_config()?;
    if let Some(bytes) = config.address_space_limit {
        native::limit_address_space(bytes)?;
    }
    log::info!(
        "eating memory in chunks of {} bytes, up to {} bytes",
        config.chunk_size,
        config.byte_limit
    );

    // Grabbing stdout now sets up its buffer before memory runs out.
    let stdout = io::stdout();
    let mut engine = Engine::new(&config, SystemAllocator, stdout.lock());

    match engine.run()? {
        Outcome::Exhausted => Ok(native::EXIT_OUT_OF_MEMORY),
        Outcome::LimitReached => Ok(0),
        Outcome::Hold => engine::hold(),
    }
}
