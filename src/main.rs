#[macro_use]
extern crate log;

mod config;

use config::Config;
use mask_core::{Cpu, Image, ImageError, Trap};

use thiserror::Error;

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

#[derive(Error, Debug)]
enum Error {
    #[error("{0}")]
    Image(#[from] ImageError),

    #[error("{0}")]
    Trap(#[from] Trap),
}

fn main() -> ExitCode {
    let (config, config_error) = Config::load();

    env_logger::Builder::new()
        .format(|f, record| {
            writeln!(f, "{}: {}", record.level(), record.args())
        })
        .filter(None, config.log_level())
        .parse_default_env()
        .init();

    if let Some(error) = config_error {
        warn!("{}", error);
    }

    let mut args = env::args().skip(1);
    let path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => {
            eprintln!("usage: maskine <program>");
            return ExitCode::FAILURE;
        }
    };

    match run(Path::new(&path), &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(path: &Path, config: &Config) -> Result<(), Error> {
    let image = Image::from_file(path)?;
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    if config.flush_output {
        Cpu::new(&image, stdin, Unbuffered(stdout)).run()?;
    } else {
        Cpu::new(&image, stdin, stdout).run()?;
    }

    Ok(())
}

/// Writer that flushes after every write, for programs that prompt without a newline.
struct Unbuffered<W>(W);

impl<W: Write> Write for Unbuffered<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.0.write(buf)?;
        self.0.flush()?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
