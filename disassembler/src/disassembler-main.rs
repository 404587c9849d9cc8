#[macro_use]
extern crate log;

use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process;

use clap::{Arg, App, ArgMatches};
use log::LevelFilter;

use dasm86::config::Config;
use dasm86::cpu::Decoder;

const VERSION: &str = "0.1";

fn main() {
    let matches = App::new("dasm86-disasm")
            .version(VERSION)
            .about("Disassembles raw 8086 machine code into a NASM listing")
            .arg(Arg::with_name("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1))
            .arg(Arg::with_name("OUTPUT")
                .help("Sets the output file, stdout if omitted")
                .index(2))
            .arg(Arg::with_name("CONFIG")
                .help("Reads listing settings from a toml file")
                .takes_value(true)
                .long("config"))
            .arg(Arg::with_name("ANNOTATE")
                .help("Shows offset and raw bytes of each instruction")
                .long("annotate"))
            .arg(Arg::with_name("VERBOSE")
                .help("Enables debug output")
                .short("v")
                .long("verbose"))
            .get_matches();

    let mut logger = colog::default_builder();
    if matches.is_present("VERBOSE") {
        logger.filter(None, LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let mut config = match matches.value_of("CONFIG") {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if matches.is_present("ANNOTATE") {
        config.annotate = true;
    }

    let filename = matches.value_of("INPUT").unwrap_or_default();
    info!("dasm86-disasm {} - {}", VERSION, filename);

    let input = BufReader::new(File::open(filename)?);
    let mut decoder = Decoder::with_config(input, &config);
    let decoded = decoder.decode();

    // the partial listing is written even when decoding failed
    let listing = decoder.listing().configure(&config);
    match matches.value_of("OUTPUT") {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            listing.write_to(&mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            listing.write_to(&mut out)?;
        }
    }

    decoded?;
    Ok(())
}
