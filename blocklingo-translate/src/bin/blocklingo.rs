use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use blocklingo::load_all_vocabularies_from_dir;
use blocklingo_translate::{Direction, MappingTable, Pipeline, Strategy};
use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let matches = Command::new("blocklingo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate Scratch block notation between languages")
        .arg(
            Arg::new("file")
                .help("File with block notation to translate (default: stdin)")
                .index(1),
        )
        .arg(
            Arg::new("direction")
                .long("direction")
                .short('d')
                .help("Translation direction, e.g. en-to-ja")
                .required(true),
        )
        .arg(
            Arg::new("locales")
                .long("locales")
                .short('l')
                .help("Directory of vocabulary files")
                .default_value("data/locales"),
        )
        .arg(
            Arg::new("dropdowns")
                .long("dropdowns")
                .help("Dropdown mapping file")
                .default_value("data/dropdown_map.json"),
        )
        .arg(
            Arg::new("mapping")
                .long("mapping")
                .help("Direction the dropdown mapping file is written in")
                .default_value("en-to-ja"),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .short('s')
                .help("Dropdown substitution strategy: tree or pattern")
                .default_value("tree"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show detailed translation process")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Arguments with defaults or `required` are always present
    let arg = |name: &str| matches.get_one::<String>(name).map(String::as_str).unwrap_or_default();

    let direction: Direction = arg("direction").parse()?;
    let mapping_direction: Direction = arg("mapping").parse()?;
    let strategy: Strategy = arg("strategy").parse()?;

    let vocabularies = load_all_vocabularies_from_dir(Path::new(arg("locales")))?;
    let table = MappingTable::from_file(Path::new(arg("dropdowns")), &mapping_direction)?;

    let source = match matches.get_one::<String>("file").map(String::as_str) {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        Some(path) => fs::read_to_string(path)?,
    };

    let translator = strategy.translator();
    let pipeline = Pipeline::new(&vocabularies, &table, translator.as_ref());
    match pipeline.translate(&source, &direction) {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            eprintln!("❌ Translation failed: {}", failure);
            println!("{}", failure.fallback);
            Ok(ExitCode::FAILURE)
        }
    }
}
