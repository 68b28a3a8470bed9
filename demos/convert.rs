use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use das_contract::{parse_contract_reader, Error};
use tracing_subscriber::EnvFilter;

const SUPPORTED_EXTENSIONS: [&str; 2] = ["dascontract", "xml"];

fn main() -> Result<(), Error> {
    // Log to stderr, filtered by RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Read the input file from the command line arguments
    let input_file = std::env::args().nth(1).ok_or(Error::NoInputFile)?;
    let extension = Path::new(&input_file)
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension) {
        return Err(Error::UnsupportedFileExt);
    }

    // Open the file and parse the contract
    let file = File::open(&input_file).map(BufReader::new)?;
    let contract = parse_contract_reader(file)?;

    // Print the contract as JSON for the code generator
    let json = serde_json::to_string_pretty(&contract).map_err(std::io::Error::from)?;
    println!("{}", json);

    Ok(())
}
