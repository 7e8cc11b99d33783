//! Convert a GEDCOM file from stdin to JSON on stdout.
//!
//! Pass `--pretty` for human readable output.

use std::error;
use std::io::{self, BufWriter, Read, Write};

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    let pretty = match args.get(1).map(String::as_str) {
        None => false,
        Some("--pretty") => true,
        Some(other) => {
            eprintln!("Usage: {} [--pretty] < archive.ged", args[0]);
            eprintln!("Error: unrecognized argument '{}'", other);
            std::process::exit(1);
        }
    };

    let mut data = Vec::new();
    io::stdin().read_to_end(&mut data)?;
    let doc = ahnen::Document::from_slice(&data)?;

    let options = ahnen::json::JsonOptions::new().with_prettyprint(pretty);
    let mut writer = BufWriter::new(io::stdout().lock());
    doc.json().with_options(options).to_writer(&mut writer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}
