use std::{fs, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::{
    config::AbiProfile,
    driver::parse_headers,
    model::{Endian, print_model, unpack},
    util::write_file,
};

#[derive(Parser)]
#[command(author, version, about = "C struct layout parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Parse header files and emit the laid-out type model
    Parse {
        /// Header file or directory of headers
        path: String,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        #[command(flatten)]
        abi: AbiArgs,
    },
    /// Decode a binary file as a named struct type
    Unpack {
        /// Header file or directory of headers
        path: String,

        /// Struct type to decode the data as
        root: String,

        /// Binary data file
        data: String,

        /// Decode multi-byte values as big-endian
        #[arg(long)]
        big_endian: bool,

        #[command(flatten)]
        abi: AbiArgs,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// ABI profile selection. A profile file is applied first, individual
/// flags override it.
#[derive(Args)]
struct AbiArgs {
    /// TOML file with ABI profile settings
    #[arg(long)]
    profile: Option<String>,

    /// Pointer width in bits (32 or 64)
    #[arg(long)]
    pointer_width: Option<u32>,

    /// Size of long in bytes (4 or 8)
    #[arg(long)]
    long_width: Option<u32>,

    /// Treat plain char as unsigned
    #[arg(long)]
    unsigned_char: bool,
}

impl AbiArgs {
    fn resolve(&self) -> Result<AbiProfile, String> {
        let mut profile = match &self.profile {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|err| format!("failed to read '{}': {}", path, err))?;
                AbiProfile::from_toml(&text)?
            }
            None => AbiProfile::default(),
        };

        if let Some(width) = self.pointer_width {
            profile.pointer_width = width;
        }
        if let Some(width) = self.long_width {
            profile.long_width = width;
        }
        if self.unsigned_char {
            profile.char_signed = false;
        }

        profile.validate()?;
        Ok(profile)
    }
}

pub fn run() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help().unwrap();
        return;
    };

    if let Err(err) = run_command(command) {
        println!("{}", err);
        exit(1);
    }
}

fn run_command(command: Command) -> Result<(), String> {
    match command {
        Command::Parse {
            path,
            format,
            pretty,
            output,
            abi,
        } => {
            let profile = abi.resolve()?;
            let model = parse_headers(&path, &profile)?;

            let text = match format {
                Format::Json => model.to_json(pretty)?,
                Format::Text => print_model(&model),
            };

            match output {
                Some(file) => write_file(&file, &text),
                None => {
                    println!("{}", text);
                    Ok(())
                }
            }
        }
        Command::Unpack {
            path,
            root,
            data,
            big_endian,
            abi,
        } => {
            let profile = abi.resolve()?;
            let model = parse_headers(&path, &profile)?;

            let bytes =
                fs::read(&data).map_err(|err| format!("failed to read '{}': {}", data, err))?;

            let endian = if big_endian {
                Endian::Big
            } else {
                Endian::Little
            };

            let value = unpack(&model, &root, &bytes, endian)?;
            let json = serde_json::to_string_pretty(&value)
                .map_err(|err| format!("failed to serialize value: {}", err))?;

            println!("{}", json);
            Ok(())
        }
    }
}
