use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pkts_codegen::byte_literal::{self, Boundary};
use pkts_codegen::config::{CodegenConfig, Generator, GeneratorConfig};
use pkts_codegen::{file_text, generate, utils};

#[derive(Debug, Parser)]
#[command(name = "pkts-codegen", version, about = "Generate the pkts-3gppitu java sources")]
struct Cli {
    /// Configuration file, `codegen.toml` in the working directory by default.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not print the loaded records and the generated source.
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate ReferencePoint.java from the 3GPP/ITU interface table.
    ReferencePoints(Paths),
    /// Generate Gtp2InformationElements.java from the GTPv2 IE table.
    Gtpv2Ies(Paths),
    /// Print a hex string as a java byte array declaration.
    ByteLiteral {
        hex: String,
        name: String,
        /// Place the terminator like the older generator did.
        #[arg(long)]
        legacy_boundary: bool,
    },
}

/// Overrides of the configured paths.
#[derive(Debug, Args)]
struct Paths {
    #[arg(short = 'i', long)]
    table: Option<PathBuf>,
    #[arg(short, long)]
    template: Option<PathBuf>,
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Paths {
    fn apply(self, config: &GeneratorConfig) -> GeneratorConfig {
        GeneratorConfig {
            table: self.table.unwrap_or_else(|| config.table.clone()),
            template: self.template.unwrap_or_else(|| config.template.clone()),
            output: self.output.unwrap_or_else(|| config.output.clone()),
        }
    }
}

// A helper that will write an "error" line followed by the message.
fn exit_with_error(msg: &dyn std::fmt::Display) -> ! {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "error\n{msg}");
    std::process::exit(1);
}

// The driver function that runs a table generator.
fn run_generator(generator: Generator, config: GeneratorConfig, quiet: bool) {
    // Prepare the table text.
    let table = match file_text::FileText::new(&config.table) {
        Ok(table) => table,
        Err(e) => exit_with_error(&format!("{}: {e}", config.table.display())),
    };

    let mut stdout = std::io::stdout().lock();
    let echo: Option<&mut dyn Write> = if quiet { None } else { Some(&mut stdout) };

    match generate::generate(generator, &table, &config, echo) {
        Ok(count) => info!(count, output = %config.output.display(), "generation done"),
        Err(err) => {
            let _ = utils::render_error(&table, err, &mut std::io::stderr());
            std::process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pkts_codegen=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let load_config = || match CodegenConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with_error(&e),
    };

    match cli.command {
        Command::ReferencePoints(paths) => {
            let generator = Generator::ReferencePoints;
            let config = paths.apply(load_config().generator(generator));
            run_generator(generator, config, cli.quiet);
        }
        Command::Gtpv2Ies(paths) => {
            let generator = Generator::Gtpv2InformationElements;
            let config = paths.apply(load_config().generator(generator));
            run_generator(generator, config, cli.quiet);
        }
        Command::ByteLiteral {
            hex,
            name,
            legacy_boundary,
        } => {
            let boundary = if legacy_boundary {
                Boundary::Legacy
            } else {
                Boundary::Exact
            };
            match byte_literal::format_byte_literal(&hex, &name, boundary) {
                Ok(literal) => print!("{literal}"),
                Err(e) => exit_with_error(&utils::Error::from(e)),
            }
        }
    }
}
