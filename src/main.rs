use clap::Parser;

use options_matrix::{cli, list_symbols, logging, schema, validate, view};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        cli::Command::Validate { file, schema } => validate::run(&file, schema.variant()),
        cli::Command::Symbols { file, schema } => list_symbols::run(&file, schema.variant()),
        cli::Command::Matrix(args) => view::run(&args),
        cli::Command::Schema => schema::run(),
    }
}
