use clap::Parser;
use log::{error, info};
use std::process;
use usprobe_core::classify::{AmbiguityResolver, AnswerFileResolver, FixedResolver, PromptResolver};
use usprobe_core::cli::Cli;
use usprobe_core::image::{ConsoleViewer, NullViewer};
use usprobe_core::{Annotator, BatchReport, Result, Viewer};

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    // Verify directory exists
    if !cli.directory.is_dir() {
        eprintln!("Error: {} is not a valid directory.", cli.directory.display());
        process::exit(1);
    }

    let mut resolver = match build_resolver(&cli) {
        Ok(resolver) => resolver,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut viewer: Box<dyn Viewer> = if cli.no_display {
        Box::new(NullViewer)
    } else {
        Box::new(ConsoleViewer::stdio().pausing(cli.pause))
    };

    info!("Processing directory: {}", cli.directory.display());

    let summary = match Annotator::new(cli.options(), resolver.as_mut(), viewer.as_mut())
        .run(&cli.directory)
    {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if summary.is_empty() {
        println!("No DICOM files found in the directory.");
        return;
    }

    println!("{}", BatchReport::new(&summary));
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn build_resolver(cli: &Cli) -> Result<Box<dyn AmbiguityResolver>> {
    let base: Box<dyn AmbiguityResolver> = match cli.ambiguous.fixed_label() {
        Some(label) => Box::new(FixedResolver::new(label)),
        None => Box::new(PromptResolver::stdio()),
    };

    match &cli.answers {
        Some(path) => {
            let resolver = AnswerFileResolver::load(path, base)?;
            info!("Loaded {} answers from {}", resolver.len(), path.display());
            Ok(Box::new(resolver))
        }
        None => Ok(base),
    }
}
