use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use docbridge::logging::init_logging;
use docbridge::{ConversionRequest, ConvertError, Dispatcher, PdfTextStrategy, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Convert documents between formats (doc, docx, pdf, html, txt)
#[derive(Parser, Debug)]
#[command(name = "docbridge", version, about)]
struct Cli {
    /// Source document; its extension selects the input format
    #[arg(required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Destination file; its extension selects the output format
    #[arg(required_unless_present = "list")]
    output: Option<PathBuf>,

    /// Print every supported conversion and exit
    #[arg(long)]
    list: bool,

    /// Print the listing as JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How text is recovered from PDFs when writing DOCX
    #[arg(long, value_enum)]
    pdf_strategy: Option<StrategyArg>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Auto,
    Extract,
    Ocr,
}

impl From<StrategyArg> for PdfTextStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => PdfTextStrategy::Auto,
            StrategyArg::Extract => PdfTextStrategy::Extract,
            StrategyArg::Ocr => PdfTextStrategy::Ocr,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let kind = e
                .downcast_ref::<ConvertError>()
                .map(|err| err.kind().as_str())
                .unwrap_or("error");
            eprintln!("error[{}]: {:#}", kind, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    }
    if let Some(strategy) = cli.pdf_strategy {
        settings.pdf.strategy = strategy.into();
    }
    init_logging(&settings.logging);

    let dispatcher = Dispatcher::with_builtin(settings);

    if cli.list {
        return print_conversions(&dispatcher, cli.json);
    }

    let (Some(input), Some(output)) = (cli.input, cli.output) else {
        anyhow::bail!("both INPUT and OUTPUT are required");
    };

    let start = Instant::now();
    let request = ConversionRequest::from_paths(&input, &output)?;
    dispatcher.convert(&request)?;

    println!("Converted: {} -> {}", input.display(), output.display());
    tracing::debug!("Finished in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn print_conversions(dispatcher: &Dispatcher, json: bool) -> Result<()> {
    let conversions = dispatcher.supported_conversions();

    if json {
        let rendered =
            serde_json::to_string_pretty(&conversions).context("Failed to render listing")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Supported conversions:");
    for (input, outputs) in &conversions {
        let outputs: Vec<&str> = outputs.iter().map(|o| o.as_str()).collect();
        println!("  {:<6} -> {}", input, outputs.join(", "));
    }
    Ok(())
}
