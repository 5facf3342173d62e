use std::path::PathBuf;

use chn_convert::{
    format_diagnostic, ConversionPipeline, ConvertConfig, DEFAULT_INPUT, DEFAULT_OUTPUT,
};
use clap::Parser;
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(
    name = "chn-convert",
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert a Canberra acquisition report into a CHN spectrum file",
    long_about = None,
)]
struct Cli {
    /// Текстовый отчёт о наборе
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Путь к выходному CHN файлу
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Описание детектора в футере (до 63 байт)
    #[arg(long)]
    detector: Option<String>,
    /// Описание образца в футере (до 63 байт)
    #[arg(long)]
    sample: Option<String>,
    /// Перечитать и сверить записанный файл
    #[arg(long)]
    verify: bool,
    /// Тихий режим (только ошибки)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
    /// Подробный журнал разбора
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Error,
        (_, true) => LevelFilter::Debug,
        _ => LevelFilter::Info,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let config = ConvertConfig {
        input_path: cli.input,
        output_path: cli.output,
        detector_description: cli.detector,
        sample_description: cli.sample,
        verify: cli.verify,
    };

    match ConversionPipeline::new(config).run() {
        Ok(summary) => {
            info!("\n{summary}");
        }
        Err(e) => {
            eprintln!("{}", format_diagnostic(std::env::args_os().next(), &e));
            std::process::exit(1);
        }
    }
}
