use bandwatch::{BandRunner, BandwatchConfig, DEFAULT_CONFIG_PATH, logging};
use bandwatch_shared::MarketDataType;
use bandwatch_source::csv_market_data_stream;
use clap::Parser;
use eyre::{Result, WrapErr, eyre};
use std::{fs::File, io, path::PathBuf};
use tracing::info;

/// 对行情 CSV 计算布林带
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 输入 CSV，覆盖配置中的 input_path
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输出 CSV，覆盖配置中的 output_path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 输入数据类型: quote | trade | bar
    #[arg(short, long)]
    kind: Option<MarketDataType>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = BandwatchConfig::load_from(&args.config)?;

    if let Some(input) = args.input {
        config.input_path = Some(input);
    }
    if let Some(output) = args.output {
        config.output_path = Some(output);
    }
    if let Some(kind) = args.kind {
        config.data_kind = kind;
    }

    logging::init_tracing(&config.log_level)?;

    let input_path = config
        .input_path
        .as_ref()
        .ok_or_else(|| eyre!("No input file, set input_path or pass --input"))?;
    info!(input = %input_path.display(), kind = %config.data_kind, "starting");

    let stream = csv_market_data_stream(input_path, config.data_kind).await?;

    let sink: Box<dyn io::Write> = match &config.output_path {
        Some(path) => Box::new(
            File::create(path)
                .wrap_err_with(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);

    let mut runner = BandRunner::new(&config.indicator)?;
    runner.run(stream, &mut writer).await?;

    Ok(())
}
