use log::LevelFilter;
use sdfgen::image::{decode_image, encode_image, write_json_file, write_output, OutputFormat};
use sdfgen::{ChannelSelector, SdfError, SdfGenerator, SdfParams};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), SdfError> {
    let program = env::args().next().unwrap_or_else(|| "sdfgen".to_string());
    let config = parse_args(&program).map_err(SdfError::InvalidArguments)?;

    env_logger::Builder::from_default_env()
        .filter_level(config.log_level)
        .init();

    let decoded = decode_image(&config.input)?;

    let params = SdfParams {
        channel: if config.use_luminance {
            ChannelSelector::Luminance
        } else {
            ChannelSelector::Alpha
        },
        invert: config.invert,
        spread: config.spread,
        asymmetric: config.asymmetric,
        ..Default::default()
    };
    let generator = SdfGenerator::new(params);
    let report = generator.process_with_diagnostics(&decoded.as_view())?;

    // Encode fully in memory first so a failed encode never leaves a
    // partial file behind.
    let bytes = encode_image(&report.image, config.format, config.quality)?;
    write_output(&config.output, &bytes)?;

    if let Some(path) = &config.report_out {
        write_json_file(path, &report.trace)?;
    }

    Ok(())
}

struct CliConfig {
    input: String,
    output: String,
    format: OutputFormat,
    spread: u32,
    quality: u8,
    invert: bool,
    use_luminance: bool,
    asymmetric: bool,
    report_out: Option<PathBuf>,
    log_level: LevelFilter,
}

fn parse_args(program: &str) -> Result<CliConfig, String> {
    let mut args = env::args().skip(1);
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut format: Option<OutputFormat> = None;
    let mut spread = 4u32;
    let mut quality = 100u8;
    let mut invert = false;
    let mut use_luminance = false;
    let mut asymmetric = false;
    let mut report_out: Option<PathBuf> = None;
    let mut log_level = LevelFilter::Error;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage(program));
                std::process::exit(0);
            }
            "--input" | "-i" => {
                input = Some(
                    args.next()
                        .ok_or_else(|| format!("--input expects a value\n{}", usage(program)))?,
                );
            }
            "--output" | "-o" => {
                output = Some(
                    args.next()
                        .ok_or_else(|| format!("--output expects a value\n{}", usage(program)))?,
                );
            }
            "--filetype" | "-f" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--filetype expects a value\n{}", usage(program)))?;
                format = Some(OutputFormat::parse(&value).ok_or_else(|| {
                    format!("Unknown filetype '{value}'. Use png|jpeg|tga|bmp.")
                })?);
            }
            "--spread" | "-s" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--spread expects a value\n{}", usage(program)))?;
                spread = value
                    .parse()
                    .ok()
                    .filter(|&s| s > 0)
                    .ok_or_else(|| {
                        format!("Invalid spread '{value}'. Must be a positive integer.")
                    })?;
            }
            "--quality" | "-q" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--quality expects a value\n{}", usage(program)))?;
                quality = value
                    .parse()
                    .ok()
                    .filter(|q| (1..=100).contains(q))
                    .ok_or_else(|| format!("Invalid quality '{value}'. Must be in 1..=100."))?;
            }
            "--invert" | "-n" => invert = true,
            "--luminance" | "-l" => use_luminance = true,
            "--asymmetric" | "-a" => asymmetric = true,
            "--report" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--report expects a path\n{}", usage(program)))?;
                report_out = Some(PathBuf::from(value));
            }
            "--log-level" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--log-level expects a value\n{}", usage(program)))?;
                log_level = parse_log_level(&value)?;
            }
            _ => {
                return Err(format!("Unknown option '{arg}'\n{}", usage(program)));
            }
        }
    }

    let input = input.ok_or_else(|| format!("No input file specified.\n{}", usage(program)))?;
    let output = output.ok_or_else(|| format!("No output file specified.\n{}", usage(program)))?;
    // No extension to look at when writing to stdout; the inference falls
    // back to PNG there.
    let format = format.unwrap_or_else(|| OutputFormat::from_path(&output));

    Ok(CliConfig {
        input,
        output,
        format,
        spread,
        quality,
        invert,
        use_luminance,
        asymmetric,
        report_out,
        log_level,
    })
}

fn parse_log_level(value: &str) -> Result<LevelFilter, String> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" => Ok(LevelFilter::Off),
        other => Err(format!(
            "Unknown log level '{other}'. Use trace|debug|info|warn|error|off."
        )),
    }
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} -i file -o file [-s n] [-q n] [-f type] [-a] [-l] [-n] \\\n         [--report report.json] [--log-level level]\n\n\
Renders a signed distance field from a raster image.\n\
  -i, --input file    Input filename. Specify \"-\" to read from stdin.\n\
  -o, --output file   Output filename. Specify \"-\" to write to stdout.\n\
  -s, --spread n      Spread radius in pixels for mapping distance to brightness (default 4).\n\
  -q, --quality n     Output quality from 1 to 100; only used for JPEG (default 100).\n\
  -f, --filetype type png, jpeg, tga or bmp. Derived from the output filename if no\n\
                      override is given; falls back to png.\n\
  -a, --asymmetric    Map [0,S] to [0,255] instead of [-S,+S].\n\
  -l, --luminance     Threshold the luminance channel instead of alpha.\n\
  -n, --invert        Count values below middle grey as inside.\n\
      --report file   Write a JSON report with per-stage timings.\n\
      --log-level lvl trace, debug, info, warn, error or off (default error).\n\n\
Examples:\n  {program} -i glyph.png -o glyph_sdf.png -s 8\n  cat in.png | {program} -i - -o - -f png > out.png\n"
    )
}
