use serde::Serialize;
use std::io::{Read, Write};
use svgflat::{ConvertOptions, Conversion, Scene, Warning};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    MissingInput,
    Io(std::io::Error),
    Convert(svgflat::Error),
    Json(serde_json::Error),
    Warnings(usize),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::MissingInput => write!(f, "No filename given\n\n{}", usage()),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Convert(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Warnings(n) => write!(f, "{n} warning(s) while converting (--strict)"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<svgflat::Error> for CliError {
    fn from(value: svgflat::Error) -> Self {
        Self::Convert(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    compact: bool,
    strict: bool,
    with_warnings: bool,
}

#[derive(Serialize)]
struct WithWarnings<'a> {
    scene: &'a Scene,
    warnings: &'a [Warning],
}

fn usage() -> &'static str {
    "svgflat\n\
\n\
USAGE:\n\
  svgflat [--compact] [--strict] [--warnings-json] <path>|-\n\
\n\
NOTES:\n\
  - Prints the flattened scene as JSON (indented unless --compact).\n\
  - '-' reads the SVG document from stdin.\n\
  - --warnings-json prints {\"scene\": ..., \"warnings\": [...]} instead of the bare scene.\n\
  - --strict exits with status 3 when any element could not be converted.\n\
  - Warnings are logged to stderr; set RUST_LOG to change verbosity.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--compact" => args.compact = true,
            "--strict" => args.strict = true,
            "--warnings-json" => args.with_warnings = true,
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.input.is_none() {
        return Err(CliError::MissingInput);
    }
    Ok(args)
}

fn read_input(input: &str) -> Result<String, CliError> {
    match input {
        "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        path => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, compact: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if compact {
        serde_json::to_writer(&mut stdout, value)?;
    } else {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let input = args.input.as_deref().unwrap_or("-");
    let text = read_input(input)?;
    let Conversion { scene, warnings } = svgflat::convert_str(&text, &ConvertOptions::default())?;
    tracing::debug!(
        input,
        elements = scene.children().len(),
        warnings = warnings.len(),
        "converted"
    );

    if args.with_warnings {
        write_json(
            &WithWarnings {
                scene: &scene,
                warnings: &warnings,
            },
            args.compact,
        )?;
    } else {
        write_json(&scene, args.compact)?;
    }

    if args.strict && !warnings.is_empty() {
        return Err(CliError::Warnings(warnings.len()));
    }
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err @ (CliError::Usage(_) | CliError::MissingInput)) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Warnings(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
