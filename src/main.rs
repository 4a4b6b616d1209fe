use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use claimform_pdf::{ClaimForm, Document, Error, PageSetup, PageSize};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputKind {
    /// Typed claim session (client, insurance, damage, ...)
    Session,
    /// Raw ordered map of section name to {label: value}
    Sections,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PageSizeArg {
    A4,
    Letter,
}

#[derive(Parser)]
#[command(version, about = "Render an insurance claim form to PDF")]
struct Args {
    /// JSON input file
    input: PathBuf,

    /// Output PDF path
    #[arg(short, long, default_value = Document::FILE_NAME)]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = InputKind::Session)]
    input_kind: InputKind,

    /// Page size (defaults to CLAIMFORM_PAGE_SIZE, then A4)
    #[arg(long, value_enum)]
    page_size: Option<PageSizeArg>,

    /// Refuse to render a session with validation findings
    #[arg(long)]
    strict: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_form(args: &Args) -> Result<ClaimForm, Error> {
    let json = std::fs::read_to_string(&args.input).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, args.input.display()),
        ))
    })?;

    match args.input_kind {
        InputKind::Sections => claimform_pdf::parse_claim_form(&json),
        InputKind::Session => {
            let mut session = claimform_pdf::parse_claim_session(&json)?;
            if session.authorization.claim_date.is_none() {
                session.authorization.claim_date = Some(chrono::Local::now().date_naive());
            }

            let findings = claimform_pdf::validate::validate(&session);
            for finding in &findings {
                log::warn!("{finding}");
            }
            if args.strict && !findings.is_empty() {
                return Err(Error::Validation(findings));
            }

            session.into_claim_form()
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let size = match args.page_size {
        Some(PageSizeArg::A4) => PageSize::A4,
        Some(PageSizeArg::Letter) => PageSize::Letter,
        None => PageSize::from_env().unwrap_or_default(),
    };
    let setup = PageSetup::new(size);

    let form = load_form(args)?;
    let doc = claimform_pdf::write_claim_form_pdf(&form, &setup, &args.output)?;

    println!(
        "Wrote {} ({} pages, {})",
        args.output.display(),
        doc.page_count(),
        Document::MEDIA_TYPE
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
