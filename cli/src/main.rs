//! resumeforge CLI - resume rendering and export tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resumeforge::{
    available_formats, export_all, export_resume, get_template, list_templates, render,
    ExportFormat, ExportOptions, ExportReport, JsonFormat, PresentMarker, ResumeDocument,
    SystemProbe, TextOptions,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "resumeforge")]
#[command(version)]
#[command(about = "Render resumes to text, HTML, DOCX, and PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a resume to one format
    Export {
        /// Resume JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the input name with the format's extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format (inferred from the output extension if omitted)
        #[arg(short, long, value_enum, env = "RESUMEFORGE_FORMAT")]
        format: Option<FormatArg>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Export a resume to every available format
    All {
        /// Resume JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", env = "RESUMEFORGE_OUTPUT_DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// List available templates
    Templates {
        /// Print template definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which export formats this build supports
    Formats {
        /// Print availability as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the rendered intermediate document as JSON
    Inspect {
        /// Resume JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show version information
    Version,
}

/// Options shared by every command that renders.
#[derive(Args)]
struct RenderArgs {
    /// Template id (defaults to the one stored in the resume)
    #[arg(short, long, env = "RESUMEFORGE_TEMPLATE")]
    template: Option<String>,

    /// Request the dark color scheme
    #[arg(long, env = "RESUMEFORGE_DARK")]
    dark: bool,

    /// URL to encode as a QR code
    #[arg(long, value_name = "URL", conflicts_with = "qr_from_profile")]
    qr: Option<String>,

    /// Encode the preferred profile link (LinkedIn first) as a QR code
    #[arg(long)]
    qr_from_profile: bool,

    /// Date used for ongoing periods and document metadata (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", env = "RESUMEFORGE_AS_OF", value_parser = parse_date)]
    as_of: Option<NaiveDate>,

    /// How ongoing periods are shown
    #[arg(long, value_enum, default_value = "literal", env = "RESUMEFORGE_PRESENT")]
    present: PresentArg,

    /// Prefix for bullet lines in text output
    #[arg(long, default_value = "", env = "RESUMEFORGE_BULLET_PREFIX")]
    bullet_prefix: String,

    /// Wrap text output at this width (0 = no wrap)
    #[arg(long, default_value = "0", env = "RESUMEFORGE_WRAP")]
    wrap: usize,
}

impl RenderArgs {
    /// Apply presentation overrides to the loaded resume.
    fn apply(&self, document: &mut ResumeDocument) {
        if let Some(template) = &self.template {
            document.options.template_id = template.clone();
        }
        if self.dark {
            document.options.dark_mode = true;
        }
        if let Some(qr) = &self.qr {
            document.options.qr_code_target = Some(qr.clone());
        } else if self.qr_from_profile {
            let options = std::mem::take(&mut document.options);
            document.options = options.qr_from_profile(&document.identity);
        }
    }

    fn export_options(&self) -> ExportOptions {
        let as_of = self
            .as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        ExportOptions::new(as_of)
            .with_present_marker(self.present.into())
            .with_text_options(
                TextOptions::new()
                    .with_bullet_prefix(self.bullet_prefix.clone())
                    .with_line_width(self.wrap),
            )
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Plain text
    Txt,
    /// Self-contained HTML
    Html,
    /// Word-processor document
    Docx,
    /// PDF
    Pdf,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => ExportFormat::Txt,
            FormatArg::Html => ExportFormat::Html,
            FormatArg::Docx => ExportFormat::Docx,
            FormatArg::Pdf => ExportFormat::Pdf,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PresentArg {
    /// The word "Present"
    Literal,
    /// The --as-of date
    AsOf,
}

impl From<PresentArg> for PresentMarker {
    fn from(arg: PresentArg) -> Self {
        match arg {
            PresentArg::Literal => PresentMarker::Literal,
            PresentArg::AsOf => PresentMarker::AsOfDate,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            input,
            output,
            format,
            render,
        } => cmd_export(&input, output.as_deref(), format, &render),
        Commands::All {
            input,
            output,
            render,
        } => cmd_all(&input, output.as_deref(), &render),
        Commands::Templates { json } => cmd_templates(json),
        Commands::Formats { json } => cmd_formats(json),
        Commands::Inspect {
            input,
            output,
            compact,
            render,
        } => cmd_inspect(&input, output.as_deref(), compact, &render),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_resume(input: &Path, args: &RenderArgs) -> Result<ResumeDocument, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)
        .map_err(|e| format!("Cannot read {}: {}", input.display(), e))?;
    let mut document = ResumeDocument::from_json(&json)?;
    args.apply(&mut document);
    log::debug!(
        "Loaded resume for '{}' (template '{}')",
        document.identity.name,
        document.options.template_id
    );
    Ok(document)
}

fn resolve_format(
    format: Option<FormatArg>,
    output: Option<&Path>,
) -> Result<ExportFormat, Box<dyn std::error::Error>> {
    if let Some(format) = format {
        return Ok(format.into());
    }
    output
        .and_then(|p| p.extension())
        .and_then(|ext| ExportFormat::from_extension(&ext.to_string_lossy()))
        .ok_or_else(|| "Cannot infer the format; pass --format".into())
}

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    format: Option<FormatArg>,
    args: &RenderArgs,
) -> CliResult {
    let format = resolve_format(format, output)?;
    let document = load_resume(input, args)?;
    let options = args.export_options();

    let output = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.with_extension(format.extension()));

    let report = export_resume(
        &document,
        &document.options.template_id,
        format,
        &output,
        &options,
    )?;

    println!("{} {}", "Saved to".green(), output.display());
    print_report(&report);
    Ok(())
}

fn cmd_all(input: &Path, output: Option<&Path>, args: &RenderArgs) -> CliResult {
    let document = load_resume(input, args)?;
    let options = args.export_options();

    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_resume", stem))
    });
    fs::create_dir_all(&output_dir)?;

    let formats: Vec<ExportFormat> = available_formats(&SystemProbe)
        .into_iter()
        .filter(|f| f.available)
        .map(|f| f.format)
        .collect();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!("Exporting {} formats...", formats.len()));

    let results = export_all(
        &document,
        &document.options.template_id,
        &formats,
        &output_dir,
        &options,
    );
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    let mut failures = 0;
    for (i, (format, result)) in results.iter().enumerate() {
        let branch = if i + 1 == results.len() { "└─" } else { "├─" };
        match result {
            Ok(report) => {
                let name = report
                    .path
                    .as_deref()
                    .and_then(Path::file_name)
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                println!("  {} {} ({} bytes)", branch.dimmed(), name, report.bytes_written);
            }
            Err(e) => {
                failures += 1;
                println!("  {} {} {}", branch.dimmed(), format, e.to_string().red());
            }
        }
    }

    if let Some(report) = results.iter().find_map(|(_, r)| r.as_ref().ok()) {
        print_degradations(report);
    }

    if failures > 0 {
        return Err(format!("{} of {} exports failed", failures, results.len()).into());
    }
    Ok(())
}

fn cmd_templates(json: bool) -> CliResult {
    let templates = list_templates();
    if json {
        println!("{}", serde_json::to_string_pretty(templates)?);
        return Ok(());
    }

    println!("{}", "Templates".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for template in templates {
        let mut flags = Vec::new();
        if template.capabilities.supports_dark_mode {
            flags.push("dark mode");
        }
        if template.capabilities.supports_embedded_image {
            flags.push("QR code");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!(
            "{:<12} {}{}",
            template.id.bold(),
            template.display_name,
            flags.dimmed()
        );
    }
    Ok(())
}

fn cmd_formats(json: bool) -> CliResult {
    let formats = available_formats(&SystemProbe);
    if json {
        println!("{}", serde_json::to_string_pretty(&formats)?);
        return Ok(());
    }

    println!("{}", "Export Formats".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for availability in formats {
        let status = match availability.missing {
            None => "available".green().to_string(),
            Some(capability) => format!(
                "missing {} (build with --features {})",
                capability,
                capability.cargo_feature()
            )
            .yellow()
            .to_string(),
        };
        println!("{:<6} {}", availability.format.to_string().bold(), status);
    }
    Ok(())
}

fn cmd_inspect(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &RenderArgs,
) -> CliResult {
    let document = load_resume(input, args)?;
    let options = args.export_options();

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let template = get_template(&document.options.template_id)?;
    let doc = render::render(&document, template, &options.render_context());
    let json = render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn print_report(report: &ExportReport) {
    println!("{}: {}", "Format".bold(), report.format);
    println!("{}: {}", "Bytes".bold(), report.bytes_written);
    if let Some(pages) = report.page_count {
        println!("{}: {}", "Pages".bold(), pages);
    }
    println!("{}: {}", "Words".bold(), report.stats.word_count);
    print_degradations(report);
}

fn print_degradations(report: &ExportReport) {
    for degradation in &report.degradations {
        println!("{} {}", "warning:".yellow().bold(), degradation.describe());
    }
}

fn cmd_version() {
    println!("{} {}", "resumeforge".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resume rendering and export tool");
    println!();
    println!("License: MIT");
}
