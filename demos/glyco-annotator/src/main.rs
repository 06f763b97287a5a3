//! Annotate many glycopeptide or cross-linked peptide spectra at once
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

use clap::Parser;
use glyannotate::prelude::*;
use glycore::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// The command line interface arguments
#[derive(Debug, Parser)]
struct Cli {
    /// The input JSON file, containing a single request or a list of requests. A request has the
    /// keys `id` (optional), `peptide`, `modifications` (optional, e.g. `N-term(TMT),4S(HexNAc1)`),
    /// `precursor_charge`, `mz`, `intensity`, and `cross_link` (optional, with the keys
    /// `peptide`, `modifications`, `crosslinker`, `alpha_site`, and `beta_site`)
    #[arg(short, long)]
    input: PathBuf,
    /// The annotation parameters as a flat JSON object, all keys are optional
    #[arg(short, long)]
    parameters: Option<PathBuf>,
    /// The output path for the JSON report, if not given the report is written to stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// MS2 fragment match tolerance in ppm, overrules the tolerance from the parameters
    #[arg(short, long)]
    tolerance: Option<f64>,
    /// Show more log messages, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Requests {
    Many(Vec<Request>),
    Single(Box<Request>),
}

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<String>,
    peptide: String,
    #[serde(default)]
    modifications: String,
    precursor_charge: u8,
    mz: Vec<f64>,
    intensity: Vec<f64>,
    #[serde(default)]
    cross_link: Option<CrossLinkRequest>,
}

#[derive(Debug, Deserialize)]
struct CrossLinkRequest {
    peptide: String,
    #[serde(default)]
    modifications: String,
    crosslinker: String,
    #[serde(default)]
    alpha_site: Option<usize>,
    #[serde(default)]
    beta_site: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Report {
    id: String,
    peptide: String,
    #[serde(flatten)]
    outcome: Outcome,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Outcome {
    Annotation(Box<Annotation>),
    Error(String),
}

impl Request {
    fn annotate(&self, parameters: &AnnotationParameters) -> Result<Annotation, GlycoError> {
        let peptide = Peptide::parse(&self.peptide, &self.modifications)?;
        let cross_link = self
            .cross_link
            .as_ref()
            .map(|link| -> Result<CrossLink, GlycoError> {
                Ok(CrossLink::new(
                    Peptide::parse(&link.peptide, &link.modifications)?,
                    crosslinker_by_name(&link.crosslinker)?.clone(),
                )
                .sites(link.alpha_site, link.beta_site))
            })
            .transpose()?;
        let spectrum = Spectrum::from_unsorted(&self.mz, &self.intensity)?;
        annotate(
            &peptide,
            self.precursor_charge,
            cross_link.as_ref(),
            &spectrum,
            parameters,
        )
    }
}

fn read_parameters(args: &Cli) -> Result<AnnotationParameters, String> {
    let mut parameters = match &args.parameters {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|err| {
                format!(
                    "Could not read parameters file '{}': {err}",
                    path.display()
                )
            })?;
            AnnotationParameters::from_json(&text).map_err(|err| err.to_string())?
        }
        None => AnnotationParameters::default(),
    };
    if let Some(tolerance) = args.tolerance {
        let matching = parameters.matching.tolerance_ppm(tolerance);
        parameters = parameters.matching(matching);
        parameters.validate().map_err(|err| err.to_string())?;
    }
    Ok(parameters)
}

fn read_requests(args: &Cli) -> Result<Vec<Request>, String> {
    let text = std::fs::read_to_string(&args.input).map_err(|err| {
        format!(
            "Could not read input file '{}': {err}",
            args.input.display()
        )
    })?;
    match serde_json::from_str(&text) {
        Ok(Requests::Many(requests)) => Ok(requests),
        Ok(Requests::Single(request)) => Ok(vec![*request]),
        Err(err) => Err(format!(
            "Invalid input file '{}': {err}",
            args.input.display()
        )),
    }
}

/// Run the annotator, failing requests are reported in the output and do not stop the others
fn main() {
    let args = Cli::parse();
    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let parameters = read_parameters(&args).unwrap_or_else(|err| {
        eprintln!("{err}");
        std::process::exit(1)
    });
    let requests = read_requests(&args).unwrap_or_else(|err| {
        eprintln!("{err}");
        std::process::exit(1)
    });
    log::info!("Annotating {} requests", requests.len());

    let failed = AtomicUsize::default();
    let reports: Vec<Report> = requests
        .par_iter()
        .enumerate()
        .map(|(index, request)| {
            let id = request.id.clone().unwrap_or_else(|| index.to_string());
            let outcome = match request.annotate(&parameters) {
                Ok(annotation) => Outcome::Annotation(Box::new(annotation)),
                Err(err) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    log::warn!("Request {id} failed:\n{err}");
                    Outcome::Error(err.to_string())
                }
            };
            Report {
                id,
                peptide: request.peptide.clone(),
                outcome,
            }
        })
        .collect();
    log::info!(
        "Annotated {}/{} requests",
        reports.len() - failed.load(Ordering::Relaxed),
        reports.len()
    );

    let written = match &args.out {
        Some(path) => File::create(path)
            .map_err(|err| format!("Could not create output file '{}': {err}", path.display()))
            .and_then(|file| write_reports(BufWriter::new(file), &reports)),
        None => write_reports(std::io::stdout().lock(), &reports),
    };
    if let Err(err) = written {
        eprintln!("{err}");
        std::process::exit(2)
    }
}

fn write_reports(mut writer: impl Write, reports: &[Report]) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut writer, reports)
        .map_err(|err| format!("Could not write the report: {err}"))?;
    writeln!(writer).map_err(|err| format!("Could not write the report: {err}"))
}
