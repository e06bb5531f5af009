use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

use parcel_area::api::LandsClient;
use parcel_area::config::{ApiConfig, FileConfig};
use parcel_area::domain::{AddLandRequest, Boundary, ParcelForm};
use parcel_area::geometry::{AreaMethod, AreaUnit, Winding, format_number};
use parcel_area::input::{read_boundary_file, read_form_file};
use parcel_area::logging;
use parcel_area::report::AreaReport;

/// Compute land parcel areas and assemble land record submissions
///
/// Examples:
///   # Area of a drawn boundary, in square meters
///   parcel-area area boundary.json
///
///   # Same boundary in perches with the latitude-corrected projection
///   parcel-area area boundary.json --unit perches --method projected
///
///   # Build the create request for a parcel form and a GeoJSON boundary
///   parcel-area record parcel.toml --boundary parcel.geojson
///
///   # Send it to the land records API configured in parcel-area.toml
///   parcel-area submit parcel.toml --boundary parcel.geojson
///
///   # Correct a stored record, or remove it
///   parcel-area submit parcel.toml --update land-42
///   parcel-area delete land-42
#[derive(Parser, Debug)]
#[command(name = "parcel-area")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches parcel-area.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the area and shape summary of a boundary file
    Area {
        /// Boundary file: JSON [lat, lng] pairs, a saved record, or GeoJSON
        file: PathBuf,

        /// Degree-to-meter conversion (flat reproduces stored registry areas)
        #[arg(short = 'm', long)]
        method: Option<AreaMethod>,

        /// Unit to report the area in
        #[arg(short = 'u', long)]
        unit: Option<AreaUnit>,

        /// Decimal places in the printed area
        #[arg(short = 'p', long)]
        precision: Option<usize>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assemble and print the land record request for a parcel form
    Record {
        /// Parcel form (.toml or .json, camelCase keys)
        form: PathBuf,

        /// Boundary file; overrides coordinates in the form
        #[arg(short = 'b', long)]
        boundary: Option<PathBuf>,
    },

    /// Assemble the land record request and submit it to the API
    Submit {
        /// Parcel form (.toml or .json, camelCase keys)
        form: PathBuf,

        /// Boundary file; overrides coordinates in the form
        #[arg(short = 'b', long)]
        boundary: Option<PathBuf>,

        /// Replace the stored record with this id instead of creating one
        #[arg(long, value_name = "ID")]
        update: Option<String>,

        /// API base URL, overriding the config file
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Delete a stored land record
    Delete {
        /// Record id
        id: String,

        /// API base URL, overriding the config file
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = match args.config {
        Some(ref config_path) => {
            if !config_path.exists() {
                bail!("Config file not found: {:?}", config_path);
            }
            FileConfig::from_path(config_path)?
        }
        None => FileConfig::load().unwrap_or_default(),
    };

    logging::init(args.verbose || file_config.verbose);
    tracing::debug!(
        unit = ?file_config.unit,
        method = ?file_config.method,
        precision = file_config.precision,
        api = file_config.api.is_some(),
        "configuration loaded"
    );

    match args.command {
        Command::Area {
            file,
            method,
            unit,
            precision,
            json,
        } => {
            let method = method.unwrap_or(file_config.method);
            let unit = unit.unwrap_or(file_config.unit);
            let precision = precision.unwrap_or(file_config.precision);
            run_area(&file, method, unit, precision, json)
        }
        Command::Record { form, boundary } => {
            let request = assemble_request(&form, boundary.as_deref())?;
            let body = serde_json::to_string_pretty(&request)
                .context("Failed to serialize land request")?;
            println!("{}", body);
            Ok(())
        }
        Command::Submit {
            form,
            boundary,
            update,
            base_url,
        } => {
            let request = assemble_request(&form, boundary.as_deref())?;
            let api_config = api_config(&file_config, base_url);
            run_submit(&request, &api_config, update.as_deref(), file_config.precision)
        }
        Command::Delete { id, base_url } => {
            let client = LandsClient::new(&api_config(&file_config, base_url))?;
            let spinner = create_spinner("Deleting land parcel...");
            client
                .delete_land(&id)
                .with_context(|| format!("Failed to delete land parcel {}", id))?;
            spinner.finish_with_message(format!("Land parcel {} deleted", id));
            Ok(())
        }
    }
}

fn run_area(
    file: &Path,
    method: AreaMethod,
    unit: AreaUnit,
    precision: usize,
    json: bool,
) -> Result<()> {
    let boundary = read_boundary_file(file)
        .with_context(|| format!("Failed to read boundary: {}", file.display()))?;
    let report = AreaReport::compute(&boundary, method, unit);

    if json {
        let body = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", body);
        return Ok(());
    }

    println!("Boundary: {}", file.display());
    println!("  Points:  {}", report.points);
    println!("  Method:  {:?}", report.method);
    println!("  Area:    {}", report.formatted_area(precision));
    if unit != AreaUnit::Sqm {
        println!(
            "           ({} m²)",
            format_number(report.area_m2, precision)
        );
    }
    let winding = match report.winding {
        Winding::Clockwise => "clockwise",
        Winding::CounterClockwise => "counter-clockwise",
        Winding::Degenerate => "degenerate",
    };
    println!("  Winding: {}", winding);
    if let Some(ref b) = report.bounds {
        println!(
            "  Bounds:  lat {:.6}..{:.6}, lng {:.6}..{:.6}",
            b.min_lat, b.max_lat, b.min_lng, b.max_lng
        );
    }

    if boundary.is_degenerate() {
        println!();
        println!("Warning: fewer than 3 points, the boundary encloses no area");
    }
    if !report.is_simple() {
        println!();
        println!(
            "Warning: boundary edges cross each other {} time(s); the area is computed anyway",
            report.crossings.len()
        );
    }

    Ok(())
}

fn assemble_request(form_path: &Path, boundary_path: Option<&Path>) -> Result<AddLandRequest> {
    let (form, form_boundary): (ParcelForm, Option<Boundary>) = read_form_file(form_path)
        .with_context(|| format!("Failed to read parcel form: {}", form_path.display()))?;

    let boundary = match boundary_path {
        Some(path) => read_boundary_file(path)
            .with_context(|| format!("Failed to read boundary: {}", path.display()))?,
        None => form_boundary.unwrap_or_default(),
    };

    AddLandRequest::assemble(form, boundary).context("Invalid land parcel")
}

fn api_config(file_config: &FileConfig, base_url: Option<String>) -> ApiConfig {
    let mut api_config = file_config.api.clone().unwrap_or_default();
    if let Some(url) = base_url {
        api_config.base_url = url;
    }
    api_config
}

fn run_submit(
    request: &AddLandRequest,
    api_config: &ApiConfig,
    update: Option<&str>,
    precision: usize,
) -> Result<()> {
    let client = LandsClient::new(api_config)?;

    let spinner = create_spinner("Submitting land parcel...");
    let start = Instant::now();
    let (parcel, action) = match update {
        Some(id) => (
            client
                .update_land(id, request)
                .with_context(|| format!("Failed to update land parcel {}", id))?,
            "updated",
        ),
        None => (
            client
                .create_land(request)
                .context("Failed to submit land parcel")?,
            "added",
        ),
    };
    spinner.finish_with_message(format!(
        "Land parcel {} [{:.1}s]",
        action,
        start.elapsed().as_secs_f32()
    ));

    println!();
    println!("  Id:     {}", parcel.id);
    println!("  Deed:   {}", parcel.deed_number);
    println!("  Survey: {}", parcel.survey_plan_number);
    println!("  Type:   {}", parcel.land_type);
    println!("  Area:   {} m²", format_number(parcel.area, precision));
    println!("  Status: {}", parcel.status_label());

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
