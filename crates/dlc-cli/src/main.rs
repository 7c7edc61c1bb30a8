//! IEC SSLA load case matrix CLI
//!
//! Command-line front end for configuring a load case session, adding custom
//! DLCs and exporting the matrix for Excel, Bladed or Flex5.

use clap::{Args, Parser, Subcommand};
use dlc_core::table::format_float;
use dlc_core::{
    catalog, export, Applicability, CustomDlcForm, EffectiveClimate, ExportFormat, Field,
    Parameters, Session, TurbineType, TurbulenceClass, VmeanSpec, WindClass, WindSpeedRange,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dlc-cli")]
#[command(about = "IEC SSLA Load Case Matrix Generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the predefined SSLA DLCs
    Catalog,

    /// Create a new session file, discarding any custom DLCs
    Init {
        /// Output path for the session file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Change the parameters of a session, keeping its custom DLCs
    Configure {
        /// Session file (created if missing)
        #[arg(short, long)]
        session: PathBuf,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Add a custom DLC to a session
    AddCustom {
        /// Session file (created if missing)
        #[arg(short, long)]
        session: PathBuf,

        /// DLC code
        #[arg(long, default_value = "X.1")]
        code: String,

        /// Load case type label
        #[arg(long = "type", default_value = "Custom")]
        kind: String,

        /// Mean wind speed (e.g. 8 or 6–24)
        #[arg(long, default_value = "12")]
        vmean: String,

        /// Number of seeds
        #[arg(long, default_value_t = 6)]
        seeds: u32,

        /// Duration in seconds
        #[arg(long, default_value_t = 600)]
        duration: u32,

        /// Fault flag (Yes, No, N/A)
        #[arg(long, default_value = "No")]
        fault: Applicability,

        /// Grid loss flag (Yes, No, N/A)
        #[arg(long, default_value = "No")]
        grid_loss: Applicability,
    },

    /// Show the assembled load case matrix
    Show {
        /// Session file (must exist)
        #[arg(short, long)]
        session: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export the load case matrix to a file
    Export {
        /// Session file (must exist)
        #[arg(short, long)]
        session: PathBuf,

        /// Output format (excel, bladed or flex5)
        #[arg(long, default_value = "excel")]
        format: ExportFormat,

        /// Directory to write the file into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

/// Form inputs; anything not given keeps its current value
#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// Turbine type (Onshore, Offshore, Floating)
    #[arg(long)]
    turbine_type: Option<TurbineType>,

    /// Wind class (I, II, III)
    #[arg(long)]
    wind_class: Option<WindClass>,

    /// Turbulence class (A, B, C)
    #[arg(long)]
    turbulence_class: Option<TurbulenceClass>,

    /// Pitch control enabled
    #[arg(long)]
    pitch_control: Option<bool>,

    /// Yaw control enabled
    #[arg(long)]
    yaw_control: Option<bool>,

    /// Include grid loss DLCs
    #[arg(long)]
    grid_loss: Option<bool>,

    /// Include fault scenarios
    #[arg(long)]
    faults: Option<bool>,

    /// Number of seeds (1-12)
    #[arg(long)]
    seeds: Option<u32>,

    /// Simulation duration in seconds (10-1200)
    #[arg(long)]
    duration: Option<u32>,

    /// Lower mean wind speed in m/s (3-25)
    #[arg(long)]
    wind_min: Option<u32>,

    /// Upper mean wind speed in m/s (3-25)
    #[arg(long)]
    wind_max: Option<u32>,

    /// Predefined DLC codes to include (comma-separated)
    #[arg(long, value_delimiter = ',')]
    dlc: Option<Vec<String>>,

    /// Enable advanced climate inputs
    #[arg(long)]
    advanced: Option<bool>,

    /// Override yaw error (deg)
    #[arg(long)]
    yaw_error: Option<String>,

    /// Override turbulence intensity
    #[arg(long)]
    ti: Option<f64>,

    /// Override wind shear exponent
    #[arg(long)]
    shear: Option<f64>,

    /// Override temperature (°C)
    #[arg(long)]
    temperature: Option<String>,

    /// Override IEC class (I, II, III)
    #[arg(long)]
    iec_class: Option<WindClass>,
}

impl ParamArgs {
    fn apply(self, p: &mut Parameters) {
        if let Some(v) = self.turbine_type {
            p.turbine_type = v;
        }
        if let Some(v) = self.wind_class {
            p.wind_class = v;
        }
        if let Some(v) = self.turbulence_class {
            p.turbulence_class = v;
        }
        if let Some(v) = self.pitch_control {
            p.pitch_control = v;
        }
        if let Some(v) = self.yaw_control {
            p.yaw_control = v;
        }
        if let Some(v) = self.grid_loss {
            p.include_grid_loss = v;
        }
        if let Some(v) = self.faults {
            p.include_faults = v;
        }
        if let Some(v) = self.seeds {
            p.seeds = v;
        }
        if let Some(v) = self.duration {
            p.duration = v;
        }
        p.wind_speed = WindSpeedRange::new(
            self.wind_min.unwrap_or(p.wind_speed.low),
            self.wind_max.unwrap_or(p.wind_speed.high),
        );
        if let Some(v) = self.dlc {
            p.selected = v.into_iter().map(|c| c.trim().to_string()).collect();
        }
        if let Some(v) = self.advanced {
            p.advanced = v;
        }
        if self.yaw_error.is_some() {
            p.overrides.yaw_error = self.yaw_error;
        }
        if self.ti.is_some() {
            p.overrides.turbulence = self.ti;
        }
        if self.shear.is_some() {
            p.overrides.shear_exp = self.shear;
        }
        if self.temperature.is_some() {
            p.overrides.temperature = self.temperature;
        }
        if self.iec_class.is_some() {
            p.overrides.iec_class = self.iec_class;
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> dlc_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog => cmd_catalog(),
        Commands::Init { output, params } => cmd_init(&output, params),
        Commands::Configure { session, params } => cmd_configure(&session, params),
        Commands::AddCustom {
            session,
            code,
            kind,
            vmean,
            seeds,
            duration,
            fault,
            grid_loss,
        } => {
            let form = CustomDlcForm {
                code,
                kind,
                vmean,
                seeds,
                duration,
                fault,
                grid_loss,
            };
            cmd_add_custom(&session, &form)
        }
        Commands::Show { session, limit } => cmd_show(&session, limit),
        Commands::Export {
            session,
            format,
            output_dir,
        } => cmd_export(&session, format, &output_dir),
    }
}

fn cmd_catalog() -> dlc_core::Result<()> {
    println!("DLC\tType\tVmean\tFault\tGrid Loss");
    println!("{}", "-".repeat(60));

    for dlc in catalog() {
        let vmean = match dlc.vmean {
            VmeanSpec::Range => "<wind speed range>",
            VmeanSpec::Literal(v) => v,
        };
        println!(
            "{}\t{}\t{}\t{}\t{}",
            dlc.code, dlc.kind, vmean, dlc.fault, dlc.grid_loss
        );
    }

    println!();
    println!("Export formats:");
    for format in ExportFormat::ALL {
        println!(
            "  {:<8}{} ({})",
            format.to_string().to_lowercase(),
            format.filename(),
            format.content_type()
        );
    }

    Ok(())
}

fn cmd_init(output: &Path, args: ParamArgs) -> dlc_core::Result<()> {
    let mut params = Parameters::default();
    args.apply(&mut params);
    params.validate()?;

    let session = Session::new(params);
    session.save(output)?;

    println!("Created session file: {}", output.display());
    print_parameters(&session.parameters);
    println!();
    println!("Add custom DLCs or export with:");
    println!("  dlc-cli add-custom --session {} --code X.1", output.display());
    println!("  dlc-cli export --session {} --format bladed", output.display());

    Ok(())
}

fn cmd_configure(path: &Path, args: ParamArgs) -> dlc_core::Result<()> {
    let mut session = Session::load(path)?;
    args.apply(&mut session.parameters);
    session.parameters.validate()?;
    session.save(path)?;

    println!("Updated session file: {}", path.display());
    print_parameters(&session.parameters);
    if !session.custom.is_empty() {
        println!(
            "  {} custom DLC(s) kept with the climate they were added with",
            session.custom.len()
        );
    }

    Ok(())
}

fn cmd_add_custom(path: &Path, form: &CustomDlcForm) -> dlc_core::Result<()> {
    let mut session = Session::load(path)?;
    let row = session.add_custom(form)?.clone();
    session.save(path)?;

    println!("Custom DLC '{}' added.", row.code);
    print_climate("  Climate", &row.climate());
    println!("  {} custom DLC(s) in session", session.custom.len());

    Ok(())
}

fn cmd_show(path: &Path, limit: Option<usize>) -> dlc_core::Result<()> {
    let session = Session::open(path)?;
    let table = session.table()?;

    // Print header
    let header: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
    println!("{}", header.join("\t"));
    println!("{}", "-".repeat(header.len() * 10));

    // Print rows
    let row_limit = limit.unwrap_or(table.row_count());
    for row in table.rows.iter().take(row_limit) {
        let values: Vec<String> = Field::ALL.iter().map(|f| row.get(*f).to_string()).collect();
        println!("{}", values.join("\t"));
    }

    if table.row_count() > row_limit {
        println!("... ({} more rows)", table.row_count() - row_limit);
    }

    Ok(())
}

fn cmd_export(path: &Path, format: ExportFormat, output_dir: &Path) -> dlc_core::Result<()> {
    let session = Session::open(path)?;
    let table = session.table()?;

    let payload = export(&table, format)?;
    let written = payload.write_to(output_dir)?;

    println!(
        "Exported {} rows as {} to {} ({})",
        table.row_count(),
        format,
        written.display(),
        payload.content_type
    );

    Ok(())
}

fn print_parameters(p: &Parameters) {
    println!(
        "  Turbine {}, Wind Class {}, Turbulence Class {}",
        p.turbine_type, p.wind_class, p.turbulence_class
    );
    println!(
        "  Seeds {}, Duration {} s, Mean wind speed {} m/s",
        p.seeds, p.duration, p.wind_speed
    );
    println!("  DLCs: {}", p.selected.join(", "));
    if p.advanced {
        print_climate("  Advanced climate", &p.climate_for(None));
    }
}

fn print_climate(label: &str, c: &EffectiveClimate) {
    println!(
        "{}: Yaw Error {}, TI {}, Shear Exp {}, IEC Class {}, Temperature {}",
        label,
        c.yaw_error,
        format_float(c.turbulence),
        format_float(c.shear_exp),
        c.iec_class,
        c.temperature
    );
}
