//! # ShaftLink CLI
//!
//! Runs the connection selector from the terminal. A request comes either
//! from a JSON file (`--request`) or from individual flags; flags given
//! alongside a request file override its values.
//!
//! ```text
//! shaft_cli -d 45 --hub-length 90 --shaft-material "Steel 42CrMo4" \
//!     --hub-material "Steel 42CrMo4" --torque 870 --safety-factor 2
//! shaft_cli --request request.json --json
//! RUST_LOG=shaft_core=debug shaft_cli --request request.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use shaft_core::calculations::CapacityResult;
use shaft_core::file_io::{load_catalog, load_request};
use shaft_core::geometry::GeometryTables;
use shaft_core::selection::{ConnectionRequest, Preferences, ShaftType};
use shaft_core::{CalcError, CalcResult, ConnectionType, EngineConfig, MaterialCatalog, SelectionEngine, SelectionResult};

#[derive(Parser, Debug)]
#[command(author, version, about = "Select a shaft-hub connection: press fit, key or spline", long_about = None)]
struct Args {
    /// JSON request file
    #[arg(long)]
    request: Option<PathBuf>,

    /// JSON engine configuration (partial files allowed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON material catalog replacing the built-in one
    #[arg(long)]
    materials: Option<PathBuf>,

    /// Seed for friction sampling
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// List the material catalog and exit
    #[arg(long)]
    list_materials: bool,

    /// Shaft diameter (mm)
    #[arg(short = 'd', long)]
    diameter: Option<f64>,

    /// Hub length (mm)
    #[arg(long)]
    hub_length: Option<f64>,

    #[arg(long)]
    shaft_material: Option<String>,

    #[arg(long)]
    hub_material: Option<String>,

    /// Required torque (N·m)
    #[arg(short = 't', long)]
    torque: Option<f64>,

    #[arg(long)]
    safety_factor: Option<f64>,

    /// "solid" or "hollow"
    #[arg(long)]
    shaft_type: Option<String>,

    /// Hollow shaft inner diameter (mm)
    #[arg(long)]
    inner_diameter: Option<f64>,

    /// Hub outer diameter (mm)
    #[arg(long)]
    hub_outer: Option<f64>,

    /// "dry", "oiled" or "greased"
    #[arg(long)]
    surface: Option<String>,

    /// Friction coefficient override
    #[arg(long)]
    mu: Option<f64>,

    /// "heat_hub", "cool_shaft" or "press"
    #[arg(long)]
    assembly: Option<String>,

    /// Eight comma-separated preferences in [0, 1]:
    /// ease,movement,cost,bidirectional,vibration,speed,maintenance,durability
    #[arg(long, value_delimiter = ',')]
    prefs: Option<Vec<f64>>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if args.json {
                match serde_json::to_string_pretty(&err) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("{}", err),
                }
            } else {
                eprintln!("error [{}]: {}", err.error_code(), err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> CalcResult<()> {
    let engine = build_engine(args)?;

    if args.list_materials {
        print_materials(engine.catalog());
        return Ok(());
    }

    let request = build_request(args)?;
    debug!("request: {:?}", request);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let result = engine.select_connection(&request, &mut rng)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&request, &result);
    }
    Ok(())
}

fn build_engine(args: &Args) -> CalcResult<SelectionEngine> {
    if args.config.is_none() && args.materials.is_none() {
        return Ok(SelectionEngine::standard());
    }
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let catalog = match &args.materials {
        Some(path) => load_catalog(path)?,
        None => MaterialCatalog::standard(),
    };
    SelectionEngine::new(catalog, GeometryTables::standard(), config)
}

fn build_request(args: &Args) -> CalcResult<ConnectionRequest> {
    let mut request = match &args.request {
        Some(path) => load_request(path)?,
        None => ConnectionRequest {
            required_torque_nm: None,
            ..ConnectionRequest::new(
                args.diameter.ok_or_else(|| CalcError::missing_field("shaft_diameter_mm"))?,
                args.hub_length.ok_or_else(|| CalcError::missing_field("hub_length_mm"))?,
                args.shaft_material
                    .clone()
                    .ok_or_else(|| CalcError::missing_field("shaft_material"))?,
                args.hub_material
                    .clone()
                    .ok_or_else(|| CalcError::missing_field("hub_material"))?,
                0.0,
            )
        },
    };

    if let Some(d) = args.diameter {
        request.shaft_diameter_mm = d;
    }
    if let Some(l) = args.hub_length {
        request.hub_length_mm = l;
    }
    if let Some(name) = &args.shaft_material {
        request.shaft_material = name.clone();
    }
    if let Some(name) = &args.hub_material {
        request.hub_material = name.clone();
    }
    if let Some(t) = args.torque {
        request.required_torque_nm = Some(t);
    }
    if let Some(sf) = args.safety_factor {
        request.safety_factor = sf;
    }
    if let Some(kind) = &args.shaft_type {
        request.shaft_type = kind.parse::<ShaftType>()?;
    }
    if let Some(d_i) = args.inner_diameter {
        request.shaft_inner_diameter_mm = Some(d_i);
    }
    if let Some(d_a) = args.hub_outer {
        request.hub_outer_diameter_mm = Some(d_a);
    }
    if let Some(surface) = &args.surface {
        request.surface_condition = surface.parse()?;
    }
    if let Some(mu) = args.mu {
        request.mu_override = Some(mu);
    }
    if let Some(method) = &args.assembly {
        request.assembly_method = method.parse()?;
    }
    if let Some(values) = &args.prefs {
        let array: [f64; 8] = values.as_slice().try_into().map_err(|_| {
            CalcError::invalid_input("preferences", format!("{:?}", values), "Expected exactly 8 values")
        })?;
        request.preferences = Preferences::from_array(array);
    }

    Ok(request)
}

fn print_materials(catalog: &MaterialCatalog) {
    println!("{:<18} {:>9} {:>7} {:>9} {:>9} {:>9}  category", "material", "E (MPa)", "nu", "Re (MPa)", "Rm (MPa)", "σ_zul");
    for name in catalog.names() {
        if let Ok(m) = catalog.get(name) {
            println!(
                "{:<18} {:>9.0} {:>7.3} {:>9.0} {:>9.0} {:>9.1}  {}",
                m.name,
                m.e_mpa,
                m.poisson,
                m.yield_mpa,
                m.ultimate_mpa,
                m.allowable_stress_mpa(),
                m.category
            );
        }
    }
}

fn print_summary(request: &ConnectionRequest, result: &SelectionResult) {
    println!("═══════════════════════════════════════");
    println!("  SHAFT-HUB CONNECTION SELECTION");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Shaft:    d = {:.1} mm ({}), {}", request.shaft_diameter_mm, request.shaft_type, request.shaft_material);
    println!("  Hub:      L = {:.1} mm, {}", request.hub_length_mm, request.hub_material);
    println!(
        "  Torque:   {:.1} N·m × {:.2} = {:.1} N·m design",
        result.required_torque_nm, result.safety_factor, result.design_torque_nm
    );
    println!(
        "  Friction: μ = {:.3} ({:?}, {})",
        result.friction.mu, result.friction.source, result.surface_condition
    );
    println!();
    println!("Candidates:");
    for connection in ConnectionType::ALL {
        let capacity = result.capacities_nm.get(&connection).copied().unwrap_or(0.0);
        let verdict = if result.is_feasible(connection) { "feasible" } else { "not feasible" };
        let score = result
            .scores
            .as_ref()
            .and_then(|s| s.get(&connection))
            .map_or_else(|| "-".to_string(), |s| format!("{:.3}", s));
        println!(
            "  {:<17} {:>10.1} N·m  {:<13} score {}",
            connection.display_name(),
            capacity,
            verdict,
            score
        );
        if let Some(CapacityResult::Press(press)) = result.details.get(&connection) {
            if let Some(issue) = press.issue {
                println!("  {:<17} impractical: {:?}", "", issue);
            }
            if let Some(t) = press.assembly.and_then(|a| a.joining_temperature_c) {
                println!("  {:<17} joining temperature {:.0} °C", "", t);
            }
        }
    }
    println!();
    match (result.recommended, result.reason) {
        (Some(connection), _) => println!("Recommendation: {} ✓", connection.display_name()),
        (None, Some(reason)) => println!("Recommendation: none ({:?})", reason),
        (None, None) => println!("Recommendation: none"),
    }
}
