use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use bc_app::{AppResult, BrewPlan, PlanRequest, compute_plan, plan_service, recipe_service};
use bc_calc::StepKind;
use bc_ingredients::BuiltinCatalog;
use bc_profile::ProfileKind;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "brewcalc")]
#[command(about = "Brewcalc - all-grain recipe calculator", long_about = None)]
struct Cli {
    /// Log level
    #[arg(short = 'd', long, value_enum, default_value_t = LogLevel::Info, global = true)]
    debug_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a recipe file (and optionally a turbid step file)
    Validate {
        /// Path to the recipe YAML/JSON file
        recipe_path: PathBuf,
        /// Path to a turbid step YAML/JSON file
        #[arg(long)]
        steps: Option<PathBuf>,
    },
    /// Compute grain bill, hops, color, mash plan and optional turbid schedule
    Plan {
        /// Path to the recipe YAML/JSON file
        recipe_path: PathBuf,
        /// Brewing system profile
        #[arg(short, long, value_enum, default_value_t = ProfileKind::default())]
        profile: ProfileKind,
        /// Path to a turbid step YAML/JSON file
        #[arg(long)]
        steps: Option<PathBuf>,
        /// Temperature of grain and vessel before the first infusion (°C)
        #[arg(long, default_value_t = 15.0)]
        ambient: f64,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
        /// Write JSON output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert a recipe between YAML and JSON (format from the file extensions)
    Convert {
        /// Recipe to read
        input: PathBuf,
        /// Recipe to write
        output: PathBuf,
    },
    /// List the built-in malt database
    Malts,
    /// List the built-in hop database
    Hops,
    /// List the available system profiles
    Profiles,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(cli.debug_level))
        .with_writer(std::io::stderr)
        .init();
    info!(log_level = ?cli.debug_level, "starting brewcalc");

    match cli.command {
        Commands::Validate { recipe_path, steps } => cmd_validate(&recipe_path, steps.as_deref()),
        Commands::Plan {
            recipe_path,
            profile,
            steps,
            ambient,
            json,
            output,
        } => cmd_plan(
            &recipe_path,
            profile,
            steps.as_deref(),
            ambient,
            json,
            output.as_deref(),
        ),
        Commands::Convert { input, output } => cmd_convert(&input, &output),
        Commands::Malts => {
            cmd_malts();
            Ok(())
        }
        Commands::Hops => {
            cmd_hops();
            Ok(())
        }
        Commands::Profiles => {
            cmd_profiles();
            Ok(())
        }
    }
}

fn cmd_validate(recipe_path: &Path, steps_path: Option<&Path>) -> AppResult<()> {
    println!("Validating recipe: {}", recipe_path.display());
    let recipe = recipe_service::load_recipe(recipe_path)?;
    let summary = recipe_service::summarize(&recipe);
    println!("✓ Recipe is valid");
    println!(
        "  {} {} - {:.1} L, {:.1} °P, {:.0} IBU",
        summary.name,
        summary.version.as_deref().unwrap_or(""),
        summary.batch_size_l,
        summary.target_og_plato,
        summary.target_ibu
    );
    println!(
        "  {} fermentables, {} boil hops, {} dry hops",
        summary.fermentable_count, summary.boil_hop_count, summary.dry_hop_count
    );

    if let Some(path) = steps_path {
        println!("Validating turbid steps: {}", path.display());
        let schedule = recipe_service::load_turbid_steps(path)?;
        println!("✓ {} turbid steps are valid", schedule.steps.len());
    }
    Ok(())
}

fn cmd_plan(
    recipe_path: &Path,
    profile: ProfileKind,
    steps_path: Option<&Path>,
    ambient_temp_c: f64,
    json: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let recipe = recipe_service::load_recipe(recipe_path)?;
    let schedule = steps_path
        .map(recipe_service::load_turbid_steps)
        .transpose()?;

    let mut request = PlanRequest::new(&recipe, profile.profile());
    if let Some(schedule) = &schedule {
        request = request.with_turbid(schedule, ambient_temp_c);
    }

    let plan = compute_plan(&request, &BuiltinCatalog, &BuiltinCatalog).inspect_err(|e| {
        if e.is_infeasible() {
            error!("recipe cannot be brewed on {profile}: lower the gravity or batch size");
        }
    })?;

    if json || output.is_some() {
        let text = plan_service::plan_to_json(&plan)?;
        match output {
            Some(path) => {
                std::fs::write(path, text)?;
                println!("✓ Wrote plan to {}", path.display());
            }
            None => println!("{}", text),
        }
    } else {
        print_plan(&plan);
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> AppResult<()> {
    let recipe = recipe_service::load_recipe(input)?;
    recipe_service::save_recipe(output, &recipe)?;
    println!("✓ Wrote {} to {}", recipe.name, output.display());
    Ok(())
}

fn print_plan(plan: &BrewPlan) {
    let v = &plan.volumes;
    let g = &plan.gravities;

    println!("=== {} on {} ===", plan.recipe_name, plan.profile_name);

    println!("\nVolumes:");
    println!("  Batch size:       {:>7.2} L", v.batch_size_l);
    println!("  Post-boil:        {:>7.2} L", v.post_boil_l);
    println!("  Boil-off:         {:>7.2} L", v.boil_off_l);
    println!("  Pre-boil:         {:>7.2} L", v.pre_boil_l);
    println!("  Mash loss:        {:>7.2} L", v.mash_loss_l);
    println!("  Trub loss:        {:>7.2} L", v.trub_loss_l);
    println!("  Mash-in volume:   {:>7.2} L", v.total_mash_in());

    let k = &plan.kettle_gravities;
    println!("\nGravities (recipe target / kettle reading):");
    println!(
        "  Pre-boil:  {:>5.2} °P (SG {:.3})  /  {:>5.2} °P (SG {:.3})",
        g.pre_boil_plato,
        g.pre_boil_sg(),
        k.pre_boil_plato,
        k.pre_boil_sg()
    );
    println!(
        "  Post-boil: {:>5.2} °P (SG {:.3})  /  {:>5.2} °P (SG {:.3})",
        g.post_boil_plato,
        g.post_boil_sg(),
        k.post_boil_plato,
        k.post_boil_sg()
    );

    println!("\nGrain bill ({} iterations):", plan.grain_bill.iterations);
    for m in &plan.grain_bill.malts {
        println!("  {:<24} {:>5.1} %  {:>6.2} kg", m.name(), m.entry.percent, m.amount_kg);
    }
    for m in &plan.fermentor_additions {
        println!(
            "  {:<24} {:>5.1} %  {:>6.2} kg  (fermentor)",
            m.name(),
            m.entry.percent,
            m.amount_kg
        );
    }
    println!("  Total grain: {:.2} kg", plan.grain_bill.total_kg);
    println!("  Total fermentables: {:.2} kg", plan.total_fermentables_kg());

    if !plan.hop_additions.is_empty() {
        println!("\nHop additions:");
        for h in &plan.hop_additions {
            println!(
                "  {:<16} {:>4.0} min  {:>5.1} IBU  {:>6.1} g",
                h.name, h.boil_time_min, h.ibu, h.grams
            );
        }
        println!("  Total boil hops: {:.1} g", plan.total_boil_hops_g());
    }
    if !plan.dry_hops.is_empty() {
        println!("\nDry hops:");
        for h in &plan.dry_hops {
            println!("  {:<16} {:>4.1} g/L  {:>6.1} g", h.name, h.g_per_l, h.grams);
        }
    }

    println!("\nColor: {:.1} EBC (MCU {:.2})", plan.color.ebc, plan.color.mcu);

    let mash = &plan.mash;
    println!("\nMash plan:");
    println!("  Mash cycles: {}", mash.num_mashes);
    for (i, kg) in mash.grain_per_mash_kg.iter().enumerate() {
        println!("    #{}: {:.2} kg", i + 1, kg);
    }
    println!(
        "  Total water: {:.2} L ({:.0} mm in vessel)",
        mash.total_water_l, mash.mash_in_level_mm
    );

    if let Some(steps) = &plan.turbid {
        println!("\nTurbid mash:");
        println!(
            "  {:>3}  {:<9} {:>7} {:>6} {:>8} {:>9} {:>8}",
            "#", "kind", "target", "hold", "water", "water T", "in pot"
        );
        for (i, s) in steps.iter().enumerate() {
            let kind = match s.kind {
                StepKind::Infusion => "infuse",
                StepKind::Removal => "remove",
                StepKind::Rest => "rest",
            };
            println!(
                "  {:>3}  {:<9} {:>5.1}°C {:>4.0}min {:>6.2} L {:>7.1}°C {:>6.2} L",
                i + 1,
                kind,
                s.target_temp_c,
                s.hold_min,
                s.water_l,
                s.water_temp_c,
                s.total_water_l
            );
        }
    }
}

fn cmd_malts() {
    println!("{:<24} {:>8} {:>8}", "Malt", "Extract", "EBC");
    for m in BuiltinCatalog.malts() {
        println!("{:<24} {:>7.0}% {:>8.0}", m.name, m.extract_yield * 100.0, m.color_ebc);
    }
}

fn cmd_hops() {
    println!("{:<16} {:>6}", "Hop", "Alpha");
    for h in BuiltinCatalog.hops() {
        println!("{:<16} {:>5.1}%", h.name, h.alpha_acid * 100.0);
    }
}

fn cmd_profiles() {
    for kind in ProfileKind::ALL {
        let p = kind.profile();
        println!("{} - {}", kind, p.name);
        println!(
            "  max grain/mash {:.1} kg, boil-off {:.1} L/h, trub {:.1} L, efficiency {:.0}%",
            p.max_grain_per_mash_kg,
            p.boil_off_l_per_hour,
            p.trub_loss_l,
            p.mash_efficiency * 100.0
        );
    }
}
