#![deny(unsafe_code)]
//! CLI binary for the plexus particle field.
//!
//! Subcommands:
//! - `render`: animate a field headless for N frames, write the last as PNG
//! - `stats`: animate on a recording surface and report draw counts
//! - `params`: print the default field parameters and their schema
//! - `mailto`: compose the contact form's `mailto:` link
//! - `catalog`: print the services and projects shown on the page

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use plexus_core::{
    AnimationLoop, DrawCommand, FieldConfig, Recipe, RecordingSurface, Simulator, Srgb, Surface,
    Xorshift64,
};
use plexus_raster::RasterSurface;
use plexus_site::{catalog, compose_mailto, ContactConfig, ContactForm};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "plexus", about = "Connected particle field renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Animate a field for N frames and write the final frame as PNG.
    Render {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: u32,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: u32,

        /// Number of animation frames.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Field parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Recipe file; overrides size, frames, seed and params.
        #[arg(long)]
        recipe: Option<PathBuf>,

        /// Background color as #rrggbb.
        #[arg(long, default_value = "#111111")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "field.png")]
        output: PathBuf,
    },
    /// Animate on a recording surface and report per-frame draw counts.
    Stats {
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: u32,

        #[arg(short = 'H', long, default_value_t = 720)]
        height: u32,

        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Print default field parameters and their schema.
    Params,
    /// Compose the contact form's mailto link.
    Mailto {
        /// Recipient address.
        #[arg(long)]
        to: String,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        message: String,
    },
    /// Print the services and projects shown on the page.
    Catalog,
}

fn parse_params(params: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(params).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

fn read_recipe(path: &Path) -> Result<Recipe, CliError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    Ok(Recipe::from_json_str(&json)?)
}

/// Frame statistics gathered from a recording surface.
#[derive(Debug, Default, PartialEq)]
struct FrameStats {
    frames: usize,
    circles: usize,
    lines_min: usize,
    lines_max: usize,
    lines_total: usize,
}

impl FrameStats {
    fn record(&mut self, commands: &[DrawCommand]) {
        let lines = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        self.circles = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        self.lines_min = if self.frames == 0 {
            lines
        } else {
            self.lines_min.min(lines)
        };
        self.lines_max = self.lines_max.max(lines);
        self.lines_total += lines;
        self.frames += 1;
    }

    fn lines_mean(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.lines_total as f64 / self.frames as f64
        }
    }
}

fn mount<S: Surface>(
    surface: S,
    width: u32,
    height: u32,
    config: FieldConfig,
    seed: u64,
) -> Result<AnimationLoop<S, Xorshift64>, CliError> {
    let simulator = Simulator::mount(
        Some(surface),
        width as f64,
        height as f64,
        config,
        Xorshift64::new(seed),
    )
    .ok_or_else(|| CliError::Io("drawing surface unavailable".into()))?;
    Ok(AnimationLoop::new(simulator))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let defaults = FieldConfig::default().params();
            let schema = FieldConfig::param_schema();
            if cli.json {
                let info = serde_json::json!({
                    "defaults": defaults,
                    "schema": schema,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Defaults:");
                if let Some(map) = defaults.as_object() {
                    for (name, value) in map {
                        println!("  {name} = {value}");
                    }
                }
            }
        }
        Command::Render {
            width,
            height,
            frames,
            seed,
            params,
            recipe,
            background,
            output,
        } => {
            let recipe = match recipe {
                Some(path) => read_recipe(&path)?,
                None => Recipe {
                    frames,
                    params: parse_params(&params)?,
                    ..Recipe::new(width, height, seed)
                },
            };
            let config = recipe.validate()?;
            let background =
                Srgb::from_hex(&background).map_err(|e| CliError::Input(e.to_string()))?;
            let surface = RasterSurface::opaque(recipe.width, recipe.height, background)?;

            let mut anim = mount(surface, recipe.width, recipe.height, config, recipe.seed)?;
            let drawn = anim.run(recipe.frames);
            anim.stop();
            let simulator = anim.into_simulator();
            log::info!(
                "{} particles, {drawn} frames drawn",
                simulator.field().len()
            );

            plexus_raster::snapshot::write_png(simulator.surface(), &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": recipe.width,
                    "height": recipe.height,
                    "frames": drawn,
                    "seed": recipe.seed,
                    "particles": simulator.field().len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} ({drawn} frames, seed {}) -> {}",
                    recipe.width,
                    recipe.height,
                    recipe.seed,
                    output.display()
                );
            }
        }
        Command::Stats {
            width,
            height,
            frames,
            seed,
            params,
        } => {
            let recipe = Recipe {
                frames,
                params: parse_params(&params)?,
                ..Recipe::new(width, height, seed)
            };
            let config = recipe.validate()?;
            let mut anim = mount(RecordingSurface::default(), width, height, config, seed)?;
            let mut stats = FrameStats::default();
            anim.start();
            for _ in 0..recipe.frames {
                if !anim.pump() {
                    break;
                }
                let commands = anim.simulator_mut().surface_mut().take_commands();
                stats.record(&commands);
            }
            anim.stop();
            let field = anim.simulator().field();

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "seed": seed,
                    "particles": field.len(),
                    "link_threshold": field.link_threshold(),
                    "frames": stats.frames,
                    "circles_per_frame": stats.circles,
                    "lines_min": stats.lines_min,
                    "lines_max": stats.lines_max,
                    "lines_mean": stats.lines_mean(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("particles:      {}", field.len());
                println!("link threshold: {}", field.link_threshold());
                println!("frames:         {}", stats.frames);
                println!(
                    "lines/frame:    min {} max {} mean {:.1}",
                    stats.lines_min,
                    stats.lines_max,
                    stats.lines_mean()
                );
            }
        }
        Command::Mailto {
            to,
            name,
            email,
            message,
        } => {
            let config = ContactConfig::new(&to)?;
            let form = ContactForm {
                name,
                email,
                message,
            };
            let uri = compose_mailto(&form, &config);
            if cli.json {
                let info = serde_json::json!({ "mailto": uri });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{uri}");
            }
        }
        Command::Catalog => {
            let c = catalog();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&c)?);
            } else {
                println!("Services:");
                for s in c.services {
                    println!("  {}: {}", s.title, s.description);
                }
                println!("Work:");
                for p in c.projects {
                    println!("  {} ({})", p.title, p.category);
                }
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
