//! Définition et implémentation des commandes CLI
//!
//! - `reproject`: fichiers GeoJSON → GeoJSON reprojeté
//! - `bbox`: reprojection d'une emprise
//! - `point`: reprojection d'un point
//! - `systems`: systèmes projetables sans PROJ

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use geometry_transform::config::Config;
use geometry_transform::crs::{BuiltinRegistry, CoordinateSystem, CrsRegistry};
use geometry_transform::export::{reproject_file, ReprojectOptions};
use geometry_transform::mapper::SmartMapper;
use geometry_transform::report::{TransformReport, TransformStatus};
use geometry_transform::transform::GeometryTransformer;
use rayon::prelude::*;
use simple_features::{BoundingBox, Point};
use tracing::{info, warn};

#[derive(Subcommand)]
pub enum Commands {
    /// Reproject GeoJSON files between coordinate systems
    Reproject(ReprojectArgs),

    /// Reproject a bounding box (minx,miny,maxx,maxy)
    Bbox {
        /// Bounding box as minx,miny,maxx,maxy
        #[arg(value_parser = parse_bbox, allow_hyphen_values = true)]
        bbox: BoundingBox,

        /// Source system (EPSG:3857 or urn:ogc:def:crs:EPSG::3857)
        #[arg(long)]
        from: String,

        /// Destination system
        #[arg(long)]
        to: String,
    },

    /// Reproject a single point
    Point {
        #[arg(allow_hyphen_values = true)]
        x: f64,

        #[arg(allow_hyphen_values = true)]
        y: f64,

        /// Optional elevation, kept when the projection does not compute one
        #[arg(allow_hyphen_values = true)]
        z: Option<f64>,

        /// Source system
        #[arg(long)]
        from: String,

        /// Destination system
        #[arg(long)]
        to: String,
    },

    /// List coordinate systems supported without PROJ
    Systems,
}

#[derive(Args)]
pub struct ReprojectArgs {
    /// Path to a GeoJSON file or a directory of GeoJSON files
    #[arg(short, long)]
    pub path: PathBuf,

    /// Output file, or directory when several files are processed
    #[arg(short, long)]
    pub output: PathBuf,

    /// Source system (défaut : config, env, puis membre crs du fichier)
    #[arg(long)]
    pub from: Option<String>,

    /// Destination system (défaut : config ou env)
    #[arg(long)]
    pub to: Option<String>,

    /// Config preset name or path to a JSON config
    #[arg(long)]
    pub config: Option<String>,

    /// Coordinate precision (decimal places), no rounding by default
    #[arg(long)]
    pub precision: Option<u8>,

    /// Maximum nesting depth of geometry collections
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Number of worker threads
    #[arg(long, alias = "threads")]
    pub jobs: Option<usize>,

    /// Write the JSON report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Exécute la commande reproject
pub fn cmd_reproject(args: &ReprojectArgs) -> Result<()> {
    let config = resolve_config(args)?;

    if let Some(jobs) = config.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let mapper = Arc::new(SmartMapper::new());
    let source = config
        .source
        .as_deref()
        .map(|value| resolve_system(&mapper, value))
        .transpose()?;
    let destination = match config.destination.as_deref() {
        Some(value) => resolve_system(&mapper, value)?,
        None => anyhow::bail!("No destination coordinate system configured (--to)"),
    };

    let inputs = collect_inputs(&args.path)?;
    if inputs.is_empty() {
        anyhow::bail!("No GeoJSON files found in {}", args.path.display());
    }
    let files = plan_outputs(&args.path, &args.output, &inputs)?;

    println!("=== Reproject ===");
    println!("Path: {}", args.path.display());
    println!("Files: {}", inputs.len());
    println!(
        "Source: {}",
        source
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "declared crs".to_string())
    );
    println!("Destination: {} ({})", destination, destination.name());
    if let Some(precision) = config.precision {
        println!("Coordinate precision: {} decimals", precision);
    }

    let options = ReprojectOptions {
        mapper,
        source,
        destination,
        max_depth: config.max_depth,
        precision: config.precision,
    };

    let start = Instant::now();
    let reports: Vec<TransformReport> = files
        .par_iter()
        .map(|(input, output)| {
            let file = input.display().to_string();
            match reproject_file(&options, input, output) {
                Ok(report) => {
                    info!(file = %file, output = %output.display(), "{}", report.summary());
                    report
                }
                Err(e) => {
                    warn!("Failed to reproject {}: {:#}", file, e);
                    let mut report = TransformReport::default();
                    report.record_file_failure(&file, &format!("{:#}", e));
                    report
                }
            }
        })
        .collect();

    let mut report = TransformReport::new(
        &options
            .source
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "declared".to_string()),
        &options.destination.to_string(),
    );
    for file_report in reports {
        report.merge(file_report);
    }
    report.set_duration(start.elapsed());
    report.finalize();
    report.display();

    if let Some(path) = &args.report {
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    if report.status == TransformStatus::Failed {
        anyhow::bail!("Reprojection failed");
    }
    Ok(())
}

/// Exécute la commande bbox
pub fn cmd_bbox(bbox: &BoundingBox, from: &str, to: &str) -> Result<()> {
    let transformer = build_transformer(from, to)?;
    let result = transformer.transform_bounding_box(bbox)?;
    println!(
        "{},{},{},{}",
        result.min_x, result.min_y, result.max_x, result.max_y
    );
    Ok(())
}

/// Exécute la commande point
pub fn cmd_point(x: f64, y: f64, z: Option<f64>, from: &str, to: &str) -> Result<()> {
    let transformer = build_transformer(from, to)?;
    let point = match z {
        Some(z) => Point::new_z(x, y, z),
        None => Point::new(x, y),
    };
    let result = transformer.transform_point(&point)?;
    match result.z {
        Some(z) => println!("{} {} {}", result.x, result.y, z),
        None => println!("{} {}", result.x, result.y),
    }
    Ok(())
}

/// Exécute la commande systems
pub fn cmd_systems() {
    for system in BuiltinRegistry::known_systems() {
        println!("{:<12} {}", system.to_string(), system.name());
    }
}

/// Presets < fichier < env < options
fn resolve_config(args: &ReprojectArgs) -> Result<Config> {
    resolve_config_with(args, |key| std::env::var(key).ok())
}

fn resolve_config_with<F>(args: &ReprojectArgs, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match args.config.as_deref() {
        Some(preset_or_path) => load_config(preset_or_path)?,
        None => Config::default(),
    };
    config.apply_env_from(env)?;

    if let Some(from) = &args.from {
        config.source = Some(from.clone());
    }
    if let Some(to) = &args.to {
        config.destination = Some(to.clone());
    }
    if let Some(precision) = args.precision {
        config.precision = Some(precision);
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(jobs) = args.jobs {
        config.jobs = Some(jobs);
    }
    Ok(config)
}

fn load_config(preset_or_path: &str) -> Result<Config> {
    let path = Path::new(preset_or_path);
    if path.is_file() {
        Config::load(path)
    } else {
        Config::from_preset(preset_or_path)
    }
}

fn resolve_system(registry: &SmartMapper, value: &str) -> Result<Arc<CoordinateSystem>> {
    let system: CoordinateSystem = value
        .parse()
        .with_context(|| format!("Invalid coordinate system: {}", value))?;
    Ok(registry.resolve(system.authority(), system.code())?)
}

fn build_transformer(from: &str, to: &str) -> Result<GeometryTransformer<SmartMapper>> {
    let mapper = SmartMapper::new();
    let source = resolve_system(&mapper, from)?;
    let destination = resolve_system(&mapper, to)?;
    info!(
        source = %source,
        destination = %destination,
        "Using {}",
        SmartMapper::description(&source, &destination)
    );
    Ok(GeometryTransformer::with_mapper(source, destination, mapper))
}

/// Parse `minx,miny,maxx,maxy`
fn parse_bbox(value: &str) -> Result<BoundingBox, String> {
    let values: Vec<f64> = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid number in bbox '{}': {}", value, e))?;

    match values.as_slice() {
        [min_x, min_y, max_x, max_y] => Ok(BoundingBox::new(*min_x, *min_y, *max_x, *max_y)),
        _ => Err(format!(
            "expected 4 values (minx,miny,maxx,maxy), got {}",
            values.len()
        )),
    }
}

/// Collecte les fichiers GeoJSON d'un chemin (fichier ou dossier)
fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        if !path.exists() {
            anyhow::bail!("Input not found: {}", path.display());
        }
        return Ok(vec![path.to_path_buf()]);
    }

    let mut inputs = Vec::new();
    for extension in ["geojson", "json"] {
        let pattern = path.join(format!("*.{}", extension));
        let pattern = pattern.to_string_lossy();
        for entry in glob::glob(&pattern).context("Invalid glob pattern")? {
            let entry = entry?;
            if entry.is_file() {
                inputs.push(entry);
            }
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Associe chaque fichier d'entrée à son fichier de sortie
///
/// Un fichier unique avec une sortie à extension est écrit tel quel,
/// sinon la sortie est un dossier qui reçoit des fichiers de même nom.
fn plan_outputs(path: &Path, output: &Path, inputs: &[PathBuf]) -> Result<Vec<(PathBuf, PathBuf)>> {
    if !path.is_dir() && output.extension().is_some() && !output.is_dir() {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        return Ok(inputs
            .iter()
            .map(|input| (input.clone(), output.to_path_buf()))
            .collect());
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;
    inputs
        .iter()
        .map(|input| {
            let name = input
                .file_name()
                .with_context(|| format!("Invalid input path {}", input.display()))?;
            Ok((input.clone(), output.join(name)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use geometry_transform::config::{ENV_DESTINATION, ENV_MAX_DEPTH, ENV_SOURCE};

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "geometry-transform-cli-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_bbox() {
        let bbox = parse_bbox("-180, -85.5,180,85.5").unwrap();
        assert_eq!(bbox.min_x, -180.0);
        assert_eq!(bbox.min_y, -85.5);
        assert_eq!(bbox.max_x, 180.0);
        assert_eq!(bbox.max_y, 85.5);

        assert!(parse_bbox("1,2,3").is_err());
        assert!(parse_bbox("1,2,three,4").is_err());
    }

    #[test]
    fn test_collect_inputs() {
        let dir = scratch_dir("collect");
        std::fs::write(dir.join("b.geojson"), "{}").unwrap();
        std::fs::write(dir.join("a.json"), "{}").unwrap();
        std::fs::write(dir.join("notes.txt"), "").unwrap();

        let inputs = collect_inputs(&dir).unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.geojson"]);

        let single = collect_inputs(&dir.join("a.json")).unwrap();
        assert_eq!(single.len(), 1);
        assert!(collect_inputs(&dir.join("missing.geojson")).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_plan_outputs() {
        let dir = scratch_dir("plan");
        let input = dir.join("parcelles.geojson");
        std::fs::write(&input, "{}").unwrap();

        let to_file = plan_outputs(&input, &dir.join("out/result.geojson"), &[input.clone()]).unwrap();
        assert_eq!(to_file[0].1, dir.join("out/result.geojson"));

        let to_dir = plan_outputs(&dir, &dir.join("reprojected"), &[input.clone()]).unwrap();
        assert_eq!(to_dir[0].1, dir.join("reprojected").join("parcelles.geojson"));
        assert!(dir.join("reprojected").is_dir());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_resolve_system() {
        let mapper = SmartMapper::new();
        let system = resolve_system(&mapper, "urn:ogc:def:crs:EPSG::2154").unwrap();
        assert_eq!(*system, CoordinateSystem::epsg(2154));
        assert_eq!(system.name(), "RGF93 v1 / Lambert-93");

        assert!(resolve_system(&mapper, "not a crs").is_err());
    }

    fn reproject_args(config: Option<&str>) -> ReprojectArgs {
        ReprojectArgs {
            path: PathBuf::from("in.geojson"),
            output: PathBuf::from("out.geojson"),
            from: Some("EPSG:2154".to_string()),
            to: None,
            config: config.map(str::to_string),
            precision: Some(3),
            max_depth: None,
            jobs: None,
            report: None,
        }
    }

    #[test]
    fn test_resolve_config_priority() {
        let args = reproject_args(Some("web-mercator-to-wgs84"));
        let config = resolve_config_with(&args, |_| None).unwrap();
        assert_eq!(config.source.as_deref(), Some("EPSG:2154"));
        assert_eq!(config.destination.as_deref(), Some("EPSG:4326"));
        assert_eq!(config.precision, Some(3));
    }

    #[test]
    fn test_options_override_environment() {
        let args = reproject_args(None);
        let config = resolve_config_with(&args, |key| match key {
            ENV_SOURCE => Some("EPSG:3857".to_string()),
            ENV_DESTINATION => Some("EPSG:32620".to_string()),
            ENV_MAX_DEPTH => Some("8".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.source.as_deref(), Some("EPSG:2154"));
        assert_eq!(config.destination.as_deref(), Some("EPSG:32620"));
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.precision, Some(3));
    }
}
