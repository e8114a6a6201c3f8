//! Reprojection de fichiers GeoJSON
//!
//! Les features sont transformées en parallèle (rayon). Une feature en
//! échec est écartée et consignée dans le [`TransformReport`], les autres
//! sont écrites avec un membre `crs` désignant le système destination.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use ::geojson::feature::Id;
use ::geojson::{Feature, FeatureCollection, GeoJson, Position, Value};
use anyhow::{Context, Result};
use rayon::prelude::*;
use simple_features::GeometryType;
use tracing::{debug, warn};

use crate::crs::CoordinateSystem;
use crate::error::TransformError;
use crate::mapper::CoordinateMapper;
use crate::report::{ErrorLevel, TransformIssue, TransformReport};
use crate::transform::GeometryTransformer;

/// Lit un fichier GeoJSON ; une Feature ou une Geometry isolée est
/// enveloppée dans une FeatureCollection
pub fn read_feature_collection(path: &Path) -> Result<FeatureCollection> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read file: {}", path.display()))?;
    let geojson: GeoJson = content
        .parse()
        .context(format!("Failed to parse GeoJSON: {}", path.display()))?;

    Ok(match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(feature) => single_feature_collection(feature),
        GeoJson::Geometry(geometry) => single_feature_collection(Feature::from(geometry)),
    })
}

fn single_feature_collection(feature: Feature) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    }
}

/// Système déclaré par le membre `crs` (GeoJSON 2008), s'il est lisible
pub fn declared_crs(collection: &FeatureCollection) -> Option<CoordinateSystem> {
    let name = collection
        .foreign_members
        .as_ref()?
        .get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()?;

    let system: CoordinateSystem = name.parse().ok()?;
    // OGC:CRS84 est WGS84 en ordre lon/lat, soit l'usage GeoJSON d'EPSG:4326
    if system.authority() == "OGC" && system.code() == "CRS84" {
        return Some(CoordinateSystem::epsg(4326));
    }
    Some(system)
}

/// Résultat de la reprojection d'une feature
enum FeatureOutcome {
    Transformed {
        feature: Feature,
        geometry_type: GeometryType,
    },
    WithoutGeometry(Feature),
    Skipped {
        feature_id: Option<String>,
        geometry_type: GeometryType,
        error: TransformError,
    },
}

/// Reprojette toutes les features d'une collection
///
/// L'ordre des features est conservé. Les bbox GeoJSON, devenues fausses,
/// sont retirées.
pub fn reproject_feature_collection<M>(
    transformer: &GeometryTransformer<M>,
    collection: FeatureCollection,
    precision: Option<u8>,
    file: &str,
    report: &mut TransformReport,
) -> FeatureCollection
where
    M: CoordinateMapper + Send + Sync,
{
    let outcomes: Vec<FeatureOutcome> = collection
        .features
        .into_par_iter()
        .map(|feature| reproject_feature(transformer, feature, precision))
        .collect();

    let mut features = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            FeatureOutcome::Transformed {
                feature,
                geometry_type,
            } => {
                report.record_transformed(geometry_type.name());
                features.push(feature);
            }
            FeatureOutcome::WithoutGeometry(feature) => {
                report.record_without_geometry();
                features.push(feature);
            }
            FeatureOutcome::Skipped {
                feature_id,
                geometry_type,
                error,
            } => {
                warn!(file, feature_id = ?feature_id, error = %error, "Feature skipped");
                report.record_error(TransformIssue {
                    level: ErrorLevel::Error,
                    file: Some(file.to_string()),
                    feature_id,
                    geometry_type: Some(geometry_type.name().to_string()),
                    message: error.to_string(),
                });
            }
        }
    }

    let mut foreign_members = collection.foreign_members;
    if let Some(members) = foreign_members.as_mut() {
        members.remove("crs");
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members,
    }
}

fn reproject_feature<M: CoordinateMapper>(
    transformer: &GeometryTransformer<M>,
    mut feature: Feature,
    precision: Option<u8>,
) -> FeatureOutcome {
    let Some(geometry) = feature.geometry.take() else {
        return FeatureOutcome::WithoutGeometry(feature);
    };

    match reproject_geometry(transformer, &geometry, precision) {
        Ok((reprojected, geometry_type)) => {
            feature.geometry = Some(reprojected);
            feature.bbox = None;
            FeatureOutcome::Transformed {
                feature,
                geometry_type,
            }
        }
        Err(error) => FeatureOutcome::Skipped {
            feature_id: feature.id.as_ref().map(id_to_string),
            geometry_type: value_geometry_type(&geometry.value),
            error,
        },
    }
}

/// Reprojette une géométrie GeoJSON, avec arrondi optionnel
pub fn reproject_geometry<M: CoordinateMapper>(
    transformer: &GeometryTransformer<M>,
    geometry: &::geojson::Geometry,
    precision: Option<u8>,
) -> Result<(::geojson::Geometry, GeometryType), TransformError> {
    let input = simple_features::Geometry::try_from(geometry)?;
    let output = transformer.transform_geometry(&input)?;

    let mut value = Value::try_from(&output)?;
    if let Some(precision) = precision {
        round_value(&mut value, precision);
    }
    Ok((::geojson::Geometry::new(value), output.geometry_type()))
}

fn id_to_string(id: &Id) -> String {
    match id {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.to_string(),
    }
}

/// Type d'entrée d'une feature rejetée, connu même si la conversion a échoué
fn value_geometry_type(value: &Value) -> GeometryType {
    match value {
        Value::Point(_) => GeometryType::Point,
        Value::MultiPoint(_) => GeometryType::MultiPoint,
        Value::LineString(_) => GeometryType::LineString,
        Value::MultiLineString(_) => GeometryType::MultiLineString,
        Value::Polygon(_) => GeometryType::Polygon,
        Value::MultiPolygon(_) => GeometryType::MultiPolygon,
        Value::GeometryCollection(_) => GeometryType::GeometryCollection,
    }
}

fn round_position(position: &mut Position, factor: f64) {
    for ordinate in position.iter_mut() {
        *ordinate = (*ordinate * factor).round() / factor;
    }
}

/// Arrondit toutes les ordonnées à `precision` décimales
fn round_value(value: &mut Value, precision: u8) {
    let factor = 10f64.powi(i32::from(precision));
    match value {
        Value::Point(position) => round_position(position, factor),
        Value::MultiPoint(positions) | Value::LineString(positions) => positions
            .iter_mut()
            .for_each(|p| round_position(p, factor)),
        Value::MultiLineString(lines) | Value::Polygon(lines) => lines
            .iter_mut()
            .flatten()
            .for_each(|p| round_position(p, factor)),
        Value::MultiPolygon(polygons) => polygons
            .iter_mut()
            .flatten()
            .flatten()
            .for_each(|p| round_position(p, factor)),
        Value::GeometryCollection(members) => members
            .iter_mut()
            .for_each(|member| round_value(&mut member.value, precision)),
    }
}

/// Écrit une FeatureCollection avec le membre `crs` du système destination
pub fn write_feature_collection(
    path: &Path,
    collection: &FeatureCollection,
    destination: &CoordinateSystem,
) -> Result<()> {
    let file =
        File::create(path).context(format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_collection(&mut writer, collection, destination)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        features = collection.features.len(),
        "GeoJSON written"
    );
    Ok(())
}

fn write_collection<W: Write>(
    writer: &mut W,
    collection: &FeatureCollection,
    destination: &CoordinateSystem,
) -> Result<()> {
    // Header FeatureCollection avec CRS
    write!(
        writer,
        r#"{{"type":"FeatureCollection","crs":{{"type":"name","properties":{{"name":"{}"}}}}"#,
        destination.urn()
    )?;

    if let Some(members) = &collection.foreign_members {
        for (key, value) in members.iter().filter(|(key, _)| key.as_str() != "crs") {
            write!(writer, ",{}:", serde_json::to_string(key)?)?;
            serde_json::to_writer(&mut *writer, value)?;
        }
    }

    write!(writer, r#","features":["#)?;
    for (i, feature) in collection.features.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        serde_json::to_writer(&mut *writer, feature)?;
    }
    write!(writer, "]}}")?;

    Ok(())
}

/// Paramètres communs à tous les fichiers d'une exécution
pub struct ReprojectOptions<M> {
    pub mapper: Arc<M>,
    /// Système source ; à défaut, le membre `crs` de chaque fichier
    pub source: Option<Arc<CoordinateSystem>>,
    pub destination: Arc<CoordinateSystem>,
    pub max_depth: usize,
    pub precision: Option<u8>,
}

impl<M: CoordinateMapper> ReprojectOptions<M> {
    /// Transformateur pour une collection donnée
    fn transformer_for(
        &self,
        collection: &FeatureCollection,
        file: &str,
    ) -> Result<GeometryTransformer<M>> {
        let declared = declared_crs(collection);
        let source = match (&self.source, declared) {
            (Some(source), Some(declared)) => {
                if declared != **source {
                    warn!(
                        file,
                        declared = %declared,
                        source = %source,
                        "Declared crs differs from the configured source"
                    );
                }
                Arc::clone(source)
            }
            (Some(source), None) => Arc::clone(source),
            (None, Some(declared)) => Arc::new(declared),
            (None, None) => anyhow::bail!(
                "No source coordinate system configured and no crs member in {}",
                file
            ),
        };

        Ok(GeometryTransformer::with_shared_mapper(
            source,
            Arc::clone(&self.destination),
            Arc::clone(&self.mapper),
        )
        .with_max_depth(self.max_depth))
    }
}

/// Lit, reprojette et écrit un fichier ; retourne le rapport du fichier
pub fn reproject_file<M>(
    options: &ReprojectOptions<M>,
    input: &Path,
    output: &Path,
) -> Result<TransformReport>
where
    M: CoordinateMapper + Send + Sync,
{
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| input.display().to_string());

    let collection = read_feature_collection(input)?;
    let transformer = options.transformer_for(&collection, &file_name)?;

    let mut report = TransformReport::new(
        &transformer.source().to_string(),
        &transformer.destination().to_string(),
    );
    let reprojected = reproject_feature_collection(
        &transformer,
        collection,
        options.precision,
        &file_name,
        &mut report,
    );
    write_feature_collection(output, &reprojected, transformer.destination())?;

    report.record_file_success();
    Ok(report)
}
