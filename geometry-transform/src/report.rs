//! Rapport de reprojection avec graceful degradation
//!
//! Une feature dont la géométrie ne peut pas être transformée est écartée
//! et consignée ; le reste du fichier est écrit normalement.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

/// Statut global de la reprojection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransformStatus {
    /// Reprojection complète sans erreur
    Success,
    /// Reprojection avec des features écartées
    PartialSuccess,
    /// Rien n'a pu être reprojeté
    Failed,
}

/// Niveau de sévérité des erreurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorLevel {
    /// Fichier entier illisible ou non écrit
    Fatal,
    /// Feature écartée
    Error,
}

/// Erreur de reprojection avec contexte
#[derive(Debug, Clone, Serialize)]
pub struct TransformIssue {
    pub level: ErrorLevel,
    /// Fichier source
    pub file: Option<String>,
    /// Identifiant GeoJSON de la feature
    pub feature_id: Option<String>,
    /// Type de géométrie (nom WKT)
    pub geometry_type: Option<String>,
    pub message: String,
}

/// Statistiques par type de géométrie
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypeStats {
    pub transformed: usize,
    pub errors: usize,
}

/// Rapport complet d'une exécution
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    /// Système source (`AUTH:CODE`)
    pub source: String,
    /// Système destination (`AUTH:CODE`)
    pub destination: String,
    pub duration_secs: f64,
    pub status: TransformStatus,

    pub files_processed: usize,
    pub files_failed: usize,
    pub features_transformed: usize,
    /// Features sans géométrie, recopiées telles quelles
    pub features_without_geometry: usize,
    pub features_skipped: usize,

    /// Compteurs par type, indexés par mot-clé WKT ("POINT", "TIN"...)
    pub by_type: HashMap<String, TypeStats>,
    pub errors: Vec<TransformIssue>,
}

impl Default for TransformReport {
    fn default() -> Self {
        Self {
            source: String::new(),
            destination: String::new(),
            duration_secs: 0.0,
            status: TransformStatus::Success,
            files_processed: 0,
            files_failed: 0,
            features_transformed: 0,
            features_without_geometry: 0,
            features_skipped: 0,
            by_type: HashMap::new(),
            errors: Vec::new(),
        }
    }
}

impl TransformReport {
    /// Crée un nouveau rapport pour un couple de systèmes
    pub fn new(source: &str, destination: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            ..Default::default()
        }
    }

    /// Enregistre une feature transformée
    pub fn record_transformed(&mut self, geometry_type: &str) {
        self.features_transformed += 1;
        self.by_type
            .entry(geometry_type.to_string())
            .or_default()
            .transformed += 1;
    }

    pub fn record_without_geometry(&mut self) {
        self.features_without_geometry += 1;
    }

    /// Enregistre une feature écartée
    pub fn record_error(&mut self, error: TransformIssue) {
        self.features_skipped += 1;
        if let Some(ref geometry_type) = error.geometry_type {
            self.by_type
                .entry(geometry_type.clone())
                .or_default()
                .errors += 1;
        }
        self.errors.push(error);
    }

    /// Enregistre un fichier traité avec succès
    pub fn record_file_success(&mut self) {
        self.files_processed += 1;
    }

    /// Enregistre un fichier en échec
    pub fn record_file_failure(&mut self, file: &str, message: &str) {
        self.files_processed += 1;
        self.files_failed += 1;
        self.errors.push(TransformIssue {
            level: ErrorLevel::Fatal,
            file: Some(file.to_string()),
            feature_id: None,
            geometry_type: None,
            message: message.to_string(),
        });
    }

    /// Agrège le rapport d'un fichier traité en parallèle
    pub fn merge(&mut self, other: TransformReport) {
        self.files_processed += other.files_processed;
        self.files_failed += other.files_failed;
        self.features_transformed += other.features_transformed;
        self.features_without_geometry += other.features_without_geometry;
        self.features_skipped += other.features_skipped;
        for (geometry_type, stats) in other.by_type {
            let entry = self.by_type.entry(geometry_type).or_default();
            entry.transformed += stats.transformed;
            entry.errors += stats.errors;
        }
        self.errors.extend(other.errors);
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final basé sur les erreurs
    pub fn finalize(&mut self) {
        let has_errors = !self.errors.is_empty();
        let has_success = self.features_transformed > 0
            || self.features_without_geometry > 0
            || self.files_processed > self.files_failed;
        let all_files_failed = self.files_processed > 0 && self.files_failed == self.files_processed;

        self.status = if all_files_failed || (has_errors && !has_success) {
            TransformStatus::Failed
        } else if has_errors {
            TransformStatus::PartialSuccess
        } else {
            TransformStatus::Success
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("TRANSFORM REPORT - {} → {}", self.source, self.destination);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);

        println!("\n--- SUMMARY ---");
        println!(
            "Files: {} processed, {} failed",
            self.files_processed, self.files_failed
        );
        println!(
            "Features: {} transformed, {} without geometry, {} skipped",
            self.features_transformed, self.features_without_geometry, self.features_skipped
        );

        if !self.by_type.is_empty() {
            println!("\n--- BY TYPE ---");
            let mut types: Vec<_> = self.by_type.iter().collect();
            types.sort_by_key(|(k, _)| k.as_str());
            for (type_name, stats) in types {
                println!(
                    "  {}: {} transformed, {} errors",
                    type_name, stats.transformed, stats.errors
                );
            }
        }

        if !self.errors.is_empty() {
            println!("\n--- ERRORS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(20) {
                let location = match (&e.file, &e.feature_id) {
                    (Some(f), Some(id)) => format!("[{}:{}]", f, id),
                    (Some(f), None) => format!("[{}]", f),
                    (None, Some(id)) => format!("[{}]", id),
                    _ => String::new(),
                };
                println!("  {:?} {} {}", e.level, location, e.message);
            }
            if self.errors.len() > 20 {
                println!("  ... and {} more", self.errors.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} → {}: {} transformed, {} skipped, {} errors",
            self.source,
            self.destination,
            self.features_transformed,
            self.features_skipped,
            self.errors.len()
        )
    }
}
