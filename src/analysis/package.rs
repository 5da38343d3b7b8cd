//! Package-level analysis
//!
//! Walks every resource of a content package archive and runs the parameter
//! and guideline analyses on integration flows. A failing artifact is logged
//! and left without results; it never aborts the rest of the package.

use std::path::Path;
use tracing::{debug, info, warn};

use super::parameters::ParameterAnalyzer;
use crate::config::InspectorConfig;
use crate::import::ImportError;
use crate::import::package::{ArtifactFiles, PackageArchive, list_archive_files};
use crate::models::{ArtifactAnalysis, PackageAnalysis, PackageResource};
use crate::validation::GuidelineChecker;

/// Analyzer for content package archives
#[derive(Debug, Clone, Default)]
pub struct PackageAnalyzer {
    config: InspectorConfig,
    parameters: ParameterAnalyzer,
    guidelines: GuidelineChecker,
}

impl PackageAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InspectorConfig) -> Self {
        Self {
            parameters: ParameterAnalyzer::with_config(&config.parameters),
            guidelines: GuidelineChecker::new(),
            config,
        }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Analyze a package archive held in memory.
    ///
    /// # Errors
    ///
    /// `ImportError::ArchiveError` when the bytes are not a zip archive and
    /// `ImportError::DecodeError` when the resource index is unreadable.
    pub fn analyze_bytes(&self, name: &str, bytes: &[u8]) -> Result<PackageAnalysis, ImportError> {
        let archive = PackageArchive::from_bytes(name, bytes)?;
        self.analyze(&archive)
    }

    /// Analyze a package archive on disk
    pub fn analyze_file(&self, path: &Path) -> anyhow::Result<PackageAnalysis> {
        let archive = PackageArchive::open(path)?;
        Ok(self.analyze(&archive)?)
    }

    /// Analyze every resource of a loaded archive
    pub fn analyze(&self, archive: &PackageArchive) -> Result<PackageAnalysis, ImportError> {
        let analysis = if archive.is_content_package() {
            self.analyze_package(archive)?
        } else {
            self.analyze_bare_flow(archive)
        };

        info!(
            "Analyzed '{}': {} artifacts",
            analysis.archive_name,
            analysis.artifacts.len()
        );
        Ok(analysis)
    }

    fn analyze_package(&self, archive: &PackageArchive) -> Result<PackageAnalysis, ImportError> {
        let index = archive.resource_index()?.unwrap_or_default();
        let metadata = match archive.content_metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Ignoring unreadable package description: {}", e);
                None
            }
        };

        let artifacts = index
            .resources
            .into_iter()
            .map(|resource| self.analyze_resource(archive, resource))
            .collect();

        Ok(PackageAnalysis {
            archive_name: archive.name().to_string(),
            metadata,
            synthetic: false,
            artifacts,
        })
    }

    fn analyze_bare_flow(&self, archive: &PackageArchive) -> PackageAnalysis {
        let id = archive
            .name()
            .strip_suffix(".zip")
            .unwrap_or(archive.name())
            .to_string();
        debug!("No resource index in '{}', treating it as a single flow", archive.name());

        let files = archive.artifact_files(&self.config.archive);
        let mut artifact = ArtifactAnalysis::new(PackageResource::iflow(id.clone(), id));
        self.analyze_flow_files(&mut artifact, &files);

        PackageAnalysis {
            archive_name: archive.name().to_string(),
            metadata: None,
            synthetic: true,
            artifacts: vec![artifact],
        }
    }

    fn analyze_resource(
        &self,
        archive: &PackageArchive,
        resource: PackageResource,
    ) -> ArtifactAnalysis {
        let entry = resource.content_entry();
        let mut artifact = ArtifactAnalysis::new(resource);

        if !artifact.resource.is_iflow() && !artifact.resource.is_script_collection() {
            return artifact;
        }
        let Some(content) = archive.entry(&entry) else {
            warn!("Package has no payload '{}' for {}", entry, artifact.resource.title());
            return artifact;
        };

        if artifact.resource.is_iflow() {
            match ArtifactFiles::from_zip_bytes(content, &self.config.archive) {
                Ok(files) => self.analyze_flow_files(&mut artifact, &files),
                Err(e) => warn!("Skipping flow {}: {}", artifact.resource.title(), e),
            }
        } else {
            match list_archive_files(content) {
                Ok(files) => artifact.scripts = files,
                Err(e) => warn!("Skipping script collection {}: {}", artifact.resource.title(), e),
            }
        }
        artifact
    }

    fn analyze_flow_files(&self, artifact: &mut ArtifactAnalysis, files: &ArtifactFiles) {
        artifact.parameters = self.parameters.analyze(
            files.schema.as_deref(),
            files.properties.as_deref(),
            files.process.as_deref(),
        );
        artifact.guidelines = files
            .process
            .as_deref()
            .and_then(|process| self.guidelines.check(process));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::{FileOptions, ZipWriter};

    fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in files {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_bare_flow_archive_is_synthetic() {
        let bytes = zip_bytes(&[
            ("parameters.propdef", b"<parameters><parameter><name>a</name></parameter></parameters>"),
            ("parameters.prop", b"a=1"),
            ("Flow.iflw", b"<definitions><process name=\"Flow\"/></definitions>"),
        ]);
        let analysis = PackageAnalyzer::new()
            .analyze_bytes("Order_Sync.zip", &bytes)
            .unwrap();

        assert!(analysis.synthetic);
        let artifact = analysis.artifact("Order_Sync").unwrap();
        assert!(artifact.resource.is_iflow());
        assert!(artifact.parameters.as_ref().unwrap().orphan.contains("a"));
        assert!(artifact.guidelines.is_some());
    }

    #[test]
    fn test_unknown_resource_types_are_listed_without_results() {
        use base64::Engine;
        let index = r#"{"resources":[{"id":"m1","resourceType":"MessageMapping"}]}"#;
        let encoded = base64::engine::general_purpose::STANDARD.encode(index);
        let bytes = zip_bytes(&[("resources.cnt", encoded.as_bytes())]);

        let analysis = PackageAnalyzer::new().analyze_bytes("pkg.zip", &bytes).unwrap();
        assert!(!analysis.synthetic);
        let artifact = analysis.artifact("m1").unwrap();
        assert!(artifact.parameters.is_none());
        assert!(artifact.guidelines.is_none());
        assert!(artifact.scripts.is_empty());
    }
}
