//! Generator configuration.
//!
//! A `codegen.toml` maps each table generator to its input table, its
//! template and its output file. Sections left out of the file keep the
//! built-in defaults, which point into the java source tree of `pkts-3gppitu`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::Error;

/// The configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "codegen.toml";

/// The table generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    ReferencePoints,
    Gtpv2InformationElements,
}

impl Generator {
    /// The name of the template variable holding the records.
    pub fn template_var(&self) -> &'static str {
        match self {
            Generator::ReferencePoints => "interfaces",
            Generator::Gtpv2InformationElements => "elements",
        }
    }
}

/// Paths used by a single generator run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratorConfig {
    pub table: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    pub reference_points: GeneratorConfig,
    pub gtpv2_information_elements: GeneratorConfig,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            reference_points: GeneratorConfig {
                table: PathBuf::from("3gpp_itu_interfaces.tsv"),
                template: PathBuf::from("templates/reference_points.liquid"),
                output: PathBuf::from(
                    "../pkts-3gppitu/src/main/java/io/pkts/tgpp/ReferencePoint.java",
                ),
            },
            gtpv2_information_elements: GeneratorConfig {
                table: PathBuf::from("GTPv2_Information_Elements.tsv"),
                template: PathBuf::from("templates/gtpv2_information_elements.liquid"),
                output: PathBuf::from(
                    "../pkts-3gppitu/src/main/java/io/pkts/tgpp/Gtp2InformationElements.java",
                ),
            },
        }
    }
}

impl CodegenConfig {
    /// Load the configuration.
    ///
    /// With an explicit `path` the file must exist. Otherwise
    /// `codegen.toml` in the working directory is read when present, and the
    /// defaults are used when it is not.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = match path {
            Some(path) => path,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let text = std::fs::read_to_string(path).map_err(Error::io(path))?;
        let config = Self::parse(&text)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse the toml text of a configuration file.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    pub fn generator(&self, generator: Generator) -> &GeneratorConfig {
        match generator {
            Generator::ReferencePoints => &self.reference_points,
            Generator::Gtpv2InformationElements => &self.gtpv2_information_elements,
        }
    }
}
