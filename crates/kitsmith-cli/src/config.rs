//! Configuration supplier: an optional config file may provide the source
//! root and service reference. The file format stays behind the [`Loader`]
//! trait; explicit CLI flags take precedence over loaded values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{CliError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Qualified service reference, e.g. `helloservice::HelloService`.
    pub service: Option<String>,
    /// Source root the service is extracted from and artifacts are written to.
    pub path: Option<PathBuf>,
}

pub trait Loader {
    fn supports(&self, filename: &Path) -> bool;
    fn load(&self, filename: &Path) -> Result<Config>;
}

pub struct YamlLoader;

impl Loader for YamlLoader {
    fn supports(&self, filename: &Path) -> bool {
        matches!(
            filename.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        )
    }

    fn load(&self, filename: &Path) -> Result<Config> {
        let data = fs::read_to_string(filename)?;
        serde_yaml::from_str(&data).map_err(|err| CliError::Config(err.to_string()))
    }
}

/// Picks the first registered loader that recognizes the filename.
#[derive(Default)]
pub struct LoaderResolver {
    loaders: Vec<Box<dyn Loader>>,
}

impl LoaderResolver {
    pub fn new() -> Self {
        let mut resolver = LoaderResolver::default();
        resolver.add(Box::new(YamlLoader));
        resolver
    }

    pub fn add(&mut self, loader: Box<dyn Loader>) {
        self.loaders.push(loader);
    }

    pub fn resolve(&self, filename: &Path) -> Option<&dyn Loader> {
        self.loaders
            .iter()
            .find(|loader| loader.supports(filename))
            .map(Box::as_ref)
    }

    pub fn load(&self, filename: &Path) -> Result<Config> {
        match self.resolve(filename) {
            Some(loader) => loader.load(filename),
            None => Err(CliError::Config(format!(
                "no loader supports {}",
                filename.display()
            ))),
        }
    }
}
