use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use travelmapcore::model::MapProps;
use travelmapcore::MapOptions;

/// Inputs for the map component plus construction options, read from YAML
/// or JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(flatten)]
    pub props: MapProps,
    #[serde(default)]
    pub map: MapOptions,
}

impl Scenario {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = std::fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario {}", path_ref.display()))?;
        Self::parse(path_ref, &contents)
    }

    pub async fn load_async(path: PathBuf) -> anyhow::Result<Self> {
        let contents = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::parse(&path, &contents)
    }

    fn parse(path: &Path, contents: &str) -> anyhow::Result<Self> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let scenario = if is_json {
            serde_json::from_str(contents)
                .with_context(|| format!("parsing scenario {}", path.display()))?
        } else {
            serde_yaml::from_str(contents)
                .with_context(|| format!("parsing scenario {}", path.display()))?
        };
        Ok(scenario)
    }
}

/// Tracks `map:` sections seen on reload. Map options are construction
/// parameters, so a changed section only takes effect on the next start.
#[derive(Debug)]
pub struct MapOptionsWatch {
    active: MapOptions,
    last_reported: Option<MapOptions>,
}

impl MapOptionsWatch {
    pub fn new(active: MapOptions) -> Self {
        Self {
            active,
            last_reported: None,
        }
    }

    /// Returns `true` the first time a given differing section is seen.
    pub fn observe(&mut self, loaded: &MapOptions) -> bool {
        if *loaded == self.active {
            self.last_reported = None;
            return false;
        }
        if self.last_reported.as_ref() == Some(loaded) {
            return false;
        }
        self.last_reported = Some(loaded.clone());
        true
    }
}
