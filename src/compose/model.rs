use anyhow::bail;
use std::collections::BTreeMap;
use std::str::FromStr;

/// One parsed compose file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub version: Option<String>,
    pub services: BTreeMap<String, Service>,
    /// Names of the top-level `volumes`, sorted.
    pub volumes: Vec<String>,
}

/// A service with its mounts, dependencies and labels normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Service {
    /// Sorted by (source, target).
    pub mounts: Vec<Mount>,
    /// Sorted by target service name.
    pub dependencies: Vec<Dependency>,
    pub labels: BTreeMap<String, String>,
}

impl Service {
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub kind: MountKind,
    pub source: String,
    pub target: String,
    pub read_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MountKind {
    Bind,
    NamedVolume,
    Tmpfs,
}

impl FromStr for MountKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "volume" => Ok(MountKind::NamedVolume),
            "bind" => Ok(MountKind::Bind),
            "tmpfs" => Ok(MountKind::Tmpfs),
            other => bail!("invalid volume type: {}", other),
        }
    }
}

/// A "depends on" edge from the owning service to `on`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub on: String,
    pub condition: Condition,
}

/// Readiness required of the dependency before the dependent starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Condition {
    #[default]
    Started,
    Healthy,
    CompletedSuccessfully,
}

impl FromStr for Condition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "service_started" => Ok(Condition::Started),
            "service_healthy" => Ok(Condition::Healthy),
            "service_completed_successfully" => Ok(Condition::CompletedSuccessfully),
            other => bail!("invalid condition: {}", other),
        }
    }
}
