//! Raw YAML shapes as they appear in a compose file.
//!
//! Several keys accept more than one equivalent shape. Each of those is an
//! untagged enum: serde tries the variants in declaration order and the first
//! one that decodes wins. Values are checked against their closed vocabularies
//! later, in `parse`, so errors there can name the offending token.

use serde::Deserialize;
use serde::de::IgnoredAny;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub version: Option<Scalar>,

    /// `services:` with no body is the same as no services.
    #[serde(default)]
    pub services: Option<BTreeMap<String, Option<RawService>>>,

    /// Only the keys matter; each volume's own settings are ignored.
    #[serde(default)]
    pub volumes: Option<BTreeMap<String, IgnoredAny>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawService {
    #[serde(default)]
    pub volumes: Vec<RawMount>,

    #[serde(default)]
    pub depends_on: Option<RawDependsOn>,

    #[serde(default)]
    pub labels: Option<RawLabels>,
}

#[derive(Debug, Deserialize)]
#[serde(
    untagged,
    expecting = "a mount as a `source:target[:ro]` string or a mapping with type/source/target/read_only"
)]
pub enum RawMount {
    // - ./data:/var/lib/data:ro
    Short(String),
    // - type: bind
    //   source: ./data
    //   target: /var/lib/data
    Long(RawMountLong),
}

#[derive(Debug, Default, Deserialize)]
pub struct RawMountLong {
    #[serde(default, rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub target: String,

    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Deserialize)]
#[serde(
    untagged,
    expecting = "depends_on as a list of service names or a mapping of service name to condition"
)]
pub enum RawDependsOn {
    List(Vec<String>),
    Map(BTreeMap<String, Option<RawDependsOnCondition>>),
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDependsOnCondition {
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Deserialize)]
#[serde(
    untagged,
    expecting = "labels as a list of `key=value` strings or a mapping of key to value"
)]
pub enum RawLabels {
    List(Vec<String>),
    /// `key:` with no value is an empty label.
    Map(BTreeMap<String, Option<Scalar>>),
}

/// A YAML scalar that is read back as text, so `version: 3.9` and
/// `replicas: 2` work the same as their quoted forms.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged, expecting = "a string, number or boolean")]
pub enum Scalar {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}
