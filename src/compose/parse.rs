use crate::Result;
use crate::compose::model::{Condition, Dependency, Document, Mount, MountKind, Service};
use crate::compose::raw::{RawDependsOn, RawDocument, RawLabels, RawMount, RawService};
use anyhow::{Context, bail};
use std::collections::BTreeMap;
use tracing::debug;

/// Decode one compose document from an in-memory buffer.
///
/// Any unrecognized shape, invalid `type`/`condition` token or malformed
/// label aborts the whole document; nothing is returned on failure.
pub fn parse(bytes: &[u8]) -> Result<Document> {
    let raw: RawDocument =
        serde_yaml::from_slice(bytes).context("could not unmarshal yaml contents")?;

    let mut services = BTreeMap::new();
    for (name, service) in raw.services.unwrap_or_default() {
        let service = normalize_service(service.unwrap_or_default())
            .with_context(|| format!("service '{}'", name))?;
        services.insert(name, service);
    }

    // BTreeMap keys are already sorted.
    let volumes: Vec<String> = raw.volumes.unwrap_or_default().into_keys().collect();

    let doc = Document {
        version: raw.version.map(|v| v.to_string()),
        services,
        volumes,
    };

    debug!(
        version = doc.version.as_deref().unwrap_or(""),
        services = doc.services.len(),
        volumes = doc.volumes.len(),
        "parsed compose document"
    );

    Ok(doc)
}

fn normalize_service(raw: RawService) -> Result<Service> {
    let mut dependencies = match raw.depends_on {
        None => Vec::new(),
        Some(RawDependsOn::List(names)) => names
            .into_iter()
            .map(|on| Dependency {
                on,
                condition: Condition::Started,
            })
            .collect(),
        Some(RawDependsOn::Map(entries)) => {
            let mut out = Vec::with_capacity(entries.len());
            for (on, cond) in entries {
                let condition: Condition = cond.unwrap_or_default().condition.parse()?;
                out.push(Dependency { on, condition });
            }
            out
        }
    };
    dependencies.sort_by(|a, b| a.on.cmp(&b.on));

    let mut mounts = Vec::with_capacity(raw.volumes.len());
    for mount in raw.volumes {
        mounts.push(match mount {
            RawMount::Short(s) => parse_short_mount(&s)?,
            RawMount::Long(long) => Mount {
                kind: long.kind.parse()?,
                source: long.source,
                target: long.target,
                read_only: long.read_only,
            },
        });
    }
    mounts.sort_by(|a, b| a.source.cmp(&b.source).then_with(|| a.target.cmp(&b.target)));

    let mut labels = BTreeMap::new();
    match raw.labels {
        None => {}
        Some(RawLabels::Map(map)) => {
            for (key, value) in map {
                labels.insert(key, value.map(|v| v.to_string()).unwrap_or_default());
            }
        }
        Some(RawLabels::List(list)) => {
            for entry in list {
                let Some((key, value)) = entry.split_once('=') else {
                    bail!("invalid label format: {}", entry);
                };
                labels.insert(key.to_string(), value.to_string());
            }
        }
    }

    Ok(Service {
        mounts,
        dependencies,
        labels,
    })
}

/// Parse "source:target[:ro]".
///
/// A source starting with `/` or `.` is a host path, anything else names a
/// volume.
fn parse_short_mount(s: &str) -> Result<Mount> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() < 2 {
        bail!("invalid volume format: {:?}", s);
    }

    let source = parts[0];
    let kind = if source.starts_with('/') || source.starts_with('.') {
        MountKind::Bind
    } else {
        MountKind::NamedVolume
    };

    Ok(Mount {
        kind,
        source: source.to_string(),
        target: parts[1].to_string(),
        read_only: parts.len() == 3 && parts[2] == "ro",
    })
}
