use crate::compose::{Dependency, Document, Mount, MountKind};
use crate::graph::category::{Category, Classifier};

/// Service label overriding the displayed node label.
pub const LABEL_DISPLAY_NAME: &str = "graph.label";

/// Service label selecting a category by name, bypassing the name rules.
pub const LABEL_CATEGORY: &str = "graph.category";

/// A renderable graph vertex: a service or a declared volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub label: String,
    pub category: Category,
    /// Named-volume mounts; each becomes an edge to the volume node.
    pub volumes: Vec<Mount>,
    /// Bind, tmpfs and anonymous volume mounts, only drawn on request.
    pub host_mounts: Vec<Mount>,
    pub dependencies: Vec<Dependency>,
}

impl Node {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            category,
            volumes: Vec::new(),
            host_mounts: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}

/// The nodes of one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGroup {
    pub label: String,
    pub nodes: Vec<Node>,
}

impl NodeGroup {
    pub fn new(label: impl Into<String>, doc: &Document, classifier: &Classifier) -> Self {
        Self {
            label: label.into(),
            nodes: nodes_from_document(doc, classifier),
        }
    }
}

/// One node per service plus one per top-level volume, sorted by name.
pub fn nodes_from_document(doc: &Document, classifier: &Classifier) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(doc.services.len() + doc.volumes.len());

    for (name, service) in &doc.services {
        let (volumes, host_mounts): (Vec<Mount>, Vec<Mount>) = service
            .mounts
            .iter()
            .cloned()
            // Anonymous volumes have no volume node to point at.
            .partition(|m| m.kind == MountKind::NamedVolume && !m.source.is_empty());

        let category = classifier.classify(name, service.label(LABEL_CATEGORY).unwrap_or(""));

        nodes.push(Node {
            name: name.clone(),
            label: service
                .label(LABEL_DISPLAY_NAME)
                .unwrap_or(name.as_str())
                .to_string(),
            category,
            volumes,
            host_mounts,
            dependencies: service.dependencies.clone(),
        });
    }

    for name in &doc.volumes {
        nodes.push(Node::new(name.clone(), Category::Volume));
    }

    // Byte-wise name order keeps the output reproducible.
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    nodes
}

/// Categories present in any group, in legend (declaration) order.
pub fn ordered_present_categories(groups: &[NodeGroup]) -> Vec<Category> {
    let mut present = [false; Category::COUNT];
    for node in groups.iter().flat_map(|g| &g.nodes) {
        present[node.category as usize] = true;
    }

    Category::ALL
        .into_iter()
        .filter(|c| present[*c as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{Condition, parse};
    use pretty_assertions::assert_eq;

    fn names(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn builds_sorted_nodes() {
        let doc = parse(
            br#"
services:
  web-ui:
    labels:
      graph.label: Web
    depends_on:
      api:
        condition: service_healthy
    volumes:
      - ./static:/srv/static:ro
      - assets:/srv/assets
  api:
    labels:
      - graph.category=service2
volumes:
  assets:
  Zeta:
"#,
        )
        .unwrap();
        let classifier = Classifier::new().unwrap();
        let nodes = nodes_from_document(&doc, &classifier);

        assert_eq!(names(&nodes), vec!["Zeta", "api", "assets", "web-ui"]);

        assert_eq!(nodes[0].category, Category::Volume);
        assert_eq!(nodes[1].category, Category::Service2);
        assert_eq!(nodes[1].label, "api");
        assert_eq!(nodes[2].category, Category::Volume);

        let web = &nodes[3];
        assert_eq!(web.label, "Web");
        assert_eq!(web.category, Category::UserInterface);
        assert_eq!(web.volumes.len(), 1);
        assert_eq!(web.volumes[0].source, "assets");
        assert_eq!(web.host_mounts.len(), 1);
        assert_eq!(web.host_mounts[0].kind, MountKind::Bind);
        assert_eq!(
            web.dependencies,
            vec![Dependency {
                on: "api".to_string(),
                condition: Condition::Healthy,
            }]
        );
    }

    #[test]
    fn anonymous_volumes_are_not_edges() {
        let doc = parse(
            b"services:\n  app:\n    volumes:\n      - type: volume\n        target: /data\n      - \":/cache\"\n",
        )
        .unwrap();
        let nodes = nodes_from_document(&doc, &Classifier::new().unwrap());

        assert!(nodes[0].volumes.is_empty());
        assert_eq!(nodes[0].host_mounts.len(), 2);
        assert!(nodes[0].host_mounts.iter().all(|m| m.kind == MountKind::NamedVolume));
    }

    #[test]
    fn classifies_across_files() {
        let classifier = Classifier::new().unwrap();
        let first = parse(b"services:\n  postgres-db:\n    image: postgres\n").unwrap();
        let second = parse(b"services:\n  my-ui:\n    image: nginx\n").unwrap();

        let groups = vec![
            NodeGroup::new("a.yaml", &first, &classifier),
            NodeGroup::new("b.yaml", &second, &classifier),
        ];

        assert_eq!(groups[0].nodes[0].category, Category::Database);
        assert_eq!(groups[1].nodes[0].category, Category::UserInterface);
    }

    #[test]
    fn present_categories_follow_declaration_order() {
        let groups = vec![
            NodeGroup {
                label: "docker-compose-1.yaml".to_string(),
                nodes: vec![
                    Node::new("my-service1", Category::Service1),
                    Node::new("my-database", Category::Database),
                ],
            },
            NodeGroup {
                label: "docker-compose-2.yaml".to_string(),
                nodes: vec![
                    Node::new("my-proxy", Category::Tool),
                    Node::new("my-storage", Category::Storage),
                    Node::new("my-service2", Category::Service1),
                ],
            },
        ];

        let expected = vec![
            Category::Service1,
            Category::Tool,
            Category::Database,
            Category::Storage,
        ];
        assert_eq!(ordered_present_categories(&groups), expected);

        let reversed: Vec<NodeGroup> = groups
            .into_iter()
            .rev()
            .map(|mut g| {
                g.nodes.reverse();
                g
            })
            .collect();
        assert_eq!(ordered_present_categories(&reversed), expected);
    }
}
