//! Graphviz DOT output.
//!
//! Everything written here comes from sorted vectors, so rendering the same
//! groups twice yields the same bytes.

use crate::Result;
use crate::compose::{Condition, Dependency, Mount, MountKind};
use crate::graph::style::{CLUSTER_STYLES, Color, Shape, join_styles};
use crate::graph::{Category, Node, NodeGroup, ordered_present_categories};
use std::fmt::{self, Write};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Also draw bind and tmpfs mounts next to their service.
    pub host_mounts: bool,
}

/// Render all groups into one `digraph`: a cluster per group, a legend
/// cluster, then the edges.
pub fn render_dot(groups: &[NodeGroup], opts: &RenderOptions) -> Result<String> {
    let mut out = String::new();
    write_graph(&mut out, groups, opts)?;

    debug!(
        groups = groups.len(),
        nodes = groups.iter().map(|g| g.nodes.len()).sum::<usize>(),
        bytes = out.len(),
        "rendered dot graph"
    );

    Ok(out)
}

fn write_graph(w: &mut impl Write, groups: &[NodeGroup], opts: &RenderOptions) -> fmt::Result {
    writeln!(w, "digraph compose {{")?;
    writeln!(w, "  graph [fontname = \"arial\"];")?;
    writeln!(w, "  node  [fontname = \"arial\"];")?;
    writeln!(
        w,
        "  edge  [fontname = \"arial\" color = {}];",
        quote(Color::DarkGrey.as_str())
    )?;

    for (index, group) in groups.iter().enumerate() {
        write_cluster_header(w, index, &group.label)?;
        for node in &group.nodes {
            write_node(w, &node.name, &node.label, node.category, false)?;
        }
        if opts.host_mounts {
            for node in &group.nodes {
                write_host_mounts(w, node)?;
            }
        }
        writeln!(w, "  }}")?;
    }

    write_legend(w, groups)?;

    for node in groups.iter().flat_map(|g| &g.nodes) {
        write_edges(w, node)?;
    }

    writeln!(w, "}}")
}

fn write_cluster_header(w: &mut impl Write, index: usize, label: &str) -> fmt::Result {
    writeln!(w, "  subgraph cluster_{} {{", index)?;
    writeln!(w, "    label = {}", quote(label))?;
    writeln!(w, "    shape = {}", quote(Shape::Box.as_str()))?;
    writeln!(w, "    style = {}", quote(&join_styles(CLUSTER_STYLES, ",")))?;
    writeln!(w, "    color = {}", quote(Color::DarkGrey.as_str()))
}

/// One small node per category in use, in declaration order.
fn write_legend(w: &mut impl Write, groups: &[NodeGroup]) -> fmt::Result {
    write_cluster_header(w, groups.len(), "Legend")?;
    for category in ordered_present_categories(groups) {
        let id = format!("legend_{}", category.name());
        write_node(w, &id, category.name(), category, true)?;
    }
    writeln!(w, "  }}")
}

/// `name [decorations];` inside a cluster.
fn write_node(
    w: &mut impl Write,
    name: &str,
    label: &str,
    category: Category,
    small: bool,
) -> fmt::Result {
    let d = category.decorations();
    let fontsize = if small { "fontsize = \"8pt\"  " } else { "" };

    writeln!(
        w,
        "    {:<36} [shape = {:<12} style = {:<24} fillcolor = {:<12} color = {:<12} fontcolor = {:<12} {}label = {}];",
        sanitize(name),
        quote(d.shape.as_str()),
        quote(&join_styles(d.styles, ",")),
        quote(d.palette.fill.as_str()),
        quote(d.palette.border.as_str()),
        quote(d.palette.font.as_str()),
        fontsize,
        quote(label),
    )
}

/// Host and anonymous mounts as dashed cylinders hanging off their service.
/// Ids carry a `mount_` prefix, like `legend_`, so they stay apart from
/// service names.
fn write_host_mounts(w: &mut impl Write, node: &Node) -> fmt::Result {
    let border = node.category.decorations().palette.border;
    let owner = sanitize(&node.name);

    for (i, mount) in node.host_mounts.iter().enumerate() {
        let id = format!("mount_{}_{}", owner, i);
        writeln!(
            w,
            "    {:<36} [shape = {:<12} style = {:<24} color = {:<12} fontcolor = {:<12} label = {}];",
            id,
            quote(Shape::Cylinder.as_str()),
            quote(&join_styles(CLUSTER_STYLES, ",")),
            quote(border.as_str()),
            quote(Color::DarkGrey.as_str()),
            quote(&mount_label(mount)),
        )?;
        writeln!(w, "    {:<36} -> {} [style=\"dotted\"];", owner, id)?;
    }

    Ok(())
}

fn mount_label(mount: &Mount) -> String {
    let ro = if mount.read_only { " (ro)" } else { "" };
    match mount.kind {
        MountKind::Bind => format!("bind{}\nfrom: {}\nto: {}", ro, mount.source, mount.target),
        MountKind::Tmpfs => format!("tmpfs\nto: {}", mount.target),
        MountKind::NamedVolume if mount.source.is_empty() => format!("volume{}\nto: {}", ro, mount.target),
        MountKind::NamedVolume => format!("volume{}\nfrom: {}\nto: {}", ro, mount.source, mount.target),
    }
}

/// Dependency edges, then one edge per named volume the service mounts.
fn write_edges(w: &mut impl Write, node: &Node) -> fmt::Result {
    let from = sanitize(&node.name);

    for Dependency { on, condition } in &node.dependencies {
        let attrs = match condition {
            Condition::Healthy => "style=\"bold\" arrowhead=\"diamond\"",
            Condition::CompletedSuccessfully => "style=\"bold\"",
            Condition::Started => "style=\"dashed\"",
        };
        writeln!(w, "  {:<38} -> {:<38} [{}];", from, sanitize(on), attrs)?;
    }

    for mount in &node.volumes {
        writeln!(
            w,
            "  {:<38} -> {:<38} [style=\"dashed\"];",
            from,
            sanitize(&mount.source)
        )?;
    }

    Ok(())
}

/// Double-quoted DOT string with escapes. Padding applies to the result, so
/// `{:<12}` on it aligns the quoted form.
fn quote(s: &str) -> String {
    format!("{:?}", s)
}

/// Dashes are not permitted in DOT identifiers.
fn sanitize(name: &str) -> String {
    name.replace('-', "_")
}
