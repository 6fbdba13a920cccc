//! Show the local cluster configuration.

use anyhow::Result;
use meshsync_types::Node;
use std::fmt::Write;

use crate::config::Config;

/// Run the show command.
pub fn run(config: &Config) -> Result<()> {
    print!("{}", report(config));
    Ok(())
}

/// The full report printed by `show`.
fn report(config: &Config) -> String {
    let cm = config.cluster_config();
    let mut out = String::new();

    let _ = writeln!(out, "=== meshsync cluster configuration ===");
    let _ = writeln!(out);

    match &config.node {
        Some(node) => {
            let _ = writeln!(out, "Local node: {}", node.id);
            if let Some(name) = &node.name {
                let _ = writeln!(out, "  Name:      {}", name);
            }
        }
        None => {
            let _ = writeln!(out, "Local node: not configured");
        }
    }
    let _ = writeln!(out);

    if cm.repositories.is_empty() {
        let _ = writeln!(out, "No repositories configured.");
        return out;
    }

    for (repo, declared) in cm.repositories.iter().zip(&config.repositories) {
        let _ = writeln!(out, "Repository: {}", repo.id);
        if let Some(dir) = &declared.directory {
            let _ = writeln!(out, "  Directory: {}", dir.display());
        }
        let _ = writeln!(out, "  Nodes:     {}", repo.nodes.len());
        for node in &repo.nodes {
            let _ = writeln!(out, "    {}", describe_node(node));
        }
        let _ = writeln!(out);
    }

    out
}

/// One node line: ID, access mode, trust, and the raw share bits.
fn describe_node(node: &Node) -> String {
    let mode = if node.flags.is_read_only() {
        "read-only"
    } else {
        "read-write"
    };
    let trust = if node.flags.is_trusted() {
        ", trusted"
    } else {
        ""
    };
    format!(
        "{} ({}{}, share bits {:#04x})",
        node.id,
        mode,
        trust,
        node.flags.share_bits()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshsync_types::{NodeFlags, NodeId};

    #[test]
    fn describe_trusted_read_only_node() {
        let node = Node {
            id: NodeId::new("node-a"),
            flags: NodeFlags::from_permissions(true, true),
        };
        assert_eq!(
            describe_node(&node),
            "node-a (read-only, trusted, share bits 0x03)"
        );
    }

    #[test]
    fn describe_plain_node() {
        let node = Node {
            id: NodeId::new("node-b"),
            flags: NodeFlags::default(),
        };
        assert_eq!(describe_node(&node), "node-b (read-write, share bits 0x00)");
    }

    #[test]
    fn report_for_empty_config() {
        let text = report(&Config::default());
        assert!(text.contains("Local node: not configured"));
        assert!(text.contains("No repositories configured."));
        assert!(run(&Config::default()).is_ok());
    }

    #[test]
    fn report_lists_local_node_and_repositories() {
        let config: Config = toml::from_str(
            r#"
[node]
id = "node-a"
name = "laptop"

[[repository]]
id = "default"
directory = "/srv/sync"
[[repository.node]]
id = "node-a"
trusted = true
"#,
        )
        .unwrap();

        let text = report(&config);
        assert!(text.contains("Local node: node-a"));
        assert!(text.contains("  Name:      laptop"));
        assert!(text.contains("Repository: default"));
        assert!(text.contains("  Directory: /srv/sync"));
        assert!(text.contains("    node-a (read-write, trusted, share bits 0x01)"));
    }
}
