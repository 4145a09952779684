#![warn(clippy::all)]

//! Loads a glTF file and prints the converted scene graph.

use std::sync::Arc;

use anyhow::{Context, Result};
use orrery::gltf::{read_location, ReadOptions};
use orrery::scene::{Node, TextureCache};

fn main() -> Result<()> {
    env_logger::init();

    let mut skip_normals = false;
    let mut locations = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--skip-normals" => skip_normals = true,
            _ => locations.push(arg),
        }
    }

    if locations.is_empty() {
        anyhow::bail!("usage: orrery-demo [--skip-normals] <file.gltf|file.glb>...");
    }

    let options = ReadOptions {
        skip_normals,
        cache: Some(Arc::new(TextureCache::new())),
        fetcher: None,
    };

    for location in &locations {
        let root = read_location(location, &options)
            .with_context(|| format!("failed to read {location}"))?;

        log::info!("{location}: {} drawables", root.geometry_count());
        print_node(&root, 0);
    }

    Ok(())
}

fn print_node(node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);

    match node {
        Node::Transform(transform) => {
            println!(
                "{indent}transform {:?}",
                transform.name.as_deref().unwrap_or("")
            );
        }
        Node::Group(group) => {
            println!("{indent}group {:?}", group.name.as_deref().unwrap_or(""));
        }
        Node::Geometry(geometry) => {
            let indices: usize = geometry
                .primitive_sets
                .iter()
                .map(|set| set.indices.len())
                .sum();
            println!(
                "{indent}geometry: {} vertices, {} indices{}{}",
                geometry.vertex_count(),
                indices,
                if geometry.state.base_color_texture.is_some() {
                    ", textured"
                } else {
                    ""
                },
                if geometry.state.transparent_bin {
                    ", transparent"
                } else {
                    ""
                },
            );
        }
    }

    for child in node.children() {
        print_node(child, depth + 1);
    }
}
