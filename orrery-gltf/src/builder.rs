//! Recursive construction of the output scene graph.

use scene::{Node, Transform};

use crate::error::ReadError;
use crate::extract::extract_arrays;
use crate::primitive::build_mesh;
use crate::Env;

/// Recursion ceiling: deeper chains are treated as malformed rather than
/// risking the stack.
const MAX_DEPTH: usize = 1024;

/// Convert the whole document into a scene-graph fragment.
///
/// The returned root carries the fixed Y-up to Z-up basis change; each
/// scene's root nodes hang beneath it. Node failures are contained: the
/// offending subtree is dropped with a diagnostic and the rest of the
/// scene survives.
pub fn build_scene(env: &Env<'_>) -> Node {
    let mut root = Transform::new(glam::Mat4::from_quat(glam::Quat::from_rotation_arc(
        glam::Vec3::Y,
        glam::Vec3::Z,
    )));

    let arrays = extract_arrays(env.doc);

    for scene_desc in &env.doc.scenes {
        for &node_index in &scene_desc.nodes {
            let mut path = Vec::new();
            match build_node(env, node_index, &arrays, &mut path) {
                Ok(node) => root.children.push(node),
                Err(err) => {
                    log::warn!("skipping root node {node_index}: {err}");
                }
            }
        }
    }

    Node::Transform(root)
}

fn build_node(
    env: &Env<'_>,
    node_index: usize,
    arrays: &[Option<std::sync::Arc<scene::AttributeArray>>],
    path: &mut Vec<usize>,
) -> Result<Node, ReadError> {
    let node = env.doc.nodes.get(node_index).ok_or_else(|| {
        ReadError::MalformedFile(format!("node index {node_index} out of range"))
    })?;

    // The children arrays come straight from the file; a cycle would recurse
    // forever without this check.
    if path.contains(&node_index) {
        return Err(ReadError::MalformedFile(format!(
            "node {node_index} is its own ancestor"
        )));
    }
    if path.len() >= MAX_DEPTH {
        return Err(ReadError::MalformedFile(format!(
            "node graph deeper than {MAX_DEPTH}"
        )));
    }

    path.push(node_index);
    let result = convert_node(env, node, node_index, arrays, path);
    path.pop();

    result
}

fn convert_node(
    env: &Env<'_>,
    node: &crate::json::Node,
    node_index: usize,
    arrays: &[Option<std::sync::Arc<scene::AttributeArray>>],
    path: &mut Vec<usize>,
) -> Result<Node, ReadError> {
    let mut transform = Transform::new(node.transform());
    transform.name = node.name.clone();

    if let Some(mesh_index) = node.mesh {
        let mesh = node.mesh(env.doc).ok_or_else(|| {
            ReadError::MalformedFile(format!(
                "node {node_index} references mesh {mesh_index} out of range"
            ))
        })?;

        transform
            .children
            .push(Node::Group(build_mesh(env, mesh, arrays)));
    }

    for &child_index in &node.children {
        match build_node(env, child_index, arrays, path) {
            Ok(child) => transform.children.push(child),
            Err(err) => {
                log::warn!("skipping child {child_index} of node {node_index}: {err}");
            }
        }
    }

    Ok(Node::Transform(transform))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::Document;
    use crate::ReadOptions;

    fn build(doc: &Document) -> Node {
        let options = ReadOptions::default();
        let env = Env {
            doc,
            referrer: None,
            options: &options,
        };
        build_scene(&env)
    }

    #[test]
    fn root_rotates_y_up_to_z_up() {
        let doc = Document::default();
        let root = build(&doc);

        let Node::Transform(root) = root else {
            panic!("expected a transform root");
        };

        let up = root.matrix.transform_vector3(glam::Vec3::Y);
        assert!(up.abs_diff_eq(glam::Vec3::Z, 1e-6));
        assert!(root.children.is_empty());
    }

    #[test]
    fn nodes_nest_in_listed_order() -> serde_json::Result<()> {
        let doc: Document = serde_json::from_str(
            r#"{
                "scenes": [{ "nodes": [0] }],
                "nodes": [
                    { "name": "parent", "children": [1, 2] },
                    { "name": "left" },
                    { "name": "right" }
                ]
            }"#,
        )?;

        let root = build(&doc);
        let Node::Transform(root) = root else {
            panic!("expected a transform root");
        };

        let Node::Transform(parent) = &root.children[0] else {
            panic!("expected a transform node");
        };
        assert_eq!(parent.name.as_deref(), Some("parent"));

        let names: Vec<_> = parent
            .children
            .iter()
            .map(|child| child.name().unwrap_or(""))
            .collect();
        assert_eq!(names, ["left", "right"]);

        Ok(())
    }

    #[test]
    fn cyclic_graph_fails_that_subtree_only() -> serde_json::Result<()> {
        let doc: Document = serde_json::from_str(
            r#"{
                "scenes": [{ "nodes": [0, 2] }],
                "nodes": [
                    { "name": "cyclic", "children": [1] },
                    { "name": "loops-back", "children": [0] },
                    { "name": "healthy" }
                ]
            }"#,
        )?;

        let root = build(&doc);
        let Node::Transform(root) = root else {
            panic!("expected a transform root");
        };

        // The cyclic branch survives up to the revisit; the healthy sibling
        // is untouched.
        assert_eq!(root.children.len(), 2);
        let Node::Transform(cyclic) = &root.children[0] else {
            panic!("expected a transform node");
        };
        assert_eq!(cyclic.name.as_deref(), Some("cyclic"));
        let Node::Transform(inner) = &cyclic.children[0] else {
            panic!("expected a transform node");
        };
        assert!(inner.children.is_empty());

        assert_eq!(root.children[1].name(), Some("healthy"));

        Ok(())
    }

    #[test]
    fn sibling_reuse_of_a_node_is_not_a_cycle() -> serde_json::Result<()> {
        // A diamond: both children instance node 2. Legal in the format.
        let doc: Document = serde_json::from_str(
            r#"{
                "scenes": [{ "nodes": [0] }],
                "nodes": [
                    { "children": [1, 2] },
                    { "children": [2] },
                    { "name": "shared" }
                ]
            }"#,
        )?;

        let root = build(&doc);
        assert_eq!(root.geometry_count(), 0);

        let Node::Transform(root) = root else {
            panic!("expected a transform root");
        };
        let Node::Transform(top) = &root.children[0] else {
            panic!("expected a transform node");
        };
        assert_eq!(top.children.len(), 2);

        Ok(())
    }

    #[test]
    fn out_of_range_mesh_drops_the_node() -> serde_json::Result<()> {
        let doc: Document = serde_json::from_str(
            r#"{
                "scenes": [{ "nodes": [0, 1] }],
                "nodes": [
                    { "name": "broken", "mesh": 5 },
                    { "name": "fine" }
                ]
            }"#,
        )?;

        let root = build(&doc);
        let Node::Transform(root) = root else {
            panic!("expected a transform root");
        };

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name(), Some("fine"));

        Ok(())
    }
}
