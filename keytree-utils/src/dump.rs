use keytree::{KeyTreeMap, Slot, Storage};
use std::{collections::BTreeMap, fmt::Display, io::Write};

/// Write the flat view of `tree`, one `path<TAB>value` line per item.
///
/// An empty child node is written with `{}` as its value.
pub fn write_flat<K, V, S>(tree: &KeyTreeMap<K, V, S>, mut out: impl Write) -> std::io::Result<()>
where
    K: Clone + Display,
    V: Display,
    S: Storage<K>,
{
    for (path, slot) in tree.iter() {
        match slot {
            Slot::Leaf(value) => writeln!(out, "{}\t{}", path, value)?,
            Slot::Node(_) => writeln!(out, "{}\t{{}}", path)?,
        }
    }
    Ok(())
}

type Node<'a> = &'a NodeDescriptor;
type Edge<'a> = (usize, usize);

struct TreeGraph {
    nodes: BTreeMap<usize, NodeDescriptor>,
    edges: Vec<(usize, usize)>,
}

enum NodeDescriptor {
    Node { id: usize, label: String },
    Leaf { id: usize, label: String },
}

impl NodeDescriptor {
    fn id(&self) -> usize {
        match self {
            Self::Node { id, .. } | Self::Leaf { id, .. } => *id,
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Node { label, .. } | Self::Leaf { label, .. } => label,
        }
    }
}

impl TreeGraph {
    fn add<K: Display, V: Display, S: Storage<K>>(&mut self, parent: usize, tree: &KeyTreeMap<K, V, S>) {
        for (segment, slot) in tree.children() {
            let id = self.nodes.len();
            let node = match slot {
                Slot::Leaf(value) => NodeDescriptor::Leaf {
                    id,
                    label: format!("{} = {}", segment, value),
                },
                Slot::Node(_) => NodeDescriptor::Node {
                    id,
                    label: segment.to_string(),
                },
            };
            self.nodes.insert(id, node);
            self.edges.push((parent, id));
            if let Slot::Node(child) = slot {
                self.add(id, child);
            }
        }
    }
}

impl<'a> dot::Labeller<'a, Node<'a>, Edge<'a>> for TreeGraph {
    fn graph_id(&'a self) -> dot::Id<'a> {
        dot::Id::new("keytree").unwrap()
    }

    fn node_id(&'a self, n: &Node<'a>) -> dot::Id<'a> {
        dot::Id::new(format!("N{}", n.id())).unwrap()
    }

    fn node_label(&'a self, n: &Node<'a>) -> dot::LabelText<'a> {
        dot::LabelText::label(n.label())
    }

    fn node_shape(&'a self, n: &Node<'a>) -> Option<dot::LabelText<'a>> {
        let shape = match n {
            NodeDescriptor::Node { .. } => "box",
            NodeDescriptor::Leaf { .. } => "ellipse",
        };
        Some(dot::LabelText::label(shape))
    }
}

impl<'a> dot::GraphWalk<'a, Node<'a>, Edge<'a>> for TreeGraph {
    fn nodes(&'a self) -> dot::Nodes<'a, Node<'a>> {
        self.nodes.values().collect()
    }

    fn edges(&'a self) -> dot::Edges<'a, Edge<'a>> {
        self.edges.iter().cloned().collect()
    }

    fn source(&'a self, edge: &Edge<'a>) -> Node<'a> {
        &self.nodes[&edge.0]
    }

    fn target(&'a self, edge: &Edge<'a>) -> Node<'a> {
        &self.nodes[&edge.1]
    }
}

/// Render `tree` as a Graphviz digraph. The root and every child node are boxes,
/// leaves are ellipses labelled `segment = value`.
pub fn graph<K, V, S>(tree: &KeyTreeMap<K, V, S>, mut out: impl Write) -> std::io::Result<()>
where
    K: Display,
    V: Display,
    S: Storage<K>,
{
    let mut graph = TreeGraph {
        nodes: BTreeMap::new(),
        edges: Vec::new(),
    };
    graph.nodes.insert(
        0,
        NodeDescriptor::Node {
            id: 0,
            label: "root".to_owned(),
        },
    );
    graph.add(0, tree);
    dot::render(&graph, &mut out)
}
