/// Transform-tree nodes.
///
/// A [`Part`] owns an optional mesh, an optional material, a local
/// transform and its children. Children are owned by value, so cloning a
/// part deep-copies the whole subtree, meshes included; two mirrored copies
/// never share geometry.
use nalgebra::{Matrix4, Point3};

use crate::geometry::Mesh;
use crate::material::Material;
use crate::transform::NodeTransform;

/// Child indices leading from a root part to one of its descendants
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path to the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// The same relative path, one level deeper under `index`
    pub fn under(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.push(index);
        indices.extend_from_slice(&self.0);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

/// A node of the craft's transform tree
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub mesh: Option<Mesh>,
    pub material: Option<Material>,
    pub transform: NodeTransform,
    children: Vec<Part>,
}

impl Part {
    /// Empty grouping node
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            material: None,
            transform: NodeTransform::identity(),
            children: Vec::new(),
        }
    }

    /// Drawable node
    pub fn mesh(name: impl Into<String>, mesh: Mesh, material: Material) -> Self {
        Self {
            mesh: Some(mesh),
            material: Some(material),
            ..Self::group(name)
        }
    }

    /// Attach `child` and return its index
    pub fn add(&mut self, child: Part) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    pub fn with_child(mut self, child: Part) -> Self {
        self.add(child);
        self
    }

    pub fn children(&self) -> &[Part] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Part> {
        self.children.get(index)
    }

    /// Pre-multiply the local transform by `m`
    pub fn apply_matrix(&mut self, m: &Matrix4<f32>) {
        self.transform.apply_matrix(m);
    }

    /// Renamed deep copy with a transform edit applied to the copy only
    pub fn cloned_with(
        &self,
        name: impl Into<String>,
        edit: impl FnOnce(&mut NodeTransform),
    ) -> Self {
        let mut copy = self.clone();
        copy.name = name.into();
        edit(&mut copy.transform);
        copy
    }

    /// Other half of a symmetric pair
    ///
    /// Build one side, then flip one or two transform components on a deep
    /// copy to get the opposite side.
    pub fn mirrored(&self, name: impl Into<String>, edit: impl FnOnce(&mut NodeTransform)) -> Self {
        self.cloned_with(name, edit)
    }

    pub fn local_matrix(&self) -> Matrix4<f32> {
        self.transform.matrix()
    }

    pub fn node(&self, path: &NodePath) -> Option<&Part> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut Part> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }

    /// World matrix of the node at `path`, this node's transform included
    pub fn world_matrix(&self, path: &NodePath) -> Option<Matrix4<f32>> {
        let mut node = self;
        let mut matrix = self.local_matrix();
        for &index in path.indices() {
            node = node.children.get(index)?;
            matrix *= node.local_matrix();
        }
        Some(matrix)
    }

    /// World-space origin of the node at `path`
    pub fn world_position(&self, path: &NodePath) -> Option<Point3<f32>> {
        self.world_matrix(path)
            .map(|m| m.transform_point(&Point3::origin()))
    }

    /// Visit every node in pre-order with its accumulated world matrix
    pub fn walk<F>(&self, parent: &Matrix4<f32>, visit: &mut F)
    where
        F: FnMut(&Part, &Matrix4<f32>),
    {
        let world = parent * self.local_matrix();
        visit(self, &world);
        for child in &self.children {
            child.walk(&world, visit);
        }
    }

    /// Pre-order iterator over `(depth, node)`
    pub fn iter(&self) -> PartIter<'_> {
        PartIter {
            stack: vec![(0, self)],
        }
    }

    /// Number of nodes in this subtree, this one included
    pub fn part_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of drawable nodes in this subtree
    pub fn mesh_count(&self) -> usize {
        self.iter().filter(|(_, part)| part.mesh.is_some()).count()
    }

    /// Paths to every node matching `predicate`, in pre-order
    pub fn find_all<P>(&self, predicate: P) -> Vec<NodePath>
    where
        P: Fn(&Part) -> bool,
    {
        let mut found = Vec::new();
        self.collect_paths(&NodePath::root(), &predicate, &mut found);
        found
    }

    fn collect_paths<P>(&self, here: &NodePath, predicate: &P, found: &mut Vec<NodePath>)
    where
        P: Fn(&Part) -> bool,
    {
        if predicate(self) {
            found.push(here.clone());
        }
        for (index, child) in self.children.iter().enumerate() {
            child.collect_paths(&here.child(index), predicate, found);
        }
    }

    /// Path to the first node named `name`, in pre-order
    pub fn find(&self, name: &str) -> Option<NodePath> {
        if self.name == name {
            return Some(NodePath::root());
        }
        self.children
            .iter()
            .enumerate()
            .find_map(|(index, child)| child.find(name).map(|path| path.under(index)))
    }
}

/// Pre-order traversal of a part tree
pub struct PartIter<'a> {
    stack: Vec<(usize, &'a Part)>,
}

impl<'a> Iterator for PartIter<'a> {
    type Item = (usize, &'a Part);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, part) = self.stack.pop()?;
        self.stack
            .extend(part.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::primary;
    use crate::primitives::cuboid;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f32::consts::FRAC_PI_2;

    fn tree() -> Part {
        let mut leaf = Part::mesh("leaf", cuboid(1.0, 1.0, 1.0).unwrap(), primary());
        leaf.transform.position = Vector3::new(1.0, 0.0, 0.0);

        let mut arm = Part::group("arm").with_child(leaf);
        arm.transform.position = Vector3::new(0.0, 10.0, 0.0);
        arm.transform.rotation.z = FRAC_PI_2;

        Part::group("root")
            .with_child(Part::group("empty"))
            .with_child(arm)
    }

    #[test]
    fn test_paths_and_lookup() {
        let root = tree();
        let path = root.find("leaf").unwrap();
        assert_eq!(path.indices(), &[1, 0]);
        assert_eq!(root.node(&path).unwrap().name, "leaf");
        assert!(root.node(&NodePath::new(vec![5])).is_none());
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn test_world_position_accumulates() {
        let root = tree();
        let path = root.find("leaf").unwrap();
        // Arm turns +x into +y.
        assert_relative_eq!(
            root.world_position(&path).unwrap(),
            Point3::new(0.0, 11.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_preorder_iteration() {
        let root = tree();
        let names: Vec<_> = root.iter().map(|(depth, part)| (depth, part.name.as_str())).collect();
        assert_eq!(names, vec![(0, "root"), (1, "empty"), (1, "arm"), (2, "leaf")]);
        assert_eq!(root.part_count(), 4);
        assert_eq!(root.mesh_count(), 1);
    }

    #[test]
    fn test_walk_matches_world_matrix() {
        let root = tree();
        let mut seen = Vec::new();
        root.walk(&Matrix4::identity(), &mut |part: &Part, world: &Matrix4<f32>| {
            seen.push((part.name.clone(), *world));
        });
        let leaf_world = root.world_matrix(&root.find("leaf").unwrap()).unwrap();
        assert_eq!(seen.len(), 4);
        assert_relative_eq!(seen[3].1, leaf_world);
    }

    #[test]
    fn test_find_all() {
        let root = tree();
        let groups = root.find_all(|part| part.mesh.is_none());
        assert_eq!(
            groups,
            vec![NodePath::root(), NodePath::new(vec![0]), NodePath::new(vec![1])]
        );
    }

    #[test]
    fn test_mirrored_is_a_deep_copy() {
        let root = tree();
        let mut copy = root.mirrored("copy", |t| t.position.z = -5.0);
        assert_eq!(copy.transform.position.z, -5.0);
        assert_eq!(root.transform.position.z, 0.0);

        let path = copy.find("leaf").unwrap();
        copy.node_mut(&path).unwrap().mesh.as_mut().unwrap().vertices[0].x = 42.0;
        let original = root.node(&path).unwrap().mesh.as_ref().unwrap();
        assert_eq!(original.vertices[0].x, 0.5);
    }

    #[test]
    fn test_cloned_with_places_independent_copies() {
        let root = tree();
        let copies: Vec<Part> = (0..3)
            .map(|i| root.cloned_with(format!("copy_{}", i), |t| t.position.x = i as f32 * 10.0))
            .collect();
        assert_eq!(copies[2].name, "copy_2");
        assert_eq!(copies[2].transform.position.x, 20.0);
        assert_eq!(root.transform.position.x, 0.0);
        assert_eq!(copies[0].children(), root.children());
    }
}
