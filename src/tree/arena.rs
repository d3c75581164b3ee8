use std::collections::VecDeque;

use crate::game::{BoardMove, GameState, Outcome};

/// Handle of a node inside a [`GameTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A position in the tree together with its links.
#[derive(Debug, Clone)]
pub struct Node {
    state: GameState,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    outcome: Option<Outcome>,
    ply: u32,
}

impl Node {
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Move that produced this node.
    pub fn last_move(&self) -> BoardMove {
        self.state.last_move()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in move enumeration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Number of moves played since the empty board.
    pub fn ply(&self) -> u32 {
        self.ply
    }
}

/// Arena of explored positions rooted at the live game position.
///
/// The root is always `NodeId(0)` and every child is stored after its parent,
/// so walking the arena backwards visits children before parents. Nodes are
/// never deduplicated: equal boards with different histories stay distinct.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<Node>,
    frontier: Vec<NodeId>,
    expanded_plies: usize,
}

impl GameTree {
    const ROOT: NodeId = NodeId(0);

    /// Single-node tree. The root is queued for expansion unless terminal.
    pub fn new(state: GameState, outcome: Option<Outcome>) -> Self {
        let ply = state.board().cells().iter().filter(|c| !c.is_empty()).count() as u32;
        let root = Node {
            state,
            parent: None,
            children: Vec::new(),
            outcome,
            ply,
        };
        let frontier = if outcome.is_none() {
            vec![Self::ROOT]
        } else {
            Vec::new()
        };
        GameTree {
            nodes: vec![root],
            frontier,
            expanded_plies: 0,
        }
    }

    pub fn root_id(&self) -> NodeId {
        Self::ROOT
    }

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Unexpanded, non-terminal leaves.
    pub fn frontier(&self) -> &[NodeId] {
        &self.frontier
    }

    /// Plies below the root that have been fully enumerated.
    pub fn expanded_plies(&self) -> usize {
        self.expanded_plies
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Root child produced by `mv`, if that ply has been expanded.
    pub fn child_for_move(&self, mv: BoardMove) -> Option<NodeId> {
        self.root()
            .children
            .iter()
            .copied()
            .find(|&id| self.node(id).last_move() == mv)
    }

    pub(crate) fn add_child(
        &mut self,
        parent: NodeId,
        state: GameState,
        outcome: Option<Outcome>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let ply = self.nodes[parent.0].ply + 1;
        self.nodes.push(Node {
            state,
            parent: Some(parent),
            children: Vec::new(),
            outcome,
            ply,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn take_frontier(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.frontier)
    }

    /// Install the next frontier after one ply has been enumerated.
    pub(crate) fn finish_ply(&mut self, frontier: Vec<NodeId>) {
        self.frontier = frontier;
        self.expanded_plies += 1;
    }

    /// Make `child` the new root, dropping every branch outside its subtree.
    ///
    /// Nodes are renumbered in breadth-first order from the new root, which
    /// keeps parents stored ahead of their children.
    pub(crate) fn reroot(&mut self, child: NodeId) {
        let mut old: Vec<Option<Node>> = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(Some)
            .collect();
        let mut remap: Vec<Option<NodeId>> = vec![None; old.len()];
        let mut nodes = Vec::new();
        let mut queue = VecDeque::from([(child, None)]);

        while let Some((old_id, new_parent)) = queue.pop_front() {
            let Some(mut node) = old[old_id.0].take() else {
                continue;
            };
            let new_id = NodeId(nodes.len());
            remap[old_id.0] = Some(new_id);
            for &grandchild in &node.children {
                queue.push_back((grandchild, Some(new_id)));
            }
            node.parent = new_parent;
            node.children.clear();
            if let Some(parent) = new_parent {
                let parent: &mut Node = &mut nodes[parent.0];
                parent.children.push(new_id);
            }
            nodes.push(node);
        }

        self.nodes = nodes;
        self.frontier = self
            .frontier
            .iter()
            .filter_map(|id| remap[id.0])
            .collect();
        self.expanded_plies = self.expanded_plies.saturating_sub(1);
    }
}
