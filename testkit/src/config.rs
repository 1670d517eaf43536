//! Configuration for forest generation

/// Configuration for forest and mutation generation
#[derive(Debug, Clone)]
pub struct ForestConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of root nodes
    pub roots: usize,
    /// Total number of nodes, roots included
    pub nodes: usize,
    /// Number of users placed on random nodes
    pub users: usize,
    /// Number of mutations in a generated sequence
    pub mutations: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            roots: 2,
            nodes: 30,
            users: 20,
            mutations: 200,
        }
    }
}

impl ForestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_roots(mut self, count: usize) -> Self {
        self.roots = count.max(1);
        self
    }

    pub fn with_nodes(mut self, count: usize) -> Self {
        self.nodes = count;
        self
    }

    pub fn with_users(mut self, count: usize) -> Self {
        self.users = count;
        self
    }

    pub fn with_mutations(mut self, count: usize) -> Self {
        self.mutations = count;
        self
    }

    pub fn minimal() -> Self {
        Self {
            seed: 42,
            roots: 1,
            nodes: 5,
            users: 3,
            mutations: 20,
        }
    }
}
