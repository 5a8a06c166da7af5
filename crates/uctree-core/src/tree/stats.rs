/// Visit count and reward sum MCTS updates on every backpropagation pass
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeStats {
    visits: u64,
    total_reward: f64,
}

impl NodeStats {
    pub fn new() -> Self {
        NodeStats::default()
    }

    /// Retrieve how many backpropagation passes touched the node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Retrieve the running sum of credited rewards
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Count one visit and add its reward.
    /// The reward is taken as-is, whatever its sign or magnitude.
    pub fn record(&mut self, reward: f64) {
        self.visits += 1;
        self.total_reward += reward;
    }

    pub fn is_unvisited(&self) -> bool {
        self.visits == 0
    }

    /// Mean reward, `None` until the node has been visited
    pub fn mean(&self) -> Option<f64> {
        if self.is_unvisited() {
            None
        } else {
            Some(self.total_reward / self.visits as f64)
        }
    }

    /// UCT score of a child with these stats under a parent visited `parent_visits` times.
    /// `mean + c * sqrt(2 * ln(parent_visits) / visits)`; the exploration term is dropped when `c == 0`.
    pub fn uct_score(&self, parent_visits: u64, c: f64) -> Option<f64> {
        let mean = self.mean()?;
        if c == 0.0 {
            return Some(mean);
        }

        let n_parent = parent_visits.max(1) as f64;
        let exploration = f64::sqrt(2.0 * f64::ln(n_parent) / self.visits as f64);
        Some(mean + c * exploration)
    }
}
