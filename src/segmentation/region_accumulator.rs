/// Running member list and Lab color sums of the region being grown.
pub(crate) struct RegionAccumulator {
    pub indices: Vec<usize>,
    pub sum_lab: [f64; 3],
}

impl RegionAccumulator {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            sum_lab: [0.0; 3],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.indices.clear();
        self.sum_lab = [0.0; 3];
    }

    pub(crate) fn push(&mut self, idx: usize, lab: [f64; 3]) {
        self.indices.push(idx);
        for (s, v) in self.sum_lab.iter_mut().zip(lab) {
            *s += v;
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    pub(crate) fn mean(&self) -> [f64; 3] {
        if self.indices.is_empty() {
            return [0.0; 3];
        }
        let n = self.indices.len() as f64;
        self.sum_lab.map(|s| s / n)
    }

    /// Write `label` into every member pixel.
    pub(crate) fn mark_as(&self, labels: &mut [usize], label: usize) {
        for &idx in &self.indices {
            labels[idx] = label;
        }
    }
}
