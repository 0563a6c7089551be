#[derive(Clone, Debug, Default)]
/// Uniform grid over bumble positions for radius queries.
///
/// Uses the "offset array" layout (like compressed sparse rows):
/// `cell_offsets[i]..cell_offsets[i+1]` indexes into `entity_indices` for
/// every entity in cell `i`. Queries return candidates from the covered
/// cells; callers still apply their exact distance test.
///
/// # Examples
/// ```
/// use bumbles_core::spatial_hash::SpatialHash;
///
/// let mut spatial = SpatialHash::new(50.0, 1000.0, 700.0);
/// spatial.build(&[(15.0, 15.0), (25.0, 25.0), (850.0, 650.0)]);
///
/// let mut nearby = Vec::new();
/// spatial.query_into(15.0, 15.0, 20.0, &mut nearby);
/// assert_eq!(nearby.len(), 2);
/// ```
pub struct SpatialHash {
    pub cell_size: f64,
    pub width: f64,
    pub height: f64,
    pub cols: usize,
    pub rows: usize,
    pub cell_offsets: Vec<usize>,
    pub entity_indices: Vec<usize>,
}

impl SpatialHash {
    pub fn new(cell_size: f64, width: f64, height: f64) -> Self {
        let cols = (width / cell_size).ceil().max(1.0) as usize;
        let rows = (height / cell_size).ceil().max(1.0) as usize;
        Self {
            cell_size,
            width,
            height,
            cols,
            rows,
            cell_offsets: vec![0; cols * rows + 1],
            entity_indices: Vec::new(),
        }
    }

    /// Maps a world coordinate to its flat cell index. Non-finite and
    /// out-of-bounds coordinates have no cell.
    #[inline]
    pub fn get_cell_idx(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        // Check for i32 overflow before casting
        if x.abs() > i32::MAX as f64 * self.cell_size || y.abs() > i32::MAX as f64 * self.cell_size
        {
            return None;
        }

        let cx = (x / self.cell_size).floor() as i32;
        let cy = (y / self.cell_size).floor() as i32;
        if cx < 0 || cx >= self.cols as i32 || cy < 0 || cy >= self.rows as i32 {
            None
        } else {
            Some((cy as usize * self.cols) + cx as usize)
        }
    }

    /// Rebuilds the index; entity `i` is `positions[i]`.
    pub fn build(&mut self, positions: &[(f64, f64)]) {
        let cell_count = self.cols * self.rows;

        let mut counts = vec![0usize; cell_count];
        for &(x, y) in positions {
            if let Some(idx) = self.get_cell_idx(x, y) {
                counts[idx] += 1;
            }
        }

        self.cell_offsets.clear();
        self.cell_offsets.resize(cell_count + 1, 0);
        let mut total = 0;
        for (i, &count) in counts.iter().enumerate() {
            self.cell_offsets[i] = total;
            total += count;
        }
        self.cell_offsets[cell_count] = total;

        self.entity_indices.clear();
        self.entity_indices.resize(total, 0);
        let mut cursor = self.cell_offsets[..cell_count].to_vec();
        for (entity_idx, &(x, y)) in positions.iter().enumerate() {
            if let Some(cell_idx) = self.get_cell_idx(x, y) {
                self.entity_indices[cursor[cell_idx]] = entity_idx;
                cursor[cell_idx] += 1;
            }
        }
    }

    fn cell_span(&self, x: f64, y: f64, radius: f64) -> (i32, i32, i32, i32) {
        (
            ((x - radius) / self.cell_size).floor() as i32,
            ((x + radius) / self.cell_size).floor() as i32,
            ((y - radius) / self.cell_size).floor() as i32,
            ((y + radius) / self.cell_size).floor() as i32,
        )
    }

    pub fn query_callback<F>(&self, x: f64, y: f64, radius: f64, mut callback: F)
    where
        F: FnMut(usize),
    {
        let (min_cx, max_cx, min_cy, max_cy) = self.cell_span(x, y, radius);

        for cy in min_cy.max(0)..=max_cy.min(self.rows as i32 - 1) {
            for cx in min_cx.max(0)..=max_cx.min(self.cols as i32 - 1) {
                let cell_idx = (cy as usize * self.cols) + cx as usize;
                let start = self.cell_offsets[cell_idx];
                let end = self.cell_offsets[cell_idx + 1];

                for &entity_idx in &self.entity_indices[start..end] {
                    callback(entity_idx);
                }
            }
        }
    }

    #[inline]
    pub fn query_into(&self, x: f64, y: f64, radius: f64, result: &mut Vec<usize>) {
        result.clear();
        self.query_callback(x, y, radius, |idx| result.push(idx));
    }

    /// Candidates in the covered cells; an upper bound on the true count.
    pub fn count_nearby(&self, x: f64, y: f64, radius: f64) -> usize {
        let mut count = 0;
        self.query_callback(x, y, radius, |_| count += 1);
        count
    }
}
