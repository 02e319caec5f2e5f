use crate::extraction::{PageFragments, TextFragment};

/// Direction in which coordinates are walked while clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Round a coordinate to the nearest whole unit, halves rounding up.
pub fn round_coord(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Greedy single-pass agglomeration of 1D positions.
///
/// Values are de-duplicated and walked in `order`. Each value either merges
/// into the first existing center within `threshold` (the center becomes the
/// average of itself and the value) or opens a new center. The result is
/// sorted in `order`. Values are not rounded here, so clustering a previous
/// result again returns it unchanged.
pub fn cluster_positions(values: &[f64], threshold: f64, order: SortOrder) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sort_positions(&mut sorted, order);
    sorted.dedup();

    let mut centers = sorted.into_iter().fold(Vec::<f64>::new(), |mut centers, v| {
        match centers.iter_mut().find(|c| (**c - v).abs() <= threshold) {
            Some(center) => *center = (*center + v) / 2.0,
            None => centers.push(v),
        }
        centers
    });
    sort_positions(&mut centers, order);
    centers
}

fn sort_positions(values: &mut [f64], order: SortOrder) {
    match order {
        SortOrder::Ascending => values.sort_by(|a, b| a.total_cmp(b)),
        SortOrder::Descending => values.sort_by(|a, b| b.total_cmp(a)),
    }
}

/// Document-global column positions, ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSet {
    centers: Vec<f64>,
}

impl ColumnSet {
    pub fn from_centers(mut centers: Vec<f64>) -> Self {
        sort_positions(&mut centers, SortOrder::Ascending);
        ColumnSet { centers }
    }

    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Index of the center closest to `x`. Ties go to the lowest index.
    pub fn nearest(&self, x: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, c) in self.centers.iter().enumerate() {
            let dist = (c - x).abs();
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((i, dist)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Cluster the rounded x of every fragment in the document into columns.
pub fn cluster_columns(pages: &[PageFragments], threshold: f64) -> ColumnSet {
    let xs: Vec<f64> = pages
        .iter()
        .flat_map(|p| p.fragments.iter().map(|f| round_coord(f.x)))
        .collect();
    let columns = ColumnSet::from_centers(cluster_positions(&xs, threshold, SortOrder::Ascending));
    log::debug!(
        "clustered {} x-position(s) into {} column(s)",
        xs.len(),
        columns.len()
    );
    columns
}

/// Row band centers for one page, top of the page first.
pub fn cluster_rows(fragments: &[TextFragment], threshold: f64) -> Vec<f64> {
    let ys: Vec<f64> = fragments.iter().map(|f| round_coord(f.y)).collect();
    cluster_positions(&ys, threshold, SortOrder::Descending)
}
