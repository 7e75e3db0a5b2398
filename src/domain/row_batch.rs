use anyhow::{Result, anyhow};

/// One batch of rows, addressed by 1-based inclusive row numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBatch {
    pub first_row: u64,
    pub last_row: u64,
}

impl RowBatch {
    pub fn len(&self) -> u64 {
        self.last_row - self.first_row + 1
    }

    pub fn row_numbers(self) -> impl Iterator<Item = u64> {
        self.first_row..=self.last_row
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RowBatchSlicer {
    total_rows: u64,
    batch_size: u64,
}

impl RowBatchSlicer {
    pub fn new(total_rows: u64, batch_size: u64) -> Result<Self> {
        if total_rows == 0 {
            return Err(anyhow!("Total rows must be greater than 0"));
        }
        if batch_size == 0 {
            return Err(anyhow!("Batch size must be greater than 0"));
        }

        Ok(Self {
            total_rows,
            batch_size,
        })
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    pub fn batch_count(&self) -> u64 {
        self.total_rows.div_ceil(self.batch_size)
    }

    pub fn iter_batches(&self) -> impl Iterator<Item = RowBatch> + '_ {
        (0..self.total_rows)
            .step_by(self.batch_size as usize)
            .map(move |offset| RowBatch {
                first_row: offset + 1,
                last_row: (offset + self.batch_size).min(self.total_rows),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{RowBatch, RowBatchSlicer};

    fn ranges(total_rows: u64, batch_size: u64) -> Vec<(u64, u64)> {
        RowBatchSlicer::new(total_rows, batch_size)
            .expect("slicer should be created")
            .iter_batches()
            .map(|batch| (batch.first_row, batch.last_row))
            .collect()
    }

    #[test]
    fn iter_batches_keeps_short_last_batch() {
        assert_eq!(ranges(10, 3), vec![(1, 3), (4, 6), (7, 9), (10, 10)]);

        let sizes = RowBatchSlicer::new(10, 3)
            .expect("slicer should be created")
            .iter_batches()
            .map(|batch| batch.len())
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![3, 3, 3, 1]);
    }

    #[test]
    fn batch_larger_than_total_yields_single_batch() {
        assert_eq!(ranges(5, 10), vec![(1, 5)]);
    }

    #[test]
    fn evenly_divisible_total_has_no_trailing_batch() {
        assert_eq!(ranges(6, 2), vec![(1, 2), (3, 4), (5, 6)]);
    }

    #[test]
    fn batch_count_matches_ceiling_division() {
        for total_rows in 1..=40u64 {
            for batch_size in 1..=12u64 {
                let slicer =
                    RowBatchSlicer::new(total_rows, batch_size).expect("slicer should be created");
                let expected = (total_rows + batch_size - 1) / batch_size;
                assert_eq!(slicer.batch_count(), expected);
                assert_eq!(slicer.iter_batches().count() as u64, expected);
            }
        }
    }

    #[test]
    fn batches_partition_all_rows_in_order() {
        for total_rows in 1..=40u64 {
            for batch_size in 1..=12u64 {
                let slicer =
                    RowBatchSlicer::new(total_rows, batch_size).expect("slicer should be created");
                let covered = slicer
                    .iter_batches()
                    .flat_map(|batch: RowBatch| batch.row_numbers())
                    .collect::<Vec<_>>();
                assert_eq!(covered, (1..=total_rows).collect::<Vec<_>>());
                assert!(slicer.iter_batches().all(|batch| batch.len() > 0));
            }
        }
    }

    #[test]
    fn rejects_zero_total_rows() {
        let error = RowBatchSlicer::new(0, 10).expect_err("zero rows should be rejected");
        assert!(error.to_string().contains("Total rows must be greater than 0"));
    }

    #[test]
    fn rejects_zero_batch_size() {
        let error = RowBatchSlicer::new(10, 0).expect_err("zero batch size should be rejected");
        assert!(error.to_string().contains("Batch size must be greater than 0"));
    }
}
