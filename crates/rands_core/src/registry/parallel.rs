//! Rayon-based parallel fills.
//!
//! Row `i` of a 2-D buffer is filled by stream `i` on the rayon pool. Each
//! worker holds a disjoint `&mut` engine for the whole row, so there is no
//! synchronisation apart from the final join, and the values are the same
//! as filling each row sequentially with [`StreamRegistry::fill`].

use rayon::prelude::*;

use super::{check_range, StreamHandle, StreamRegistry};
use crate::error::{Result, StreamError};

impl StreamRegistry {
    /// Checks that every row has a stream to fill it.
    fn check_rows(&self, n_rows: usize) -> Result<()> {
        let n_streams = self.n_streams();
        if n_rows > n_streams {
            return Err(StreamError::IndexError {
                index: n_rows - 1,
                n_streams,
            });
        }
        Ok(())
    }

    /// Fills row `i` with raw draws from stream `i`, all rows in parallel.
    ///
    /// Returns once every row is complete. Fewer rows than streams is
    /// allowed; the remaining streams are not advanced.
    ///
    /// # Errors
    ///
    /// [`StreamError::IndexError`] if there are more rows than streams.
    /// No row is touched in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rands_core::{Algorithm, StreamConfig, StreamRegistry};
    ///
    /// let config = StreamConfig::new(Algorithm::Pcg).with_threads(2).with_seed(1);
    /// let mut registry = StreamRegistry::new(config).unwrap();
    ///
    /// let mut rows = vec![vec![0u64; 1000]; 2];
    /// registry.fill_parallel(&mut rows).unwrap();
    /// assert_ne!(rows[0], rows[1]);
    /// ```
    pub fn fill_parallel<Row>(&mut self, rows: &mut [Row]) -> Result<()>
    where
        Row: AsMut<[u64]> + Send,
    {
        self.check_rows(rows.len())?;
        let widths = self.widths;

        self.engines
            .par_iter_mut()
            .zip(rows.par_iter_mut())
            .enumerate()
            .for_each(|(index, (engine, row))| {
                StreamHandle::new(engine, widths, index).fill(row.as_mut());
            });

        Ok(())
    }

    /// Parallel counterpart of [`StreamRegistry::fill_bounded`].
    ///
    /// The range is validated before any row is touched.
    pub fn fill_bounded_parallel<Row>(
        &mut self,
        rows: &mut [Row],
        lower: u64,
        upper: u64,
    ) -> Result<()>
    where
        Row: AsMut<[u64]> + Send,
    {
        self.check_rows(rows.len())?;
        let widths = self.widths;
        let range = check_range(widths, lower, upper)?;

        self.engines
            .par_iter_mut()
            .zip(rows.par_iter_mut())
            .enumerate()
            .for_each(|(index, (engine, row))| {
                let mut handle = StreamHandle::new(engine, widths, index);
                handle.fill_bounded_unchecked(row.as_mut(), lower, range);
            });

        Ok(())
    }

    /// Parallel counterpart of [`StreamRegistry::fill_doubles`].
    pub fn fill_doubles_parallel<Row>(&mut self, rows: &mut [Row]) -> Result<()>
    where
        Row: AsMut<[f64]> + Send,
    {
        self.check_rows(rows.len())?;
        let widths = self.widths;

        self.engines
            .par_iter_mut()
            .zip(rows.par_iter_mut())
            .enumerate()
            .for_each(|(index, (engine, row))| {
                StreamHandle::new(engine, widths, index).fill_doubles(row.as_mut());
            });

        Ok(())
    }
}
