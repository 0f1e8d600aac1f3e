use crate::boundary::FaultBoundary;
use crate::types::{BoundaryResult, Fault};

/// A callable permanently bound to a [`FaultBoundary`].
///
/// Created by [`FaultBoundary::wrap`]. Every [`Guarded::call`] is one entry
/// into the boundary, so counts accumulate over the wrapper's lifetime while
/// [`exception`](FaultBoundary::exception) always reflects the latest call.
///
/// Arguments are passed as a single value; use a tuple for several.
///
/// # Examples
///
/// ```
/// use fault_boundary::{Fault, FaultBoundary};
///
/// let mut checked_div = FaultBoundary::new().wrap(|(a, b): (i32, i32)| {
///     if b == 0 {
///         Err(Fault::error("division by zero"))
///     } else {
///         Ok(a / b)
///     }
/// });
///
/// assert_eq!(checked_div.call((10, 2)), Ok(Some(5)));
/// assert_eq!(checked_div.call((1, 0)), Ok(None));
/// assert_eq!(checked_div.context().errors_count(), 1);
/// ```
pub struct Guarded<F> {
    boundary: FaultBoundary,
    func: F,
}

impl<F> Guarded<F> {
    #[inline]
    pub(super) fn new(boundary: FaultBoundary, func: F) -> Self {
        Self { boundary, func }
    }

    /// Invokes the wrapped callable inside the boundary.
    pub fn call<A, T>(&mut self, args: A) -> BoundaryResult<T>
    where
        F: FnMut(A) -> Result<T, Fault>,
    {
        let func = &mut self.func;
        self.boundary.run(|| func(args))
    }

    /// The boundary's state after the latest call.
    #[inline]
    pub fn context(&self) -> &FaultBoundary {
        &self.boundary
    }

    /// Splits the wrapper back into its boundary and callable.
    #[inline]
    pub fn into_parts(self) -> (FaultBoundary, F) {
        (self.boundary, self.func)
    }
}

impl<F> core::fmt::Debug for Guarded<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Guarded").field("boundary", &self.boundary).finish_non_exhaustive()
    }
}
