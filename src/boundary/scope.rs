use crate::boundary::FaultBoundary;
use crate::types::{BoundaryResult, Fault};

/// Guard for one scoped entry into a [`FaultBoundary`].
///
/// Created by [`FaultBoundary::enter`]. Finish it with [`Scope::exit`]; a guard
/// dropped during a panic records an unrecoverable fault and lets the panic
/// continue, while a guard dropped otherwise exits as a normal completion
/// (an escalation decided there has nowhere to go and is dropped).
#[must_use = "a scope must be exited with the region's result"]
pub struct Scope<'a> {
    boundary: &'a mut FaultBoundary,
    exited: bool,
}

impl<'a> Scope<'a> {
    #[inline]
    pub(super) fn new(boundary: &'a mut FaultBoundary) -> Self {
        Self { boundary, exited: false }
    }

    /// Read-only view of the boundary while the scope is open.
    #[inline]
    pub fn boundary(&self) -> &FaultBoundary {
        self.boundary
    }

    /// Leaves the scope with the region's result and returns the disposition
    /// chosen by the boundary.
    pub fn exit<T>(mut self, result: Result<T, Fault>) -> BoundaryResult<T> {
        self.exited = true;
        self.boundary.on_exit(result)
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if self.exited {
            return;
        }
        if std::thread::panicking() {
            self.boundary.on_panic();
        } else {
            let _ = self.boundary.on_exit(Ok::<(), Fault>(()));
        }
    }
}

impl core::fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scope").field("boundary", &self.boundary).field("exited", &self.exited).finish()
    }
}
