use std::panic::{catch_unwind, AssertUnwindSafe};

use fault_boundary::{Disposition, Fault, FaultKind};

use crate::common::Harness;

#[test]
fn exit_returns_the_region_value() {
    let harness = Harness::new();
    let mut boundary = harness.boundary();

    let scope = boundary.enter();
    assert_eq!(scope.exit(Ok::<_, Fault>("value")), Ok(Some("value")));
    assert_eq!(boundary.exception(), None);
    assert_eq!(boundary.last_disposition(), Some(Disposition::Completed));
}

#[test]
fn scope_exposes_the_boundary_while_open() {
    let harness = Harness::new();
    let mut boundary = harness.boundary();
    boundary.run(|| Err::<(), _>(Fault::error("first"))).unwrap();

    let scope = boundary.enter();
    // entering clears the last fault but keeps the counts
    assert_eq!(scope.boundary().exception(), None);
    assert_eq!(scope.boundary().errors_count(), 1);
    assert_eq!(scope.exit(Err::<(), _>(Fault::error("second"))), Ok(None));

    assert_eq!(boundary.errors_count(), 2);
    assert_eq!(boundary.exception().map(Fault::message), Some("second"));
}

#[test]
fn dropping_an_open_scope_completes_normally() {
    let harness = Harness::new();
    let mut boundary = harness.builder().exit_message("left early").build().unwrap();

    {
        let _scope = boundary.enter();
    }

    assert_eq!(boundary.last_disposition(), Some(Disposition::Completed));
    assert_eq!(boundary.counts(), (0, 0));
    assert_eq!(harness.logger.messages(), vec!["left early".to_string()]);
}

#[test]
fn panics_pass_through_uncounted() {
    let harness = Harness::new();
    let mut boundary = harness.builder().exit_message("never logged").build().unwrap();

    let caught = catch_unwind(AssertUnwindSafe(|| {
        boundary.run(|| -> Result<(), Fault> { panic!("invariant violated") })
    }));

    assert!(caught.is_err());
    assert_eq!(boundary.counts(), (0, 0));
    assert_eq!(harness.counters.counts(), (0, 0));
    assert_eq!(boundary.last_disposition(), Some(Disposition::PassedThrough));
    assert_eq!(boundary.exception().map(Fault::kind), Some(&FaultKind::Unrecoverable));
    assert!(harness.logger.is_empty());
}

#[test]
fn reused_scopes_keep_accumulating() {
    let harness = Harness::new();
    let mut boundary = harness.boundary();

    for i in 0..3 {
        let scope = boundary.enter();
        let region = if i % 2 == 0 { Err(Fault::error("even")) } else { Err(Fault::warning("odd")) };
        assert_eq!(scope.exit::<()>(region), Ok(None));
    }

    assert_eq!(boundary.counts(), (2, 1));
    assert_eq!(harness.counters.counts(), (2, 1));
}
