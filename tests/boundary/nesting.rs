use fault_boundary::{
    BoundaryConfig, Disposition, Escalation, Fault, FaultKind, DEFAULT_EXIT_CODE,
};

use crate::common::Harness;

#[test]
fn outer_sees_nothing_when_inner_suppresses() {
    let harness = Harness::new();
    let mut outer = harness.boundary();
    let mut inner = harness.boundary();

    let outcome = outer.run(|| {
        inner.run(|| Err::<(), _>(Fault::error("contained")))?;
        Ok(42)
    });

    assert_eq!(outcome, Ok(Some(42)));
    assert_eq!(inner.counts(), (1, 0));
    assert_eq!(outer.counts(), (0, 0));
    assert_eq!(outer.exception(), None);
}

#[test]
fn outer_handles_what_inner_reraises() {
    let harness = Harness::new();
    let mut outer = harness.boundary();
    let mut inner = harness.builder().reraise_error(true).build().unwrap();

    let outcome = outer.run(|| inner.run(|| Err::<(), _>(Fault::error("twice"))));

    assert_eq!(outcome, Ok(None));
    assert_eq!(inner.errors_count(), 1);
    assert_eq!(outer.errors_count(), 1);
    assert_eq!(harness.counters.counts(), (2, 0));
    assert_eq!(harness.logger.messages(), vec!["twice", "twice"]);
}

#[test]
fn escalation_after_nested_swallowed_errors() {
    let harness = Harness::new();
    let mut outer = harness.builder().on_errors_raise_click_exit(true).build().unwrap();
    let mut inner = harness.boundary();

    let outcome = outer.run(|| -> Result<(), Fault> {
        inner.run(|| Err::<(), _>(Fault::error("inner failure")))?;
        Err(Fault::error("outer failure"))
    });

    let signal = outcome.unwrap_err();
    assert_eq!(signal.kind(), &FaultKind::CliExit);
    assert_ne!(signal.exit_code(), Some(0));
    assert!(signal.exit_code().is_some());
    assert_eq!(inner.errors_count(), 1);
    assert_eq!(outer.errors_count(), 1);
    assert_eq!(harness.counters.errors_count(), 2);
}

#[test]
fn inner_exit_signal_passes_through_outer() {
    let harness = Harness::new();
    let mut outer = harness.boundary();
    let mut inner = harness.builder().on_errors_raise_click_exit(true).build().unwrap();

    let outcome = outer.run(|| inner.run(|| Err::<(), _>(Fault::error("fatal").with_exit_code(-2))));

    let signal = outcome.unwrap_err();
    assert_eq!(signal.kind(), &FaultKind::CliExit);
    assert_eq!(signal.exit_code(), Some(-2));
    assert_eq!(outer.exception(), Some(&signal));
    assert_eq!(outer.last_disposition(), Some(Disposition::PassedThrough));
    assert_eq!(outer.counts(), (0, 0));
}

#[test]
fn nested_wrapped_callables_share_the_global_tally() {
    let harness = Harness::new();
    let mut leaf = harness.boundary().wrap(|n: u8| {
        if n % 2 == 1 {
            Err(Fault::warning(format!("odd {n}")))
        } else {
            Ok(n)
        }
    });
    let mut root = harness.boundary();

    let outcome = root.run(|| {
        let mut sum = 0;
        for n in 0..5 {
            sum += leaf.call(n)?.unwrap_or(0);
        }
        Ok(sum)
    });

    assert_eq!(outcome, Ok(Some(6)));
    assert_eq!(leaf.context().warnings_count(), 2);
    assert_eq!(root.counts(), (0, 0));
    assert_eq!(harness.counters.counts(), (0, 2));
}

#[test]
fn outer_escalates_when_region_completes_after_inner_swallowed() {
    let harness = Harness::new();
    let mut outer = harness
        .builder()
        .on_errors_raise(Escalation::system_exit().with_code(-2))
        .build()
        .unwrap();
    let mut inner = harness.boundary();

    let outcome = outer.run(|| {
        inner.run(|| Err::<(), _>(Fault::error("swallowed below")))?;
        Ok(42)
    });

    let signal = outcome.unwrap_err();
    assert_eq!(signal.kind(), &FaultKind::SystemExit);
    assert_eq!(signal.exit_code(), Some(-2));
    assert_eq!(signal.message(), "exiting with status -2 after 1 error");
    assert_eq!(outer.last_disposition(), Some(Disposition::Escalated));
    assert_eq!(outer.exception(), None);
    assert_eq!(outer.counts(), (0, 0));
    assert_eq!(inner.counts(), (1, 0));
}

#[test]
fn command_boundary_exits_non_zero_after_swallowed_errors() {
    let harness = Harness::new();
    let mut command = harness.builder().config(BoundaryConfig::cli_command()).build().unwrap();
    let mut step = harness.boundary();

    let outcome = command.run(|| {
        step.run(|| Err::<(), _>(Fault::error("first step failed")))?;
        step.run(|| Err::<(), _>(Fault::error("second step failed")))?;
        Ok(())
    });

    let signal = outcome.unwrap_err();
    assert_eq!(signal.kind(), &FaultKind::CliExit);
    assert_eq!(signal.exit_code(), Some(DEFAULT_EXIT_CODE));
    assert_eq!(signal.status_byte(), 255);
    assert_eq!(signal.message(), "exiting with status -1 after 2 errors");
}

#[test]
fn swallowed_warnings_do_not_escalate_the_outer_boundary() {
    let harness = Harness::new();
    let mut outer = harness.builder().on_errors_raise_click_exit(true).build().unwrap();
    let mut inner = harness.boundary();

    let outcome = outer.run(|| {
        inner.run(|| Err::<(), _>(Fault::warning("only a warning")))?;
        Ok(7)
    });

    assert_eq!(outcome, Ok(Some(7)));
    assert_eq!(outer.last_disposition(), Some(Disposition::Completed));
}

#[test]
fn errors_counted_before_entry_do_not_escalate_a_fresh_boundary() {
    let harness = Harness::new();
    let mut earlier = harness.boundary();
    earlier.run(|| Err::<(), _>(Fault::error("before"))).unwrap();

    let mut outer = harness.builder().on_errors_raise_click_exit(true).build().unwrap();
    assert_eq!(outer.run(|| Ok::<_, Fault>(())), Ok(Some(())));
}
