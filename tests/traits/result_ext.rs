use fault_boundary::{Fault, FaultBoundary, FaultKind, FaultResultExt};

fn parse(raw: &str) -> Result<i64, std::num::ParseIntError> {
    raw.parse()
}

#[test]
fn or_error_and_or_warning_pick_the_family() {
    assert_eq!(parse("x").or_error().unwrap_err().kind(), &FaultKind::Error);
    assert_eq!(parse("x").or_warning().unwrap_err().kind(), &FaultKind::Warning);
    assert_eq!(parse("12").or_error(), Ok(12));
}

#[test]
fn or_fault_with_replaces_the_message_and_keeps_the_cause() {
    let fault = parse("x")
        .or_fault_with(FaultKind::named_error("config"), || "port must be numeric")
        .unwrap_err();

    assert_eq!(fault.message(), "port must be numeric");
    assert!(fault.cause().is_some());
}

#[test]
fn converted_results_flow_into_a_boundary() {
    let mut boundary = FaultBoundary::builder()
        .logger(fault_boundary::traits::NullLogger)
        .counters(Default::default())
        .build()
        .unwrap();

    let outcome = boundary.run(|| -> Result<i64, Fault> {
        let a = parse("40").or_error()?;
        let b = parse("two").or_warning()?;
        Ok(a + b)
    });

    assert_eq!(outcome, Ok(None));
    assert_eq!(boundary.counts(), (0, 1));
}
