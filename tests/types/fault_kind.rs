use fault_boundary::{ConfigurationError, FaultKind, KindSet};

#[test]
fn names_parse_back_to_the_same_kind() {
    let kinds = [
        FaultKind::StopIteration,
        FaultKind::Unrecoverable,
        FaultKind::SystemExit,
        FaultKind::Interrupt,
        FaultKind::CliAbort,
        FaultKind::CliExit,
        FaultKind::Error,
        FaultKind::Warning,
        FaultKind::named_error("io"),
        FaultKind::named_warning("deprecation"),
    ];

    for kind in kinds {
        assert_eq!(kind.to_string().parse::<FaultKind>(), Ok(kind));
    }
}

#[test]
fn unknown_names_are_rejected() {
    for name in ["", "error:", "warning:", "fatal:x", "interrupt"] {
        assert_eq!(
            name.parse::<FaultKind>(),
            Err(ConfigurationError::UnknownKind { name: name.to_string() })
        );
    }
}

#[test]
fn families_are_disjoint() {
    assert!(FaultKind::named_warning("w").is_warning());
    assert!(!FaultKind::named_warning("w").is_error());
    assert!(FaultKind::named_error("e").is_error());
    for kind in FaultKind::CONTROL_FLOW {
        assert!(kind.is_control_flow());
        assert!(!kind.is_warning());
    }
}

#[test]
fn generic_tags_match_their_family() {
    let io = FaultKind::named_error("io");
    assert!(io.matches(&FaultKind::Error));
    assert!(io.matches(&io));
    assert!(!io.matches(&FaultKind::named_error("net")));
    assert!(!FaultKind::Error.matches(&io));
    assert!(!FaultKind::Interrupt.matches(&FaultKind::Error));
}

#[test]
fn name_drops_the_family_prefix() {
    assert_eq!(FaultKind::named_error("ValueError").name(), "ValueError");
    assert_eq!(FaultKind::named_error("ValueError").to_string(), "error:ValueError");
}

#[test]
fn kind_set_deduplicates_and_removes() {
    let mut set = KindSet::new().with(FaultKind::Interrupt).with(FaultKind::Interrupt);
    assert_eq!(set.len(), 1);

    set.extend([FaultKind::CliAbort, FaultKind::Warning]);
    assert_eq!(set.len(), 3);
    assert!(set.matches(&FaultKind::named_warning("slow")));
    assert!(!set.contains(&FaultKind::named_warning("slow")));

    assert!(set.remove(&FaultKind::Warning));
    assert!(!set.remove(&FaultKind::Warning));
    assert!(!set.matches(&FaultKind::named_warning("slow")));
}

#[test]
fn control_flow_set_is_the_default_transparent_set() {
    let set = KindSet::control_flow();
    assert_eq!(set.len(), FaultKind::CONTROL_FLOW.len());
    assert!(set.iter().all(FaultKind::is_control_flow));
    assert!(!set.matches(&FaultKind::Error));
}

#[test]
fn kind_set_from_names() {
    let set = KindSet::from_names(["Interrupt", "warning:resource"]).unwrap();
    assert_eq!(Vec::from(set), vec![FaultKind::Interrupt, FaultKind::named_warning("resource")]);

    assert!(KindSet::from_names(["Interrupt", "nope"]).is_err());
}

#[test]
fn kind_set_merges_another_set_by_value() {
    let mut set = KindSet::new().with(FaultKind::named_error("io"));
    let other = KindSet::new().with(FaultKind::named_error("io")).with(FaultKind::CliAbort);

    set.extend(other);
    assert_eq!(set.len(), 2);

    let owned: Vec<FaultKind> = set.into_iter().collect();
    assert_eq!(owned, vec![FaultKind::named_error("io"), FaultKind::CliAbort]);
}
