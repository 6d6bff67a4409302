//! Property-based tests for message, truncation and rendering invariants.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use pxf_cli::domain::operation::fill;
use pxf_cli::domain::report::TRUNCATION_MARKER;
use pxf_cli::domain::{
    ClusterSnapshot, DispatchResult, EnvVar, HostOutput, Operation, RemoteOutput, RenderFlags,
    ResolvedEnvironment, Role, Scope, SegmentConfig, build, plural, render_command,
    truncate_output,
};

fn any_operation() -> impl Strategy<Value = Operation> {
    proptest::sample::select(Operation::ALL.to_vec())
}

fn any_scope() -> impl Strategy<Value = Scope> {
    proptest::sample::select(vec![
        Scope::SEGMENTS,
        Scope::WHOLE_CLUSTER,
        Scope::PUSH_FROM_COORDINATOR,
    ])
}

fn segment(content_id: i32, host: u8, role: Role) -> SegmentConfig {
    SegmentConfig {
        content_id,
        hostname: format!("sdw{host}"),
        port: 6000,
        data_dir: format!("/data/gpseg{content_id}"),
        role,
    }
}

// ============================================================================
// plural()
// ============================================================================

proptest! {
    /// Only a count of exactly one drops the suffix.
    #[test]
    fn prop_plural_suffix(count in 0usize..10_000) {
        let expected = if count == 1 { "" } else { "s" };
        prop_assert_eq!(plural(count), expected);
    }

    /// Placeholders are filled left to right and nothing else changes.
    #[test]
    fn prop_fill_substitutes_in_order(a in 0usize..1000, b in "[a-z]{0,8}") {
        prop_assert_eq!(fill("x{}y{}z", &[&a, &b]), format!("x{a}y{b}z"));
    }
}

// ============================================================================
// truncate_output()
// ============================================================================

proptest! {
    /// At most two lines survive, and the marker appears only when something
    /// was cut.
    #[test]
    fn prop_truncate_keeps_two_lines(lines in proptest::collection::vec("[a-z ]{0,20}", 0..8)) {
        let text = lines.join("\n");
        let out = truncate_output(&text);
        prop_assert!(out.lines().count() <= 2);
        let cut = text.lines().count() > 2;
        prop_assert_eq!(out.ends_with(TRUNCATION_MARKER) && cut, cut);
    }

    /// Short output passes through unchanged.
    #[test]
    fn prop_short_output_untouched(first in "[a-z]{1,20}", second in "[a-z]{1,20}") {
        let text = format!("{first}\n{second}");
        prop_assert_eq!(truncate_output(&text), text);
    }
}

// ============================================================================
// DispatchResult
// ============================================================================

proptest! {
    /// Counts always add up, whatever mix of outcomes the hosts report.
    #[test]
    fn prop_result_counts_add_up(
        outcomes in proptest::collection::vec(proptest::bool::ANY, 1..20),
        op in any_operation(),
    ) {
        let hosts = outcomes
            .iter()
            .enumerate()
            .map(|(i, ok)| {
                let name = format!("sdw{i}");
                if *ok {
                    HostOutput::ok(&name, "done")
                } else {
                    HostOutput::failed(&name, "", "boom", "exit status: 1")
                }
            })
            .collect();
        let result = DispatchResult::from_output(op, &RemoteOutput { hosts });
        prop_assert_eq!(result.total_hosts, outcomes.len());
        prop_assert_eq!(result.succeeded() + result.failed(), result.total_hosts);
        prop_assert_eq!(result.is_success(), outcomes.iter().all(|ok| *ok));
    }
}

// ============================================================================
// Host selection and rendering
// ============================================================================

proptest! {
    /// Target lists are free of duplicates, start with the coordinator when
    /// it is included, and do not depend on row order.
    #[test]
    fn prop_hosts_for_scope_is_deterministic(
        placements in proptest::collection::vec(1u8..6, 1..12),
        scope in any_scope(),
        reversed in proptest::bool::ANY,
    ) {
        let mut records = vec![SegmentConfig {
            content_id: -1,
            hostname: "cdw".to_string(),
            port: 5432,
            data_dir: "/data/gpseg-1".to_string(),
            role: Role::Primary,
        }];
        for (content, host) in placements.iter().enumerate() {
            let content = i32::try_from(content).expect("small");
            records.push(segment(content, *host, Role::Primary));
        }
        let forward = ClusterSnapshot::new(records.clone()).expect("snapshot");
        if reversed {
            records.reverse();
        }
        let shuffled = ClusterSnapshot::new(records).expect("snapshot");

        let hosts = forward.hosts_for_scope(scope);
        prop_assert_eq!(&hosts, &shuffled.hosts_for_scope(scope));
        let mut unique = hosts.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), hosts.len());
        if scope.include_coordinator {
            prop_assert_eq!(hosts.first().map(String::as_str), Some("cdw"));
        }
    }

    /// The same inputs always render the same command.
    #[test]
    fn prop_render_is_pure(
        home in "/[a-z]{1,10}",
        base in "/[a-z]{1,10}",
        host in "[a-z0-9]{1,10}",
    ) {
        let env = ResolvedEnvironment::from([(EnvVar::PxfHome, home.as_str()), (EnvVar::PxfBase, base.as_str())]);
        for op in [Operation::Start, Operation::Stop, Operation::Status, Operation::Sync] {
            let first = render_command(op, &env, RenderFlags::default(), &host);
            let second = render_command(op, &env, RenderFlags::default(), &host);
            prop_assert_eq!(first, second);
        }
    }

    /// Only sync mentions the host in its command line.
    #[test]
    fn prop_only_sync_is_host_specific(host in "sdw[0-9]{1,4}") {
        let env = ResolvedEnvironment::from([(EnvVar::PxfHome, "/opt/pxf"), (EnvVar::PxfBase, "/data/base")]);
        let plan = build(Operation::Status, &env, RenderFlags::default()).expect("build");
        prop_assert!(!plan.render(&host).contains(&host));
        let sync = build(Operation::Sync, &env, RenderFlags::default()).expect("build");
        let expected = format!("'{host}:/data/base'");
        prop_assert!(sync.render(&host).ends_with(&expected));
    }
}
