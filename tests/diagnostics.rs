// CLASSIFICATION: COMMUNITY
// Filename: diagnostics.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-17

mod support;

use std::io::Cursor;

use nodeboot::diag::DiagnosticCommands;
use nodeboot::escalate::FailureEscalator;
use nodeboot::interp::SplitConsole;
use nodeboot::kernel::SemaphoreAttributes;
use support::{expect_halt, semaphore, MockNode};

fn with_diag<T>(node: &MockNode, f: impl FnOnce(DiagnosticCommands<'_>) -> T) -> T {
    let escalator = FailureEscalator::new(node, node);
    f(DiagnosticCommands::new(node, node, escalator))
}

fn semaphore_dump(node: &MockNode) -> String {
    let mut out = Vec::new();
    with_diag(node, |diag| diag.show_semaphores(&mut out)).unwrap();
    String::from_utf8(out).unwrap()
}

fn binary() -> SemaphoreAttributes {
    SemaphoreAttributes::BINARY_SEMAPHORE | SemaphoreAttributes::PRIORITY
}

#[test]
fn semaphores_print_three_per_line_with_summary() {
    let mut node = MockNode::new();
    node.capacity = 20;
    node.semaphores = vec![
        semaphore(b"ABCD", 1, binary(), 1),
        semaphore(b"CNT ", 2, SemaphoreAttributes::empty(), 12),
        semaphore(b"LOCK", 3, binary(), 0),
        semaphore(b"Q\0\0z", 0x1f, SemaphoreAttributes::PRIORITY, 3),
    ];

    assert_eq!(
        semaphore_dump(&node),
        "ABCD 1a010001   11    1   CNT  1a010002    0   12   LOCK 1a010003   11    0\n\
         Q  z 1a01001f    1    3   \n\
         4/20\n"
    );
}

#[test]
fn full_line_gets_no_extra_newline() {
    let mut node = MockNode::new();
    node.capacity = 3;
    node.semaphores = (1..=3)
        .map(|i| semaphore(b"SEMA", i, SemaphoreAttributes::empty(), 0))
        .collect();

    let dump = semaphore_dump(&node);
    assert_eq!(dump.lines().count(), 2);
    assert!(dump.ends_with("    0\n3/3\n"));
}

#[test]
fn empty_table_prints_only_summary() {
    let node = MockNode::new();
    assert_eq!(semaphore_dump(&node), "0/16\n");
}

#[test]
fn dump_never_walks_past_capacity() {
    let mut node = MockNode::new();
    node.capacity = 2;
    node.semaphores = (1..=5)
        .map(|i| semaphore(b"OVER", i, SemaphoreAttributes::empty(), 0))
        .collect();

    assert!(semaphore_dump(&node).ends_with("\n2/2\n"));
}

#[test]
fn stats_levels_are_cumulative() {
    let node = MockNode::new();
    let render = |level| {
        let mut out = Vec::new();
        with_diag(&node, |diag| diag.show_stats(level, &mut out)).unwrap();
        String::from_utf8(out).unwrap()
    };

    assert_eq!(render(0), "[Interfaces]\n[Mbufs]\n");
    assert_eq!(render(1), "[Interfaces]\n[Mbufs]\n[Routes]\n");
    assert_eq!(
        render(7),
        "[Interfaces]\n[Mbufs]\n[Routes]\n[Ip]\n[Icmp]\n[Udp]\n[Tcp]\n"
    );
}

fn decline(input: &str) -> (String, Vec<u8>) {
    let node = MockNode::new();
    let mut console = SplitConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    with_diag(&node, |diag| diag.reboot(&mut console)).unwrap();
    let (mut rest, out) = console.into_parts();
    let mut remaining = Vec::new();
    std::io::Read::read_to_end(&mut rest, &mut remaining).unwrap();
    assert!(!node.saw("halt"));
    (String::from_utf8(out).unwrap(), remaining)
}

#[test]
fn reboot_declined_discards_rest_of_line() {
    let (prompt, remaining) = decline("nope\nshowSem\n");
    assert_eq!(prompt, "Are you sure you want to reboot the IOC? ");
    assert_eq!(remaining, b"showSem\n");
}

#[test]
fn reboot_bare_newline_consumes_only_newline() {
    let (_, remaining) = decline("\nnext\n");
    assert_eq!(remaining, b"next\n");
}

#[test]
fn reboot_at_end_of_input_returns() {
    let (_, remaining) = decline("");
    assert!(remaining.is_empty());
}

#[test]
fn lowercase_answer_does_not_reboot() {
    let (_, remaining) = decline("y\n");
    assert!(remaining.is_empty());
}

#[test]
fn confirmed_reboot_halts_with_reboot() {
    let node = MockNode::new();
    node.open_sink();
    let mut console = SplitConsole::new(Cursor::new(b"Yes\n".to_vec()), Vec::new());
    let halt = expect_halt(|| {
        with_diag(&node, |diag| {
            let _ = diag.reboot(&mut console);
        });
    });

    assert_eq!(halt, "Reboot");
    assert_eq!(
        node.events(),
        ["log Alert Reboot", "sleep 100", "halt Reboot"]
    );
}
