//! Behaviour-driven coverage for digit grouping.
//!
//! Scenarios insert separators with a configured pattern and check that
//! removal accepts exactly the positions insertion produces.

use parlance_common::{GroupingError, GroupingPattern};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug, Default)]
struct GroupingWorld {
    pattern: RefCell<GroupingPattern>,
    grouped: RefCell<Option<String>>,
    ungrouped: RefCell<Option<Result<String, GroupingError>>>,
}

impl GroupingWorld {
    fn pattern(&self) -> GroupingPattern {
        self.pattern.borrow().clone()
    }

    fn grouped(&self) -> String {
        self.grouped
            .borrow()
            .clone()
            .unwrap_or_else(|| panic!("a number should have been grouped"))
    }
}

#[fixture]
fn world() -> GroupingWorld {
    GroupingWorld::default()
}

#[given("the grouping pattern {raw}")]
fn given_pattern(world: &GroupingWorld, raw: String) {
    *world.pattern.borrow_mut() = GroupingPattern::parse(&raw);
}

#[when("I group {number}")]
fn when_group(world: &GroupingWorld, number: String) {
    let grouped = world.pattern().insert(&number, ",", ".");
    *world.grouped.borrow_mut() = Some(grouped);
}

#[when("I ungroup {text}")]
fn when_ungroup(world: &GroupingWorld, text: String) {
    let outcome = world.pattern().remove(&text, ",", ".");
    *world.ungrouped.borrow_mut() = Some(outcome);
}

#[then("the grouped text is {expected}")]
fn then_grouped(world: &GroupingWorld, expected: String) {
    assert_eq!(world.grouped(), expected);
}

#[then("ungrouping the grouped text restores {expected}")]
fn then_restores(world: &GroupingWorld, expected: String) {
    let restored = world
        .pattern()
        .remove(&world.grouped(), ",", ".")
        .unwrap_or_else(|error| panic!("grouped text should ungroup: {error}"));
    assert_eq!(restored, expected);
}

#[then("ungrouping is rejected")]
fn then_rejected(world: &GroupingWorld) {
    let outcome = world.ungrouped.borrow();
    assert!(
        matches!(outcome.as_ref(), Some(Err(_))),
        "expected a rejection, got {outcome:?}",
    );
}

#[scenario(path = "tests/features/grouping.feature", index = 0)]
fn scenario_western_round_trip(world: GroupingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/grouping.feature", index = 1)]
fn scenario_indian_grouping(world: GroupingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/grouping.feature", index = 2)]
fn scenario_terminated_pattern(world: GroupingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/grouping.feature", index = 3)]
fn scenario_misplaced_separator(world: GroupingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/grouping.feature", index = 4)]
fn scenario_doubled_separator(world: GroupingWorld) {
    let _ = world;
}
