//! Behaviour-driven coverage for number and money formatting and reading.

#[path = "support/locales.rs"]
mod locales;
#[path = "support/step.rs"]
mod step;

use std::cell::RefCell;

use parlance::{LocaleSettings, MoneyFormatter, NumberFormatter, ReadError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use locales::sample_locale;
use step::StepText;

#[derive(Default)]
struct NumberWorld {
    settings: RefCell<LocaleSettings>,
    text: RefCell<Option<String>>,
    read: RefCell<Option<Result<f64, ReadError>>>,
}

impl NumberWorld {
    fn text(&self) -> String {
        self.text
            .borrow()
            .clone()
            .unwrap_or_else(|| panic!("a value should have been formatted"))
    }

    fn value(&self) -> f64 {
        match self.read.borrow().as_ref() {
            Some(Ok(value)) => *value,
            other => panic!("expected a value, got {other:?}"),
        }
    }
}

#[fixture]
fn world() -> NumberWorld {
    NumberWorld::default()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[given("the {name} locale")]
fn given_locale(world: &NumberWorld, name: String) {
    *world.settings.borrow_mut() = sample_locale(&name);
}

#[when("I format the number {value} with {places} decimals")]
fn when_format_number(world: &NumberWorld, value: f64, places: usize) {
    let settings = world.settings.borrow();
    let text = NumberFormatter::new(&settings).format(value, Some(places));
    *world.text.borrow_mut() = Some(text);
}

#[when("I format the amount {value}")]
fn when_format_amount(world: &NumberWorld, value: f64) {
    let settings = world.settings.borrow();
    let text = MoneyFormatter::new(&settings).format(value, None, None);
    *world.text.borrow_mut() = Some(text);
}

#[when("I read the number {text}")]
fn when_read_number(world: &NumberWorld, text: StepText) {
    let settings = world.settings.borrow();
    let outcome = NumberFormatter::new(&settings).read(&text.into_inner());
    *world.read.borrow_mut() = Some(outcome);
}

#[when("I read the amount {text}")]
fn when_read_amount(world: &NumberWorld, text: StepText) {
    let settings = world.settings.borrow();
    let outcome = MoneyFormatter::new(&settings).read(&text.into_inner());
    *world.read.borrow_mut() = Some(outcome);
}

#[then("the text is {expected}")]
fn then_text(world: &NumberWorld, expected: StepText) {
    assert_eq!(world.text(), expected.into_inner());
}

#[then("reading the number text gives {expected}")]
fn then_number_round_trip(world: &NumberWorld, expected: f64) {
    let settings = world.settings.borrow();
    let value = NumberFormatter::new(&settings)
        .read(&world.text())
        .unwrap_or_else(|error| panic!("formatted text should read back: {error}"));
    assert_close(value, expected);
}

#[then("reading the amount text gives {expected}")]
fn then_amount_round_trip(world: &NumberWorld, expected: f64) {
    let settings = world.settings.borrow();
    let value = MoneyFormatter::new(&settings)
        .read(&world.text())
        .unwrap_or_else(|error| panic!("formatted amount should read back: {error}"));
    assert_close(value, expected);
}

#[then("the value is {expected}")]
fn then_value(world: &NumberWorld, expected: f64) {
    assert_close(world.value(), expected);
}

#[then("reading is rejected")]
fn then_rejected(world: &NumberWorld) {
    let outcome = world.read.borrow();
    assert!(
        matches!(outcome.as_ref(), Some(Err(_))),
        "expected a rejection, got {outcome:?}",
    );
}

#[scenario(path = "tests/features/number_reading.feature", index = 0)]
fn scenario_western_round_trip(world: NumberWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/number_reading.feature", index = 1)]
fn scenario_german_separators(world: NumberWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/number_reading.feature", index = 2)]
fn scenario_indian_digits(world: NumberWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/number_reading.feature", index = 3)]
fn scenario_misplaced_separators(world: NumberWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/number_reading.feature", index = 4)]
fn scenario_parenthesised_amounts(world: NumberWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/number_reading.feature", index = 5)]
fn scenario_swedish_amounts(world: NumberWorld) {
    let _ = world;
}
