//! Named subdivisions of the day used by 12-hour style clocks.
//!
//! A [`DayPeriod`] covers a span of wall-clock time, possibly wrapping past
//! midnight. Within the span hours are numbered from `offset_from_start`,
//! wrap every twelve, and an hour that comes out as zero is shown as
//! `offset_if_zero`. The conventional AM/PM pair is two periods of twelve
//! hours, both numbered 12, 1, …, 11.

use std::fmt;

use log::warn;

use crate::time::ClockTime;

/// Hours in one numbering cycle of a period clock.
const HOURS_PER_CYCLE: u32 = 12;

/// Which display form of a period name to use.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PeriodNameFormat {
    /// e.g. "Post Meridiem".
    Long,
    /// e.g. "PM".
    #[default]
    Short,
    /// e.g. "P".
    Narrow,
}

/// A named, time-bounded part of the day.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DayPeriod {
    code: String,
    long_name: String,
    short_name: String,
    narrow_name: String,
    start: ClockTime,
    end: ClockTime,
    offset_from_start: u32,
    offset_if_zero: u32,
}

impl DayPeriod {
    /// Build a period from its names, bounds, and hour offsets.
    #[must_use]
    #[expect(clippy::too_many_arguments, reason = "mirrors the eight configuration fields")]
    pub fn new(
        code: impl Into<String>,
        long_name: impl Into<String>,
        short_name: impl Into<String>,
        narrow_name: impl Into<String>,
        start: ClockTime,
        end: ClockTime,
        offset_from_start: u32,
        offset_if_zero: u32,
    ) -> Self {
        Self {
            code: code.into(),
            long_name: long_name.into(),
            short_name: short_name.into(),
            narrow_name: narrow_name.into(),
            start,
            end,
            offset_from_start,
            offset_if_zero,
        }
    }

    /// The conventional AM and PM periods.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "am",
                "Ante Meridiem",
                "AM",
                "A",
                ClockTime::MIDNIGHT,
                ClockTime::hmsz(11, 59, 59, 999).unwrap_or(ClockTime::MIDNIGHT),
                0,
                12,
            ),
            Self::new(
                "pm",
                "Post Meridiem",
                "PM",
                "P",
                ClockTime::hms(12, 0, 0).unwrap_or(ClockTime::MIDNIGHT),
                ClockTime::LAST_MILLISECOND,
                0,
                12,
            ),
        ]
    }

    /// Parse the configuration form
    /// `code,long,short,narrow,HH:MM:SS.mmm,HH:MM:SS.mmm,offset,offset_if_zero`.
    ///
    /// Returns `None` when the entry does not have eight fields or any field
    /// is malformed.
    #[must_use]
    pub fn parse_config(raw: &str) -> Option<Self> {
        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
        let [code, long, short, narrow, start, end, offset, offset_if_zero] = fields.as_slice()
        else {
            return None;
        };
        let period = Self::new(
            *code,
            *long,
            *short,
            *narrow,
            ClockTime::parse(start)?,
            ClockTime::parse(end)?,
            offset.parse().ok()?,
            offset_if_zero.parse().ok()?,
        );
        period.is_valid().then_some(period)
    }

    /// Whether the period has a code and both hour offsets lie within one
    /// twelve-hour cycle; bounds are valid by construction.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.code.is_empty()
            && self.offset_from_start <= HOURS_PER_CYCLE
            && self.offset_if_zero <= HOURS_PER_CYCLE
    }

    /// Stable identifier, e.g. `am`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The display name in the requested form.
    #[must_use]
    pub fn name(&self, format: PeriodNameFormat) -> &str {
        match format {
            PeriodNameFormat::Long => &self.long_name,
            PeriodNameFormat::Short => &self.short_name,
            PeriodNameFormat::Narrow => &self.narrow_name,
        }
    }

    /// First instant of the period.
    #[must_use]
    pub const fn start(&self) -> ClockTime {
        self.start
    }

    /// Last instant of the period.
    #[must_use]
    pub const fn end(&self) -> ClockTime {
        self.end
    }

    /// Whether `time` falls inside the period, bounds included.
    #[must_use]
    pub fn contains(&self, time: ClockTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time <= self.end
        } else {
            time >= self.start || time <= self.end
        }
    }

    /// The hour shown for `time` within this period.
    ///
    /// ```
    /// use parlance::{DayPeriod, time::ClockTime};
    ///
    /// let pm = &DayPeriod::defaults()[1];
    /// assert_eq!(pm.hour_in_period(ClockTime::hms(12, 0, 0).unwrap()), Some(12));
    /// assert_eq!(pm.hour_in_period(ClockTime::hms(18, 30, 0).unwrap()), Some(6));
    /// assert_eq!(pm.hour_in_period(ClockTime::hms(9, 0, 0).unwrap()), None);
    /// ```
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "hours wrap on the twelve and twenty-four hour cycles"
    )]
    pub fn hour_in_period(&self, time: ClockTime) -> Option<u32> {
        if !self.is_valid() || !self.contains(time) {
            return None;
        }
        let elapsed = (time.hour() + 24 - self.start.hour()) % 24;
        let hour = elapsed + self.offset_from_start;
        Some(if hour == 0 {
            self.offset_if_zero
        } else {
            (hour - 1) % HOURS_PER_CYCLE + 1
        })
    }

    /// The wall-clock time for an hour shown within this period.
    ///
    /// Returns `None` when the shown hour exceeds twelve or the result falls
    /// outside the period.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "hours wrap on the twelve and twenty-four hour cycles"
    )]
    pub fn time(&self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Option<ClockTime> {
        if !self.is_valid() || hour > HOURS_PER_CYCLE {
            return None;
        }
        let shown = if hour == self.offset_if_zero { 0 } else { hour };
        let difference = i64::from(shown) - i64::from(self.offset_from_start);
        let elapsed = if difference < 0 {
            difference.rem_euclid(i64::from(HOURS_PER_CYCLE))
        } else {
            difference
        };
        let absolute = (i64::from(self.start.hour()) + elapsed) % 24;
        let time = ClockTime::hmsz(u32::try_from(absolute).ok()?, minute, second, millisecond)?;
        self.contains(time).then_some(time)
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{},{},{},{},{},{},{},{}",
            self.code,
            self.long_name,
            self.short_name,
            self.narrow_name,
            self.start,
            self.end,
            self.offset_from_start,
            self.offset_if_zero,
        )
    }
}

/// The ordered list of periods a locale uses.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DayPeriods {
    periods: Vec<DayPeriod>,
}

impl Default for DayPeriods {
    fn default() -> Self {
        Self {
            periods: DayPeriod::defaults(),
        }
    }
}

impl DayPeriods {
    /// Replace the list. An empty list, or one holding any invalid period,
    /// leaves the current list in place and returns `false`.
    pub fn set(&mut self, periods: Vec<DayPeriod>) -> bool {
        if periods.is_empty() || periods.iter().any(|period| !period.is_valid()) {
            warn!(target: "day_period", "ignoring day period list with invalid entries");
            return false;
        }
        self.periods = periods;
        true
    }

    /// Periods in configured order.
    #[must_use]
    pub fn as_slice(&self) -> &[DayPeriod] {
        &self.periods
    }

    /// The first period containing `time`.
    #[must_use]
    pub fn for_time(&self, time: ClockTime) -> Option<&DayPeriod> {
        self.periods.iter().find(|period| period.contains(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn at(hour: u32, minute: u32) -> ClockTime {
        ClockTime::hms(hour, minute, 0).expect("valid time")
    }

    #[fixture]
    fn informal() -> DayPeriods {
        let mut periods = DayPeriods::default();
        let accepted = periods.set(vec![
            DayPeriod::new("morning", "Morning", "in the morning", "M", at(6, 0), ClockTime::hmsz(11, 59, 59, 999).expect("end"), 6, 12),
            DayPeriod::new("noon", "Noon", "noon", "O", at(12, 0), ClockTime::hmsz(12, 0, 59, 999).expect("end"), 12, 0),
            DayPeriod::new("afternoon", "Afternoon", "in the afternoon", "A", at(12, 1), ClockTime::hmsz(17, 59, 59, 999).expect("end"), 0, 12),
            DayPeriod::new("evening", "Evening", "in the evening", "E", at(18, 0), ClockTime::hmsz(21, 59, 59, 999).expect("end"), 6, 12),
            DayPeriod::new("night", "Night", "at night", "N", at(22, 0), ClockTime::hmsz(5, 59, 59, 999).expect("end"), 10, 12),
        ]);
        assert!(accepted);
        periods
    }

    #[rstest]
    #[case(0, 0, Some(12))]
    #[case(1, 0, Some(1))]
    #[case(11, 59, Some(11))]
    #[case(12, 0, None)]
    fn numbers_morning_hours(#[case] hour: u32, #[case] minute: u32, #[case] expected: Option<u32>) {
        let am = DayPeriod::defaults().remove(0);
        assert_eq!(am.hour_in_period(at(hour, minute)), expected);
    }

    #[rstest]
    #[case(12, Some((0, 0)))]
    #[case(1, Some((1, 0)))]
    #[case(11, Some((11, 0)))]
    #[case(13, None)]
    fn converts_morning_hours_back(#[case] shown: u32, #[case] expected: Option<(u32, u32)>) {
        let am = DayPeriod::defaults().remove(0);
        let expected = expected.map(|(hour, minute)| at(hour, minute));
        assert_eq!(am.time(shown, 0, 0, 0), expected);
    }

    #[rstest]
    #[case(12, Some(12))]
    #[case(1, Some(13))]
    #[case(13, None)]
    fn converts_afternoon_hours_back(#[case] shown: u32, #[case] expected: Option<u32>) {
        let pm = DayPeriod::defaults().remove(1);
        assert_eq!(pm.time(shown, 0, 0, 0), expected.map(|hour| at(hour, 0)));
    }

    #[rstest]
    fn thirds_of_the_day_count_from_one() {
        let early = DayPeriod::new("p1", "Early Day", "Early", "E", at(0, 0), ClockTime::hmsz(7, 59, 59, 999).expect("end"), 1, 0);
        assert_eq!(early.hour_in_period(at(0, 0)), Some(1));
        assert_eq!(early.hour_in_period(at(7, 0)), Some(8));
        assert_eq!(early.time(0, 0, 0, 0), None);
        assert_eq!(early.time(1, 0, 0, 0), Some(at(0, 0)));
        assert_eq!(early.time(9, 0, 0, 0), None);
    }

    #[rstest]
    fn periods_may_wrap_past_midnight(informal: DayPeriods) {
        let night = informal.for_time(at(0, 0)).expect("night covers midnight");
        assert_eq!(night.code(), "night");
        assert_eq!(night.hour_in_period(at(23, 0)), Some(11));
        assert_eq!(night.hour_in_period(at(0, 0)), Some(12));
        assert_eq!(night.hour_in_period(at(1, 0)), Some(1));
        assert_eq!(night.time(11, 0, 0, 0), Some(at(23, 0)));
        assert_eq!(night.time(12, 0, 0, 0), Some(at(0, 0)));
        assert_eq!(night.time(1, 0, 0, 0), Some(at(1, 0)));
    }

    #[rstest]
    fn noon_and_afternoon_number_from_twelve(informal: DayPeriods) {
        let noon = informal.for_time(at(12, 0)).expect("noon");
        assert_eq!(noon.name(PeriodNameFormat::Short), "noon");
        assert_eq!(noon.time(12, 0, 0, 0), Some(at(12, 0)));
        let afternoon = informal.for_time(at(12, 1)).expect("afternoon");
        assert_eq!(afternoon.hour_in_period(at(12, 1)), Some(12));
        assert_eq!(afternoon.time(5, 0, 0, 0), Some(at(17, 0)));
    }

    #[rstest]
    fn parses_configuration_entries() {
        let period = DayPeriod::parse_config("third1,First Third,T1,T,00:00:00.000,07:59:59.999,0,12")
            .expect("entry parses");
        assert_eq!(period.name(PeriodNameFormat::Long), "First Third");
        assert_eq!(period.end(), ClockTime::hmsz(7, 59, 59, 999).expect("end"));
        assert_eq!(
            period.to_string(),
            "third1,First Third,T1,T,00:00:00.000,07:59:59.999,0,12"
        );
        assert!(DayPeriod::parse_config("third1,First Third,T1,T").is_none());
        assert!(DayPeriod::parse_config(",Long,S,N,00:00:00.000,07:59:59.999,0,12").is_none());
    }

    #[rstest]
    #[case::offset_from_start("late,Late,L,L,00:00:00.000,07:59:59.999,4294967295,12")]
    #[case::offset_if_zero("late,Late,L,L,00:00:00.000,07:59:59.999,0,13")]
    fn rejects_offsets_beyond_one_cycle(#[case] entry: &str) {
        assert!(DayPeriod::parse_config(entry).is_none());
    }

    #[rstest]
    fn large_offsets_wrap_within_the_cycle() {
        let twelve = DayPeriod::new("p", "P", "P", "P", at(0, 0), ClockTime::LAST_MILLISECOND, 12, 12);
        assert_eq!(twelve.hour_in_period(at(0, 0)), Some(12));
        assert_eq!(twelve.hour_in_period(at(23, 0)), Some(11));
        assert_eq!(twelve.time(11, 0, 0, 0), Some(at(11, 0)));
        assert_eq!(twelve.time(u32::MAX, 0, 0, 0), None);
    }

    #[rstest]
    fn invalid_lists_leave_the_current_periods() {
        let mut periods = DayPeriods::default();
        let broken = DayPeriod::new("", "", "", "", at(0, 0), at(1, 0), 0, 0);
        assert!(!periods.set(vec![broken]));
        assert!(!periods.set(Vec::new()));
        assert_eq!(periods, DayPeriods::default());
    }
}
