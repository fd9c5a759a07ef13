use parlance_common::render_digits;

use super::{ClockTime, TimeOptions, TimeTemplateEngine, TimeToken};
use crate::day_period::PeriodNameFormat;

impl TimeTemplateEngine<'_> {
    /// Render `time` with the locale's template.
    ///
    /// ```
    /// use parlance::{DayPeriods, LocaleSettings};
    /// use parlance::time::{ClockTime, TimeOptions, TimeTemplateEngine};
    ///
    /// let mut settings = LocaleSettings::default();
    /// settings.set_time_format("%I:%M:%S %p");
    /// let periods = DayPeriods::default();
    /// let engine = TimeTemplateEngine::new(&settings, &periods);
    /// let time = ClockTime::hms(21, 5, 9).unwrap();
    /// assert_eq!(engine.format(time, TimeOptions::default()), "09:05:09 PM");
    /// assert_eq!(engine.format(time, TimeOptions::default().without_am_pm()), "09:05:09");
    /// ```
    #[must_use]
    pub fn format(&self, time: ClockTime, options: TimeOptions) -> String {
        let period = self.periods.for_time(time);
        let mut rendered = String::new();
        for token in self.settings.time_template().tokens(options) {
            match *token {
                TimeToken::Literal(c) | TimeToken::Unknown(c) => rendered.push(c),
                TimeToken::Space => rendered.push(' '),
                TimeToken::Percent => rendered.push('%'),
                TimeToken::Hour24 { padded } => push_number(&mut rendered, time.hour(), padded),
                TimeToken::Hour12 { padded } => {
                    let hour = if options.duration {
                        time.hour()
                    } else {
                        period
                            .and_then(|current| current.hour_in_period(time))
                            .unwrap_or_else(|| time.hour())
                    };
                    push_number(&mut rendered, hour, padded);
                }
                TimeToken::Minute if options.fold_hours => {
                    push_number(&mut rendered, time.hour() * 60 + time.minute(), false);
                }
                TimeToken::Minute => push_number(&mut rendered, time.minute(), true),
                TimeToken::Second => push_number(&mut rendered, time.second(), true),
                TimeToken::DayPeriod { lowercase } => {
                    let name = period.map_or("", |current| current.name(PeriodNameFormat::Short));
                    if lowercase {
                        rendered.push_str(&name.to_lowercase());
                    } else {
                        rendered.push_str(name);
                    }
                }
            }
        }
        render_digits(
            &rendered,
            self.settings.date_time_digit_set(),
            self.settings.digit_language(),
        )
        .trim()
        .to_owned()
    }
}

fn push_number(buffer: &mut String, value: u32, padded: bool) {
    if padded {
        buffer.push_str(&format!("{value:02}"));
    } else {
        buffer.push_str(&value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_period::{DayPeriod, DayPeriods};
    use crate::settings::LocaleSettings;
    use parlance_common::DigitSet;
    use rstest::{fixture, rstest};

    fn at(hour: u32, minute: u32, second: u32) -> ClockTime {
        ClockTime::hms(hour, minute, second).expect("valid time")
    }

    fn settings_with(template: &str) -> LocaleSettings {
        let mut settings = LocaleSettings::default();
        settings.set_time_format(template);
        settings
    }

    #[fixture]
    fn periods() -> DayPeriods {
        DayPeriods::default()
    }

    #[rstest]
    #[case("%H:%M:%S", TimeOptions::default(), "07:05:09")]
    #[case("%k.%M", TimeOptions::default(), "7.05")]
    #[case("%I:%M %p", TimeOptions::default(), "07:05 AM")]
    #[case("%l:%M %P", TimeOptions::default(), "7:05 am")]
    #[case("%H:%M:%S", TimeOptions::default().without_seconds(), "07:05")]
    #[case("%H:%M:%S", TimeOptions::default().fold_hours(), "425:09")]
    #[case("%Hh%M %% %q", TimeOptions::default(), "07h05 % q")]
    fn formats_morning_times(
        periods: DayPeriods,
        #[case] template: &str,
        #[case] options: TimeOptions,
        #[case] expected: &str,
    ) {
        let settings = settings_with(template);
        let engine = TimeTemplateEngine::new(&settings, &periods);
        assert_eq!(engine.format(at(7, 5, 9), options), expected);
    }

    #[rstest]
    #[case(0, "12:30 AM")]
    #[case(12, "12:30 PM")]
    #[case(23, "11:30 PM")]
    fn numbers_hours_within_periods(periods: DayPeriods, #[case] hour: u32, #[case] expected: &str) {
        let settings = settings_with("%I:%M %p");
        let engine = TimeTemplateEngine::new(&settings, &periods);
        assert_eq!(engine.format(at(hour, 30, 0), TimeOptions::default()), expected);
    }

    #[rstest]
    fn durations_ignore_day_periods(periods: DayPeriods) {
        let settings = settings_with("%I:%M");
        let engine = TimeTemplateEngine::new(&settings, &periods);
        let options = TimeOptions::default().duration();
        assert_eq!(engine.format(at(14, 0, 0), options), "14:00");
    }

    #[rstest]
    fn uses_informal_period_names() {
        let mut periods = DayPeriods::default();
        let morning = DayPeriod::new(
            "morning",
            "Morning",
            "in the morning",
            "M",
            at(0, 0, 0),
            ClockTime::hmsz(11, 59, 59, 999).expect("end"),
            0,
            12,
        );
        let noon = DayPeriod::new(
            "noon",
            "Noon",
            "noon",
            "N",
            at(12, 0, 0),
            ClockTime::LAST_MILLISECOND,
            12,
            0,
        );
        assert!(periods.set(vec![morning, noon]));
        let settings = settings_with("%l %p");
        let engine = TimeTemplateEngine::new(&settings, &periods);
        assert_eq!(engine.format(at(8, 0, 0), TimeOptions::default()), "8 in the morning");
        assert_eq!(engine.format(at(12, 0, 0), TimeOptions::default()), "12 noon");
    }

    #[rstest]
    fn renders_date_time_digits(periods: DayPeriods) {
        let mut settings = settings_with("%H:%M");
        settings.set_language("hi_IN");
        settings.set_date_time_digit_set(DigitSet::Devanagari);
        let engine = TimeTemplateEngine::new(&settings, &periods);
        assert_eq!(engine.format(at(9, 45, 0), TimeOptions::default()), "०९:४५");
    }

    #[rstest]
    fn leading_period_is_dropped_with_its_separator(periods: DayPeriods) {
        let settings = settings_with("%p %I:%M");
        let engine = TimeTemplateEngine::new(&settings, &periods);
        let time = at(15, 20, 0);
        assert_eq!(engine.format(time, TimeOptions::default()), "PM 03:20");
        assert_eq!(engine.format(time, TimeOptions::default().without_am_pm()), "03:20");
    }
}
