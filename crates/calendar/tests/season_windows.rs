use cropex_calendar::{CalendarKind, DayStamp, Doy, SeasonWindow, daily_sequence, season_year};

fn stamp(year: i32, doy: u16) -> DayStamp {
    DayStamp::new(year, Doy::new(doy).unwrap())
}

#[test]
fn wrapping_season_days_group_into_one_season_year() {
    // Window (350, 10): the 1982 season is 1981-350..=1981-365 plus 1982-1..=1982-10.
    let window = SeasonWindow::from_days(350, 10).unwrap();
    let stamps = daily_sequence(stamp(1981, 1), 2 * 365, CalendarKind::NoLeap);

    let season_1982: Vec<DayStamp> = stamps
        .iter()
        .copied()
        .filter(|s| window.contains(s.doy()) && season_year(*s, window) == 1982)
        .collect();

    assert_eq!(season_1982.len(), usize::from(window.nominal_length()));
    assert_eq!(season_1982.first(), Some(&stamp(1981, 350)));
    assert_eq!(season_1982.last(), Some(&stamp(1982, 10)));
    // Chronological order is preserved: tail before head.
    assert!(season_1982.windows(2).all(|p| p[0] < p[1]));
}

#[test]
fn single_year_window_membership_matches_length_every_year() {
    let window = SeasonWindow::from_days(120, 210).unwrap();
    let stamps = daily_sequence(stamp(1981, 1), 3 * 365, CalendarKind::NoLeap);
    for year in 1981..=1983 {
        let n = stamps
            .iter()
            .filter(|s| s.year() == year && window.contains(s.doy()))
            .count();
        assert_eq!(n, usize::from(window.nominal_length()), "year {year}");
    }
}

#[test]
fn every_window_length_is_positive_and_bounded() {
    for start in (1..=366u16).step_by(7) {
        for end in (1..=366u16).step_by(11) {
            let window = SeasonWindow::from_days(start, end).unwrap();
            let len = window.nominal_length();
            assert!(len <= 366, "({start}, {end}) -> {len}");
            if !window.wraps() {
                assert_eq!(len, end - start + 1);
            } else {
                assert_eq!(i32::from(len), (365 - i32::from(start) + 1) + i32::from(end));
            }
        }
    }
}

#[test]
fn cf_offsets_round_trip_through_sequence() {
    let base = chrono::NaiveDate::from_ymd_opt(1981, 1, 1).unwrap();
    for kind in [CalendarKind::Standard, CalendarKind::NoLeap] {
        let expected = daily_sequence(stamp(1981, 1), 4 * 366, kind);
        for (offset, want) in expected.iter().enumerate() {
            let got = kind.stamp_from_offset(base, offset as i64).unwrap();
            assert_eq!(got, *want, "{} offset {offset}", kind.name());
        }
    }
}
