use chrono::NaiveDate;
use spei_calendar::{Doy, NoLeapDate, SeriesBounds, is_leap_day, label_series};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn gregorian_year_maps_onto_365_labels() {
    for year in [2019, 2020] {
        let doys: Vec<u16> = ymd(year, 1, 1)
            .iter_days()
            .take_while(|d| *d <= ymd(year, 12, 31))
            .filter(|d| !is_leap_day(*d))
            .map(|d| Doy::from_date(d).unwrap().get())
            .collect();
        assert_eq!(doys, (1..=365).collect::<Vec<_>>(), "year {year}");
    }
}

#[test]
fn noleap_label_roundtrips_to_gregorian() {
    for doy in Doy::all() {
        let label = NoLeapDate::from_year_doy(2020, doy);
        let g = label.to_gregorian().unwrap();
        assert_eq!(NoLeapDate::from_gregorian(g).unwrap(), label);
    }
}

#[test]
fn every_row_resolves_to_its_own_index() {
    let dates: Vec<NaiveDate> = ymd(2015, 10, 3)
        .iter_days()
        .take_while(|d| *d <= ymd(2021, 4, 20))
        .filter(|d| !is_leap_day(*d))
        .collect();
    let labels = label_series(&dates).unwrap();
    let bounds = SeriesBounds::from_labels(&labels).unwrap();

    assert_eq!(bounds.n_rows(), labels.len());
    assert_eq!(bounds.n_years(), 7);
    for (row, label) in labels.iter().enumerate() {
        assert_eq!(bounds.row_index(label.year(), label.doy()), Some(row));
    }
}

#[test]
fn two_year_series_has_no_interior_year() {
    let dates: Vec<NaiveDate> = ymd(2018, 11, 1)
        .iter_days()
        .take_while(|d| *d <= ymd(2019, 2, 10))
        .collect();
    let labels = label_series(&dates).unwrap();
    let bounds = SeriesBounds::from_labels(&labels).unwrap();

    assert_eq!(bounds.n_years(), 2);
    // DOY 100 falls between the end of 2019's coverage and the start of 2018's.
    let doy = Doy::new(100).unwrap();
    assert!(bounds.missing_in_first_year(doy));
    assert!(bounds.missing_in_last_year(doy));
    assert!(bounds.row_index(2018, doy).is_none());
    assert!(bounds.row_index(2019, doy).is_none());
}
