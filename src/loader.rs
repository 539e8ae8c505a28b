use crate::error::LoadError;
use crate::store::RecordStore;
use crate::types::{IncidentRecord, RawRow};
use crate::util::{non_blank, parse_count_safe, parse_datetime_safe, parse_f64_safe};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub missing_coords: usize,
    pub missing_categories: usize,
}

pub fn load_records(path: &str) -> Result<(RecordStore, LoadReport), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    load_from_reader(file)
}

/// Parse incident rows from any CSV source. The first malformed required
/// field aborts the whole load.
pub fn load_from_reader<R: Read>(reader: R) -> Result<(RecordStore, LoadReport), LoadError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut report = LoadReport::default();
    let mut records: Vec<IncidentRecord> = Vec::new();

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row_no = idx + 1;
        let row = result?;
        report.total_rows += 1;

        let incident_datetime = required(
            row_no,
            "incident_datetime",
            row.incident_datetime.as_deref(),
            parse_datetime_safe,
        )?;
        let injuries = required(
            row_no,
            "number_of_injuries",
            row.number_of_injuries.as_deref(),
            parse_count_safe,
        )?;
        let fatalities = required(
            row_no,
            "number_of_fatalities",
            row.number_of_fatalities.as_deref(),
            parse_count_safe,
        )?;
        let vehicles_involved = required(
            row_no,
            "number_of_vehicles_involved",
            row.number_of_vehicles_involved.as_deref(),
            parse_count_safe,
        )?;

        let latitude = parse_f64_safe(row.latitude.as_deref());
        let longitude = parse_f64_safe(row.longitude.as_deref());
        if latitude.is_none() || longitude.is_none() {
            report.missing_coords += 1;
        }

        let record = IncidentRecord {
            incident_datetime,
            latitude,
            longitude,
            province: non_blank(row.province_th),
            vehicle_type: non_blank(row.vehicle_type),
            presumed_cause: non_blank(row.presumed_cause),
            accident_type: non_blank(row.accident_type),
            road_description: non_blank(row.road_description),
            weather_condition: non_blank(row.weather_condition),
            injuries,
            fatalities,
            vehicles_involved,
        };
        let categories = [
            &record.vehicle_type,
            &record.presumed_cause,
            &record.accident_type,
            &record.road_description,
            &record.weather_condition,
        ];
        if categories.iter().any(|c| c.is_none()) {
            report.missing_categories += 1;
        }
        records.push(record);
    }

    Ok((RecordStore::new(records), report))
}

/// Run `parse` on a required cell.
///
/// - `row` is the 1-based data row (the header is not counted).
/// - A blank or unparsable cell becomes `InvalidField` carrying the raw text,
///   so the startup error points at the exact cell.
fn required<T>(
    row: usize,
    column: &'static str,
    raw: Option<&str>,
    parse: impl Fn(Option<&str>) -> Option<T>,
) -> Result<T, LoadError> {
    parse(raw).ok_or_else(|| LoadError::InvalidField {
        row,
        column,
        value: raw.unwrap_or_default().to_string(),
    })
}
