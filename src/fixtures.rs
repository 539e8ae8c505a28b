// Shared test records.
use crate::store::RecordStore;
use crate::types::IncidentRecord;
use crate::util::parse_datetime_safe;

pub fn some(v: &str) -> Option<String> {
    Some(v.to_string())
}

/// A fully populated incident at `ts`.
pub fn incident(ts: &str) -> IncidentRecord {
    IncidentRecord {
        incident_datetime: parse_datetime_safe(Some(ts)).unwrap(),
        latitude: Some(13.75),
        longitude: Some(100.5),
        province: some("Bangkok"),
        vehicle_type: some("motorcycle"),
        presumed_cause: some("speeding"),
        accident_type: some("rear-end collision"),
        road_description: some("straight road"),
        weather_condition: some("clear"),
        injuries: 0,
        fatalities: 0,
        vehicles_involved: 1,
    }
}

/// An incident with the four flow-graph dimensions set.
pub fn flow(vehicle: &str, cause: &str, accident: &str, road: &str) -> IncidentRecord {
    IncidentRecord {
        vehicle_type: some(vehicle),
        presumed_cause: some(cause),
        accident_type: some(accident),
        road_description: some(road),
        ..incident("2020-01-15 12:00:00")
    }
}

pub fn store(records: Vec<IncidentRecord>) -> RecordStore {
    RecordStore::new(records)
}
