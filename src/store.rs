// The loaded incident table and the per-invocation views derived from it.
//
// `RecordStore` is built once and only ever borrowed immutably. Each
// recompute narrows it to a `WorkingSet`, which owns the derived month
// column for that invocation alone.
use crate::months::MonthBucket;
use crate::types::IncidentRecord;
use chrono::NaiveDate;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<IncidentRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<IncidentRecord>) -> Self {
        RecordStore { records }
    }

    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest incident date, the default range of the control.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let mut dates = self.records.iter().map(|r| r.incident_datetime.date());
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(DateRange { start, end })
    }

    /// Records whose incident date lies in `range`, with their month buckets.
    pub fn working_set(&self, range: &DateRange) -> WorkingSet<'_> {
        let rows = self
            .records
            .iter()
            .filter(|r| range.contains(r.incident_datetime.date()))
            .map(|record| WorkingRow {
                record,
                month: MonthBucket::of(&record.incident_datetime),
            })
            .collect();
        WorkingSet { rows }
    }
}

/// Inclusive date range selected by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WorkingRow<'a> {
    pub record: &'a IncidentRecord,
    pub month: MonthBucket,
}

#[derive(Debug, Clone, Default)]
pub struct WorkingSet<'a> {
    pub rows: Vec<WorkingRow<'a>>,
}

impl<'a> WorkingSet<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a IncidentRecord> + '_ {
        self.rows.iter().map(|r| r.record)
    }
}
