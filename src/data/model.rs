use std::fmt;

// ---------------------------------------------------------------------------
// Season – categorical code 1..=4
// ---------------------------------------------------------------------------

/// Meteorological season as coded in the dataset.
///
/// The derived `Ord` follows declaration order, which is the canonical
/// display order Spring → Summer → Fall → Winter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Map the dataset code (1–4) to a season.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            4 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// DayType – the boolean-coded `workingday` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayType {
    Weekend,
    WorkingDay,
}

impl DayType {
    pub const ALL: [DayType; 2] = [DayType::Weekend, DayType::WorkingDay];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DayType::Weekend),
            1 => Some(DayType::WorkingDay),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayType::Weekend => "Weekend",
            DayType::WorkingDay => "Working day",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ValueColumn – the numeric columns statistics can be taken over
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueColumn {
    Cnt,
    Casual,
    Registered,
}

impl ValueColumn {
    pub fn name(self) -> &'static str {
        match self {
            ValueColumn::Cnt => "cnt",
            ValueColumn::Casual => "casual",
            ValueColumn::Registered => "registered",
        }
    }

    /// Human-facing label used in chart axes and legends.
    pub fn label(self) -> &'static str {
        match self {
            ValueColumn::Cnt => "Total",
            ValueColumn::Casual => "Casual",
            ValueColumn::Registered => "Registered",
        }
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            ValueColumn::Cnt => f64::from(record.cnt),
            ValueColumn::Casual => f64::from(record.casual),
            ValueColumn::Registered => f64::from(record.registered),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single observation (one hourly row of the bike-sharing table).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub season: Season,
    pub day_type: DayType,
    /// Weather situation code (1 = clear … 4 = heavy rain).
    pub weathersit: u8,
    /// Normalised temperature.
    pub temp: f64,
    /// Hour of day, 0–23.
    pub hour: u8,
    /// Month, 1–12.
    pub month: u8,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

// ---------------------------------------------------------------------------
// BikeDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Never mutated after loading.
#[derive(Debug, Clone)]
pub struct BikeDataset {
    pub records: Vec<Record>,
    /// Seasons present in the data, in order of first appearance.
    pub season_options: Vec<Season>,
}

impl BikeDataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut season_options = Vec::new();
        for rec in &records {
            if !season_options.contains(&rec.season) {
                season_options.push(rec.season);
            }
        }
        BikeDataset {
            records,
            season_options,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate the records selected by `indices`.
    pub fn select<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a Record> + 'a {
        indices.iter().filter_map(move |&i| self.records.get(i))
    }
}
