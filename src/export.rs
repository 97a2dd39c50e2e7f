// src/export.rs
//
// JSON and CSV codecs for `LeadersByCountry`.
// JSON keeps the grouping: { "<country>": [ {leader}, … ], … }.
// CSV flattens it: one row per leader, `country` first. Countries without
// leaders have no rows, so they don't survive a CSV round-trip.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::data::{Country, LeaderRecord, LeadersByCountry, Paragraph};

pub const CSV_HEADERS: [&str; 9] = [
    "country", "id", "first_name", "last_name", "birth_date", "death_date",
    "place_of_birth", "wikipedia_url", "first_paragraph",
];

/// One flattened CSV line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    pub country: Country,
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub place_of_birth: Option<String>,
    pub wikipedia_url: String,
    #[serde(default, alias = "wiki_paragraph")]
    pub first_paragraph: Paragraph,
}

impl CsvRow {
    fn new(country: &Country, l: &LeaderRecord) -> Self {
        Self {
            country: country.clone(),
            id: l.id.clone(),
            first_name: l.first_name.clone(),
            last_name: l.last_name.clone(),
            birth_date: l.birth_date.clone(),
            death_date: l.death_date.clone(),
            place_of_birth: l.place_of_birth.clone(),
            wikipedia_url: l.wikipedia_url.clone(),
            first_paragraph: l.first_paragraph.clone(),
        }
    }

    fn into_parts(self) -> (Country, LeaderRecord) {
        let leader = LeaderRecord {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            death_date: self.death_date,
            place_of_birth: self.place_of_birth,
            wikipedia_url: self.wikipedia_url,
            first_paragraph: self.first_paragraph,
        };
        (self.country, leader)
    }
}

/* ---------------- Grouping ---------------- */

pub fn flatten(data: &LeadersByCountry) -> Vec<CsvRow> {
    data.iter()
        .flat_map(|(country, leaders)| leaders.iter().map(move |l| CsvRow::new(country, l)))
        .collect()
}

/// Regroup rows by country, keeping row order within each country.
pub fn group(rows: Vec<CsvRow>) -> LeadersByCountry {
    let mut out = LeadersByCountry::new();
    for row in rows {
        let (country, leader) = row.into_parts();
        out.entry(country).or_default().push(leader);
    }
    out
}

/* ---------------- JSON ---------------- */

pub fn write_json<W: Write>(w: W, data: &LeadersByCountry) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(w, data)
}

pub fn read_json<R: Read>(r: R) -> serde_json::Result<LeadersByCountry> {
    serde_json::from_reader(r)
}

/* ---------------- CSV ---------------- */

/// Header line is always written, even with no rows.
pub fn write_csv<W: Write>(w: W, data: &LeadersByCountry) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(w);
    wtr.write_record(CSV_HEADERS)?;
    for row in flatten(data) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_csv<R: Read>(r: R) -> csv::Result<Vec<CsvRow>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(r)
        .deserialize()
        .collect()
}
