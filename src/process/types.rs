// src/process/types.rs

use chrono::NaiveDate;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One `<tr>` worth of cell text, in document order. Empty cells are `""`.
pub type RawRow = Vec<String>;

/// A row that is known not to be a header and has had its decorative
/// markers removed. Only the validator hands these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRow(Vec<String>);

impl ValidatedRow {
    pub(crate) fn from_cells(cells: Vec<String>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }
}

/// A typed row: the date from the first cell, then every remaining cell as
/// an integer (new staff cases, new student cases, ...).
///
/// Ordering is by date, then by the counts left to right.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Record {
    pub date: NaiveDate,
    pub counts: Vec<i64>,
}

/// Sorted output of the pipeline.
pub type Dataset = Vec<Record>;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

impl Record {
    pub fn new(date: NaiveDate, counts: Vec<i64>) -> Self {
        Self { date, counts }
    }

    /// `YYYY-MM-DD`
    pub fn iso_date(&self) -> String {
        self.date.format(ISO_DATE_FORMAT).to_string()
    }

    pub fn staff_cases(&self) -> Option<i64> {
        self.counts.first().copied()
    }

    pub fn student_cases(&self) -> Option<i64> {
        self.counts.get(1).copied()
    }

    /// Flatten into text fields for CSV-style writers.
    pub fn to_fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.counts.len() + 1);
        out.push(self.iso_date());
        out.extend(self.counts.iter().map(|n| n.to_string()));
        out
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iso_date())?;
        for n in &self.counts {
            write!(f, ", {}", n)?;
        }
        Ok(())
    }
}

// Serialized as a flat array: ["2020-10-19", 5, 23]
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.counts.len() + 1))?;
        seq.serialize_element(&self.iso_date())?;
        for n in &self.counts {
            seq.serialize_element(n)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an array of an ISO date followed by integers")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Record, A::Error> {
                let raw: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let date = NaiveDate::parse_from_str(&raw, ISO_DATE_FORMAT)
                    .map_err(|e| de::Error::custom(format!("bad date {raw:?}: {e}")))?;
                let mut counts = Vec::new();
                while let Some(n) = seq.next_element::<i64>()? {
                    counts.push(n);
                }
                Ok(Record { date, counts })
            }
        }

        deserializer.deserialize_seq(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_json_shape() {
        let r = Record::new(ymd(2020, 10, 19), vec![5, 23]);
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"["2020-10-19",5,23]"#);

        let back: Record = serde_json::from_str(r#"["2020-10-19",5,23]"#).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_record_rejects_bad_json() {
        assert!(serde_json::from_str::<Record>("[]").is_err());
        assert!(serde_json::from_str::<Record>(r#"["19/10/2020",5]"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"["2020-10-19","5"]"#).is_err());
    }

    #[test]
    fn test_ordering_is_date_then_counts() {
        let a = Record::new(ymd(2020, 10, 19), vec![5, 23]);
        let b = Record::new(ymd(2020, 10, 27), vec![1, 17]);
        let c = Record::new(ymd(2020, 10, 27), vec![1, 18]);
        let d = Record::new(ymd(2020, 10, 27), vec![2]);
        let mut v = vec![d.clone(), c.clone(), b.clone(), a.clone()];
        v.sort();
        assert_eq!(v, vec![a, b, c, d]);
    }

    #[test]
    fn test_display_and_fields() {
        let r = Record::new(ymd(2020, 10, 5), vec![0, 12]);
        assert_eq!(r.to_string(), "2020-10-05, 0, 12");
        assert_eq!(r.to_fields(), vec!["2020-10-05", "0", "12"]);
        assert_eq!(r.staff_cases(), Some(0));
        assert_eq!(r.student_cases(), Some(12));
    }
}
