//! CSV row structs for the roster exports.
//!
//! Field names match the header row of each export exactly. Columns not
//! listed here are ignored. An empty field, or one missing from a short row,
//! reads as `None`.

use serde::Deserialize;

/// A row type whose header columns must all be present in the file.
pub trait RosterRow {
    const COLUMNS: &'static [&'static str];
}

/// A row of the course catalog export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseCsvRow {
    #[serde(rename = "Course ID")]
    pub course_id: Option<String>,
    #[serde(rename = "Course Name")]
    pub course_name: Option<String>,
    #[serde(rename = "School ID")]
    pub school_id: Option<String>,
}

impl RosterRow for CourseCsvRow {
    const COLUMNS: &'static [&'static str] = &["Course ID", "Course Name", "School ID"];
}

/// A row of the section export, linking a section to its teacher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionCsvRow {
    #[serde(rename = "SECTION_ID")]
    pub section_id: Option<String>,
    #[serde(rename = "FACULTY_ID")]
    pub faculty_id: Option<String>,
    #[serde(rename = "SCHOOL_ID")]
    pub school_id: Option<String>,
}

impl RosterRow for SectionCsvRow {
    const COLUMNS: &'static [&'static str] = &["SECTION_ID", "FACULTY_ID", "SCHOOL_ID"];
}

/// A row of the zoom link sheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZoomLinkCsvRow {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(rename = "LINK")]
    pub link: Option<String>,
}

impl RosterRow for ZoomLinkCsvRow {
    const COLUMNS: &'static [&'static str] = &["ID", "LINK"];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: serde::de::DeserializeOwned>(data: &str) -> Vec<T> {
        csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_bytes())
            .deserialize()
            .collect::<Result<Vec<T>, _>>()
            .unwrap()
    }

    #[test]
    fn course_row_uses_header_names() {
        let rows: Vec<CourseCsvRow> =
            parse("Course ID,Course Name,School ID\nC1,Algebra,Upper\n");
        assert_eq!(
            rows,
            vec![CourseCsvRow {
                course_id: Some("C1".into()),
                course_name: Some("Algebra".into()),
                school_id: Some("Upper".into()),
            }]
        );
    }

    #[test]
    fn section_row_ignores_extra_columns() {
        let rows: Vec<SectionCsvRow> = parse(
            "SECTION_ID,COURSE_ID,FACULTY_ID,SCHOOL_ID,ROOM\nS1,C1,F1,Upper,101\n",
        );
        assert_eq!(rows[0].section_id.as_deref(), Some("S1"));
        assert_eq!(rows[0].faculty_id.as_deref(), Some("F1"));
        assert_eq!(rows[0].school_id.as_deref(), Some("Upper"));
    }

    #[test]
    fn zoom_row_empty_link_is_none() {
        let rows: Vec<ZoomLinkCsvRow> = parse("ID,LINK\nZ2,\n");
        assert_eq!(rows[0].id.as_deref(), Some("Z2"));
        assert!(rows[0].link.is_none());
    }

    #[test]
    fn short_row_fields_read_as_none() {
        let rows: Vec<SectionCsvRow> = parse("SECTION_ID,FACULTY_ID,SCHOOL_ID\nS2,F2\n");
        assert_eq!(rows[0].section_id.as_deref(), Some("S2"));
        assert_eq!(rows[0].faculty_id.as_deref(), Some("F2"));
        assert!(rows[0].school_id.is_none());
    }
}
