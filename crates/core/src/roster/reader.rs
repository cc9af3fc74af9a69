//! Roster CSV reader: loads each export into an ID-keyed mapping.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::RosterConfig;
use crate::error::{CampusError, Result};

use super::rows::{CourseCsvRow, RosterRow, SectionCsvRow, ZoomLinkCsvRow};

/// School ID of the division whose rows are kept.
pub const UPPER_SCHOOL: &str = "Upper";

/// Reads the roster exports named by a [`RosterConfig`].
#[derive(Debug, Clone)]
pub struct RosterReader {
    courses: PathBuf,
    sections: PathBuf,
    zoom_links: PathBuf,
}

/// All three roster mappings, loaded together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub course_names: HashMap<String, String>,
    pub section_faculty_ids: HashMap<String, String>,
    pub zoom_links: HashMap<String, String>,
}

impl RosterReader {
    pub fn new(config: &RosterConfig) -> Self {
        Self {
            courses: config.courses_path(),
            sections: config.sections_path(),
            zoom_links: config.zoom_links_path(),
        }
    }

    /// Map of course ID to course name for Upper School courses.
    ///
    /// Fails if the course export is missing.
    pub fn get_course_names(&self) -> Result<HashMap<String, String>> {
        collect_mapping(&self.courses, |row: CourseCsvRow| {
            if row.school_id.as_deref() != Some(UPPER_SCHOOL) {
                return None;
            }
            Some((
                row.course_id.unwrap_or_default(),
                row.course_name.unwrap_or_default(),
            ))
        })
    }

    /// Map of section ID to faculty ID for Upper School sections that have a
    /// teacher assigned.
    ///
    /// Fails if the section export is missing.
    pub fn get_section_faculty_ids(&self) -> Result<HashMap<String, String>> {
        collect_mapping(&self.sections, |row: SectionCsvRow| {
            if row.school_id.as_deref() != Some(UPPER_SCHOOL) {
                return None;
            }
            Some((row.section_id.unwrap_or_default(), row.faculty_id?))
        })
    }

    /// Map of ID to zoom link, skipping rows without a link.
    ///
    /// A missing zoom link file is not an error: a warning is logged and an
    /// empty map is returned. Other failures still propagate.
    pub fn get_zoom_links(&self) -> Result<HashMap<String, String>> {
        let result = collect_mapping(&self.zoom_links, |row: ZoomLinkCsvRow| {
            Some((row.id.unwrap_or_default(), row.link?))
        });

        match result {
            Err(e) if e.is_not_found() => {
                warn!(
                    path = %self.zoom_links.display(),
                    "zoom links file does not exist, using an empty mapping instead"
                );
                Ok(HashMap::new())
            }
            other => other,
        }
    }

    /// Load every mapping, failing on the first required file that fails.
    pub fn load_all(&self) -> Result<Roster> {
        Ok(Roster {
            course_names: self.get_course_names()?,
            section_faculty_ids: self.get_section_faculty_ids()?,
            zoom_links: self.get_zoom_links()?,
        })
    }
}

/// Scan a CSV file once, keeping the pairs `select` returns. Later rows
/// overwrite earlier rows with the same key.
///
/// Every column of `T` must appear in the header. Rows may be shorter or
/// longer than the header.
fn collect_mapping<T, F>(path: &Path, mut select: F) -> Result<HashMap<String, String>>
where
    T: DeserializeOwned + RosterRow,
    F: FnMut(T) -> Option<(String, String)>,
{
    let file = File::open(path)
        .map_err(|e| std::io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = rdr.headers().map_err(|e| {
        CampusError::Serialization(format!("CSV header error in {}: {e}", path.display()))
    })?;
    if let Some(missing) = T::COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(CampusError::Serialization(format!(
            "CSV file {} has no \"{missing}\" column",
            path.display()
        )));
    }

    let mut mapping = HashMap::new();
    for result in rdr.deserialize() {
        let row: T = result.map_err(|e| {
            CampusError::Serialization(format!("CSV parse error in {}: {e}", path.display()))
        })?;
        if let Some((key, value)) = select(row) {
            mapping.insert(key, value);
        }
    }

    debug!(path = %path.display(), entries = mapping.len(), "loaded roster file");
    Ok(mapping)
}
