use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use campus_core::config::CampusConfig;
use campus_core::roster::RosterReader;
use tracing::info;

/// Which roster mapping to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RosterTable {
    Courses,
    Sections,
    ZoomLinks,
    Summary,
}

/// Run the `roster` command: print one of the roster mappings.
pub fn run(config_path: &str, table: RosterTable, json: bool) -> anyhow::Result<()> {
    let config = CampusConfig::load(Path::new(config_path))?;
    config.validate()?;
    info!("Loaded configuration from {}", config_path);

    let reader = RosterReader::new(&config.roster);

    let mapping = match table {
        RosterTable::Courses => reader.get_course_names()?,
        RosterTable::Sections => reader.get_section_faculty_ids()?,
        RosterTable::ZoomLinks => reader.get_zoom_links()?,
        RosterTable::Summary => {
            let roster = reader.load_all()?;
            println!("Roster data from: {}", config.roster.data_dir);
            println!("  Upper School courses:  {}", roster.course_names.len());
            println!("  Staffed sections:      {}", roster.section_faculty_ids.len());
            println!("  Zoom links:            {}", roster.zoom_links.len());
            return Ok(());
        }
    };

    print!("{}", render(&mapping, json)?);
    Ok(())
}

/// Render a mapping sorted by key, as JSON or as `key<TAB>value` lines.
fn render(mapping: &HashMap<String, String>, json: bool) -> anyhow::Result<String> {
    let sorted: BTreeMap<&String, &String> = mapping.iter().collect();
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&sorted)?));
    }
    Ok(sorted
        .into_iter()
        .map(|(k, v)| format!("{k}\t{v}\n"))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HashMap<String, String> {
        HashMap::from([
            ("S2".to_string(), "F2".to_string()),
            ("S1".to_string(), "F1".to_string()),
        ])
    }

    #[test]
    fn render_plain_is_sorted() {
        assert_eq!(render(&sample(), false).unwrap(), "S1\tF1\nS2\tF2\n");
    }

    #[test]
    fn render_json_object() {
        let out = render(&sample(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!({"S1": "F1", "S2": "F2"}));
    }

    #[test]
    fn render_empty() {
        assert_eq!(render(&HashMap::new(), false).unwrap(), "");
    }

    #[test]
    fn summary_tolerates_missing_zoom_links() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("courses.csv"),
            "Course ID,Course Name,School ID\nC1,Algebra,Upper\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("section.csv"),
            "SECTION_ID,FACULTY_ID,SCHOOL_ID\nS1,F1,Upper\n",
        )
        .unwrap();
        let config_path = dir.path().join("campus.toml");
        std::fs::write(
            &config_path,
            format!("[roster]\ndata_dir = {:?}\n", dir.path().to_string_lossy()),
        )
        .unwrap();

        run(&config_path.to_string_lossy(), RosterTable::Summary, false).unwrap();
        run(&config_path.to_string_lossy(), RosterTable::ZoomLinks, true).unwrap();
    }
}
