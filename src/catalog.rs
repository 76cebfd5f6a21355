//! Catalog loading.
//!
//! Threats, assets and controls live in semicolon-delimited CSV files next
//! to the binary. Loading is deliberately forgiving: a missing file falls
//! back to the built-in catalog, malformed rows are skipped with a
//! diagnostic, and nothing here aborts the program. The engine itself only
//! ever sees the already-validated result.

use std::path::Path;

use crate::models::{Asset, Control, Threat};

/// Built-in threat catalog used when `Threat.csv` is missing.
const FALLBACK_THREATS: [&str; 11] = [
    "Data Corruption",
    "Physical/Logical Attack",
    "Interception/Eavesdropping",
    "Jamming",
    "Denial-of-Service",
    "Masquerade/Spoofing",
    "Replay",
    "Software Threats",
    "Unauthorized Access/Hijacking",
    "Tainted hardware components",
    "Supply Chain",
];

/// Built-in asset catalog used when `Asset.csv` is missing.
const FALLBACK_ASSETS: [(&str, &str, &str); 11] = [
    ("Ground", "Ground Stations", "Tracking"),
    ("Ground", "Ground Stations", "Ranging"),
    ("Ground", "Mission Control", "Telemetry processing"),
    ("Ground", "Mission Control", "Commanding"),
    ("Ground", "Data Processing Centers", "Mission Analysis"),
    ("Ground", "Remote Terminals", "Network access"),
    ("Ground", "User Ground Segment", "Development"),
    ("Space", "Platform", "Bus"),
    ("Space", "Payload", "Payload Data Handling Systems"),
    ("Link", "Link", "Between Platform and Payload"),
    ("User", "User", "Transmission"),
];

fn split_row(line: &str) -> Vec<String> {
    line.split(';').map(|field| field.trim().to_string()).collect()
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}

fn read_rows(path: &Path) -> Option<Vec<Vec<String>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Catalog file not found: {:?}", path);
            return None;
        }
        Err(e) => {
            log::error!("Error reading catalog {:?}: {}", path, e);
            return None;
        }
    };

    let rows: Vec<Vec<String>> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(split_row)
        .collect();

    if rows.is_empty() {
        log::warn!("Catalog file {:?} is empty", path);
        return None;
    }
    Some(rows)
}

/// Load the threat catalog from a `Threat.csv` with a `THREAT` column.
/// Falls back to the built-in list when the file is missing or unreadable.
pub fn load_threats(path: &Path) -> Vec<Threat> {
    let Some(rows) = read_rows(path) else {
        return FALLBACK_THREATS.iter().map(|&name| Threat::new(name)).collect();
    };

    let Some(name_column) = column_index(&rows[0], "THREAT") else {
        log::warn!("Catalog {:?} has no THREAT column", path);
        return Vec::new();
    };

    let mut names: Vec<String> = rows[1..]
        .iter()
        .filter_map(|row| row.get(name_column))
        .filter(|name| !name.is_empty())
        .cloned()
        .collect();
    names.sort();

    log::info!("Loaded {} threats from {:?}", names.len(), path);
    names.into_iter().map(Threat::new).collect()
}

/// Load the asset catalog from an `Asset.csv` with `categories`,
/// `subCategories` and `asset` columns. Rows missing any field are
/// skipped. Falls back to the built-in list when the file is missing.
pub fn load_assets(path: &Path) -> Vec<Asset> {
    let Some(rows) = read_rows(path) else {
        return FALLBACK_ASSETS
            .iter()
            .map(|&(category, subcategory, component)| {
                Asset::new(category, subcategory, component)
            })
            .collect();
    };

    let headers = &rows[0];
    let columns = (
        column_index(headers, "categories"),
        column_index(headers, "subCategories"),
        column_index(headers, "asset"),
    );
    let (Some(category_col), Some(subcategory_col), Some(component_col)) = columns else {
        log::warn!(
            "Catalog {:?} is missing one of categories/subCategories/asset",
            path
        );
        return Vec::new();
    };

    let mut assets = Vec::new();
    for (line_number, row) in rows[1..].iter().enumerate() {
        let category = row.get(category_col).map(String::as_str).unwrap_or("");
        let subcategory = row.get(subcategory_col).map(String::as_str).unwrap_or("");
        let component = row.get(component_col).map(String::as_str).unwrap_or("");

        if category.is_empty() || subcategory.is_empty() || component.is_empty() {
            log::debug!("Skipping incomplete asset row {} in {:?}", line_number + 2, path);
            continue;
        }
        assets.push(Asset::new(category, subcategory, component));
    }

    log::info!("Loaded {} assets from {:?}", assets.len(), path);
    assets
}

/// Load the control catalog from a `Control.csv` with `Control`,
/// `Cluster`, `Control title`, `Criteria`, `Threats addressed` and
/// `Segment` columns. There is no built-in fallback: a missing file means
/// no controls.
pub fn load_controls(path: &Path) -> Vec<Control> {
    let Some(rows) = read_rows(path) else {
        return Vec::new();
    };

    let headers = &rows[0];
    let Some(id_col) = column_index(headers, "Control") else {
        log::warn!("Catalog {:?} has no Control column", path);
        return Vec::new();
    };
    let cluster_col = column_index(headers, "Cluster");
    let title_col = column_index(headers, "Control title");
    let criteria_col = column_index(headers, "Criteria");
    let threats_col = column_index(headers, "Threats addressed");
    let segment_col = column_index(headers, "Segment");

    let field = |row: &[String], column: Option<usize>| -> String {
        column
            .and_then(|index| row.get(index))
            .cloned()
            .unwrap_or_default()
    };

    let mut controls = Vec::new();
    for (line_number, row) in rows[1..].iter().enumerate() {
        let id = field(row, Some(id_col));
        if id.is_empty() {
            log::debug!(
                "Skipping control row {} in {:?}: empty id",
                line_number + 2,
                path
            );
            continue;
        }
        controls.push(Control {
            id,
            cluster: field(row, cluster_col),
            title: field(row, title_col),
            criteria: field(row, criteria_col),
            threats_addressed: field(row, threats_col),
            segment: field(row, segment_col),
        });
    }

    log::info!("Loaded {} controls from {:?}", controls.len(), path);
    controls
}
