/// Route distance resolution.
///
/// Port pairs map to nautical-mile distances through a static table built once
/// at startup. Lookups normalise port names and accept either direction.
use crate::errors::StageFailure;
use crate::models::RouteEntry;
use std::collections::HashMap;
use std::path::Path;

/// Built-in route table, nautical miles.
const DEFAULT_ROUTES: &[(&str, &str, f64)] = &[
    ("Singapore", "Shanghai", 2450.0),
    ("Singapore", "Mumbai", 1920.0),
    ("Singapore", "Rotterdam", 9800.0),
    ("Shanghai", "Los Angeles", 5600.0),
    ("Shanghai", "Seattle", 4800.0),
    ("New York", "Rotterdam", 3600.0),
    ("New York", "Hamburg", 3700.0),
    ("Houston", "Rotterdam", 4700.0),
    ("Houston", "Antwerp", 4800.0),
    ("Tokyo", "Vancouver", 4200.0),
    ("Tokyo", "Los Angeles", 4700.0),
    ("Sydney", "Singapore", 3800.0),
    ("Cape Town", "Singapore", 6000.0),
    ("Dubai", "Rotterdam", 7000.0),
    ("Dubai", "Mumbai", 1200.0),
    ("Santos", "Houston", 4900.0),
    ("Santos", "Rotterdam", 5800.0),
    ("Busan", "Long Beach", 5500.0),
];

/// Lower-cases a port name and collapses its whitespace.
pub fn normalize_port(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read-only port-pair distance table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    distances: HashMap<(String, String), f64>,
    /// Entries as configured, for listing.
    entries: Vec<RouteEntry>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_ROUTES
                .iter()
                .map(|(from, to, nm)| RouteEntry {
                    from: from.to_string(),
                    to: to.to_string(),
                    distance_nm: *nm,
                })
                .collect(),
        )
    }
}

impl RouteTable {
    pub fn from_entries(entries: Vec<RouteEntry>) -> Self {
        let mut distances = HashMap::with_capacity(entries.len());
        for entry in &entries {
            if !(entry.distance_nm.is_finite() && entry.distance_nm > 0.0) {
                tracing::warn!(
                    "Route {} -> {} has invalid distance {}; lookups will fail",
                    entry.from,
                    entry.to,
                    entry.distance_nm
                );
            }
            let key = (normalize_port(&entry.from), normalize_port(&entry.to));
            if distances.insert(key, entry.distance_nm).is_some() {
                tracing::warn!("Duplicate route {} -> {}; last entry wins", entry.from, entry.to);
            }
        }
        Self { distances, entries }
    }

    /// Loads a table from a JSON array of `{"from", "to", "distance_nm"}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read route table {}: {}", path.display(), e))?;
        let entries: Vec<RouteEntry> = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid route table {}: {}", path.display(), e))?;
        if entries.is_empty() {
            anyhow::bail!("Route table {} has no entries", path.display());
        }
        tracing::info!("Loaded {} routes from {}", entries.len(), path.display());
        Ok(Self::from_entries(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured routes, in configuration order.
    pub fn routes(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Finds the configured distance for a port pair, either direction.
    pub fn lookup(&self, start: &str, end: &str) -> Result<f64, StageFailure> {
        let start_key = normalize_port(start);
        let end_key = normalize_port(end);

        let distance = self
            .distances
            .get(&(start_key.clone(), end_key.clone()))
            .or_else(|| self.distances.get(&(end_key.clone(), start_key.clone())))
            .copied()
            .ok_or(StageFailure::RouteNotFound {
                start: start_key,
                end: end_key,
            })?;

        if !(distance.is_finite() && distance > 0.0) {
            return Err(StageFailure::InvalidDistance(distance));
        }
        Ok(distance)
    }

    /// Resolves the voyage distance; a positive manual distance wins.
    pub fn resolve(
        &self,
        start: &str,
        end: &str,
        manual_distance: Option<f64>,
    ) -> Result<f64, StageFailure> {
        if let Some(manual) = manual_distance.filter(|d| d.is_finite() && *d > 0.0) {
            return Ok(manual);
        }
        self.lookup(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_all_routes() {
        let table = RouteTable::default();
        assert_eq!(table.len(), 18);
        assert_eq!(table.routes()[0].from, "Singapore");
    }

    #[test]
    fn test_lookup_is_case_and_whitespace_insensitive() {
        let table = RouteTable::default();
        assert_eq!(table.lookup("  SINGAPORE ", "rotterdam").unwrap(), 9800.0);
        assert_eq!(table.lookup("new   york", "Hamburg").unwrap(), 3700.0);
    }

    #[test]
    fn test_lookup_accepts_reverse_direction() {
        let table = RouteTable::default();
        assert_eq!(table.lookup("Rotterdam", "Singapore").unwrap(), 9800.0);
    }

    #[test]
    fn test_unknown_route_fails() {
        let table = RouteTable::default();
        let err = table.lookup("Singapore", "Valparaiso").unwrap_err();
        assert_eq!(
            err,
            StageFailure::RouteNotFound {
                start: "singapore".to_string(),
                end: "valparaiso".to_string(),
            }
        );
    }

    #[test]
    fn test_manual_distance_bypasses_table() {
        let table = RouteTable::default();
        assert_eq!(table.resolve("Singapore", "Rotterdam", Some(1234.0)).unwrap(), 1234.0);
        assert_eq!(table.resolve("Nowhere", "Elsewhere", Some(50.0)).unwrap(), 50.0);
    }

    #[test]
    fn test_non_positive_manual_distance_is_ignored() {
        let table = RouteTable::default();
        assert_eq!(table.resolve("Dubai", "Mumbai", Some(0.0)).unwrap(), 1200.0);
        assert!(table.resolve("Nowhere", "Elsewhere", Some(0.0)).is_err());
    }

    #[test]
    fn test_misconfigured_distance_fails() {
        let table = RouteTable::from_entries(vec![RouteEntry {
            from: "A".to_string(),
            to: "B".to_string(),
            distance_nm: 0.0,
        }]);
        assert_eq!(table.lookup("a", "b").unwrap_err(), StageFailure::InvalidDistance(0.0));
    }

    #[test]
    fn test_load_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        std::fs::write(
            &path,
            r#"[{"from": "Le Havre", "to": "Halifax", "distance_nm": 2700}]"#,
        )
        .unwrap();

        let table = RouteTable::from_json_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("halifax", "le havre").unwrap(), 2700.0);
        assert!(table.lookup("Singapore", "Rotterdam").is_err());
    }

    #[test]
    fn test_empty_json_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(RouteTable::from_json_file(&path).is_err());
    }
}
