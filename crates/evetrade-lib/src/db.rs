use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rusqlite::{Connection, Row};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::sde::open_read_only;

/// Numeric identifier for a solar system.
pub type SystemId = i64;

/// Security status at or above which a system counts as high-sec.
///
/// Matches the in-game UI, which rounds 0.45 up to 0.5.
pub const HIGH_SEC_THRESHOLD: f64 = 0.45;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Additional metadata tracked for each system.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SystemMetadata {
    pub region_id: Option<i64>,
    pub region_name: Option<String>,
    pub security_status: Option<f64>,
}

/// Representation of a solar system with optional metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub id: SystemId,
    pub name: String,
    pub metadata: SystemMetadata,
}

impl System {
    /// `true` when the system's security status is known and at least
    /// [`HIGH_SEC_THRESHOLD`].
    pub fn is_high_sec(&self) -> bool {
        self.metadata
            .security_status
            .map(|status| status >= HIGH_SEC_THRESHOLD)
            .unwrap_or(false)
    }
}

/// In-memory representation of the stargate network.
///
/// `adjacency` holds one directed entry per stargate record.
#[derive(Debug, Clone, Default)]
pub struct Starmap {
    pub systems: HashMap<SystemId, System>,
    pub name_to_id: HashMap<String, SystemId>,
    pub adjacency: Arc<HashMap<SystemId, Vec<SystemId>>>,
}

impl Starmap {
    /// Lookup a system identifier by its case-sensitive name.
    pub fn system_id_by_name(&self, name: &str) -> Option<SystemId> {
        self.name_to_id.get(name).copied()
    }

    /// Lookup a system name by identifier.
    pub fn system_name(&self, id: SystemId) -> Option<&str> {
        self.systems.get(&id).map(|sys| sys.name.as_str())
    }

    /// Resolve a system by name, or by numeric identifier when the input
    /// parses as one and is known.
    pub fn resolve_system(&self, query: &str) -> Result<SystemId> {
        if let Some(id) = self.system_id_by_name(query) {
            return Ok(id);
        }
        if let Ok(id) = query.trim().parse::<SystemId>() {
            if self.systems.contains_key(&id) {
                return Ok(id);
            }
        }
        Err(Error::UnknownSystem {
            name: query.to_string(),
            suggestions: self.fuzzy_system_matches(query, 3),
        })
    }

    /// Names most similar to `query`, best first, at most `limit` of them.
    pub fn fuzzy_system_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .name_to_id
            .keys()
            .map(|name| (strsim::jaro_winkler(&needle, &name.to_lowercase()), name.as_str()))
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct StargateDestination {
    #[serde(rename = "solarSystemID")]
    solar_system_id: SystemId,
}

/// Load systems and stargates from a dataset into memory.
///
/// Systems come from `mapSolarSystems`, annotated with their region name from
/// `mapRegions` when that table is present. Each `mapStargates` row becomes a
/// directed edge to the system named in its `destination` JSON; rows that
/// reference unknown systems or cannot be decoded are skipped.
pub fn load_starmap(db_path: &Path) -> Result<Starmap> {
    let connection = open_read_only(db_path)?;
    debug!(path = %db_path.display(), "loading starmap");
    load_starmap_from_connection(&connection)
}

/// Load the starmap from an open connection.
pub fn load_starmap_from_connection(connection: &Connection) -> Result<Starmap> {
    for table in ["mapSolarSystems", "mapStargates"] {
        if !table_exists(connection, table)? {
            return Err(Error::UnsupportedSchema {
                table: table.to_string(),
            });
        }
    }

    let regions = if table_exists(connection, "mapRegions")? {
        load_regions(connection)?
    } else {
        HashMap::new()
    };
    let systems = load_systems(connection, &regions)?;
    let adjacency = Arc::new(load_adjacency(connection, &systems)?);

    let mut name_to_id = HashMap::new();
    for system in systems.values() {
        name_to_id.insert(system.name.clone(), system.id);
    }

    debug!(
        systems = systems.len(),
        gates = adjacency.values().map(Vec::len).sum::<usize>(),
        "loaded starmap"
    );

    Ok(Starmap {
        systems,
        name_to_id,
        adjacency,
    })
}

fn load_regions(connection: &Connection) -> Result<HashMap<i64, String>> {
    let mut stmt = connection.prepare("SELECT _key, name FROM mapRegions")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?))
    })?;

    let mut regions = HashMap::new();
    for row in rows {
        let (region_id, name) = row?;
        if let Some(name) = name {
            regions.insert(region_id, localized_name(&name));
        }
    }
    Ok(regions)
}

fn load_systems(
    connection: &Connection,
    regions: &HashMap<i64, String>,
) -> Result<HashMap<SystemId, System>> {
    let mut stmt = connection
        .prepare("SELECT solarSystemID, name, securityStatus, regionID FROM mapSolarSystems")?;
    let rows = stmt.query_map([], row_to_system)?;

    let mut systems = HashMap::new();
    for entry in rows {
        let mut system = entry?;
        system.metadata.region_name = system
            .metadata
            .region_id
            .and_then(|id| regions.get(&id).cloned());
        systems.insert(system.id, system);
    }
    Ok(systems)
}

/// Load stargate connections into directed adjacency lists.
fn load_adjacency(
    connection: &Connection,
    systems: &HashMap<SystemId, System>,
) -> Result<HashMap<SystemId, Vec<SystemId>>> {
    let mut stmt = connection.prepare("SELECT solarSystemID, destination FROM mapStargates")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, SystemId>(0)?, row.get::<_, Option<String>>(1)?))
    })?;

    let mut adjacency: HashMap<SystemId, Vec<SystemId>> = HashMap::new();
    let mut skipped_edges = 0usize;
    let mut malformed_edges = 0usize;
    for row in rows {
        let (from, destination) = row?;
        let to = match destination
            .as_deref()
            .map(serde_json::from_str::<StargateDestination>)
        {
            Some(Ok(dest)) => dest.solar_system_id,
            _ => {
                malformed_edges += 1;
                continue;
            }
        };
        if !systems.contains_key(&from) || !systems.contains_key(&to) {
            skipped_edges += 1;
            continue;
        }
        adjacency.entry(from).or_default().push(to);
    }

    for neighbours in adjacency.values_mut() {
        neighbours.sort_unstable();
        neighbours.dedup();
    }

    if skipped_edges > 0 {
        warn!(skipped_edges, "ignored stargates referencing unknown systems");
    }
    if malformed_edges > 0 {
        warn!(malformed_edges, "ignored stargates with unreadable destinations");
    }

    Ok(adjacency)
}

fn row_to_system(row: &Row<'_>) -> rusqlite::Result<System> {
    Ok(System {
        id: row.get(0)?,
        name: row
            .get::<_, Option<String>>(1)?
            .map(|raw| localized_name(&raw))
            .unwrap_or_default(),
        metadata: SystemMetadata {
            region_id: row.get(3)?,
            region_name: None,
            security_status: row.get(2)?,
        },
    })
}

/// Extract the English text from a localized name column.
///
/// Dataset exports store names either as plain text or as a JSON object keyed
/// by language code.
pub(crate) fn localized_name(raw: &str) -> String {
    if raw.trim_start().starts_with('{') {
        if let Ok(map) = serde_json::from_str::<HashMap<String, String>>(raw) {
            if let Some(english) = map.get("en") {
                return english.clone();
            }
        }
    }
    raw.to_string()
}

pub(crate) fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}
