//! Dogma half of the static data export.
//!
//! [`load_dogma_data`] reads the `types`, `typeDogma`, `dogmaEffects` and
//! `dogmaAttributes` tables into an immutable [`DogmaData`] value. Every JSON
//! blob is decoded here; the calculators only ever see the typed model from
//! [`crate::dogma`]. Rows that fail to decode are kept as [`EffectIssue`]s so
//! a single bad effect never hides the rest of a type's data.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::db::{load_starmap_from_connection, localized_name, table_exists, Starmap};
use crate::dogma::{
    AttributeId, AttributeValue, Effect, EffectId, EffectIssue, ItemEffectProfile,
    ModifierDomain, ModifierInfo, OperationCode, TypeId, DEFAULT_ATTRIBUTE_STACKABLE,
};
use crate::error::{Error, Result};

/// Read-only queries the calculators make against static data.
///
/// Implementations must be safe for concurrent reads; [`DogmaData`] is an
/// immutable in-memory value and satisfies this trivially.
pub trait DogmaSource {
    /// Lookup a type and its decoded dogma.
    fn type_info(&self, type_id: TypeId) -> Option<&TypeInfo>;

    /// Lookup a decoded effect definition.
    fn effect(&self, effect_id: EffectId) -> Option<&Effect>;

    /// Stackable flag of an attribute, if the dataset records one.
    fn attribute_stackable(&self, attribute_id: AttributeId) -> Option<bool>;
}

/// Decoded `typeDogma` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeDogma {
    pub attributes: HashMap<AttributeId, AttributeValue>,
    pub effect_ids: Vec<EffectId>,
    pub issues: Vec<EffectIssue>,
}

/// A row of `types` joined with its dogma, when present.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeInfo {
    pub type_id: TypeId,
    pub name: String,
    pub mass: Option<f64>,
    pub group_id: Option<i64>,
    pub dogma: Option<TypeDogma>,
}

impl TypeInfo {
    /// Value of one of the type's dogma attributes.
    pub fn attribute(&self, attribute_id: AttributeId) -> Option<f64> {
        self.dogma
            .as_ref()
            .and_then(|dogma| dogma.attributes.get(&attribute_id))
            .map(|attr| attr.value)
    }

    /// Whether the type has any dogma attributes at all.
    pub fn has_dogma_attributes(&self) -> bool {
        self.dogma
            .as_ref()
            .map(|dogma| !dogma.attributes.is_empty())
            .unwrap_or(false)
    }
}

/// In-memory dogma tables.
#[derive(Debug, Clone, Default)]
pub struct DogmaData {
    types: HashMap<TypeId, TypeInfo>,
    effects: HashMap<EffectId, Effect>,
    stackable: HashMap<AttributeId, bool>,
}

impl DogmaData {
    pub fn insert_type(&mut self, info: TypeInfo) {
        self.types.insert(info.type_id, info);
    }

    pub fn insert_effect(&mut self, effect: Effect) {
        self.effects.insert(effect.effect_id, effect);
    }

    pub fn set_attribute_stackable(&mut self, attribute_id: AttributeId, stackable: bool) {
        self.stackable.insert(attribute_id, stackable);
    }

    /// Number of types loaded.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of effects loaded.
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }
}

impl DogmaSource for DogmaData {
    fn type_info(&self, type_id: TypeId) -> Option<&TypeInfo> {
        self.types.get(&type_id)
    }

    fn effect(&self, effect_id: EffectId) -> Option<&Effect> {
        self.effects.get(&effect_id)
    }

    fn attribute_stackable(&self, attribute_id: AttributeId) -> Option<bool> {
        self.stackable.get(&attribute_id).copied()
    }
}

/// Dogma tables and starmap loaded from one dataset file.
#[derive(Debug, Clone, Default)]
pub struct StaticData {
    pub dogma: DogmaData,
    pub starmap: Starmap,
}

/// Load both the dogma tables and the starmap from a dataset.
pub fn load_static_data(db_path: &Path) -> Result<StaticData> {
    let connection = open_read_only(db_path)?;
    Ok(StaticData {
        dogma: load_dogma_from_connection(&connection)?,
        starmap: load_starmap_from_connection(&connection)?,
    })
}

/// Load the dogma tables from a dataset file.
pub fn load_dogma_data(db_path: &Path) -> Result<DogmaData> {
    let connection = open_read_only(db_path)?;
    debug!(path = %db_path.display(), "loading dogma data");
    load_dogma_from_connection(&connection)
}

pub(crate) fn open_read_only(db_path: &Path) -> Result<Connection> {
    if !db_path.exists() {
        return Err(Error::DatasetNotFound {
            path: db_path.to_path_buf(),
        });
    }
    Ok(Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?)
}

/// Load the dogma tables from an open connection.
pub fn load_dogma_from_connection(connection: &Connection) -> Result<DogmaData> {
    for table in ["types", "typeDogma", "dogmaEffects"] {
        if !table_exists(connection, table)? {
            return Err(Error::UnsupportedSchema {
                table: table.to_string(),
            });
        }
    }

    let mut types = load_types(connection)?;
    attach_type_dogma(connection, &mut types)?;
    let effects = load_effects(connection)?;
    let stackable = if table_exists(connection, "dogmaAttributes")? {
        load_stackable_flags(connection)?
    } else {
        warn!("dogmaAttributes table missing; every attribute treated as stackable");
        HashMap::new()
    };

    debug!(
        types = types.len(),
        effects = effects.len(),
        attributes = stackable.len(),
        "loaded dogma data"
    );

    Ok(DogmaData {
        types,
        effects,
        stackable,
    })
}

/// Assemble the full effect profile of a fitted type.
///
/// Returns `None` when the type is unknown or has no dogma row. Effect IDs
/// without a matching `dogmaEffects` row are skipped.
pub fn load_item_profile<S>(source: &S, type_id: TypeId) -> Option<ItemEffectProfile>
where
    S: DogmaSource + ?Sized,
{
    let info = source.type_info(type_id)?;
    let dogma = info.dogma.as_ref()?;

    let mut effects = Vec::with_capacity(dogma.effect_ids.len());
    for &effect_id in &dogma.effect_ids {
        match source.effect(effect_id) {
            Some(effect) => effects.push(effect.clone()),
            None => debug!(type_id, effect_id, "type references unknown effect"),
        }
    }

    if !dogma.issues.is_empty() {
        effects.push(Effect {
            effect_id: 0,
            name: "typeDogma".to_string(),
            modifiers: Vec::new(),
            issues: dogma.issues.clone(),
        });
    }

    let stackable = effects
        .iter()
        .flat_map(|effect| effect.modifiers.iter())
        .any(|modifier| is_attribute_stackable(source, modifier.modified_attribute_id));

    Some(ItemEffectProfile {
        type_id,
        name: info.name.clone(),
        attributes: dogma.attributes.clone(),
        effects,
        stackable,
    })
}

/// Whether bonuses to `attribute_id` are subject to stacking penalties.
///
/// Falls back to [`DEFAULT_ATTRIBUTE_STACKABLE`] when the flag is absent.
pub fn is_attribute_stackable<S>(source: &S, attribute_id: AttributeId) -> bool
where
    S: DogmaSource + ?Sized,
{
    source
        .attribute_stackable(attribute_id)
        .unwrap_or(DEFAULT_ATTRIBUTE_STACKABLE)
}

#[derive(Debug, Deserialize)]
struct RawTypeEffect {
    #[serde(rename = "effectID")]
    effect_id: EffectId,
}

#[derive(Debug, Deserialize)]
struct RawModifier {
    domain: Option<String>,
    #[serde(alias = "targetFunction")]
    func: Option<String>,
    #[serde(rename = "modifiedAttributeID")]
    modified_attribute_id: Option<AttributeId>,
    #[serde(rename = "modifyingAttributeID")]
    modifying_attribute_id: Option<AttributeId>,
    operation: Option<i64>,
}

fn load_types(connection: &Connection) -> Result<HashMap<TypeId, TypeInfo>> {
    let mut stmt = connection.prepare("SELECT _key, name, mass, groupID FROM types")?;
    let rows = stmt.query_map([], |row| {
        Ok(TypeInfo {
            type_id: row.get(0)?,
            name: row
                .get::<_, Option<String>>(1)?
                .map(|raw| localized_name(&raw))
                .unwrap_or_default(),
            mass: row.get(2)?,
            group_id: row.get(3)?,
            dogma: None,
        })
    })?;

    let mut types = HashMap::new();
    for entry in rows {
        let info = entry?;
        types.insert(info.type_id, info);
    }
    Ok(types)
}

fn attach_type_dogma(connection: &Connection, types: &mut HashMap<TypeId, TypeInfo>) -> Result<()> {
    let mut stmt = connection.prepare("SELECT _key, dogmaAttributes, dogmaEffects FROM typeDogma")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, TypeId>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<String>>(2)?,
        ))
    })?;

    let mut orphaned = 0usize;
    let mut malformed = 0usize;
    for row in rows {
        let (type_id, attributes_json, effects_json) = row?;
        let Some(info) = types.get_mut(&type_id) else {
            orphaned += 1;
            continue;
        };

        let dogma = decode_type_dogma(attributes_json.as_deref(), effects_json.as_deref());
        if !dogma.issues.is_empty() {
            malformed += 1;
            warn!(type_id, issues = dogma.issues.len(), "typeDogma row partially unreadable");
        }
        info.dogma = Some(dogma);
    }

    if orphaned > 0 {
        warn!(orphaned, "ignored typeDogma rows referencing unknown types");
    }
    if malformed > 0 {
        debug!(malformed, "typeDogma rows with decode issues");
    }
    Ok(())
}

fn decode_type_dogma(attributes_json: Option<&str>, effects_json: Option<&str>) -> TypeDogma {
    let mut dogma = TypeDogma::default();

    if let Some(raw) = attributes_json {
        match serde_json::from_str::<Vec<AttributeValue>>(raw) {
            Ok(values) => {
                dogma.attributes = values
                    .into_iter()
                    .map(|value| (value.attribute_id, value))
                    .collect();
            }
            Err(err) => dogma.issues.push(EffectIssue {
                effect_id: None,
                modified_attribute_id: None,
                reason: format!("unreadable dogmaAttributes: {err}"),
            }),
        }
    }

    if let Some(raw) = effects_json {
        match serde_json::from_str::<Vec<RawTypeEffect>>(raw) {
            Ok(effects) => {
                dogma.effect_ids = effects.into_iter().map(|effect| effect.effect_id).collect();
            }
            Err(err) => dogma.issues.push(EffectIssue {
                effect_id: None,
                modified_attribute_id: None,
                reason: format!("unreadable dogmaEffects: {err}"),
            }),
        }
    }

    dogma
}

fn load_effects(connection: &Connection) -> Result<HashMap<EffectId, Effect>> {
    let mut stmt = connection.prepare("SELECT _key, name, modifierInfo FROM dogmaEffects")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, EffectId>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<String>>(2)?,
        ))
    })?;

    let mut effects = HashMap::new();
    let mut malformed = 0usize;
    for row in rows {
        let (effect_id, name, modifier_json) = row?;
        let effect = decode_effect(
            effect_id,
            name.map(|raw| localized_name(&raw)).unwrap_or_default(),
            modifier_json.as_deref(),
        );
        if !effect.issues.is_empty() {
            malformed += 1;
            for issue in &effect.issues {
                warn!(effect_id, reason = %issue.reason, "malformed effect modifier");
            }
        }
        effects.insert(effect_id, effect);
    }

    if malformed > 0 {
        warn!(malformed, "effects with unusable modifiers");
    }
    Ok(effects)
}

fn decode_effect(effect_id: EffectId, name: String, modifier_json: Option<&str>) -> Effect {
    let mut effect = Effect {
        effect_id,
        name,
        modifiers: Vec::new(),
        issues: Vec::new(),
    };

    let Some(raw) = modifier_json else {
        return effect;
    };
    if raw.trim().is_empty() {
        return effect;
    }

    let raw_modifiers = match serde_json::from_str::<Vec<RawModifier>>(raw) {
        Ok(modifiers) => modifiers,
        Err(err) => {
            effect.issues.push(EffectIssue {
                effect_id: Some(effect_id),
                modified_attribute_id: None,
                reason: format!("unreadable modifierInfo: {err}"),
            });
            return effect;
        }
    };

    for raw_modifier in raw_modifiers {
        let modified = raw_modifier.modified_attribute_id;
        match decode_modifier(raw_modifier) {
            Ok(modifier) => effect.modifiers.push(modifier),
            Err(reason) => effect.issues.push(EffectIssue {
                effect_id: Some(effect_id),
                modified_attribute_id: modified,
                reason,
            }),
        }
    }

    effect
}

fn decode_modifier(raw: RawModifier) -> std::result::Result<ModifierInfo, String> {
    let domain_raw = raw.domain.unwrap_or_default();
    let domain = ModifierDomain::parse(&domain_raw)
        .ok_or_else(|| format!("unsupported modifier domain '{domain_raw}'"))?;
    let modified_attribute_id = raw
        .modified_attribute_id
        .ok_or_else(|| "modifier lacks modifiedAttributeID".to_string())?;
    let modifying_attribute_id = raw
        .modifying_attribute_id
        .ok_or_else(|| "modifier lacks modifyingAttributeID".to_string())?;
    let code = raw
        .operation
        .ok_or_else(|| "modifier lacks an operation code".to_string())?;
    let operation = OperationCode::from_code(code).map_err(|err| match err {
        Error::MalformedEffect { reason, .. } => reason,
        other => other.to_string(),
    })?;

    Ok(ModifierInfo {
        domain,
        target_function: raw.func.unwrap_or_default(),
        modified_attribute_id,
        modifying_attribute_id,
        operation,
    })
}

fn load_stackable_flags(connection: &Connection) -> Result<HashMap<AttributeId, bool>> {
    let mut stmt = connection.prepare("SELECT _key, stackable FROM dogmaAttributes")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, AttributeId>(0)?, row.get::<_, Option<i64>>(1)?))
    })?;

    let mut flags = HashMap::new();
    for row in rows {
        let (attribute_id, stackable) = row?;
        if let Some(flag) = stackable {
            flags.insert(attribute_id, flag != 0);
        }
    }
    Ok(flags)
}
