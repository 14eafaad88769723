//! 参数元数据关联
//!
//! 按 (作用域, 地址[, 位]) 批量解析告警引用的参数行，再批量解析单位、
//! 数据类型、状态表、设施标签分组与短语。部分未命中是正常结果：
//! 没有参数行的告警只保留自身限值。

use crate::reference::{PhraseBook, ReferenceResolver, StateTables, unique_ids};
use domain::{DEFAULT_LOCALE, RequestContext};
use std::collections::HashMap;
use std::sync::Arc;
use wellview_storage::{
    AlarmConfigurationRecord, DataTypeEntry, FacilityTagGroupEntry, ParameterRecord,
    ParameterScope, ParameterStore, StorageError, UnitTypeEntry,
};

/// 一次关联的结果索引。
#[derive(Debug, Clone)]
pub struct ParameterIndex {
    rows: HashMap<(i32, Option<i32>), ParameterRecord>,
    unit_types: HashMap<i32, UnitTypeEntry>,
    data_types: HashMap<i32, DataTypeEntry>,
    states: StateTables,
    groups: HashMap<i32, FacilityTagGroupEntry>,
    phrases: PhraseBook,
    locale: String,
}

impl Default for ParameterIndex {
    fn default() -> Self {
        Self::empty(DEFAULT_LOCALE)
    }
}

impl ParameterIndex {
    fn empty(locale: &str) -> Self {
        Self {
            rows: HashMap::new(),
            unit_types: HashMap::new(),
            data_types: HashMap::new(),
            states: StateTables::default(),
            groups: HashMap::new(),
            phrases: PhraseBook::default(),
            locale: locale.to_string(),
        }
    }

    /// 精确 (地址, 位) 优先，其次该地址的无位行。
    pub fn parameter(&self, register: i32, bit: i32) -> Option<&ParameterRecord> {
        self.rows
            .get(&(register, Some(bit)))
            .or_else(|| self.rows.get(&(register, None)))
    }

    pub fn description(&self, register: i32, bit: i32) -> Option<String> {
        let row = self.parameter(register, bit)?;
        row.phrase_id
            .and_then(|phrase_id| self.phrases.text(phrase_id, &self.locale))
            .map(str::to_string)
            .or_else(|| row.description.clone())
    }

    /// 单位缩写，没有缩写时用单位描述。
    pub fn units(&self, register: i32, bit: i32) -> Option<String> {
        let unit = self
            .unit_types
            .get(&self.parameter(register, bit)?.unit_type_id?)?;
        Some(
            unit.abbreviation
                .clone()
                .unwrap_or_else(|| unit.description.clone()),
        )
    }

    pub fn data_type(&self, register: i32, bit: i32) -> Option<String> {
        let data_type = self
            .data_types
            .get(&self.parameter(register, bit)?.data_type_id?)?;
        Some(data_type.description.clone())
    }

    /// 用参数行引用的状态表翻译状态值。
    pub fn state_text(&self, register: i32, bit: i32, value: i32) -> Option<String> {
        let states_id = self.parameter(register, bit)?.states_id?;
        let state = self.states.get(states_id, value)?;
        Some(
            self.phrases
                .localize(state.phrase_id, &self.locale, &state.text),
        )
    }

    /// 参数行引用的设施标签分组；分组 ID 存在但未命中参考数据时条目为空。
    pub fn group(&self, register: i32, bit: i32) -> Option<(i32, Option<&FacilityTagGroupEntry>)> {
        let group_id = self.parameter(register, bit)?.facility_tag_group_id?;
        Some((group_id, self.groups.get(&group_id)))
    }
}

#[derive(Clone)]
pub struct ParameterJoiner {
    parameters: Arc<dyn ParameterStore>,
    references: ReferenceResolver,
}

impl ParameterJoiner {
    pub fn new(parameters: Arc<dyn ParameterStore>, references: ReferenceResolver) -> Self {
        Self {
            parameters,
            references,
        }
    }

    pub async fn join(
        &self,
        ctx: &RequestContext,
        scope: &ParameterScope,
        alarms: &[AlarmConfigurationRecord],
    ) -> Result<ParameterIndex, StorageError> {
        let mut index = ParameterIndex::empty(&ctx.locale);
        let addresses: Vec<i32> = alarms.iter().map(|alarm| alarm.register).collect();
        let addresses = unique_ids(&addresses);
        if addresses.is_empty() {
            return Ok(index);
        }

        let rows = self
            .parameters
            .list_parameters(ctx, scope, &addresses)
            .await?;
        if rows.is_empty() {
            return Ok(index);
        }

        let unit_ids: Vec<i32> = rows.iter().filter_map(|row| row.unit_type_id).collect();
        let data_type_ids: Vec<i32> = rows.iter().filter_map(|row| row.data_type_id).collect();
        let states_ids: Vec<i32> = rows.iter().filter_map(|row| row.states_id).collect();
        let group_ids: Vec<i32> = rows
            .iter()
            .filter_map(|row| row.facility_tag_group_id)
            .collect();

        let (unit_types, data_types, states, groups) = tokio::try_join!(
            self.references.unit_types(ctx, &unit_ids),
            self.references.data_types(ctx, &data_type_ids),
            self.references.state_tables(ctx, &states_ids),
            self.references.facility_tag_groups(ctx, &group_ids),
        )?;

        let phrase_ids: Vec<i32> = rows
            .iter()
            .filter_map(|row| row.phrase_id)
            .chain(states.phrase_ids())
            .collect();
        let phrases = self.references.phrases(ctx, &phrase_ids).await?;

        for row in rows {
            index
                .rows
                .entry((row.key.address, row.key.bit))
                .or_insert(row);
        }
        index.unit_types = unit_types;
        index.data_types = data_types;
        index.states = states;
        index.groups = groups;
        index.phrases = phrases;
        Ok(index)
    }
}
