//! 参考数据解析
//!
//! 通用代码表按 (LookupType, 键) 查询。同一集合内不同形状的查询拆成
//! 独立命名的调用（`state_tables`、`unit_types`、`host_alarm_types` ...），
//! 每个调用只解码自己关心的变体。
//!
//! 未命中从不报错：调用方得到缺省值，回退到原始数字代码。

use domain::{DEFAULT_LOCALE, RequestContext};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use wellview_storage::{
    AlarmConfigurationRecord, AlarmDetail, CameraAlarmTypeEntry, DataTypeEntry,
    FacilityTagGroupEntry, HostAlarmTypeEntry, LookupDocument, LookupKey, LookupStore, LookupType,
    PhraseEntry, StateEntry, StorageError, UnitTypeEntry, XDiagOutputEntry,
};

/// 去重并排序，保证批量查询参数稳定。
pub(crate) fn unique_ids(ids: &[i32]) -> Vec<i32> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

/// 多语言短语表。
#[derive(Debug, Clone, Default)]
pub struct PhraseBook {
    phrases: HashMap<i32, PhraseEntry>,
}

impl PhraseBook {
    /// 按 请求语言 → `en` 的顺序取译文。
    pub fn text(&self, phrase_id: i32, locale: &str) -> Option<&str> {
        let entry = self.phrases.get(&phrase_id)?;
        entry
            .translations
            .get(locale)
            .or_else(|| entry.translations.get(DEFAULT_LOCALE))
            .map(String::as_str)
    }

    /// 取译文，没有译文时使用未翻译的名称。
    pub fn localize(&self, phrase_id: Option<i32>, locale: &str, fallback: &str) -> String {
        phrase_id
            .and_then(|phrase_id| self.text(phrase_id, locale))
            .unwrap_or(fallback)
            .to_string()
    }
}

/// 状态表（`StatesId + Value` 复合键）。
#[derive(Debug, Clone, Default)]
pub struct StateTables {
    entries: HashMap<(i32, i32), StateEntry>,
}

impl StateTables {
    pub fn get(&self, states_id: i32, value: i32) -> Option<&StateEntry> {
        self.entries.get(&(states_id, value))
    }

    pub fn phrase_ids(&self) -> Vec<i32> {
        self.entries
            .values()
            .filter_map(|entry| entry.phrase_id)
            .collect()
    }
}

/// 主机告警类型目录（含 XDiag 输出与短语）。
#[derive(Debug, Clone)]
pub struct HostAlarmCatalog {
    types: HashMap<i32, HostAlarmTypeEntry>,
    xdiag_outputs: HashMap<i32, XDiagOutputEntry>,
    phrases: PhraseBook,
    locale: String,
}

impl Default for HostAlarmCatalog {
    fn default() -> Self {
        Self {
            types: HashMap::new(),
            xdiag_outputs: HashMap::new(),
            phrases: PhraseBook::default(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl HostAlarmCatalog {
    /// 本地化的告警类型名称。
    pub fn type_name(&self, host_alarm_type_id: i32) -> Option<String> {
        let entry = self.types.get(&host_alarm_type_id)?;
        Some(
            self.phrases
                .localize(entry.phrase_id, &self.locale, &entry.name),
        )
    }

    /// XDiag 类型的告警描述来自以寄存器为键的 XDiag 输出。
    pub fn xdiag_description(&self, host_alarm_type_id: i32, register: i32) -> Option<String> {
        let entry = self.types.get(&host_alarm_type_id)?;
        if !entry.is_xdiag {
            return None;
        }
        let output = self.xdiag_outputs.get(&register)?;
        Some(
            self.phrases
                .localize(output.phrase_id, &self.locale, &output.name),
        )
    }
}

/// 参考数据解析器。
#[derive(Clone)]
pub struct ReferenceResolver {
    lookups: Arc<dyn LookupStore>,
}

impl ReferenceResolver {
    pub fn new(lookups: Arc<dyn LookupStore>) -> Self {
        Self { lookups }
    }

    /// 通用单键查询。
    pub async fn lookup(
        &self,
        ctx: &RequestContext,
        key: &LookupKey,
    ) -> Result<Option<LookupDocument>, StorageError> {
        let record = self.lookups.find_lookup(ctx, key).await?;
        Ok(record.map(|record| record.document))
    }

    /// 单个状态值的显示文本（复合键匹配后再经短语本地化）。
    pub async fn state_text(
        &self,
        ctx: &RequestContext,
        states_id: i32,
        value: i32,
    ) -> Result<Option<String>, StorageError> {
        let key = LookupKey::State { states_id, value };
        let Some(LookupDocument::State(state)) = self.lookup(ctx, &key).await? else {
            return Ok(None);
        };
        let phrases = match state.phrase_id {
            Some(phrase_id) => self.phrases(ctx, &[phrase_id]).await?,
            None => PhraseBook::default(),
        };
        Ok(Some(phrases.localize(
            state.phrase_id,
            &ctx.locale,
            &state.text,
        )))
    }

    /// 批量查询同一类型，按主键建索引；同一主键多条时保留第一条。
    async fn batch<T>(
        &self,
        ctx: &RequestContext,
        lookup_type: LookupType,
        ids: &[i32],
        pick: fn(LookupDocument) -> Option<T>,
    ) -> Result<HashMap<i32, T>, StorageError> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let records = self.lookups.list_lookups(ctx, lookup_type, &ids).await?;
        let mut entries = HashMap::new();
        for record in records {
            let id = record.key.primary_id();
            if let Some(entry) = pick(record.document) {
                entries.entry(id).or_insert(entry);
            }
        }
        Ok(entries)
    }

    pub async fn state_tables(
        &self,
        ctx: &RequestContext,
        states_ids: &[i32],
    ) -> Result<StateTables, StorageError> {
        let ids = unique_ids(states_ids);
        if ids.is_empty() {
            return Ok(StateTables::default());
        }
        let records = self
            .lookups
            .list_lookups(ctx, LookupType::States, &ids)
            .await?;
        let mut entries = HashMap::new();
        for record in records {
            if let (LookupKey::State { states_id, value }, LookupDocument::State(entry)) =
                (record.key, record.document)
            {
                entries.entry((states_id, value)).or_insert(entry);
            }
        }
        Ok(StateTables { entries })
    }

    pub async fn phrases(
        &self,
        ctx: &RequestContext,
        phrase_ids: &[i32],
    ) -> Result<PhraseBook, StorageError> {
        let phrases = self
            .batch(ctx, LookupType::LocalePhrases, phrase_ids, |document| {
                match document {
                    LookupDocument::Phrase(entry) => Some(entry),
                    _ => None,
                }
            })
            .await?;
        Ok(PhraseBook { phrases })
    }

    pub async fn unit_types(
        &self,
        ctx: &RequestContext,
        ids: &[i32],
    ) -> Result<HashMap<i32, UnitTypeEntry>, StorageError> {
        self.batch(ctx, LookupType::UnitTypes, ids, |document| match document {
            LookupDocument::UnitType(entry) => Some(entry),
            _ => None,
        })
        .await
    }

    pub async fn data_types(
        &self,
        ctx: &RequestContext,
        ids: &[i32],
    ) -> Result<HashMap<i32, DataTypeEntry>, StorageError> {
        self.batch(ctx, LookupType::DataTypes, ids, |document| match document {
            LookupDocument::DataType(entry) => Some(entry),
            _ => None,
        })
        .await
    }

    pub async fn host_alarm_types(
        &self,
        ctx: &RequestContext,
        ids: &[i32],
    ) -> Result<HashMap<i32, HostAlarmTypeEntry>, StorageError> {
        self.batch(ctx, LookupType::HostAlarmTypes, ids, |document| {
            match document {
                LookupDocument::HostAlarmType(entry) => Some(entry),
                _ => None,
            }
        })
        .await
    }

    pub async fn xdiag_outputs(
        &self,
        ctx: &RequestContext,
        ids: &[i32],
    ) -> Result<HashMap<i32, XDiagOutputEntry>, StorageError> {
        self.batch(ctx, LookupType::XDiagOutputs, ids, |document| match document {
            LookupDocument::XDiagOutput(entry) => Some(entry),
            _ => None,
        })
        .await
    }

    pub async fn camera_alarm_types(
        &self,
        ctx: &RequestContext,
        ids: &[i32],
    ) -> Result<HashMap<i32, CameraAlarmTypeEntry>, StorageError> {
        self.batch(ctx, LookupType::CameraAlarmTypes, ids, |document| {
            match document {
                LookupDocument::CameraAlarmType(entry) => Some(entry),
                _ => None,
            }
        })
        .await
    }

    pub async fn facility_tag_groups(
        &self,
        ctx: &RequestContext,
        ids: &[i32],
    ) -> Result<HashMap<i32, FacilityTagGroupEntry>, StorageError> {
        self.batch(ctx, LookupType::FacilityTagGroups, ids, |document| {
            match document {
                LookupDocument::FacilityTagGroup(entry) => Some(entry),
                _ => None,
            }
        })
        .await
    }

    /// 为一组主机告警解析类型、XDiag 输出与短语。
    pub async fn host_alarm_catalog(
        &self,
        ctx: &RequestContext,
        alarms: &[AlarmConfigurationRecord],
    ) -> Result<HostAlarmCatalog, StorageError> {
        let type_ids: Vec<i32> = alarms
            .iter()
            .filter_map(|alarm| match &alarm.detail {
                AlarmDetail::Host(host) => Some(host.host_alarm_type_id),
                _ => None,
            })
            .collect();
        if type_ids.is_empty() {
            return Ok(HostAlarmCatalog {
                locale: ctx.locale.clone(),
                ..HostAlarmCatalog::default()
            });
        }

        let types = self.host_alarm_types(ctx, &type_ids).await?;
        let xdiag_registers: Vec<i32> = alarms
            .iter()
            .filter(|alarm| match &alarm.detail {
                AlarmDetail::Host(host) => types
                    .get(&host.host_alarm_type_id)
                    .is_some_and(|entry| entry.is_xdiag),
                _ => false,
            })
            .map(|alarm| alarm.register)
            .collect();
        let xdiag_outputs = self.xdiag_outputs(ctx, &xdiag_registers).await?;

        let phrase_ids: Vec<i32> = types
            .values()
            .filter_map(|entry| entry.phrase_id)
            .chain(xdiag_outputs.values().filter_map(|entry| entry.phrase_id))
            .collect();
        let phrases = self.phrases(ctx, &phrase_ids).await?;

        Ok(HostAlarmCatalog {
            types,
            xdiag_outputs,
            phrases,
            locale: ctx.locale.clone(),
        })
    }
}
