//! 视图成形：把告警配置、参数索引、通知状态与主机告警目录合成视图。

use crate::models::{AlarmView, AlarmViewDetail, FacilityTagGroupView};
use crate::notifications::NotificationIndex;
use crate::parameters::ParameterIndex;
use crate::reference::HostAlarmCatalog;
use std::collections::{BTreeMap, HashSet};
use wellview_storage::{AlarmCategory, AlarmConfigurationRecord, AlarmDetail};

pub(crate) fn shape_alarm(
    record: &AlarmConfigurationRecord,
    parameters: &ParameterIndex,
    notifications: &NotificationIndex,
    catalog: &HostAlarmCatalog,
) -> AlarmView {
    let (register, bit) = (record.register, record.bit);
    let mut description = parameters.description(register, bit);

    let detail = match &record.detail {
        AlarmDetail::Host(host) => {
            if let Some(text) = catalog.xdiag_description(host.host_alarm_type_id, register) {
                description = Some(text);
            }
            AlarmViewDetail::Host {
                lolo_limit: host.lolo_limit,
                hihi_limit: host.hihi_limit,
                alarm_state: host.alarm_state,
                host_alarm_type_id: host.host_alarm_type_id,
                host_alarm_type: catalog.type_name(host.host_alarm_type_id),
            }
        }
        AlarmDetail::Rtu(rtu) => AlarmViewDetail::Rtu {
            callout_enabled: rtu.callout_enabled,
            normal_state: rtu.normal_state,
            normal_state_text: rtu
                .normal_state
                .and_then(|value| parameters.state_text(register, bit, value)),
            locked: rtu.locked,
        },
        AlarmDetail::FacilityTag(tag) => {
            let group = parameters.group(register, bit);
            AlarmViewDetail::FacilityTag {
                node_id: tag.node_id.clone(),
                group_node_id: tag.group_node_id.clone(),
                alarm_state: tag.alarm_state,
                alarm_state_text: parameters.state_text(register, bit, tag.alarm_state),
                group_id: group.map(|(group_id, _)| group_id),
                group_name: group.and_then(|(_, entry)| entry.map(|entry| entry.name.clone())),
            }
        }
    };

    AlarmView {
        alarm_id: record.alarm_id.clone(),
        category: record.category(),
        register,
        bit,
        description,
        units: parameters.units(register, bit),
        data_type: parameters.data_type(register, bit),
        lo_limit: record.lo_limit,
        hi_limit: record.hi_limit,
        detail,
        notification: notifications.state(&record.alarm_id),
    }
}

/// Host 与 FacilityTag 两次读取的并集：按 (类别, 告警 ID) 去重，
/// 寄存器、位升序，同位置 Host 在前。
pub(crate) fn host_union(
    host: Vec<AlarmConfigurationRecord>,
    tags: Vec<AlarmConfigurationRecord>,
) -> Vec<AlarmConfigurationRecord> {
    let mut seen: HashSet<(AlarmCategory, String)> = HashSet::new();
    let mut merged: Vec<AlarmConfigurationRecord> = host
        .into_iter()
        .chain(tags)
        .filter(|record| seen.insert((record.category(), record.alarm_id.clone())))
        .collect();
    merged.sort_by_key(|record| (record.register, record.bit, record.category()));
    merged
}

/// 分组排序键：已解析分组按显示顺序、分组 ID；未解析分组其后；未分组最后。
fn group_order(group: Option<(i32, Option<i32>)>) -> (u8, i32, i32) {
    match group {
        Some((group_id, Some(display_order))) => (0, display_order, group_id),
        Some((group_id, None)) => (1, 0, group_id),
        None => (2, 0, 0),
    }
}

pub(crate) fn group_facility_tags(
    alarms: Vec<AlarmView>,
    parameters: &ParameterIndex,
) -> Vec<FacilityTagGroupView> {
    let mut groups: BTreeMap<(u8, i32, i32), FacilityTagGroupView> = BTreeMap::new();
    for alarm in alarms {
        let group = parameters.group(alarm.register, alarm.bit);
        let group_id = group.map(|(group_id, _)| group_id);
        let entry = group.and_then(|(_, entry)| entry);
        let display_order = entry.map(|entry| entry.display_order);
        let key = group_order(group_id.map(|group_id| (group_id, display_order)));

        groups
            .entry(key)
            .or_insert_with(|| FacilityTagGroupView {
                group_id,
                name: entry.map(|entry| entry.name.clone()),
                display_order,
                alarms: Vec::new(),
            })
            .alarms
            .push(alarm);
    }
    groups.into_values().collect()
}
