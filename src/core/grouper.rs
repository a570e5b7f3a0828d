use crate::domain::model::{ChannelCategory, SourceService};

/// 分組後的一筆服務，附帶分組時的位置
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedService {
    pub arrival_index: usize,
    pub service: SourceService,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub category: ChannelCategory,
    pub services: Vec<GroupedService>,
}

/// 依類別分組並排序
///
/// 類別依首次出現的順序排列；`arrival_index` 是排序前在該類別中的位置。
/// 衛星類別（BS / CS / SKY）依 service ID 穩定排序，其他類別維持上游順序。
pub fn group_services(services: Vec<SourceService>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for service in services {
        let position = match groups
            .iter()
            .position(|group| group.category == service.category)
        {
            Some(position) => position,
            None => {
                groups.push(CategoryGroup {
                    category: service.category.clone(),
                    services: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[position];
        let arrival_index = group.services.len();
        group.services.push(GroupedService {
            arrival_index,
            service,
        });
    }

    for group in &mut groups {
        sort_group(group);
    }

    groups
}

pub fn sort_group(group: &mut CategoryGroup) {
    if group.category.is_satellite() {
        // sort_by_key 為穩定排序
        group.services.sort_by_key(|entry| entry.service.service_id);
    }
}
