// ==========================================
// 库存可视化看板 - 查询缓存
// ==========================================
// 按查询参数缓存结果；任一变更成功后整体失效
// 加载失败不入缓存
// ==========================================

use std::collections::HashMap;

use crate::api::{ApiResult, KpiRecord, ProductRecord, WarehouseRecord};
use crate::app::filters::ProductFilter;

/// 缓存键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Warehouses,
    Kpis {
        range: String,
    },
    Products {
        search: Option<String>,
        warehouse: Option<String>,
        status: Option<String>,
    },
}

impl From<&ProductFilter> for QueryKey {
    fn from(filter: &ProductFilter) -> Self {
        QueryKey::Products {
            search: filter.search.clone(),
            warehouse: filter.warehouse.clone(),
            status: filter.status.clone(),
        }
    }
}

#[derive(Debug, Clone)]
enum CachedValue {
    Warehouses(Vec<WarehouseRecord>),
    Kpis(Vec<KpiRecord>),
    Products(Vec<ProductRecord>),
}

/// 查询缓存
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CachedValue>,
    hits: u64,
    misses: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// 清空全部缓存（变更成功后调用）
    pub fn invalidate_all(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!(entries = self.entries.len(), "查询缓存失效");
        }
        self.entries.clear();
    }

    pub fn warehouses<F>(&mut self, load: F) -> ApiResult<Vec<WarehouseRecord>>
    where
        F: FnOnce() -> ApiResult<Vec<WarehouseRecord>>,
    {
        let key = QueryKey::Warehouses;
        if let Some(CachedValue::Warehouses(rows)) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(rows.clone());
        }
        self.misses += 1;
        let rows = load()?;
        self.entries.insert(key, CachedValue::Warehouses(rows.clone()));
        Ok(rows)
    }

    pub fn kpis<F>(&mut self, range: &str, load: F) -> ApiResult<Vec<KpiRecord>>
    where
        F: FnOnce() -> ApiResult<Vec<KpiRecord>>,
    {
        let key = QueryKey::Kpis {
            range: range.to_string(),
        };
        if let Some(CachedValue::Kpis(rows)) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(rows.clone());
        }
        self.misses += 1;
        let rows = load()?;
        self.entries.insert(key, CachedValue::Kpis(rows.clone()));
        Ok(rows)
    }

    pub fn products<F>(&mut self, filter: &ProductFilter, load: F) -> ApiResult<Vec<ProductRecord>>
    where
        F: FnOnce() -> ApiResult<Vec<ProductRecord>>,
    {
        let key = QueryKey::from(filter);
        if let Some(CachedValue::Products(rows)) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(rows.clone());
        }
        self.misses += 1;
        let rows = load()?;
        self.entries.insert(key, CachedValue::Products(rows.clone()));
        Ok(rows)
    }
}
