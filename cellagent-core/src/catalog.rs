//! The agent catalog: display names, keyword groups, status templates and
//! canned results.
//!
//! The catalog is an immutable value handed to the selector and the
//! simulation driver. [`AgentCatalog::default`] carries the built-in Chinese
//! catalog; alternative catalogs can be loaded from TOML or JSON files.
//!
//! ```toml
//! [[agents]]
//! kind = "scheduler"
//! name = "Scheduler"
//! result = "## Plan ready"
//!
//! [[keyword_groups]]
//! agent = "filter"
//! keywords = ["filter", "qc"]
//!
//! [status]
//! started = "{agent} started"
//! processing = "{agent} at {progress}%"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{AgentDescriptor, AgentKind};
use crate::{CellAgentError, Result};

/// Name and canned output of one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Agent kind
    pub kind: AgentKind,
    /// Localized display name
    pub name: String,
    /// Canned result text emitted when the agent completes
    pub result: String,
}

/// Keywords that pull an optional agent into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    /// Agent contributed when any keyword matches
    pub agent: AgentKind,
    /// Keywords, matched case-insensitively as substrings
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    /// Create a keyword group.
    pub fn new<I, S>(agent: AgentKind, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            agent,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `lowered` (an already lowercased request) mentions this group.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && lowered.contains(&k.to_lowercase()))
    }
}

/// Templates for the two narrated status messages. `{agent}` and
/// `{progress}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTemplates {
    /// Emitted at the first checkpoint
    pub started: String,
    /// Emitted at the second checkpoint
    pub processing: String,
}

impl StatusTemplates {
    /// Render the first-checkpoint message.
    pub fn render_started(&self, agent_name: &str, progress: u8) -> String {
        render(&self.started, agent_name, progress)
    }

    /// Render the second-checkpoint message.
    pub fn render_processing(&self, agent_name: &str, progress: u8) -> String {
        render(&self.processing, agent_name, progress)
    }
}

impl Default for StatusTemplates {
    fn default() -> Self {
        Self {
            started: "{agent}开始分析数据...".to_string(),
            processing: "{agent}正在处理核心逻辑... ({progress}%)".to_string(),
        }
    }
}

fn render(template: &str, agent_name: &str, progress: u8) -> String {
    template
        .replace("{agent}", agent_name)
        .replace("{progress}", &progress.to_string())
}

/// Immutable lookup tables for the simulated pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCatalog {
    /// Per-agent names and results
    pub agents: Vec<AgentProfile>,
    /// Optional agents in priority order
    pub keyword_groups: Vec<KeywordGroup>,
    /// Narrated status templates
    #[serde(default)]
    pub status: StatusTemplates,
}

impl AgentCatalog {
    /// Look up an agent's profile.
    pub fn profile(&self, kind: AgentKind) -> Result<&AgentProfile> {
        self.agents
            .iter()
            .find(|p| p.kind == kind)
            .ok_or_else(|| CellAgentError::catalog(format!("no profile for agent '{kind}'")))
    }

    /// Resolve the wire descriptor of an agent.
    pub fn descriptor(&self, kind: AgentKind) -> Result<AgentDescriptor> {
        self.profile(kind)
            .map(|p| AgentDescriptor::new(kind, p.name.clone()))
    }

    /// The canned result text of an agent.
    pub fn result_text(&self, kind: AgentKind) -> Result<&str> {
        self.profile(kind).map(|p| p.result.as_str())
    }

    /// Check structural consistency.
    ///
    /// Scheduler and summary must have profiles since every pipeline runs
    /// them. Keyword groups may only target optional agents, once each.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for profile in &self.agents {
            if !seen.insert(profile.kind) {
                return Err(CellAgentError::validation(
                    "agents",
                    format!("duplicate profile for '{}'", profile.kind),
                ));
            }
        }
        for kind in [AgentKind::Scheduler, AgentKind::Summary] {
            self.profile(kind)?;
        }

        let mut grouped = HashSet::new();
        for group in &self.keyword_groups {
            if group.agent.is_fixed() {
                return Err(CellAgentError::validation(
                    "keyword_groups",
                    format!("'{}' is always selected and cannot have keywords", group.agent),
                ));
            }
            if !grouped.insert(group.agent) {
                return Err(CellAgentError::validation(
                    "keyword_groups",
                    format!("more than one group for '{}'", group.agent),
                ));
            }
            if group.keywords.iter().all(String::is_empty) {
                return Err(CellAgentError::validation(
                    "keyword_groups",
                    format!("group for '{}' has no keywords", group.agent),
                ));
            }
        }
        Ok(())
    }

    /// Parse a catalog from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file; `.json` files are read as JSON, anything else as TOML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading agent catalog from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_toml_str(&source),
        }
    }
}

impl Default for AgentCatalog {
    fn default() -> Self {
        Self {
            agents: vec![
                AgentProfile {
                    kind: AgentKind::Scheduler,
                    name: "调度Agent".to_string(),
                    result: SCHEDULER_RESULT.to_string(),
                },
                AgentProfile {
                    kind: AgentKind::Knowledge,
                    name: "知识提取Agent".to_string(),
                    result: KNOWLEDGE_RESULT.to_string(),
                },
                AgentProfile {
                    kind: AgentKind::Scrna,
                    name: "scRNA数据处理Agent".to_string(),
                    result: SCRNA_RESULT.to_string(),
                },
                AgentProfile {
                    kind: AgentKind::Filter,
                    name: "数据过滤Agent".to_string(),
                    result: FILTER_RESULT.to_string(),
                },
                AgentProfile {
                    kind: AgentKind::Summary,
                    name: "总结Agent".to_string(),
                    result: SUMMARY_RESULT.to_string(),
                },
            ],
            keyword_groups: vec![
                KeywordGroup::new(AgentKind::Scrna, ["scrna", "单细胞", "rna测序"]),
                KeywordGroup::new(AgentKind::Knowledge, ["知识", "文献", "提取"]),
                KeywordGroup::new(AgentKind::Filter, ["过滤", "筛选", "质控"]),
            ],
            status: StatusTemplates::default(),
        }
    }
}

const SCHEDULER_RESULT: &str = r"## 任务调度完成

我已经分析了您的请求，并制定了以下处理计划：

1. **数据预处理** - 检查数据格式和完整性
2. **质量控制** - 应用标准QC流程
3. **分析处理** - 执行核心分析算法
4. **结果整理** - 生成可视化报告

正在启动后续Agent执行具体任务...";

const KNOWLEDGE_RESULT: &str = r"## 知识提取结果

从相关文献和数据库中提取到以下关键信息：

### 相关研究
- **Cell Types**: 识别出15种主要细胞类型
- **Marker Genes**: 发现32个关键标记基因
- **Pathways**: 涉及3条重要信号通路

### 参考文献
1. Nature Methods (2023) - Single-cell RNA sequencing best practices
2. Cell (2022) - Advanced clustering algorithms for scRNA-seq
3. Genome Biology (2023) - Quality control in single-cell analysis

数据已整理完成，可用于后续分析。";

const SCRNA_RESULT: &str = r"## scRNA数据处理完成

### 数据概览
- **细胞数量**: 8,547个细胞
- **基因数量**: 23,156个基因
- **质控后细胞**: 7,892个细胞 (92.3%)

### 处理步骤
1. ✅ 数据加载和格式验证
2. ✅ 质量控制指标计算
3. ✅ 细胞和基因过滤
4. ✅ 标准化和缩放
5. ✅ 主成分分析 (PCA)
6. ✅ 聚类分析

### 主要发现
- 识别出**12个细胞群**
- 发现**156个差异表达基因**
- 细胞类型注释准确率: **94.2%**";

const FILTER_RESULT: &str = r"## 数据过滤结果

### 过滤统计
- **原始细胞数**: 8,547
- **过滤后细胞数**: 7,892 (保留92.3%)
- **原始基因数**: 23,156  
- **过滤后基因数**: 18,234 (保留78.7%)

### 过滤标准
- **细胞过滤**: 
  - 基因数 > 200 且 < 6000
  - 线粒体基因比例 < 20%
  - 核糖体基因比例 < 50%

- **基因过滤**:
  - 至少在3个细胞中表达
  - 平均表达量 > 0.01

### 质量提升
- 降噪效果: **85.3%**
- 信号纯度: **91.7%**";

const SUMMARY_RESULT: &str = r"## 分析总结报告

### 🎯 核心发现
本次scRNA-seq分析成功处理了8,547个细胞的转录组数据，经过严格的质量控制和数据过滤，最终获得了7,892个高质量细胞的分析结果。

### 📊 关键指标
- **细胞群数量**: 12个不同的细胞群
- **标记基因**: 156个显著差异表达基因
- **细胞类型**: 成功注释15种主要细胞类型
- **数据质量**: 整体质量评分92.3%

### 🔬 生物学意义
1. **细胞异质性**: 发现了预期的细胞类型多样性
2. **功能通路**: 识别出3条关键的信号传导通路
3. **疾病关联**: 部分基因与已知疾病标记物高度相关

### 📈 建议后续分析
- 轨迹分析 (Trajectory Analysis)
- 细胞通讯分析 (Cell Communication)
- 功能富集分析 (GO/KEGG Enrichment)

分析完成！数据已准备就绪，可进行进一步的深入研究。";

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_catalog_is_complete_and_valid() {
        let catalog = AgentCatalog::default();
        catalog.validate().unwrap();
        for kind in AgentKind::iter() {
            assert!(!catalog.result_text(kind).unwrap().is_empty());
        }
        assert_eq!(
            catalog.descriptor(AgentKind::Scrna).unwrap().name,
            "scRNA数据处理Agent"
        );
    }

    #[test]
    fn test_filter_result_keeps_markdown_hard_breaks() {
        let text = AgentCatalog::default()
            .result_text(AgentKind::Filter)
            .unwrap()
            .to_string();
        assert!(text.contains("- **原始基因数**: 23,156  \n"));
        assert!(text.contains("- **细胞过滤**: \n"));
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        let group = KeywordGroup::new(AgentKind::Scrna, ["scRNA"]);
        assert!(group.matches("analyse my scrna data"));
        assert!(!group.matches("analyse my bulk data"));
    }

    #[test]
    fn test_status_rendering() {
        let status = StatusTemplates::default();
        assert_eq!(status.render_started("总结Agent", 30), "总结Agent开始分析数据...");
        assert_eq!(
            status.render_processing("总结Agent", 65),
            "总结Agent正在处理核心逻辑... (65%)"
        );
    }

    #[test]
    fn test_missing_profile_is_a_catalog_error() {
        let mut catalog = AgentCatalog::default();
        catalog.agents.retain(|p| p.kind != AgentKind::Filter);
        catalog.validate().unwrap();
        assert!(matches!(
            catalog.result_text(AgentKind::Filter),
            Err(CellAgentError::Catalog { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_keywords_for_fixed_agents() {
        let mut catalog = AgentCatalog::default();
        catalog
            .keyword_groups
            .push(KeywordGroup::new(AgentKind::Summary, ["summary"]));
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_profiles() {
        let mut catalog = AgentCatalog::default();
        let first = catalog.agents[0].clone();
        catalog.agents.push(first);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_toml_catalog() {
        let catalog = AgentCatalog::from_toml_str(
            r#"
            [[agents]]
            kind = "scheduler"
            name = "Scheduler"
            result = "plan ready"

            [[agents]]
            kind = "summary"
            name = "Summary"
            result = "all done"

            [[keyword_groups]]
            agent = "filter"
            keywords = ["filter", "qc"]
            "#,
        )
        .unwrap();

        assert_eq!(catalog.result_text(AgentKind::Summary).unwrap(), "all done");
        assert_eq!(catalog.status, StatusTemplates::default());
        assert!(catalog.keyword_groups[0].matches("please run qc"));
    }

    #[test]
    fn test_catalog_file_round_trip_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = AgentCatalog::default();
        std::fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();

        assert_eq!(AgentCatalog::from_path(&path).unwrap(), catalog);
    }
}
