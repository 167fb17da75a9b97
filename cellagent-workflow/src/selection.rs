//! Request-to-pipeline mapping.

use cellagent_core::{AgentCatalog, AgentKind};

/// Choose the agents that run for `message`, in execution order.
///
/// The scheduler always runs first and the summary always runs last. In
/// between, each keyword group of the catalog contributes its agent at most
/// once, in the catalog's priority order, regardless of where in the
/// request the keyword appears.
pub fn select_agents(catalog: &AgentCatalog, message: &str) -> Vec<AgentKind> {
    let lowered = message.to_lowercase();

    let mut agents = vec![AgentKind::Scheduler];
    for group in &catalog.keyword_groups {
        if group.matches(&lowered) && !agents.contains(&group.agent) {
            agents.push(group.agent);
        }
    }
    agents.push(AgentKind::Summary);
    agents
}
