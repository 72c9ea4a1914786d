//! Agent orchestrators.
//!
//! Each agent is a fixed pipeline with no state of its own beyond the injected
//! backend: build prompt → generate → normalize. Calls are independent.

mod marketing;
mod insight;

use async_trait::async_trait;

use crate::error::Result;
use crate::prompt::AgentKind;

pub use insight::LearningInsightAgent;
pub use marketing::MarketingStrategyAgent;

/// A pipeline mapping one typed input to one typed output.
#[async_trait]
pub trait Agent: Send + Sync {
    type Input: Send + Sync + ?Sized;
    type Output;

    fn kind(&self) -> AgentKind;

    async fn run(&self, input: &Self::Input) -> Result<Self::Output>;
}
