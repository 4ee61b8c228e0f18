//! Affordance bindings
//!
//! Maps user controls to controller operations. Built once at startup so the
//! state machine never depends on how controls are rendered or wired.

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::session::{Outcome, SessionController};

/// User-facing controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affordance {
    Start,
    Record,
    Next,
    End,
}

impl Affordance {
    pub const ALL: [Affordance; 4] = [
        Affordance::Start,
        Affordance::Record,
        Affordance::Next,
        Affordance::End,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Affordance::Start => "start",
            Affordance::Record => "record",
            Affordance::Next => "next",
            Affordance::End => "end",
        }
    }
}

impl fmt::Display for Affordance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Affordance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Affordance::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| format!("unknown affordance: {}", s))
    }
}

/// Controller operation bound to an affordance
pub type Binding = fn(Arc<SessionController>) -> BoxFuture<'static, Outcome>;

/// Affordance -> controller operation table
pub struct BindingTable {
    bindings: HashMap<Affordance, Binding>,
}

impl BindingTable {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// The interview page's controls
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.bind(Affordance::Start, |c| async move { c.start().await }.boxed());
        table.bind(Affordance::Record, |c| {
            async move { c.toggle_record().await }.boxed()
        });
        table.bind(Affordance::Next, |c| async move { c.advance().await }.boxed());
        table.bind(Affordance::End, |c| async move { c.end().await }.boxed());
        table
    }

    pub fn bind(&mut self, affordance: Affordance, binding: Binding) {
        self.bindings.insert(affordance, binding);
    }

    pub fn is_bound(&self, affordance: Affordance) -> bool {
        self.bindings.contains_key(&affordance)
    }

    /// Run the operation bound to `affordance`; `None` if nothing is bound
    pub async fn dispatch(
        &self,
        affordance: Affordance,
        controller: Arc<SessionController>,
    ) -> Option<Outcome> {
        let binding = self.bindings.get(&affordance)?;
        Some(binding(controller).await)
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::standard()
    }
}
