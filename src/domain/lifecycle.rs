//! Lifecycle vocabulary shared by the services

use serde::Serialize;
use std::fmt;

/// Entities that can be registered and deleted by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Client,
    Auto,
    Order,
    Sale,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Client => "client",
            EntityKind::Auto => "auto",
            EntityKind::Order => "order",
            EntityKind::Sale => "sale",
        };
        f.write_str(name)
    }
}

/// State of an order. `Completed` iff a sale exists for it; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Open,
    Completed,
}

impl OrderState {
    pub fn from_sale_exists(sale_exists: bool) -> Self {
        if sale_exists {
            OrderState::Completed
        } else {
            OrderState::Open
        }
    }

    pub fn is_open(self) -> bool {
        self == OrderState::Open
    }
}

/// Outcome of a referential guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteDecision {
    Allowed,
    Denied { blocking_order_ids: Vec<i32> },
}

impl DeleteDecision {
    /// Builds a decision from the referencing order ids (any order, duplicates allowed)
    pub fn from_references(ids: impl IntoIterator<Item = i32>) -> Self {
        let mut blocking_order_ids: Vec<i32> = ids.into_iter().collect();
        blocking_order_ids.sort_unstable();
        blocking_order_ids.dedup();

        if blocking_order_ids.is_empty() {
            DeleteDecision::Allowed
        } else {
            DeleteDecision::Denied { blocking_order_ids }
        }
    }
}
