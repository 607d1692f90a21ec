//! Action/date buckets over pedidos.
//!
//! Staff annotate pedidos with an action ("PAGO", "ENTREGUE", ...) on a day.
//! The store keeps every pedido under at most one `(action, date)` key:
//! re-annotating a pedido moves it, the most recent annotation wins.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::format::SEGMENT_SEPARATOR;
use crate::errors::TrackerError;
use crate::pedidos::render_pedidos;
use crate::types::PedidoId;

/// Annotation actions, declared in workflow order (which is also render order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderAction {
    /// Payment scheduled.
    #[serde(rename = "PROG. PGTO")]
    ProgPgto,
    /// Paid.
    #[serde(rename = "PAGO")]
    Pago,
    /// Delivery forecast.
    #[serde(rename = "PREV. ENTREGA")]
    PrevEntrega,
    /// Delivered.
    #[serde(rename = "ENTREGUE")]
    Entregue,
}

impl OrderAction {
    /// Every action, in workflow order.
    pub const ALL: [OrderAction; 4] = [
        OrderAction::ProgPgto,
        OrderAction::Pago,
        OrderAction::PrevEntrega,
        OrderAction::Entregue,
    ];

    /// Label used in rendered output.
    pub const fn label(self) -> &'static str {
        match self {
            OrderAction::ProgPgto => "PROG. PGTO",
            OrderAction::Pago => "PAGO",
            OrderAction::PrevEntrega => "PREV. ENTREGA",
            OrderAction::Entregue => "ENTREGUE",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderAction {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|action| action.label() == wanted)
            .ok_or_else(|| TrackerError::UnknownAction(value.to_string()))
    }
}

/// Bucket key: an action on a day of the month.
///
/// Only day and month take part, so the same `DD/MM` in different years is
/// one bucket. Keys order by action, then by the `DD/MM` text (day first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketKey {
    /// Annotated action.
    pub action: OrderAction,
    /// Day of the month, 1-based.
    pub day: u32,
    /// Month, 1-based.
    pub month: u32,
}

impl BucketKey {
    /// Build a key from a calendar date; the year is dropped.
    pub fn new(action: OrderAction, date: NaiveDate) -> Self {
        Self {
            action,
            day: date.day(),
            month: date.month(),
        }
    }

    /// Rendered key, `<ACTION> <DD/MM>`.
    pub fn label(&self) -> String {
        format!("{} {:02}/{:02}", self.action, self.day, self.month)
    }
}

/// What an [`OrderBucketStore::upsert`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Pedidos that were not already in the target bucket.
    pub added: Vec<PedidoId>,
    /// Pedidos moved out of another bucket, with the key they left.
    pub moved: Vec<(PedidoId, BucketKey)>,
}

impl UpsertOutcome {
    /// True when the store was left untouched.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.moved.is_empty()
    }
}

/// Reconciling store of `(action, date)` buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderBucketStore {
    buckets: BTreeMap<BucketKey, BTreeSet<PedidoId>>,
}

impl OrderBucketStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// File `pedidos` under `key`, evicting them from any other bucket.
    ///
    /// Identifiers are trimmed and blanks ignored. An empty input is a no-op
    /// and never creates `key`.
    pub fn upsert<I, S>(&mut self, key: BucketKey, pedidos: I) -> UpsertOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let incoming: BTreeSet<PedidoId> = pedidos
            .into_iter()
            .map(|pedido| pedido.as_ref().trim().to_string())
            .filter(|pedido| !pedido.is_empty())
            .collect();
        if incoming.is_empty() {
            return UpsertOutcome::default();
        }

        let mut outcome = UpsertOutcome::default();
        for (other_key, bucket) in self.buckets.iter_mut() {
            if *other_key == key {
                continue;
            }
            bucket.retain(|pedido| {
                let keep = !incoming.contains(pedido);
                if !keep {
                    outcome.moved.push((pedido.clone(), *other_key));
                }
                keep
            });
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());

        let target = self.buckets.entry(key).or_default();
        for pedido in incoming {
            if target.insert(pedido.clone()) {
                outcome.added.push(pedido);
            }
        }
        debug!(
            key = %key.label(),
            added = outcome.added.len(),
            moved = outcome.moved.len(),
            "bucket upsert"
        );
        outcome
    }

    /// One `"<ids> - <ACTION> <DD/MM>"` segment per bucket, joined by `" | "`.
    ///
    /// Buckets are ordered by action (workflow order) and then by the `DD/MM`
    /// text, so `02/06` renders before `10/05`.
    pub fn render(&self) -> String {
        self.buckets
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(key, bucket)| {
                let pedidos: Vec<&PedidoId> = bucket.iter().collect();
                format!("{} - {}", render_pedidos(&pedidos), key.label())
            })
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR)
    }

    /// Drop every bucket.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Key currently holding `pedido`, if any.
    pub fn bucket_of(&self, pedido: &str) -> Option<BucketKey> {
        let pedido = pedido.trim();
        self.buckets
            .iter()
            .find(|(_, bucket)| bucket.contains(pedido))
            .map(|(key, _)| *key)
    }

    /// Pedidos under `key`, sorted.
    pub fn get(&self, key: &BucketKey) -> Option<&BTreeSet<PedidoId>> {
        self.buckets.get(key)
    }

    /// Keys in render order.
    pub fn keys(&self) -> impl Iterator<Item = &BucketKey> {
        self.buckets.keys()
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no bucket exists.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
