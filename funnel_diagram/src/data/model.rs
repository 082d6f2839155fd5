// Funnel-agnostic snapshot payloads as the analytics collaborator ships them.
// Wire names are camelCase; every counter defaults to 0 when absent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The four funnel branch categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchKind {
    Initial,
    Followup,
    Manual,
    Conditional,
}

impl BranchKind {
    pub const ALL: [BranchKind; 4] = [
        BranchKind::Initial,
        BranchKind::Followup,
        BranchKind::Manual,
        BranchKind::Conditional,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BranchKind::Initial => "Initial",
            BranchKind::Followup => "Follow-up",
            BranchKind::Manual => "Manual",
            BranchKind::Conditional => "Conditional",
        }
    }
}

/// The three outcome buckets shown under a selected branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultKind {
    Delivered,
    Pending,
    Failed,
}

impl ResultKind {
    pub const ALL: [ResultKind; 3] = [
        ResultKind::Delivered,
        ResultKind::Pending,
        ResultKind::Failed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResultKind::Delivered => "Delivered",
            ResultKind::Pending => "Pending",
            ResultKind::Failed => "Failed",
        }
    }
}

/// One branch's (or the whole funnel's) aggregate counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FunnelStats {
    pub sent: u64,
    pub delivered: u64,
    pub opened: u64,
    pub clicked: u64,
    pub pending_reschedule: u64,
    pub soft_bounce: u64,
    pub hard_bounce: u64,
    pub failed: u64,
    pub blocked: u64,
    pub spam: u64,
}

impl FunnelStats {
    /// Value of one outcome bucket. Bounce/blocked/spam counters are
    /// reported separately and never folded into the failed bucket.
    pub fn result_value(&self, kind: ResultKind) -> u64 {
        match kind {
            ResultKind::Delivered => self.delivered,
            ResultKind::Pending => self.pending_reschedule,
            ResultKind::Failed => self.failed,
        }
    }
}

/// One immutable aggregate-counts snapshot driving a render pass.
/// Replaced wholesale between ticks, never mutated in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HierarchySnapshot {
    pub totals: FunnelStats,
    pub by_type: HashMap<BranchKind, FunnelStats>,
}

impl HierarchySnapshot {
    /// Counters for one branch; absent branches behave as all-zero.
    pub fn branch(&self, kind: BranchKind) -> FunnelStats {
        self.by_type.get(&kind).copied().unwrap_or_default()
    }
}

/// Guarded percentage, rounded to one decimal. Never NaN or infinite:
/// a zero or absent base reads as 0.0.
pub fn pct(value: u64, base: u64) -> f64 {
    if base > 0 {
        (value as f64 / base as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_deserialize_to_zero() {
        let snapshot: HierarchySnapshot =
            serde_json::from_str(r#"{"totals":{"sent":100},"byType":{"Initial":{"sent":40}}}"#)
                .unwrap();

        assert_eq!(snapshot.totals.sent, 100);
        assert_eq!(snapshot.totals.delivered, 0);
        assert_eq!(snapshot.branch(BranchKind::Initial).sent, 40);
        assert_eq!(snapshot.branch(BranchKind::Initial).spam, 0);
    }

    #[test]
    fn absent_branches_behave_as_zero() {
        let snapshot = HierarchySnapshot::default();
        for kind in BranchKind::ALL {
            assert_eq!(snapshot.branch(kind), FunnelStats::default());
        }
    }

    #[test]
    fn wire_names_are_camel_case() {
        let stats: FunnelStats =
            serde_json::from_str(r#"{"pendingReschedule":3,"softBounce":2,"hardBounce":1}"#)
                .unwrap();

        assert_eq!(stats.pending_reschedule, 3);
        assert_eq!(stats.soft_bounce, 2);
        assert_eq!(stats.hard_bounce, 1);
    }

    #[test]
    fn pct_guards_zero_base() {
        assert_eq!(pct(5, 0), 0.0);
        assert_eq!(format!("{:.1}", pct(5, 0)), "0.0");
        assert!(pct(5, 0).is_finite());
    }

    #[test]
    fn pct_rounds_to_one_decimal() {
        assert_eq!(pct(35, 40), 87.5);
        assert_eq!(pct(1, 3), 33.3);
        assert_eq!(pct(2, 3), 66.7);
        assert_eq!(pct(40, 40), 100.0);
    }

    #[test]
    fn result_buckets_map_to_their_counters() {
        let stats = FunnelStats {
            delivered: 35,
            pending_reschedule: 3,
            failed: 2,
            hard_bounce: 9,
            ..Default::default()
        };

        assert_eq!(stats.result_value(ResultKind::Delivered), 35);
        assert_eq!(stats.result_value(ResultKind::Pending), 3);
        assert_eq!(stats.result_value(ResultKind::Failed), 2);
    }
}
