//! Property-based invariant tests for binding tables.
//!
//! These tests verify the structural invariants of `Profile<Shortcut, A>` and
//! `Branch<A>`:
//!
//! 1. A table agrees with a plain map model after any operation sequence
//! 2. Rebinding a key keeps only the last action
//! 3. Unbinding an absent key changes nothing; unbinding twice is idempotent
//! 4. Operations on one key never affect another key
//! 5. Trigger kinds in a branch never see each other's bindings

use std::collections::HashMap;

use grip_core::{Branch, Modifiers, Profile, Shortcut, Trigger};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn shortcut_strategy() -> impl Strategy<Value = Shortcut> {
    (0u8..32, 0u32..16).prop_map(|(bits, id)| {
        Shortcut::with_modifiers(Modifiers::from_bits_truncate(bits), id)
    })
}

#[derive(Debug, Clone)]
enum Op {
    Bind(Shortcut, u16),
    Unbind(Shortcut),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (shortcut_strategy(), any::<u16>()).prop_map(|(s, a)| Op::Bind(s, a)),
        3 => shortcut_strategy().prop_map(Op::Unbind),
        1 => Just(Op::Clear),
    ]
}

fn trigger_strategy() -> impl Strategy<Value = Trigger> {
    prop_oneof![
        shortcut_strategy().prop_map(Trigger::Key),
        shortcut_strategy().prop_map(Trigger::Wheel),
        shortcut_strategy().prop_map(Trigger::Motion),
        (shortcut_strategy(), 1u8..4).prop_map(|(s, n)| Trigger::Click(s.clicks(n))),
    ]
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Model agreement
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn profile_matches_map_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut profile = Profile::new();
        let mut model: HashMap<Shortcut, u16> = HashMap::new();

        for op in &ops {
            match op {
                Op::Bind(s, a) => {
                    prop_assert_eq!(profile.bind(*s, *a), model.insert(*s, *a));
                }
                Op::Unbind(s) => {
                    prop_assert_eq!(profile.unbind(s), model.remove(s));
                }
                Op::Clear => {
                    profile.clear();
                    model.clear();
                }
            }
        }

        prop_assert_eq!(profile.len(), model.len());
        for (s, a) in &model {
            prop_assert_eq!(profile.lookup(s), Some(a));
            prop_assert!(profile.is_bound(a));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Last write wins
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn last_bind_wins(s in shortcut_strategy(), actions in prop::collection::vec(any::<u16>(), 1..20)) {
        let mut profile = Profile::new();
        for a in &actions {
            profile.bind(s, *a);
        }
        prop_assert_eq!(profile.lookup(&s), actions.last());
        prop_assert_eq!(profile.len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Unbind is a no-op on absent keys and idempotent
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unbind_absent_is_noop(
        bound in prop::collection::vec((shortcut_strategy(), any::<u16>()), 0..30),
        query in shortcut_strategy(),
    ) {
        let mut profile = Profile::new();
        for (s, a) in &bound {
            profile.bind(*s, *a);
        }
        let first = profile.unbind(&query);
        let len_after_first = profile.len();
        prop_assert_eq!(profile.unbind(&query), None);
        prop_assert_eq!(profile.len(), len_after_first);
        prop_assert_eq!(first.is_some(), bound.iter().any(|(s, _)| *s == query));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. No cross-talk between keys
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn other_keys_are_untouched(
        a in shortcut_strategy(),
        b in shortcut_strategy(),
        ops in prop::collection::vec(any::<u16>(), 1..10),
    ) {
        prop_assume!(a != b);
        let mut profile = Profile::new();
        profile.bind(b, 7_u16);
        for v in &ops {
            profile.bind(a, *v);
        }
        profile.unbind(&a);
        prop_assert_eq!(profile.lookup(&b), Some(&7));
        prop_assert_eq!(profile.lookup(&a), None);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Branch tables are isolated by trigger kind
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn branch_lookups_are_exact(bound in trigger_strategy(), query in trigger_strategy()) {
        let mut branch = Branch::new("frame");
        branch.bind(bound, 1_u8);
        let expected = (bound == query).then_some(&1_u8);
        prop_assert_eq!(branch.lookup(&query), expected);
    }
}
