//! # Roster Lifecycle Integration Flows
//!
//! Drives a store through a full epoch change the way the handle workflow
//! does (bootstrap, candidate keying, adoption, handoff retirement) and
//! checks the phase resolver, quorum math, and share allocation agree at
//! every step.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use rand::{rngs::StdRng, Rng, SeedableRng};
    use roster_transition::{
        at_least_one_third_of_total, compute_participant_directory, more_than_two_thirds_of_total,
        InMemoryRosterStore, PrivateShareKey, RosterError, RosterPhase, RosterPhaseResolver,
        ShareId,
    };
    use shared_types::{NodeId, Roster, RosterEntry};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn roster(weights: &[(u64, u64)]) -> Roster {
        Roster::new(
            weights
                .iter()
                .map(|&(node_id, weight)| RosterEntry {
                    node_id: NodeId(node_id),
                    weight,
                    gossip_ca_certificate: vec![node_id as u8; 8],
                    tss_encryption_key: vec![0xE0 | node_id as u8; 8],
                    endpoints: vec![],
                })
                .collect(),
        )
    }

    /// The outgoing roster used across the lifecycle flows.
    fn roster_a() -> Roster {
        roster(&[(1, 1), (2, 2), (3, 3), (4, 0)])
    }

    /// The candidate that drops node 4 and doubles everyone else.
    fn roster_b() -> Roster {
        roster(&[(1, 2), (2, 4), (3, 6)])
    }

    // =============================================================================
    // BOOTSTRAP
    // =============================================================================

    #[test]
    fn test_bootstrap_self_transition_quorums() {
        let store = Arc::new(InMemoryRosterStore::genesis(roster_a()));
        let resolved = RosterPhaseResolver::new(store).resolve();

        assert_eq!(resolved.phase(), RosterPhase::Bootstrap);
        let weights = resolved.transition_weights().unwrap();

        // Total weight 6: a strong minority is any 2, and the self-transition
        // makes both sides of the snapshot identical.
        assert_eq!(weights.source_weight_threshold(), at_least_one_third_of_total(6));
        assert_eq!(weights.source_weight_threshold(), 2);
        assert_eq!(weights.source_node_weights(), weights.target_node_weights());

        let probe: BTreeSet<NodeId> = [NodeId(1)].into_iter().collect();
        assert_eq!(weights.num_target_nodes_in(&probe), 1);
    }

    // =============================================================================
    // TRANSITION
    // =============================================================================

    #[test]
    fn test_transition_quorums_and_removed_nodes() {
        let store = Arc::new(InMemoryRosterStore::genesis(roster_a()));
        store.set_candidate_roster(roster_b());
        let resolved = RosterPhaseResolver::new(store).resolve();

        assert_eq!(resolved.phase(), RosterPhase::Transition);
        assert_eq!(resolved.source_roster_hash().unwrap(), roster_a().hash());
        assert_eq!(resolved.target_roster_hash().unwrap(), roster_b().hash());
        assert_eq!(resolved.target_roster().unwrap(), Some(roster_b()));

        let removed = resolved.removed_node_ids().unwrap();
        assert_eq!(removed, [NodeId(4)].into_iter().collect());

        let weights = resolved.transition_weights().unwrap();
        assert_eq!(weights.target_weight_threshold(), more_than_two_thirds_of_total(12));
        assert_eq!(weights.target_weight_threshold(), 9);
        // The outgoing roster keeps its own blocking bound.
        assert_eq!(weights.source_weight_threshold(), 2);
    }

    #[test]
    fn test_candidate_directory_for_the_keying_node() {
        let store = Arc::new(InMemoryRosterStore::genesis(roster_a()));
        store.set_candidate_roster(roster(&[(1, 100), (2, 50)]));
        let resolved = RosterPhaseResolver::new(store).resolve();

        let candidate = resolved.target_roster().unwrap().unwrap();
        let directory = compute_participant_directory(
            &candidate,
            10,
            NodeId(1),
            &PrivateShareKey::new(vec![0x11; 32]),
        )
        .unwrap();

        assert_eq!(directory.total_shares(), 15);
        assert_eq!(directory.threshold(), 8);
        assert_eq!(directory.owned_share_ids().len(), 10);
        assert_eq!(directory.shares_of(NodeId(2)).len(), 5);
        // Public material comes from each member's encryption key.
        assert_eq!(
            directory.public_material(ShareId(12)).unwrap().as_bytes(),
            &[0xE2; 8]
        );
    }

    // =============================================================================
    // HANDOFF
    // =============================================================================

    #[test]
    fn test_handoff_window_blocks_transition_views() {
        let store = Arc::new(InMemoryRosterStore::genesis(roster_a()));
        store.set_candidate_roster(roster_b());
        store.adopt_candidate_roster().unwrap();
        let resolved = RosterPhaseResolver::new(Arc::clone(&store)).resolve();

        assert_eq!(resolved.phase(), RosterPhase::Handoff);
        assert_eq!(resolved.current_roster_hash(), roster_b().hash());
        assert!(matches!(
            resolved.source_roster_hash(),
            Err(RosterError::InvalidPhase { .. })
        ));
        assert!(matches!(
            resolved.transition_weights(),
            Err(RosterError::InvalidPhase { .. })
        ));

        // The retiring roster stays reachable by its own hash.
        let retiring = resolved.retiring_roster_hash().unwrap();
        assert_eq!(retiring, roster_a().hash());
        assert_eq!(resolved.find_related_roster(&retiring), Some(roster_a()));
    }

    #[test]
    fn test_concluded_handoff_returns_to_bootstrap() {
        let store = Arc::new(InMemoryRosterStore::genesis(roster_a()));
        store.set_candidate_roster(roster_b());
        store.adopt_candidate_roster().unwrap();
        store.conclude_handoff();
        let resolved = RosterPhaseResolver::new(store).resolve();

        assert_eq!(resolved.phase(), RosterPhase::Bootstrap);
        assert_eq!(resolved.current_roster_hash(), roster_b().hash());
        // The new epoch self-transitions over the adopted roster.
        let weights = resolved.transition_weights().unwrap();
        assert_eq!(weights.source_weight_threshold(), at_least_one_third_of_total(12));
    }

    // =============================================================================
    // RANDOMIZED INVARIANTS
    // =============================================================================

    #[test]
    fn test_quorum_invariants_hold_for_random_transitions() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..50 {
            let members = rng.gen_range(1..=20u64);
            let source: Vec<(u64, u64)> =
                (1..=members).map(|id| (id, rng.gen_range(0..1_000))).collect();
            let target: Vec<(u64, u64)> = (1..=members)
                .filter_map(|id| {
                    if rng.gen_bool(0.8) {
                        Some((id, rng.gen_range(0..1_000)))
                    } else {
                        None
                    }
                })
                .collect();

            let store = Arc::new(InMemoryRosterStore::genesis(roster(&source)));
            store.set_candidate_roster(roster(&target));
            let resolved = RosterPhaseResolver::new(store).resolve();
            let weights = resolved.transition_weights().unwrap();

            let source_total: u64 = source.iter().map(|(_, w)| w).sum();
            let target_total: u64 = target.iter().map(|(_, w)| w).sum();
            let blocking = weights.source_weight_threshold();
            let ratifying = weights.target_weight_threshold();

            assert!(blocking * 3 >= source_total);
            if target_total > 0 {
                assert!(ratifying * 3 > 2 * target_total);
                assert!((ratifying - 1) * 3 <= 2 * target_total);
            } else {
                assert_eq!(ratifying, 0);
            }

            let removed = resolved.removed_node_ids().unwrap();
            for id in &removed {
                assert!(!weights.target_includes(*id));
                assert!(weights.source_node_weights().contains_key(id));
            }
            assert_eq!(weights.num_target_nodes_in(&removed), 0);
        }
    }
}
