//! Property tests for board building: boards depend only on the set of
//! completions, never on their order in the snapshot.

use proptest::prelude::*;

use seasonboard_core::{Completion, MissionRef};
use seasonboard_runner::{export_csv, BoardBuilder, BoardConfig, Snapshot};

const NAMES: [&str; 5] = ["Alice", "Bob", "Carol", "Dave", "Erin"];

fn arb_completion() -> impl Strategy<Value = (Vec<usize>, bool, u64, Option<u64>)> {
    (
        prop::collection::vec(0..NAMES.len(), 1..4),
        any::<bool>(),
        1u64..20,
        prop::option::of(1u64..4),
    )
}

fn build(specs: &[(Vec<usize>, bool, u64, Option<u64>)]) -> Vec<Completion> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (team, solo, mission, variant))| {
            let names = team.iter().map(|&n| NAMES[n].to_string()).collect();
            let mut mref = MissionRef::new(*mission);
            if let Some(v) = variant {
                mref = mref.with_variant(*v);
            }
            Completion::new(i as u64 + 1, names, mref).solo(*solo)
        })
        .collect()
}

proptest! {
    #[test]
    fn fingerprint_ignores_completion_order(
        specs in prop::collection::vec(arb_completion(), 0..40),
    ) {
        let completions = build(&specs);
        let mut reversed = completions.clone();
        reversed.reverse();

        let config = BoardConfig::default();
        let forward = Snapshot { completions, ..Snapshot::default() };
        let backward = Snapshot { completions: reversed, ..Snapshot::default() };

        let a = BoardBuilder::new(&forward, &config).all_time();
        let b = BoardBuilder::new(&backward, &config).all_time();
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
        prop_assert_eq!(export_csv(&a).unwrap(), export_csv(&b).unwrap());
    }

    #[test]
    fn csv_has_one_row_per_solver(
        specs in prop::collection::vec(arb_completion(), 0..40),
    ) {
        let snapshot = Snapshot { completions: build(&specs), ..Snapshot::default() };
        let board = BoardBuilder::new(&snapshot, &BoardConfig::default()).all_time();
        let csv = export_csv(&board).unwrap();
        prop_assert_eq!(csv.lines().count(), board.len() + 1);
        prop_assert!(board.len() <= NAMES.len());
    }
}
