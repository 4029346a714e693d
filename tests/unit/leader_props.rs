use proptest::prelude::*;
use tessera_core::domain::coordination::coordination_leader;
use tessera_core::foundation::OperatorAddress;

fn roster_strategy() -> impl Strategy<Value = Vec<OperatorAddress>> {
    proptest::collection::vec("[0-9a-fA-F]{40}", 1..12)
        .prop_map(|addresses| addresses.into_iter().map(OperatorAddress::new).collect())
}

proptest! {
    #[test]
    fn leader_is_a_member_of_the_unique_operator_set(
        roster in roster_strategy(),
        seed in proptest::array::uniform32(any::<u8>()),
    ) {
        let leader = coordination_leader(&seed, &roster).expect("non-empty roster");
        prop_assert!(roster.contains(&leader));
    }

    #[test]
    fn leader_is_invariant_under_roster_permutation(
        roster in roster_strategy(),
        seed in proptest::array::uniform32(any::<u8>()),
        rotation in any::<usize>(),
    ) {
        let expected = coordination_leader(&seed, &roster).expect("non-empty roster");

        let mut rotated = roster.clone();
        let len = rotated.len();
        rotated.rotate_left(rotation % len);
        prop_assert_eq!(
            coordination_leader(&seed, &rotated).expect("non-empty roster"),
            expected.clone()
        );

        let mut reversed = roster;
        reversed.reverse();
        prop_assert_eq!(
            coordination_leader(&seed, &reversed).expect("non-empty roster"),
            expected
        );
    }

    #[test]
    fn leader_is_invariant_under_seat_duplication(
        roster in roster_strategy(),
        seed in proptest::array::uniform32(any::<u8>()),
        duplicated_seat in any::<usize>(),
    ) {
        let expected = coordination_leader(&seed, &roster).expect("non-empty roster");

        let mut duplicated = roster.clone();
        let seat = roster[duplicated_seat % roster.len()].clone();
        duplicated.push(seat);
        prop_assert_eq!(
            coordination_leader(&seed, &duplicated).expect("non-empty roster"),
            expected
        );
    }

    #[test]
    fn election_is_deterministic(
        roster in roster_strategy(),
        seed in proptest::array::uniform32(any::<u8>()),
    ) {
        let first = coordination_leader(&seed, &roster);
        let second = coordination_leader(&seed, &roster);
        prop_assert_eq!(first, second);
    }
}
