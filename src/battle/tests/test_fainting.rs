#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, ReplacementPolicy};
    use crate::battle::tests::common::{
        TestCreatureBuilder, assert_ok, create_test_battle, predictable_rng,
    };
    use crate::battle::use_cases::use_move;
    use crate::creature::Creature;
    use pretty_assertions::assert_eq;
    use schema::Side;

    fn names(creatures: &[Creature]) -> Vec<&str> {
        creatures.iter().map(Creature::name).collect()
    }

    #[test]
    fn test_next_living_member_replaces_fainted_active() {
        // Arrange: the lead is one hit from fainting and the second slot is already down.
        let mut battle = create_test_battle(
            vec![TestCreatureBuilder::new("Attacker").build()],
            vec![
                TestCreatureBuilder::new("Lead").with_hp(1).build(),
                TestCreatureBuilder::new("Down").with_hp(0).build(),
                TestCreatureBuilder::new("Backup").build(),
            ],
        );
        let mut rng = predictable_rng();

        // Act
        let outcome = assert_ok(use_move(&mut battle, 0, &mut rng));

        // Assert: positional swap of the replacement into slot 0.
        assert!(!battle.is_over());
        assert_eq!(names(battle.team2().creatures()), vec!["Backup", "Down", "Lead"]);
        assert_eq!(
            outcome.messages,
            vec![
                "Attacker used Tackle!".to_string(),
                "Lead took 1 damage!".to_string(),
                "Lead fainted!".to_string(),
                "Backup was sent out!".to_string(),
            ]
        );
        assert_eq!(battle.turn(), Side::Team2);
        assert!(outcome.report.is_none());
    }

    #[test]
    fn test_replacement_keeps_its_own_stat_overlay() {
        let mut battle = create_test_battle(
            vec![TestCreatureBuilder::new("Attacker").build()],
            vec![
                TestCreatureBuilder::new("Lead").with_hp(1).build(),
                TestCreatureBuilder::new("Backup").build(),
            ],
        );
        let lead_id = battle.team2().active().unwrap().id();
        let mut rng = predictable_rng();

        assert_ok(use_move(&mut battle, 0, &mut rng));

        let backup = battle.team2().active().unwrap();
        assert_eq!(backup.name(), "Backup");
        assert!(battle.overlay(backup.id()).is_some());
        // Overlays live for the whole battle, including for fainted members.
        assert!(battle.overlay(lead_id).is_some());
    }

    #[test]
    fn test_random_policy_only_picks_living_members() {
        let mut battle = create_test_battle(
            vec![TestCreatureBuilder::new("Attacker").build()],
            vec![
                TestCreatureBuilder::new("Lead").with_hp(1).build(),
                TestCreatureBuilder::new("Down").with_hp(0).build(),
                TestCreatureBuilder::new("Left").build(),
                TestCreatureBuilder::new("Right").build(),
            ],
        )
        .with_replacement_policy(ReplacementPolicy::Random);
        // Hit roll, then a replacement draw in the upper half of [Left, Right].
        let mut rng = crate::battle::rng::TurnRng::scripted(vec![0.0, 0.9]);

        assert_ok(use_move(&mut battle, 0, &mut rng));

        assert_eq!(battle.team2().active().unwrap().name(), "Right");
        assert!(matches!(
            battle.events().events().last(),
            Some(BattleEvent::TurnPassed { next: Side::Team2 })
        ));
    }
}
