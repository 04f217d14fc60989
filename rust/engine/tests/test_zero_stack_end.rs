use stablerace_engine::engine::{Engine, GameConfig};
use stablerace_engine::game::Stage;

#[test]
fn first_fee_clamps_and_eliminates_without_error() {
    for seed in 1..=20 {
        let mut eng = Engine::new(GameConfig {
            players: 2,
            starting_tokens: 1,
            fee_multiplier: 1000,
            seed: Some(seed),
            ..GameConfig::default()
        })
        .expect("valid config");
        eng.step();
        // The first roll always stables a new horse, and someone holds its cards.
        let snap = eng.step();
        let broke: Vec<_> = snap.players.iter().filter(|p| p.tokens == 0).collect();
        assert!(!broke.is_empty(), "seed {}: nobody paid", seed);
        for p in &broke {
            assert!(p.eliminated);
        }
        assert_eq!(snap.pot, 2 - snap.total_tokens());
        assert_eq!(snap.stage, Stage::Done);
        assert_eq!(snap.last_event, "Simulation ended: fewer than two players.");
        for series in snap.history.values() {
            assert_eq!(series[0], 1);
            assert_eq!(series.len(), 2);
        }
    }
}

#[test]
fn rounds_stop_being_dealt_once_one_player_remains() {
    let mut eng = Engine::new(GameConfig {
        players: 3,
        starting_tokens: 3,
        fee_multiplier: 5,
        no_cap: true,
        seed: Some(4),
        ..GameConfig::default()
    })
    .unwrap();
    let snap = eng.run_until_done(100_000);
    assert!(snap.is_done());
    assert!(snap.alive().count() < 2);
}
