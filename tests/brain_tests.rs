#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evo_walkers::simulation::brain::{Genome, NeuralNetwork, Topology};
use evo_walkers::simulation::error::SimulationError;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::tempdir;

fn walker_topology() -> Topology {
    Topology::new(13, 8, 7)
}

fn create_test_network(seed: u64) -> NeuralNetwork {
    let mut rng = StdRng::seed_from_u64(seed);
    NeuralNetwork::random(walker_topology(), &mut rng)
}

#[test]
fn test_genome_length_matches_topology() {
    assert_eq!(walker_topology().genome_length(), Some(13 * 8 + 8 * 7));
    assert_eq!(create_test_network(1).to_genome().weights().len(), 160);
    assert_eq!(walker_topology().to_string(), "13-8-7");
}

#[test]
fn test_random_weights_within_initial_range() {
    let network = create_test_network(2);
    assert_eq!(network.weights_ih().dim(), (13, 8));
    assert_eq!(network.weights_ho().dim(), (8, 7));
    for &w in network.weights_ih().iter().chain(network.weights_ho().iter()) {
        assert!((-1.0..=1.0).contains(&w));
    }
}

#[test]
fn test_predict_rejects_wrong_input_length() {
    let network = create_test_network(3);
    assert!(network.predict(&[0.0; 12]).is_none());
    assert!(network.predict(&[0.0; 14]).is_none());
    assert!(network.predict(&[]).is_none());
    assert_eq!(network.predict(&[0.0; 13]).map(|o| o.len()), Some(7));
}

#[test]
fn test_predict_outputs_bounded() {
    let network = create_test_network(4);
    let outputs = network.predict(&[100.0; 13]).expect("valid input length");
    for &o in &outputs {
        assert!((-1.0..=1.0).contains(&o));
    }
}

#[test]
fn test_predict_by_hand() {
    // 2 inputs, 1 hidden, 1 output.
    let topology = Topology::new(2, 1, 1);
    let genome = Genome::new(topology, vec![0.5, -0.25, 2.0]).expect("valid genome");
    let network = NeuralNetwork::from_genome(&genome);

    let outputs = network.predict(&[1.0, 2.0]).expect("valid input length");

    let hidden = (0.5f32 * 1.0 - 0.25 * 2.0).tanh();
    let expected = (hidden * 2.0).tanh();
    assert!((outputs[0] - expected).abs() < 1e-6);
}

#[test]
fn test_genome_layout_is_row_major() {
    let topology = Topology::new(2, 3, 2);
    let weights: Vec<f32> = (0..12).map(|i| i as f32).collect();
    let genome = Genome::new(topology, weights).expect("valid genome");
    let network = NeuralNetwork::from_genome(&genome);

    // weights_ih[i][j] at i * hidden + j
    assert_eq!(network.weights_ih()[[0, 0]], 0.0);
    assert_eq!(network.weights_ih()[[0, 2]], 2.0);
    assert_eq!(network.weights_ih()[[1, 0]], 3.0);
    // weights_ho[j][k] after the first block
    assert_eq!(network.weights_ho()[[0, 0]], 6.0);
    assert_eq!(network.weights_ho()[[0, 1]], 7.0);
    assert_eq!(network.weights_ho()[[2, 1]], 11.0);
}

#[test]
fn test_genome_rejects_wrong_length() {
    let result = Genome::new(walker_topology(), vec![0.0; 159]);
    assert!(matches!(
        result,
        Err(SimulationError::GenomeLength {
            expected: 160,
            actual: 159,
            ..
        })
    ));
}

#[test]
fn test_oversized_topology_is_rejected() {
    let huge = Topology::new(usize::MAX / 2, usize::MAX / 2, 1);
    assert_eq!(huge.genome_length(), None);
    assert!(matches!(
        Genome::new(huge, Vec::new()),
        Err(SimulationError::TopologyTooLarge { .. })
    ));

    let wraps = Topology::new(usize::MAX / 2 + 1, 2, 0);
    assert_eq!(wraps.genome_length(), None);
    assert!(Genome::new(wraps, Vec::new()).is_err());

    let json = r#"{"topology":{"input_nodes":4294967296,"hidden_nodes":4294967296,"output_nodes":1},"weights":[]}"#;
    assert!(serde_json::from_str::<Genome>(json).is_err());
}

#[test]
fn test_load_genome_topology_mismatch() {
    let mut network = create_test_network(5);
    let before = network.clone();
    let other = NeuralNetwork::random(Topology::new(13, 4, 7), &mut StdRng::seed_from_u64(0));

    let result = network.load_genome(&other.to_genome());

    assert!(matches!(result, Err(SimulationError::TopologyMismatch { .. })));
    assert_eq!(network, before);
}

#[test]
fn test_load_genome_replaces_weights() {
    let mut network = create_test_network(6);
    let donor = create_test_network(7);

    network.load_genome(&donor.to_genome()).expect("same topology");

    assert_eq!(network, donor);
}

#[test]
fn test_mutate_rate_zero_changes_nothing() {
    let mut network = create_test_network(8);
    let before = network.clone();
    let mut rng = StdRng::seed_from_u64(9);

    network.mutate(0.0, 0.5, &mut rng);

    assert_eq!(network, before);
}

#[test]
fn test_mutate_rate_one_stays_within_strength() {
    let mut network = create_test_network(10);
    let before = network.to_genome();
    let mut rng = StdRng::seed_from_u64(11);

    network.mutate(1.0, 0.5, &mut rng);

    let after = network.to_genome();
    let changed = before
        .weights()
        .iter()
        .zip(after.weights())
        .filter(|(a, b)| a != b)
        .count();
    assert!(changed > 150, "only {changed} weights changed");
    for (a, b) in before.weights().iter().zip(after.weights()) {
        assert!((a - b).abs() <= 0.5 + 1e-6);
    }
}

#[test]
fn test_crossover_takes_each_weight_from_a_parent() {
    let topology = walker_topology();
    let a = Genome::new(topology, vec![1.0; 160]).expect("valid genome");
    let b = Genome::new(topology, vec![-1.0; 160]).expect("valid genome");
    let mut rng = StdRng::seed_from_u64(12);

    let child = Genome::crossover(&a, &b, &mut rng);

    assert_eq!(child.topology(), topology);
    let from_a = child.weights().iter().filter(|&&w| w == 1.0).count();
    let from_b = child.weights().iter().filter(|&&w| w == -1.0).count();
    assert_eq!(from_a + from_b, 160);
    assert!(from_a > 40 && from_b > 40);
}

#[test]
fn test_crossover_mismatched_topologies_returns_first_parent() {
    let a = create_test_network(13).to_genome();
    let b = NeuralNetwork::random(Topology::new(13, 2, 7), &mut StdRng::seed_from_u64(0)).to_genome();
    let mut rng = StdRng::seed_from_u64(14);

    assert_eq!(Genome::crossover(&a, &b, &mut rng), a);
}

#[test]
fn test_genome_json_round_trip_and_validation() {
    let genome = create_test_network(15).to_genome();
    let json = serde_json::to_string(&genome).expect("serialize");
    let back: Genome = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, genome);

    let short = r#"{"topology":{"input_nodes":13,"hidden_nodes":8,"output_nodes":7},"weights":[0.1,0.2]}"#;
    assert!(serde_json::from_str::<Genome>(short).is_err());
}

#[test]
fn test_genome_save_and_load_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("best.json");
    let genome = create_test_network(16).to_genome();

    genome.save_to_file(&path).expect("save");
    let loaded = Genome::load_from_file(&path).expect("load");

    assert_eq!(loaded, genome);
}

#[test]
fn test_genome_load_missing_file_is_io_error() {
    let dir = tempdir().expect("temp dir");
    let result = Genome::load_from_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(SimulationError::Io(_))));
}

#[test]
fn test_genome_load_truncated_file_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"topology":{"input_nodes":2,"hidden_nodes":2,"output_nodes":2},"weights":[1.0]}"#,
    )
    .expect("write");

    assert!(matches!(Genome::load_from_file(&path), Err(SimulationError::Json(_))));
}

proptest! {
    #[test]
    fn prop_predict_only_accepts_exact_input_length(len in 0usize..40) {
        let network = create_test_network(17);
        let inputs = vec![0.3f32; len];
        prop_assert_eq!(network.predict(&inputs).is_some(), len == 13);
    }

    #[test]
    fn prop_genome_round_trip_is_lossless(seed in any::<u64>(), hidden in 1usize..16) {
        let mut rng = StdRng::seed_from_u64(seed);
        let network = NeuralNetwork::random(Topology::new(13, hidden, 7), &mut rng);
        let genome = network.to_genome();

        let rebuilt = NeuralNetwork::from_genome(&genome);

        prop_assert_eq!(&rebuilt, &network);
        prop_assert_eq!(rebuilt.to_genome(), genome);
    }

    #[test]
    fn prop_zero_weights_give_zero_outputs(
        inputs in prop::collection::vec(-1000.0f32..1000.0, 13),
    ) {
        let network = NeuralNetwork::zeros(walker_topology());
        let outputs = network.predict(&inputs).expect("valid input length");
        prop_assert!(outputs.iter().all(|&o| o == 0.0));
    }
}
