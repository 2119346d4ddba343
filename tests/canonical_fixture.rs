use tmsim::{
    from_json, parse, run, to_dot, to_json, Definition, Direction, TuringMachine, Verdict,
};

const LEFT: Direction = Direction::Left;
const RIGHT: Direction = Direction::Right;

/// Binary duplication built through the definition API: "w" becomes " w w".
///
/// The table has 22 entries: separate carry (B, C) and append (D, H) states per bit,
/// one shared walk-back state E, and G restoring the marks before halting.
fn binary_duplication() -> Definition {
    let mut m = Definition::new();
    m.set_blank_symbol(' ').unwrap();
    m.set_start_state("A").unwrap();
    m.add_end_state("G");

    m.add_transition("A", '0', 'X', RIGHT, "B");
    m.add_transition("A", '1', 'Y', RIGHT, "C");
    m.add_transition("A", ' ', ' ', LEFT, "G");
    m.add_transition("B", '0', '0', RIGHT, "B");
    m.add_transition("B", '1', '1', RIGHT, "B");
    m.add_transition("B", ' ', ' ', RIGHT, "D");
    m.add_transition("C", '0', '0', RIGHT, "C");
    m.add_transition("C", '1', '1', RIGHT, "C");
    m.add_transition("C", ' ', ' ', RIGHT, "H");
    m.add_transition("D", '0', '0', RIGHT, "D");
    m.add_transition("D", '1', '1', RIGHT, "D");
    m.add_transition("D", ' ', '0', LEFT, "E");
    m.add_transition("H", '0', '0', RIGHT, "H");
    m.add_transition("H", '1', '1', RIGHT, "H");
    m.add_transition("H", ' ', '1', LEFT, "E");
    m.add_transition("E", '0', '0', LEFT, "E");
    m.add_transition("E", '1', '1', LEFT, "E");
    m.add_transition("E", ' ', ' ', LEFT, "E");
    m.add_transition("E", 'X', 'X', RIGHT, "A");
    m.add_transition("E", 'Y', 'Y', RIGHT, "A");
    m.add_transition("G", 'X', '0', LEFT, "G");
    m.add_transition("G", 'Y', '1', LEFT, "G");
    m
}

#[test]
fn test_canonical_fixture_accepts() {
    let definition = binary_duplication();
    assert_eq!(definition.transition_count(), 22);
    let mut machine = TuringMachine::new(&definition).unwrap();

    let outcome = machine.compute("101", 200);
    assert!(outcome.halted);
    assert!(outcome.accepted);
    assert_eq!(outcome.state, "G");
    assert_eq!(outcome.trimmed_tape(), "101 101");
}

#[test]
fn test_canonical_fixture_budgets() {
    let definition = binary_duplication();
    let mut machine = TuringMachine::new(&definition).unwrap();

    let short = machine.compute("101", 10);
    assert_eq!(short.verdict(), Verdict::Undecided);

    let none = machine.compute("101", 0);
    assert_eq!(none.tape, "101");
    assert!(!none.halted);
    assert!(!none.accepted);
}

#[test]
fn test_dsl_and_api_agree() {
    let source = include_str!("../machines/binary-duplication.tm");
    assert_eq!(parse(source).unwrap(), binary_duplication());
}

#[test]
fn test_structured_round_trip() {
    let definition = binary_duplication();
    let restored = from_json(&to_json(&definition).unwrap()).unwrap();

    let original: Vec<_> = definition.transitions().into_iter().collect();
    let copied: Vec<_> = restored.transitions().into_iter().collect();
    assert_eq!(copied, original);
}

#[test]
fn test_batch_is_deterministic() {
    let definition = binary_duplication();
    let inputs = ["101", "", "0110", "2"];

    let first = run(&definition, &inputs, 200).unwrap();
    let second = run(&definition, &inputs, 200).unwrap();
    assert_eq!(first, second);

    let verdicts: Vec<_> = first.iter().map(|o| o.verdict()).collect();
    assert_eq!(
        verdicts,
        vec![
            Verdict::Accepted,
            Verdict::Accepted,
            Verdict::Accepted,
            Verdict::Rejected
        ]
    );
    assert_eq!(first[2].trimmed_tape(), "0110 0110");
}

#[test]
fn test_graph_has_one_edge_per_transition() {
    let definition = binary_duplication();
    let dot = to_dot(&definition);

    let edges = dot.lines().filter(|l| l.contains("label =")).count();
    assert_eq!(edges, definition.transition_count());
    assert_eq!(dot.matches("doublecircle").count(), 1);
}
