use celestial::{NodeId, RoleHint, System};
use forge::{
    AddBodyRequest, GenerationOptions, add_habitable_planet, add_planetary_body, delete_node,
    generate_system, rename_node,
};
use rulepack::RulePack;
use system_processor::SystemProcessor;
use units::Length;

fn single_star_pack() -> RulePack {
    let mut pack = RulePack::standard().unwrap();
    for p in pack.binary.probability.values_mut() {
        *p = 0.0;
    }
    pack
}

fn bare_star(pack: &RulePack) -> System {
    let options = GenerationOptions {
        star_type: Some("G".into()),
        empty: true,
        ..Default::default()
    };
    generate_system("editing", pack, &options).unwrap()
}

fn json(system: &System) -> String {
    serde_json::to_string(system).unwrap()
}

#[test]
fn test_habitable_planet_is_habitable_after_processing() {
    let pack = single_star_pack();
    let processor = SystemProcessor::new(&pack);
    let system = bare_star(&pack);
    let root = system.root_id().unwrap();

    let edited = processor.process(add_habitable_planet(&system, &pack, &root).unwrap());
    let planet = edited
        .children(&root)
        .into_iter()
        .find_map(|n| n.as_body().filter(|b| b.role_hint == RoleHint::Planet))
        .unwrap();

    let surface = planet.physics.surface_temp_k;
    assert!((230.0..=340.0).contains(&surface), "surface {surface} K");
    assert!(planet.habitability.score > 0.0);
    assert!(planet.flight.is_some());
    assert_eq!(json(&edited), json(&processor.process(edited.clone())));
}

#[test]
fn test_edit_sequence_is_reproducible() {
    let pack = single_star_pack();
    let system = bare_star(&pack);
    let root = system.root_id().unwrap();

    let run = || {
        let mut s = add_habitable_planet(&system, &pack, &root).unwrap();
        let mut request = AddBodyRequest::new(root.clone(), RoleHint::Planet);
        request.semi_major_axis = Some(Length::from_au(6.0));
        s = add_planetary_body(&s, &pack, request).unwrap();
        SystemProcessor::new(&pack).process(s)
    };
    let (a, b) = (run(), run());
    assert_eq!(a.revision, 2);
    assert_eq!(json(&a), json(&b));
}

#[test]
fn test_failed_edit_leaves_system_untouched() {
    let pack = single_star_pack();
    let system = bare_star(&pack);
    let before = json(&system);

    let mut request = AddBodyRequest::new(NodeId::new("nowhere"), RoleHint::Planet);
    request.name = Some("Lost".into());
    assert!(add_planetary_body(&system, &pack, request).is_err());
    assert_eq!(json(&system), before);
}

#[test]
fn test_delete_then_process() {
    let pack = RulePack::standard().unwrap();
    let processor = SystemProcessor::new(&pack);
    let system = generate_system("pruning", &pack, &GenerationOptions::default()).unwrap();

    let Some(target) = system
        .nodes
        .values()
        .find(|n| n.as_body().is_some_and(|b| b.role_hint == RoleHint::Planet))
        .map(|n| n.id.clone())
    else {
        return;
    };
    let subtree = system.descendants(&target).len() + 1;
    let edited = processor.process(delete_node(&system, &target).unwrap());

    assert_eq!(edited.nodes.len(), system.nodes.len() - subtree);
    for node in edited.nodes.values() {
        if let Some(parent) = &node.parent_id {
            assert!(edited.get(parent).is_some());
        }
    }
}

#[test]
fn test_rename_root_renames_generated_bodies() {
    let pack = RulePack::standard().unwrap();
    let system = generate_system("renaming", &pack, &GenerationOptions::default()).unwrap();
    let root = system.root_id().unwrap();
    let old = system.name.clone();

    let edited = rename_node(&system, &root, "Magrathea").unwrap();
    for node in edited.nodes.values() {
        assert!(!node.name.starts_with(&old), "'{}' kept the old name", node.name);
        assert!(node.name.starts_with("Magrathea"));
    }
}
