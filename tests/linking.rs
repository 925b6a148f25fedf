use race_live::store::{RaceAction, RaceState};
use race_live::{link, Id, RawRace};

const SNAPSHOT: &str = r#"{
    "persons": [{"id": 1, "organization_id": 5, "group_id": 9}],
    "organizations": [{"id": 5, "name": "Acme"}],
    "groups": [
        {"id": 9, "name": "B", "course_id": 2},
        {"id": 7, "name": "a", "course_id": null}
    ],
    "courses": [{"id": 2, "name": "Hill"}],
    "results": [{"id": 100, "person_id": 1}]
}"#;

fn snapshot() -> RawRace {
    serde_json::from_str(SNAPSHOT).unwrap()
}

#[test]
fn end_to_end_snapshot() {
    let race = link(snapshot());

    assert_eq!(race.groups.len(), 2);
    assert_eq!(race.groups[0].group.id, Id::Int(7));
    assert_eq!(race.groups[0].group.name, "a");
    assert!(race.groups[0].course.is_none());
    assert_eq!(race.groups[1].group.id, Id::Int(9));
    assert_eq!(race.groups[1].group.name, "B");
    let course = race.groups[1].course.as_ref().unwrap();
    assert_eq!(course.id, Id::Int(2));
    assert_eq!(course.name, "Hill");

    let person = &race.persons[0];
    assert_eq!(person.organization.as_ref().unwrap().name, "Acme");
    assert_eq!(person.group.as_ref().unwrap().group.name, "B");

    let result_person = race.results[0].person.as_ref().unwrap();
    assert_eq!(result_person.person.id, Id::Int(1));
}

#[test]
fn store_holds_the_linked_snapshot() {
    let mut state = RaceState::default();
    assert!(state.groups().is_empty());
    assert_eq!(state.updated_time(), 0.0);

    state.apply(RaceAction::SetRace(snapshot()));
    state.apply(RaceAction::SetUpdatedTime(1_700_000_000_000.0));

    assert_eq!(*state.race(), link(snapshot()));
    let names: Vec<&str> = state.groups().iter().map(|g| g.group.name.as_str()).collect();
    assert_eq!(names, ["a", "B"]);
    assert_eq!(state.updated_time(), 1_700_000_000_000.0);
}
