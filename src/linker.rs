//! Links the flat race records into an object graph.
//!
//! Every foreign key is resolved to the first record carrying that id, or to
//! nothing when the key is missing, blank, or matches no record. The result
//! is a fresh [`LinkedRace`]; the raw snapshot is consumed, never patched.

use crate::model::{Course, Group, Id, Organization, Person, RaceData, RaceResult, RawRace};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedGroup {
    #[serde(flatten)]
    pub group: Group,
    pub course: Option<Rc<Course>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedPerson {
    #[serde(flatten)]
    pub person: Person,
    pub organization: Option<Rc<Organization>>,
    pub group: Option<Rc<LinkedGroup>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedResult {
    #[serde(flatten)]
    pub result: RaceResult,
    pub person: Option<Rc<LinkedPerson>>,
}

/// A race snapshot with all references resolved.
///
/// `groups` and `courses` are ordered by case-insensitive name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkedRace {
    pub data: Option<RaceData>,
    pub persons: Vec<Rc<LinkedPerson>>,
    pub organizations: Vec<Rc<Organization>>,
    pub groups: Vec<Rc<LinkedGroup>>,
    pub courses: Vec<Rc<Course>>,
    pub results: Vec<Rc<LinkedResult>>,
}

/// Id and display name shared by all linkable records.
pub trait Record {
    fn id(&self) -> &Id;
    fn name(&self) -> &str;
}

impl Record for Organization {
    fn id(&self) -> &Id {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Course {
    fn id(&self) -> &Id {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for LinkedGroup {
    fn id(&self) -> &Id {
        &self.group.id
    }
    fn name(&self) -> &str {
        &self.group.name
    }
}

impl Record for LinkedPerson {
    fn id(&self) -> &Id {
        &self.person.id
    }
    fn name(&self) -> &str {
        &self.person.name
    }
}

/// Map each id to the first record that carries it.
fn index_by_id<T: Record>(items: &[Rc<T>]) -> HashMap<&Id, Rc<T>> {
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        index.entry(item.id()).or_insert_with(|| Rc::clone(item));
    }
    index
}

/// Blank keys never match, even if some record happens to carry that id.
fn resolve<T>(index: &HashMap<&Id, Rc<T>>, key: Option<&Id>) -> Option<Rc<T>> {
    key.filter(|id| !id.is_blank()).and_then(|id| index.get(id).cloned())
}

/// Stable sort by upper-cased name.
fn sort_by_name<T: Record>(items: &mut [Rc<T>]) {
    items.sort_by_cached_key(|item| item.name().to_uppercase());
}

/// Resolve every reference of `raw` and order groups and courses by name.
pub fn link(raw: RawRace) -> LinkedRace {
    let RawRace {
        data,
        persons,
        organizations,
        groups,
        courses,
        results,
    } = raw;

    let organizations: Vec<Rc<Organization>> = organizations.into_iter().map(Rc::new).collect();
    let mut courses: Vec<Rc<Course>> = courses.into_iter().map(Rc::new).collect();

    let mut groups: Vec<Rc<LinkedGroup>> = {
        let courses_by_id = index_by_id(&courses);
        groups
            .into_iter()
            .map(|group| {
                let course = resolve(&courses_by_id, group.course_id.as_ref());
                Rc::new(LinkedGroup { group, course })
            })
            .collect()
    };

    let persons: Vec<Rc<LinkedPerson>> = {
        let organizations_by_id = index_by_id(&organizations);
        let groups_by_id = index_by_id(&groups);
        persons
            .into_iter()
            .map(|person| {
                let organization = resolve(&organizations_by_id, person.organization_id.as_ref());
                let group = resolve(&groups_by_id, person.group_id.as_ref());
                Rc::new(LinkedPerson {
                    person,
                    organization,
                    group,
                })
            })
            .collect()
    };

    let results: Vec<Rc<LinkedResult>> = {
        let persons_by_id = index_by_id(&persons);
        results
            .into_iter()
            .map(|result| {
                let person = resolve(&persons_by_id, result.person_id.as_ref());
                Rc::new(LinkedResult { result, person })
            })
            .collect()
    };

    sort_by_name(&mut groups);
    sort_by_name(&mut courses);

    debug!(
        "Linked race: {} persons, {} organizations, {} groups, {} courses, {} results",
        persons.len(),
        organizations.len(),
        groups.len(),
        courses.len(),
        results.len()
    );

    LinkedRace {
        data,
        persons,
        organizations,
        groups,
        courses,
        results,
    }
}

impl LinkedRace {
    /// Strip the resolved references again, keeping the current list order.
    pub fn to_raw(&self) -> RawRace {
        RawRace {
            data: self.data.clone(),
            persons: self.persons.iter().map(|p| p.person.clone()).collect(),
            organizations: self.organizations.iter().map(|o| (**o).clone()).collect(),
            groups: self.groups.iter().map(|g| g.group.clone()).collect(),
            courses: self.courses.iter().map(|c| (**c).clone()).collect(),
            results: self.results.iter().map(|r| r.result.clone()).collect(),
        }
    }

    /// Results of the persons running in group `group_id`, in snapshot order.
    pub fn results_for_group(&self, group_id: &Id) -> Vec<Rc<LinkedResult>> {
        self.results
            .iter()
            .filter(|r| {
                r.person
                    .as_ref()
                    .and_then(|p| p.group.as_ref())
                    .is_some_and(|g| g.group.id == *group_id)
            })
            .cloned()
            .collect()
    }

    pub fn title(&self) -> &str {
        self.data.as_ref().map(|d| d.name.as_str()).unwrap_or("")
    }
}
