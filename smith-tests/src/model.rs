#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

/// Built through [`Pet::new`] rather than a struct literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    name: String,
    owner: Option<Person>,
}

impl Pet {
    pub fn new(name: String, owner: Option<Person>) -> Self {
        Self { name, owner }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> Option<&Person> {
        self.owner.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker;

pub struct Draft {
    pub person: PersonBuilder,
    pub note: String,
}

include!(concat!(env!("OUT_DIR"), "/model/person_builder.rs"));
include!(concat!(env!("OUT_DIR"), "/model/pet_builder.rs"));
include!(concat!(env!("OUT_DIR"), "/model/marker_builder.rs"));
include!(concat!(env!("OUT_DIR"), "/model/draft_builder.rs"));
