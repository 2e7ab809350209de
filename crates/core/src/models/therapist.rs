use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Therapist {
    pub id: &'static str,
    pub name: &'static str,
    pub specialty: &'static str,
}

/// The fixed roster the bundled appointment catalog refers to.
pub static THERAPISTS: [Therapist; 3] = [
    Therapist {
        id: "t1",
        name: "Dr. Anna Jónsdóttir",
        specialty: "Anxiety",
    },
    Therapist {
        id: "t2",
        name: "Dr. Björn Sigurðsson",
        specialty: "Stress",
    },
    Therapist {
        id: "t3",
        name: "Dr. Elín Karlsdóttir",
        specialty: "Depression",
    },
];

pub fn find_therapist(id: &str) -> Option<&'static Therapist> {
    THERAPISTS.iter().find(|therapist| therapist.id == id)
}
