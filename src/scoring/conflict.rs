/// Constraint-keyed conflict table. A chunk mentioning any conflicting term
/// is penalized, not dropped; it contradicts the constraint without being
/// unsafe.
pub const CONSTRAINT_CONFLICTS: &[(&str, &[&str])] = &[
    ("quick", &["overnight", "slow-cooked", "slow cooker", "marinate for hours", "24 hours", "ferment"]),
    ("no-bake", &["bake", "oven", "roast", "broil"]),
    ("one-pot", &["multiple pans", "separate pot", "three pans"]),
    ("beginner", &["advanced technique", "sous vide", "temper", "laminate"]),
    ("budget", &["truffle", "saffron", "wagyu", "lobster", "caviar"]),
    ("no-stove", &["stovetop", "saucepan", "skillet"]),
];

/// Terms conflicting with any of the user's active constraints.
pub fn conflicting_terms(constraints: &[String]) -> Vec<&'static str> {
    let mut terms = Vec::new();
    for constraint in constraints {
        let constraint = constraint.to_lowercase();
        for (key, conflicts) in CONSTRAINT_CONFLICTS {
            if constraint.contains(key) {
                for term in *conflicts {
                    if !terms.contains(term) {
                        terms.push(*term);
                    }
                }
            }
        }
    }
    terms
}
