use uuid::{Uuid, Variant};

/// Fresh random (v4) anonymous id in hyphenated form.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

/// Whether `candidate` is a hyphenated RFC 4122 v4 UUID.
pub fn is_valid(candidate: &str) -> bool {
    candidate.len() == 36
        && Uuid::try_parse(candidate)
            .is_ok_and(|id| id.get_version_num() == 4 && id.get_variant() == Variant::RFC4122)
}
