//! Stable project identifiers
//!
//! IDEs cache per-project state keyed by the project GUID, so the GUID must be
//! a pure function of the assembly name.

/// Braced uppercase 8-4-4-4-12 GUID derived from the MD5 digest of `name`
pub fn project_guid(name: &str) -> String {
    let digest = md5::compute(name.as_bytes());
    format_guid(&digest.0)
}

fn format_guid(bytes: &[u8; 16]) -> String {
    let mut guid = String::with_capacity(38);
    guid.push('{');
    for (index, byte) in bytes.iter().enumerate() {
        if matches!(index, 4 | 6 | 8 | 10) {
            guid.push('-');
        }
        guid.push_str(&format!("{:02X}", byte));
    }
    guid.push('}');
    guid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_is_stable() {
        assert_eq!(project_guid("Assembly-CSharp"), project_guid("Assembly-CSharp"));
    }

    #[test]
    fn test_guid_matches_md5_digest() {
        // md5("abc") = 900150983cd24fb0d6963f7d28e17f72
        assert_eq!(project_guid("abc"), "{90015098-3CD2-4FB0-D696-3F7D28E17F72}");
    }

    #[test]
    fn test_guid_shape() {
        let guid = project_guid("Game.Runtime");
        assert_eq!(guid.len(), 38);
        assert!(guid.starts_with('{') && guid.ends_with('}'));
        let groups: Vec<usize> = guid[1..37].split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
        assert!(!guid.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_different_names_differ() {
        assert_ne!(project_guid("Game.Runtime"), project_guid("Game.Editor"));
    }
}
