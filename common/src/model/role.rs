use serde::{Deserialize, Serialize};
use std::fmt;

// Server-assigned role name, e.g. "combat_medic". Unknown roles are kept
// verbatim so a newer backend doesn't break older clients.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct Role(String);

const ROLE_COLORS: [(&str, &str); 7] = [
    ("combat_medic", "#EF4444"),
    ("xenobiologist", "#8B5CF6"),
    ("field_researcher", "#3B82F6"),
    ("operations_commander", "#10B981"),
    ("fleet_commander", "#F59E0B"),
    ("tactical_officer", "#EC4899"),
    ("containment_specialist", "#06B6D4"),
];

const UNKNOWN_ROLE_COLOR: &str = "#6B7280";

impl Role {
    pub fn new(name: &str) -> Self {
        Role(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn marker_color(&self) -> &'static str {
        ROLE_COLORS
            .iter()
            .find(|(name, _)| *name == self.0)
            .map(|(_, color)| *color)
            .unwrap_or(UNKNOWN_ROLE_COLOR)
    }

    // "combat_medic" -> "Combat Medic"
    pub fn display_name(&self) -> String {
        self.0
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(Role::new("combat_medic").display_name(), "Combat Medic");
        assert_eq!(Role::new("xenobiologist").display_name(), "Xenobiologist");
        assert_eq!(Role::new("").display_name(), "");
    }

    #[test]
    fn test_marker_color() {
        assert_eq!(Role::new("fleet_commander").marker_color(), "#F59E0B");
        assert_eq!(Role::new("stowaway").marker_color(), UNKNOWN_ROLE_COLOR);
    }
}
