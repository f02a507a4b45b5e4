//! Alternate station names.
//!
//! Different endpoints name some stations differently ("New York" on the
//! station list, "New York Penn Station" on stop lists). This table maps a
//! station code to the other names it is known by.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::domain::Station;

static ALIASES: LazyLock<HashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    HashMap::from([
        ("AM", &["Aberdeen-Matawan"][..]),
        ("CN", &["Convent Station"][..]),
        ("HI", &["Highland Avenue"][..]),
        ("HS", &["Montclair Heights"][..]),
        ("JA", &["Jersey Avenue"][..]),
        ("MS", &["Mountain Avenue"][..]),
        ("MT", &["Mountain Station"][..]),
        ("ND", &["Newark Broad Street"][..]),
        ("NP", &["Newark Penn Station"][..]),
        ("NY", &["New York Penn Station"][..]),
        ("NZ", &["North Elizabeth"][..]),
        ("PJ", &["Princeton Junction"][..]),
        ("PP", &["Point Pleasant Beach"][..]),
        ("SE", &["Secaucus Upper Lvl"][..]),
        ("UM", &["Upper Montclair"][..]),
        ("UV", &["Montclair State U"][..]),
        ("WG", &["Watchung Avenue"][..]),
        ("WT", &["Watsessing Avenue"][..]),
    ])
});

/// Other names for the station with the given code; empty if there are none.
///
/// # Examples
///
/// ```
/// use njt_feed::stations::aliases_for;
///
/// assert_eq!(aliases_for("NY"), ["New York Penn Station"]);
/// assert!(aliases_for("WL").is_empty());
/// ```
pub fn aliases_for(code: &str) -> &'static [&'static str] {
    ALIASES.get(code).copied().unwrap_or(&[])
}

/// Fill in `station.aliases` from the table, joining on the station code.
pub fn attach_aliases(station: &mut Station) {
    station.aliases = aliases_for(&station.code)
        .iter()
        .map(|alias| alias.to_string())
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(aliases_for("SE"), ["Secaucus Upper Lvl"]);
        assert_eq!(aliases_for("NY"), ["New York Penn Station"]);
        assert_eq!(aliases_for("AM"), ["Aberdeen-Matawan"]);
    }

    #[test]
    fn unknown_codes_are_empty() {
        assert!(aliases_for("").is_empty());
        assert!(aliases_for("ny").is_empty());
        assert!(aliases_for("XX").is_empty());
    }

    #[test]
    fn attach_joins_on_code() {
        let mut station = Station::new("NP", "Newark Penn");
        attach_aliases(&mut station);
        assert_eq!(
            station.aliases.into_iter().collect::<Vec<_>>(),
            vec!["Newark Penn Station".to_string()]
        );

        let mut station = Station::new("WL", "Woodcliff Lake");
        attach_aliases(&mut station);
        assert!(station.aliases.is_empty());
    }

    #[test]
    fn secaucus_lower_level_has_no_alias() {
        assert!(aliases_for("TS").is_empty());
    }

    #[test]
    fn table_has_eighteen_stations() {
        assert_eq!(ALIASES.len(), 18);
    }

    #[test]
    fn every_entry_is_a_two_character_code() {
        assert!(ALIASES.keys().all(|code| code.len() == 2));
        assert!(ALIASES.values().all(|names| !names.is_empty()));
    }
}
