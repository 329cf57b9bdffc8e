// Pipe-delimited leaders table for embedding in a sidebar.

use crate::compute::LeaderSet;

pub const HEADER: &str = "Stat|Player|Total";
pub const SEPARATOR: &str = "-|-|-";

/// Render one row per requested key, in the order given.
///
/// Only the rank-1 leader of each key is shown. Keys absent from the set
/// (or with no leaders) render with empty player and total fields.
pub fn render<K: AsRef<str>>(leaders: &LeaderSet, keys: &[K]) -> String {
    let mut lines = Vec::with_capacity(keys.len() + 2);
    lines.push(HEADER.to_string());
    lines.push(SEPARATOR.to_string());

    for key in keys {
        let key = key.as_ref();
        let row = match leaders.top(key) {
            Some(top) => format!("{}|{}|{}", key.to_uppercase(), top.name, top.value),
            None => format!("{}||", key.to_uppercase()),
        };
        lines.push(row);
    }

    let mut table = lines.join("\n");
    table.push('\n');
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{LeaderEntry, LeaderValue};

    fn entry(name: &str, value: LeaderValue) -> LeaderEntry {
        LeaderEntry {
            name: name.into(),
            value,
        }
    }

    fn sample() -> LeaderSet {
        let mut set = LeaderSet::new();
        set.insert(
            "hr",
            vec![
                entry("A Judge", LeaderValue::Integer(58)),
                entry("S Ohtani", LeaderValue::Integer(54)),
            ],
        );
        set.insert("avg", vec![entry("L Arraez", LeaderValue::Rate(0.354))]);
        set.insert("sb", vec![LeaderEntry::none_qualified()]);
        set
    }

    #[test]
    fn renders_header_and_top_leader_per_row() {
        let table = render(&sample(), &["hr", "avg"]);
        assert_eq!(
            table,
            "Stat|Player|Total\n-|-|-\nHR|A Judge|58\nAVG|L Arraez|.354\n"
        );
    }

    #[test]
    fn rows_follow_requested_order() {
        let table = render(&sample(), &["sb", "avg", "hr"]);
        let stats: Vec<&str> = table
            .lines()
            .skip(2)
            .map(|line| line.split('|').next().unwrap())
            .collect();
        assert_eq!(stats, vec!["SB", "AVG", "HR"]);
    }

    #[test]
    fn sentinel_renders_as_none_qualified_zero() {
        let table = render(&sample(), &["sb"]);
        assert!(table.contains("\nSB|None Qualified|0\n"));
    }

    #[test]
    fn missing_key_renders_empty_fields() {
        let table = render(&sample(), &["era"]);
        assert!(table.ends_with("\nERA||\n"));

        let mut set = LeaderSet::new();
        set.insert("w", Vec::new());
        assert!(render(&set, &["w"]).ends_with("\nW||\n"));
    }

    #[test]
    fn no_keys_renders_just_the_header() {
        let keys: [&str; 0] = [];
        assert_eq!(render(&sample(), &keys), "Stat|Player|Total\n-|-|-\n");
    }
}
