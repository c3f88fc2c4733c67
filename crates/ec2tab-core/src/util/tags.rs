//! Tag list parsing.
//!
//! Providers hand tags over as an ordered list of key/value pairs with no
//! uniqueness guarantee. Reports want a mapping, so duplicates are collapsed
//! with a fixed policy: the later pair in list order wins.

use std::collections::BTreeMap;

use crate::source::raw::RawTag;

/// Key → value mapping recovered from a tag list.
///
/// Ordered by key so any rendering of the whole map is stable.
pub type Tags = BTreeMap<String, String>;

/// Collapse an ordered tag list into a mapping; last write wins.
pub fn parse_tags(tags: &[RawTag]) -> Tags {
    let mut parsed = Tags::new();
    for tag in tags {
        parsed.insert(tag.key.clone(), tag.value.clone());
    }
    parsed
}

/// Render a tag mapping as one opaque `key=value` string, keys ascending.
pub fn render_tags(tags: &Tags) -> String {
    tags.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(k: &str, v: &str) -> RawTag {
        RawTag {
            key: k.into(),
            value: v.into(),
        }
    }

    #[test]
    fn empty_list_yields_empty_map() {
        assert!(parse_tags(&[]).is_empty());
    }

    #[test]
    fn later_duplicate_wins() {
        let parsed = parse_tags(&[tag("K", "a"), tag("K", "b")]);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["K"], "b");
    }

    #[test]
    fn parsing_is_pure() {
        let tags = vec![tag("Name", "web"), tag("Client", "acme"), tag("Name", "api")];

        assert_eq!(parse_tags(&tags), parse_tags(&tags));
    }

    #[test]
    fn renders_sorted_pairs() {
        let parsed = parse_tags(&[tag("Name", "web"), tag("Client", "acme")]);
        assert_eq!(render_tags(&parsed), "Client=acme Name=web");
    }

    #[test]
    fn renders_empty_map_as_empty_string() {
        assert_eq!(render_tags(&Tags::new()), "");
    }
}
