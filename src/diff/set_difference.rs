use crate::parser::Username;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOutcome {
    pub unfollowers: Vec<Username>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub name: String,
    pub case_insensitive: bool,
    pub is_following: bool,
}

impl SearchOutcome {
    pub fn lookup(name: &str, followers: &[Username], case_insensitive: bool) -> Self {
        Self {
            name: name.to_string(),
            case_insensitive,
            is_following: is_following(name, followers, case_insensitive),
        }
    }

    pub fn message(&self) -> String {
        if self.is_following {
            format!("{} is following you.", self.name)
        } else {
            format!("{} is not following you.", self.name)
        }
    }
}

/// Accounts in `following` that are missing from `followers`.
///
/// Order and duplicates come from `following`. Comparison is always exact.
pub fn unfollowers(following: &[Username], followers: &[Username]) -> DiffOutcome {
    let follower_set: HashSet<&str> = followers.iter().map(String::as_str).collect();

    let unfollowers: Vec<Username> = following
        .iter()
        .filter(|username| !follower_set.contains(username.as_str()))
        .cloned()
        .collect();

    DiffOutcome {
        count: unfollowers.len(),
        unfollowers,
    }
}

/// Whether `name` appears in `followers`.
pub fn is_following(name: &str, followers: &[Username], case_insensitive: bool) -> bool {
    if case_insensitive {
        let needle = name.to_lowercase();
        followers.iter().any(|f| f.to_lowercase() == needle)
    } else {
        followers.iter().any(|f| f == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<Username> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_basic_difference() {
        let outcome = unfollowers(&names(&["a", "b", "c"]), &names(&["b"]));
        assert_eq!(outcome.unfollowers, names(&["a", "c"]));
        assert_eq!(outcome.count, 2);
    }

    #[test]
    fn test_count_matches_length() {
        let cases = [
            (names(&[]), names(&["x"])),
            (names(&["x", "y"]), names(&[])),
            (names(&["x", "x", "y"]), names(&["y"])),
            (names(&["p", "q"]), names(&["p", "q"])),
        ];
        for (following, followers) in &cases {
            let outcome = unfollowers(following, followers);
            assert_eq!(outcome.count, outcome.unfollowers.len());
            assert!(outcome.unfollowers.iter().all(|u| following.contains(u)));
            assert!(outcome.unfollowers.iter().all(|u| !followers.contains(u)));
        }
    }

    #[test]
    fn test_empty_following() {
        let outcome = unfollowers(&[], &names(&["a", "b"]));
        assert!(outcome.unfollowers.is_empty());
        assert_eq!(outcome.count, 0);
    }

    #[test]
    fn test_empty_followers_returns_following() {
        let following = names(&["z", "a", "m"]);
        let outcome = unfollowers(&following, &[]);
        assert_eq!(outcome.unfollowers, following);
        assert_eq!(outcome.count, 3);
    }

    #[test]
    fn test_diff_is_case_sensitive() {
        let outcome = unfollowers(&names(&["Alice"]), &names(&["alice"]));
        assert_eq!(outcome.unfollowers, names(&["Alice"]));
    }

    #[test]
    fn test_duplicates_in_following_are_kept() {
        let outcome = unfollowers(&names(&["a", "b", "a"]), &names(&["b"]));
        assert_eq!(outcome.unfollowers, names(&["a", "a"]));
        assert_eq!(outcome.count, 2);
    }

    #[test]
    fn test_diff_is_idempotent() {
        let following = names(&["a", "b", "c", "d"]);
        let followers = names(&["d", "b"]);
        assert_eq!(
            unfollowers(&following, &followers),
            unfollowers(&following, &followers)
        );
    }

    #[test]
    fn test_lookup_modes() {
        let followers = names(&["Bob"]);
        assert!(is_following("bob", &followers, true));
        assert!(!is_following("bob", &followers, false));
        assert!(is_following("Bob", &followers, false));
        assert!(!is_following("carol", &followers, true));
        assert_eq!(followers, names(&["Bob"]));
    }

    #[test]
    fn test_search_outcome_message() {
        let outcome = SearchOutcome::lookup("bob", &names(&["Bob"]), true);
        assert!(outcome.is_following);
        assert_eq!(outcome.message(), "bob is following you.");

        let outcome = SearchOutcome::lookup("bob", &names(&["Bob"]), false);
        assert_eq!(outcome.message(), "bob is not following you.");
    }
}
