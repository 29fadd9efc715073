use std::collections::{HashMap, HashSet};

use murmur_types::{Address, User};

/// User records keyed by wallet address, with its own in-flight table so
/// one address is never fetched twice concurrently.
#[derive(Default)]
pub struct UsersState {
    users: HashMap<Address, User>,
    fetching: HashSet<Address>,
}

impl UsersState {
    pub fn user(&self, address: &str) -> Option<&User> {
        self.users.get(address)
    }

    pub fn is_fetching(&self, address: &str) -> bool {
        self.fetching.contains(address)
    }

    pub(super) fn fetch_started(&mut self, address: Address) {
        self.fetching.insert(address);
    }

    pub(super) fn fetch_settled(&mut self, address: &str) {
        self.fetching.remove(address);
    }

    pub(super) fn insert(&mut self, user: User) {
        self.users.insert(user.address.clone(), user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_user_is_a_valid_state() {
        let users = UsersState::default();
        assert!(users.user("0xabc").is_none());
        assert!(!users.is_fetching("0xabc"));
    }

    #[test]
    fn test_insert_keys_by_address() {
        let mut users = UsersState::default();
        users.insert(User {
            address: "0xabc".to_string(),
            ens: Some("alice.eth".to_string()),
            name: "Alice".to_string(),
        });
        assert_eq!(users.user("0xabc").map(|u| u.name.as_str()), Some("Alice"));
    }
}
