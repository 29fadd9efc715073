use murmur_types::Address;

/// Viewer wallet session. Absent address means browsing logged out;
/// repost/like affordances are inert in that state.
#[derive(Default)]
pub struct Web3State {
    address: Option<Address>,
    ens: Option<String>,
}

impl Web3State {
    pub fn logged_in(&self) -> bool {
        self.address.is_some()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn ens(&self) -> Option<&str> {
        self.ens.as_deref()
    }

    pub(super) fn connect(&mut self, address: Address, ens: Option<String>) {
        self.address = Some(address);
        self.ens = ens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_out_by_default() {
        let web3 = Web3State::default();
        assert!(!web3.logged_in());
        assert_eq!(web3.ens(), None);
    }

    #[test]
    fn test_connect_stores_session() {
        let mut web3 = Web3State::default();
        web3.connect("0xabc".to_string(), Some("alice.eth".to_string()));
        assert!(web3.logged_in());
        assert_eq!(web3.address(), Some("0xabc"));
        assert_eq!(web3.ens(), Some("alice.eth"));
    }
}
