//! Static IP reputation lists

use std::collections::HashSet;

/// Blacklisted and whitelisted client addresses
///
/// Whitelist membership always wins over the blacklist.
#[derive(Debug, Clone, Default)]
pub struct IpReputationList {
    whitelist: HashSet<String>,
    blacklist: HashSet<String>,
}

impl IpReputationList {
    pub fn new<B, W>(blacklist: B, whitelist: W) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        W: IntoIterator,
        W::Item: Into<String>,
    {
        let list = IpReputationList {
            blacklist: blacklist.into_iter().map(Into::into).collect(),
            whitelist: whitelist.into_iter().map(Into::into).collect(),
        };

        for ip in list.blacklist.intersection(&list.whitelist) {
            log::warn!("Address {} is both blacklisted and whitelisted; whitelist wins", ip);
        }

        list
    }

    /// True when the address is blacklisted and not whitelisted
    pub fn is_flagged(&self, ip: &str) -> bool {
        self.blacklist.contains(ip) && !self.whitelist.contains(ip)
    }

    pub fn is_whitelisted(&self, ip: &str) -> bool {
        self.whitelist.contains(ip)
    }

    pub fn is_blacklisted(&self, ip: &str) -> bool {
        self.blacklist.contains(ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blacklisted_is_flagged() {
        let list = IpReputationList::new(["94.23.74.168"], ["8.8.8.8"]);
        assert!(list.is_flagged("94.23.74.168"));
        assert!(!list.is_flagged("8.8.8.8"));
        assert!(!list.is_flagged("1.2.3.4"));
    }

    #[test]
    fn test_whitelist_wins() {
        let list = IpReputationList::new(["10.0.0.1", "10.0.0.2"], ["10.0.0.1"]);
        assert!(list.is_blacklisted("10.0.0.1"));
        assert!(list.is_whitelisted("10.0.0.1"));
        assert!(!list.is_flagged("10.0.0.1"));
        assert!(list.is_flagged("10.0.0.2"));
    }

    #[test]
    fn test_exact_match_only() {
        let list = IpReputationList::new(["5.135.213.197"], Vec::<String>::new());
        assert!(!list.is_flagged("5.135.213.19"));
        assert!(!list.is_flagged("5.135.213.197."));
    }

    #[test]
    fn test_empty_lists() {
        let list = IpReputationList::default();
        assert!(!list.is_flagged("94.23.74.168"));
    }
}
