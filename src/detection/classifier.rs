//! Suspicion classification
//!
//! A request is suspicious when its text matches any attack signature or
//! its client address is flagged by reputation. The two signals are
//! OR-combined; the whitelist only silences the reputation signal.

use crate::config::{ConfigError, DetectionConfig};
use crate::detection::{IpReputationList, PatternSet};
use crate::models::{ParsedRequest, Signal};

pub struct SuspicionClassifier {
    patterns: PatternSet,
    reputation: IpReputationList,
}

impl SuspicionClassifier {
    pub fn new(patterns: PatternSet, reputation: IpReputationList) -> Self {
        SuspicionClassifier {
            patterns,
            reputation,
        }
    }

    /// Build the classifier from the detection section of the config
    pub fn from_config(config: &DetectionConfig) -> Result<Self, ConfigError> {
        let patterns = PatternSet::from_config(&config.patterns)?;
        let reputation =
            IpReputationList::new(config.blacklist.iter().cloned(), config.whitelist.iter().cloned());
        Ok(Self::new(patterns, reputation))
    }

    /// First signal that flags the request, if any
    pub fn assess(&self, request: &ParsedRequest) -> Option<Signal> {
        if let Some(name) = self.patterns.first_match(&request.request_text) {
            return Some(Signal::Pattern(name.to_string()));
        }
        if self.reputation.is_flagged(&request.client_ip) {
            return Some(Signal::Blacklisted);
        }
        None
    }

    pub fn classify(&self, request: &ParsedRequest) -> bool {
        self.patterns.matches_any(&request.request_text)
            || self.reputation.is_flagged(&request.client_ip)
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn reputation(&self) -> &IpReputationList {
        &self.reputation
    }
}
