use serde::Deserialize;

/// What the loader does when it meets a structural violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop at the first violation.
    #[default]
    FailFast,
    /// Keep going and report every violation at the end.
    CollectAll,
}

/// What the loader does when a key is defined twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The later row replaces the earlier one and a warning is recorded.
    #[default]
    LastWins,
    /// A repeated key is a `DuplicateKey` error.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadOptions {
    #[serde(rename = "error-policy")]
    pub error_policy: ErrorPolicy,
    #[serde(rename = "duplicate-policy")]
    pub duplicate_policy: DuplicatePolicy,
}

impl LoadOptions {
    /// Fail fast and reject duplicate keys.
    pub fn strict() -> Self {
        Self {
            error_policy: ErrorPolicy::FailFast,
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadOptionsBuilder {
    error_policy: Option<ErrorPolicy>,
    duplicate_policy: Option<DuplicatePolicy>,
}

impl LoadOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = Some(policy);
        self
    }
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }
    pub fn collect_all(self) -> Self {
        self.error_policy(ErrorPolicy::CollectAll)
    }
    pub fn strict(self) -> Self {
        self.duplicate_policy(DuplicatePolicy::Reject)
    }

    pub fn build(self) -> LoadOptions {
        LoadOptions {
            error_policy: self.error_policy.unwrap_or_default(),
            duplicate_policy: self.duplicate_policy.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fail_fast_and_last_wins() {
        let options = LoadOptions::default();
        assert_eq!(options.error_policy, ErrorPolicy::FailFast);
        assert_eq!(options.duplicate_policy, DuplicatePolicy::LastWins);
        assert_eq!(LoadOptionsBuilder::new().build(), options);
    }

    #[test]
    fn builder_sets_each_policy() {
        let options = LoadOptionsBuilder::new().collect_all().strict().build();
        assert_eq!(options.error_policy, ErrorPolicy::CollectAll);
        assert_eq!(options.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn strict_rejects_duplicates() {
        assert_eq!(LoadOptions::strict().duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(LoadOptions::strict().error_policy, ErrorPolicy::FailFast);
    }
}
