//! Host and protocol restrictions of a routing scope.

use serde::Serialize;

use crate::config::ConfigValue;

/// Allowed values per restriction kind. An empty list means unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Restrictions {
    pub protocols: Vec<String>,
    pub tlds: Vec<String>,
    pub domains: Vec<String>,
    pub subdomains: Vec<String>,
    pub hosts: Vec<String>,
}

impl Restrictions {
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
            && self.tlds.is_empty()
            && self.domains.is_empty()
            && self.subdomains.is_empty()
            && self.hosts.is_empty()
    }
}

/// Appends a scalar or list of scalars to `target`, skipping duplicates.
pub(crate) fn extend_unique(target: &mut Vec<String>, value: &ConfigValue) {
    for item in value.string_list() {
        if !item.is_empty() && !target.contains(&item) {
            target.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_unique() {
        let mut target = vec!["com".to_string()];
        extend_unique(&mut target, &ConfigValue::from(vec!["com", "net", ""]));
        extend_unique(&mut target, &ConfigValue::from("org"));
        assert_eq!(target, vec!["com", "net", "org"]);
    }
}
